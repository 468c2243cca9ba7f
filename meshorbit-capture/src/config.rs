//! Capture configuration

use meshorbit_core::{OrbitConfig, Result};
use meshorbit_render::{Projection, RenderSettings, TrackTo};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One-time camera setup applied before the first pose
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraSetup {
    pub projection: Projection,
    pub track: TrackTo,
}

/// Everything a capture session needs besides its inputs
///
/// The default is the reference capture: twelve orthographic 2000x2000
/// views taken 60 degrees off the vertical axis, three units from the origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub orbit: OrbitConfig,
    pub render: RenderSettings,
    pub camera: CameraSetup,
    /// Longest a single render may take before the session fails
    #[serde(default)]
    pub render_timeout: Option<Duration>,
}

impl CaptureConfig {
    /// Check every part of the configuration
    pub fn validate(&self) -> Result<()> {
        self.orbit.validate()?;
        self.render.validate()?;
        self.camera.projection.validate()
    }
}
