//! Orbit configuration and camera pose generation
//!
//! Poses sample a sphere of fixed radius around the origin. Angles are
//! given in degrees as `(theta, phi)` pairs: theta is the polar angle
//! measured from the +Z axis, phi the azimuth measured from +X toward +Y.

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Camera distance from the origin used by the reference orbit
pub const REFERENCE_RADIUS: f32 = 3.0;

/// Polar angle of the reference orbit, in degrees
pub const REFERENCE_THETA: f32 = 60.0;

/// Number of equally spaced azimuths in the reference orbit
pub const REFERENCE_VIEWS: usize = 12;

/// Where the camera goes during a capture session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// Distance from the origin to the camera
    pub radius: f32,
    /// Ordered `(theta_degrees, phi_degrees)` pairs
    pub angle_pairs: Vec<(f32, f32)>,
}

impl OrbitConfig {
    /// Create an orbit configuration without validating it
    pub fn new(radius: f32, angle_pairs: Vec<(f32, f32)>) -> Self {
        Self { radius, angle_pairs }
    }

    /// Twelve views at 60 degrees from vertical, every 30 degrees of azimuth
    pub fn reference() -> Self {
        Self::ring(REFERENCE_RADIUS, REFERENCE_THETA, REFERENCE_VIEWS)
    }

    /// `count` equally spaced azimuths starting at 0 at a fixed polar angle
    pub fn ring(radius: f32, theta: f32, count: usize) -> Self {
        let step = if count == 0 { 0.0 } else { 360.0 / count as f32 };
        let angle_pairs = (0..count).map(|i| (theta, step * i as f32)).collect();
        Self { radius, angle_pairs }
    }

    /// Reject non-positive radii and empty angle lists
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "orbit radius must be positive, got {}",
                self.radius
            )));
        }
        if self.angle_pairs.is_empty() {
            return Err(Error::InvalidConfig("orbit has no angle pairs".to_string()));
        }
        if let Some((theta, phi)) = self
            .angle_pairs
            .iter()
            .find(|(theta, phi)| !theta.is_finite() || !phi.is_finite())
        {
            return Err(Error::InvalidConfig(format!(
                "orbit angles must be finite, got ({}, {})",
                theta, phi
            )));
        }
        Ok(())
    }

    /// Number of poses this configuration produces
    pub fn len(&self) -> usize {
        self.angle_pairs.len()
    }

    /// Whether the configuration has no angle pairs
    pub fn is_empty(&self) -> bool {
        self.angle_pairs.is_empty()
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// A camera position on the orbit sphere
///
/// Orientation is not stored: the camera always tracks the origin, so the
/// view direction is derived from the position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Point3f,
}

impl CameraPose {
    /// Pose for spherical coordinates given in degrees
    pub fn from_spherical(radius: f32, theta_deg: f32, phi_deg: f32) -> Self {
        let theta = theta_deg.to_radians();
        let phi = phi_deg.to_radians();

        let x = radius * theta.sin() * phi.cos();
        let y = radius * theta.sin() * phi.sin();
        let z = radius * theta.cos();

        Self {
            position: Point3f::new(x, y, z),
        }
    }

    /// Distance from the origin
    pub fn distance(&self) -> f32 {
        self.position.coords.norm()
    }

    /// Unit vector from the camera toward the origin
    pub fn view_direction(&self) -> Option<Vector3f> {
        (-self.position.coords).try_normalize(f32::EPSILON)
    }
}

/// Generate the ordered camera poses for an orbit
///
/// Pure function of `config`: the same configuration always yields the same
/// sequence, one pose per angle pair in input order.
pub fn generate(config: &OrbitConfig) -> Result<Vec<CameraPose>> {
    config.validate()?;

    Ok(config
        .angle_pairs
        .iter()
        .map(|&(theta, phi)| CameraPose::from_spherical(config.radius, theta, phi))
        .collect())
}
