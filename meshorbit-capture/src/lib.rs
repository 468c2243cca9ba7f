//! # meshorbit
//!
//! Multi-view renderings of a single mesh: load it, center and scale it to
//! a unit volume, then render it from a ring of camera positions around the
//! origin.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meshorbit_capture::prelude::*;
//! use std::path::Path;
//!
//! let config = CaptureConfig::default();
//! let mut scene = SceneGraph::new();
//! let mut renderer = RasterRenderer::new(config.render.clone())?;
//!
//! let mut capture = Capture::new(&mut scene, &mut renderer, config)?;
//! let images = capture.capture(Path::new("chair.off"), Path::new("renders"))?;
//! assert_eq!(images.len(), 12);
//! # Ok::<(), meshorbit_core::Error>(())
//! ```

pub mod config;
pub mod session;
pub mod capture;

pub use config::*;
pub use session::{InstalledMesh, SessionState};
pub use capture::{capture, image_path, Capture, IMAGE_EXTENSION};

/// Convenient imports for common use cases
pub mod prelude {
    pub use meshorbit_core::*;
    pub use meshorbit_io::{import_mesh, mesh_identifier, ImporterRegistry, MeshFormat, MeshImporter};
    pub use meshorbit_render::*;
    pub use crate::{capture, Capture, CaptureConfig, CameraSetup, SessionState};
}
