//! Scene, camera and rendering for meshorbit
//!
//! The capture pipeline drives rendering through two narrow interfaces:
//! - [`Scene`]: install and remove meshes by name, move the camera, set the
//!   look-at constraint
//! - [`Renderer`]: one-time configuration, render the current scene, save
//!
//! [`SceneGraph`] and [`RasterRenderer`] are the built-in implementations.

pub mod camera;
pub mod scene;
pub mod renderer;
pub mod shading;
pub mod raster;

pub use camera::*;
pub use scene::*;
pub use renderer::*;
pub use shading::*;
pub use raster::*;
