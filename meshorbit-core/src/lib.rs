//! Core data structures for meshorbit
//!
//! This crate provides the geometry half of the capture pipeline:
//! polygon meshes, bounding boxes, the normalizing transform and the
//! orbit of camera poses that a renderer walks through.

pub mod point;
pub mod mesh;
pub mod traits;
pub mod transform;
pub mod normalize;
pub mod orbit;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use traits::*;
pub use transform::*;
pub use normalize::*;
pub use orbit::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4};
