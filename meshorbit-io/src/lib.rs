//! Mesh importers for meshorbit
//!
//! This crate reads mesh files into [`PolygonMesh`](meshorbit_core::PolygonMesh):
//! - OFF, parsed line by line with precise format errors
//! - Wavefront OBJ, through the `obj` crate
//! - STL (ASCII and binary), through the `stl_io` crate

pub mod off;
pub mod obj;
pub mod stl;
pub mod registry;
pub mod error;

pub use error::*;
pub use off::{OffImporter, OFF_MAGIC};
pub use crate::obj::ObjImporter;
pub use stl::StlImporter;
pub use registry::{mesh_identifier, ImporterRegistry, MeshFormat, MeshImporter};

use meshorbit_core::{PolygonMesh, Result};
use std::path::Path;

/// Auto-detect format from the extension and import a mesh
pub fn import_mesh<P: AsRef<Path>>(path: P) -> Result<PolygonMesh> {
    ImporterRegistry::with_defaults().import(path.as_ref())
}
