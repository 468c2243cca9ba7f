//! Wavefront OBJ support
//!
//! Only vertex positions and face corners are kept. Objects and groups are
//! flattened into one mesh in file order.

use crate::registry::MeshImporter;
use meshorbit_core::{Error, Point3f, PolygonMesh, Result};
use ::obj::ObjData;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Importer for Wavefront OBJ meshes
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjImporter;

impl ObjImporter {
    /// Parse an OBJ mesh from any reader
    pub fn parse<R: Read>(reader: R) -> Result<PolygonMesh> {
        let data = ObjData::load_buf(reader).map_err(|e| Error::Format(e.to_string()))?;
        Self::obj_data_to_mesh(&data)
    }

    /// Flatten parsed OBJ data into a polygon mesh
    pub fn obj_data_to_mesh(data: &ObjData) -> Result<PolygonMesh> {
        let vertices: Vec<Point3f> = data
            .position
            .iter()
            .map(|p| Point3f::new(p[0], p[1], p[2]))
            .collect();

        let faces: Vec<Vec<usize>> = data
            .objects
            .iter()
            .flat_map(|object| &object.groups)
            .flat_map(|group| &group.polys)
            .map(|poly| poly.0.iter().map(|corner| corner.0).collect::<Vec<usize>>())
            .collect();

        PolygonMesh::try_from_parts(vertices, faces).map_err(|e| match e {
            Error::InvalidData(message) => Error::Format(message),
            other => other,
        })
    }
}

impl MeshImporter for ObjImporter {
    fn import(&self, path: &Path) -> Result<PolygonMesh> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    fn format_name(&self) -> &'static str {
        "obj"
    }
}
