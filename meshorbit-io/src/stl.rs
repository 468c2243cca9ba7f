//! STL support, ASCII and binary

use crate::registry::MeshImporter;
use meshorbit_core::{Error, Point3f, PolygonMesh, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Importer for STL meshes
///
/// The reader merges identical corner positions, so shared vertices are
/// imported once.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlImporter;

impl StlImporter {
    /// Parse an STL mesh from a seekable reader
    pub fn parse<R: Read + Seek>(mut reader: R) -> Result<PolygonMesh> {
        let indexed = stl_io::read_stl(&mut reader).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData | std::io::ErrorKind::UnexpectedEof => {
                Error::Format(format!("malformed STL: {}", e))
            }
            _ => Error::Io(e),
        })?;

        let vertices = indexed
            .vertices
            .iter()
            .map(|v| Point3f::new(v[0], v[1], v[2]))
            .collect();

        let faces = indexed
            .faces
            .iter()
            .map(|triangle| triangle.vertices.to_vec())
            .collect();

        PolygonMesh::try_from_parts(vertices, faces).map_err(|e| match e {
            Error::InvalidData(message) => Error::Format(message),
            other => other,
        })
    }
}

impl MeshImporter for StlImporter {
    fn import(&self, path: &Path) -> Result<PolygonMesh> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    fn format_name(&self) -> &'static str {
        "stl"
    }
}
