//! Polygon mesh data structures

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// A polygon mesh with vertices and faces of arbitrary arity
///
/// Vertex indices are the identity faces refer to, so vertex and face
/// order is preserved exactly as it was read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<Vec<usize>>,
}

/// Axis-aligned bounding box over a set of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3f,
    pub max: Point3f,
}

impl BoundingBox {
    /// Compute the bounding box of a set of points, `None` if there are none
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3f>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut min = first;
        let mut max = first;

        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Component-wise extent `max - min`
    pub fn dimensions(&self) -> Vector3f {
        self.max - self.min
    }

    /// Bounding-box midpoint
    pub fn center(&self) -> Point3f {
        midpoint(&self.min, &self.max)
    }

    /// Largest of the three extents
    pub fn max_extent(&self) -> f32 {
        self.dimensions().max()
    }
}

impl PolygonMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces without validating indices
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<Vec<usize>>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh and check every face against the vertex list
    pub fn try_from_parts(vertices: Vec<Point3f>, faces: Vec<Vec<usize>>) -> Result<Self> {
        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Add a vertex to the mesh, returning its index
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: Vec<usize>) {
        self.faces.push(face);
    }

    /// Check that every face has at least three corners and valid indices
    pub fn validate(&self) -> Result<()> {
        for (face_index, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(Error::InvalidData(format!(
                    "face {} has {} vertices, need at least 3",
                    face_index,
                    face.len()
                )));
            }
            if let Some(&bad) = face.iter().find(|&&i| i >= self.vertices.len()) {
                return Err(Error::InvalidData(format!(
                    "face {} references vertex {} but mesh has {} vertices",
                    face_index,
                    bad,
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }

    /// Bounding box of the vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    /// Fan-triangulate every face in order
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.faces.iter().flat_map(|face| {
            (1..face.len().saturating_sub(1)).map(move |i| [face[0], face[i], face[i + 1]])
        })
    }

    /// Area-weighted vertex normals
    ///
    /// Vertices not referenced by any face, or only by degenerate faces,
    /// get a zero normal.
    pub fn vertex_normals(&self) -> Vec<Vector3f> {
        let mut normals = vec![Vector3f::zeros(); self.vertices.len()];

        for [a, b, c] in self.triangles() {
            let v0 = self.vertices[a];
            let edge1 = self.vertices[b] - v0;
            let edge2 = self.vertices[c] - v0;
            // Unnormalized cross product weights by twice the triangle area
            let n = edge1.cross(&edge2);
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }

        for n in &mut normals {
            if let Some(unit) = n.try_normalize(f32::EPSILON) {
                *n = unit;
            }
        }
        normals
    }
}
