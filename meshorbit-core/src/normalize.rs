//! Centering and unit-scale normalization of meshes

use crate::error::{Error, Result};
use crate::mesh::PolygonMesh;
use crate::point::*;
use crate::traits::Transformable;
use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};

/// What [`normalize`] did to a mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    /// Translation that moved the bounding-box center to the origin
    pub translation: Vector3f,
    /// Uniform scale applied after centering; 1.0 for degenerate meshes
    pub scale: f32,
    /// Bounding-box dimensions before normalization
    pub original_dimensions: Vector3f,
    /// Bounding-box dimensions after normalization
    pub dimensions: Vector3f,
}

impl Normalization {
    /// The equivalent single transform: translate, then scale about the origin
    pub fn transform(&self) -> Transform3D {
        Transform3D::uniform_scaling(self.scale) * Transform3D::translation(self.translation)
    }

    /// True when the mesh had zero extent and was only centered
    pub fn is_degenerate(&self) -> bool {
        self.original_dimensions.max() <= 0.0
    }
}

/// Center a mesh on the origin and scale it so its largest extent is 1.0
///
/// Centering uses the bounding-box midpoint, not the vertex average. A mesh
/// with zero extent (a single point, or coincident vertices) is centered and
/// left unscaled. The vertices are rewritten in place. A mesh with a
/// non-finite coordinate is rejected and left untouched.
pub fn normalize(mesh: &mut PolygonMesh) -> Result<Normalization> {
    let bounds = mesh.bounds().ok_or(Error::EmptyMesh)?;
    if let Some(index) = mesh
        .vertices
        .iter()
        .position(|v| !v.coords.iter().all(|c| c.is_finite()))
    {
        return Err(Error::InvalidData(format!(
            "vertex {} has a non-finite coordinate",
            index
        )));
    }
    let original_dimensions = bounds.dimensions();

    let translation = -bounds.center().coords;
    mesh.transform(&Transform3D::translation(translation));

    // Recompute after centering
    let centered = mesh.bounds().ok_or(Error::EmptyMesh)?;
    let max_dim = centered.max_extent();

    let scale = if max_dim > 0.0 {
        let scale_factor = 1.0 / max_dim;
        mesh.transform(&Transform3D::uniform_scaling(scale_factor));
        scale_factor
    } else {
        1.0
    };

    let dimensions = mesh
        .bounds()
        .map(|b| b.dimensions())
        .unwrap_or_else(Vector3f::zeros);

    log::info!(
        "Original dim: ({:.4}, {:.4}, {:.4})",
        original_dimensions.x,
        original_dimensions.y,
        original_dimensions.z
    );
    log::info!(
        "New dim: ({:.4}, {:.4}, {:.4})",
        dimensions.x,
        dimensions.y,
        dimensions.z
    );

    Ok(Normalization {
        translation,
        scale,
        original_dimensions,
        dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn box_mesh(min: Point3f, max: Point3f) -> PolygonMesh {
        let vertices = vec![
            min,
            Point3f::new(max.x, min.y, min.z),
            Point3f::new(max.x, max.y, min.z),
            Point3f::new(min.x, max.y, max.z),
            max,
        ];
        PolygonMesh::from_vertices_and_faces(vertices, vec![vec![0, 1, 2], vec![2, 3, 4]])
    }

    #[test]
    fn test_normalize_centers_and_scales() {
        let mut mesh = box_mesh(Point3f::new(1.0, 2.0, 3.0), Point3f::new(5.0, 4.0, 4.0));
        let result = normalize(&mut mesh).unwrap();

        let bounds = mesh.bounds().unwrap();
        let center = bounds.center();
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max_extent(), 1.0, epsilon = 1e-6);

        assert_relative_eq!(result.scale, 0.25);
        assert_relative_eq!(result.original_dimensions.x, 4.0);
        assert_relative_eq!(result.dimensions.y, 0.5, epsilon = 1e-6);
        assert!(!result.is_degenerate());
    }

    #[test]
    fn test_bounding_box_center_not_vertex_average() {
        // Vertex average is pulled toward the cluster at x = 0
        let mut mesh = PolygonMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(0.0, 0.0, 1.0),
                Point3f::new(4.0, 0.0, 0.0),
            ],
            vec![vec![0, 1, 3]],
        );
        let result = normalize(&mut mesh).unwrap();

        assert_relative_eq!(result.translation.x, -2.0);
        assert_relative_eq!(mesh.vertices[0].x, -0.5, epsilon = 1e-6);
        assert_relative_eq!(mesh.vertices[3].x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut mesh = box_mesh(Point3f::new(-3.0, 7.0, 0.5), Point3f::new(2.0, 9.0, 1.5));
        normalize(&mut mesh).unwrap();
        let before = mesh.bounds().unwrap().max_extent();

        let second = normalize(&mut mesh).unwrap();
        let after = mesh.bounds().unwrap().max_extent();

        assert!((after - before).abs() < 1e-6);
        assert_relative_eq!(second.scale, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_mesh_is_only_centered() {
        let mut mesh = PolygonMesh::from_vertices_and_faces(
            vec![Point3f::new(2.0, -1.0, 3.0), Point3f::new(2.0, -1.0, 3.0)],
            vec![],
        );
        let result = normalize(&mut mesh).unwrap();

        assert!(result.is_degenerate());
        assert_eq!(result.scale, 1.0);
        assert_eq!(mesh.vertices[0], Point3f::origin());
        assert_eq!(mesh.bounds().unwrap().max_extent(), 0.0);
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        let mut mesh = PolygonMesh::new();
        assert!(matches!(normalize(&mut mesh), Err(Error::EmptyMesh)));
    }

    #[test]
    fn test_non_finite_vertices_are_rejected() {
        for bad in [f32::INFINITY, f32::NAN] {
            let mut mesh = box_mesh(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
            mesh.vertices[1].x = bad;
            let before = mesh.clone();

            assert!(matches!(normalize(&mut mesh), Err(Error::InvalidData(_))));
            assert_eq!(mesh.vertices[0], before.vertices[0]);
            assert_eq!(mesh.vertices[4], before.vertices[4]);
        }
    }

    #[test]
    fn test_transform_matches_applied_result() {
        let original = box_mesh(Point3f::new(1.0, 1.0, 1.0), Point3f::new(3.0, 2.0, 2.0));
        let mut mesh = original.clone();
        let result = normalize(&mut mesh).unwrap();

        let t = result.transform();
        for (src, dst) in original.vertices.iter().zip(&mesh.vertices) {
            let p = t.transform_point(src);
            assert_relative_eq!(p.x, dst.x, epsilon = 1e-6);
            assert_relative_eq!(p.y, dst.y, epsilon = 1e-6);
            assert_relative_eq!(p.z, dst.z, epsilon = 1e-6);
        }
    }
}
