//! Z-buffered software rasterizer

use crate::renderer::{RenderSettings, RenderedImage, Renderer};
use crate::scene::{Scene, SceneObject};
use meshorbit_core::{Error, Matrix4, Point3f, Result, Vector3f};

/// A vertex after projection to the image
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
}

/// CPU renderer producing shaded images of every mesh in the scene
///
/// Polygons are fan-triangulated and lit by a headlight shining along the
/// camera's view direction.
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    settings: RenderSettings,
    frames: usize,
}

impl RasterRenderer {
    /// Create a renderer with validated settings
    pub fn new(settings: RenderSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            frames: 0,
        })
    }

    /// Current settings
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Number of frames rendered so far
    pub fn frames_rendered(&self) -> usize {
        self.frames
    }

    fn project(view_proj: &Matrix4<f32>, p: &Point3f, width: f32, height: f32) -> Option<ScreenVertex> {
        let clip = view_proj * p.to_homogeneous();
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(ScreenVertex {
            x: (ndc.x + 1.0) * 0.5 * width,
            y: (1.0 - ndc.y) * 0.5 * height,
            depth: ndc.z,
        })
    }

    fn draw_object(
        &self,
        object: &SceneObject,
        view_proj: &Matrix4<f32>,
        light: &Vector3f,
        image: &mut RenderedImage,
        depth: &mut [f32],
    ) {
        let mesh = &object.mesh;
        let (width, height) = image.dimensions();
        let (w, h) = (width as f32, height as f32);

        let screen: Vec<Option<ScreenVertex>> = mesh
            .vertices
            .iter()
            .map(|v| Self::project(view_proj, v, w, h))
            .collect();
        let normals = if self.settings.smooth_shading {
            Some(mesh.vertex_normals())
        } else {
            None
        };

        for [a, b, c] in mesh.triangles() {
            let (Some(sa), Some(sb), Some(sc)) = (screen[a], screen[b], screen[c]) else {
                continue;
            };
            let face_normal = (mesh.vertices[b] - mesh.vertices[a])
                .cross(&(mesh.vertices[c] - mesh.vertices[a]));
            let Some(face_normal) = face_normal.try_normalize(f32::EPSILON) else {
                continue;
            };

            let area = edge(&sa, &sb, sc.x, sc.y);
            if area.abs() <= f32::EPSILON {
                continue;
            }

            let min_x = sa.x.min(sb.x).min(sc.x).floor().max(0.0) as u32;
            let max_x = sa.x.max(sb.x).max(sc.x).ceil().min(w) as u32;
            let min_y = sa.y.min(sb.y).min(sc.y).floor().max(0.0) as u32;
            let max_y = sa.y.max(sb.y).max(sc.y).ceil().min(h) as u32;

            for py in min_y..max_y {
                for px in min_x..max_x {
                    let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
                    let wa = edge(&sb, &sc, cx, cy) / area;
                    let wb = edge(&sc, &sa, cx, cy) / area;
                    let wc = edge(&sa, &sb, cx, cy) / area;
                    if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                        continue;
                    }

                    let z = wa * sa.depth + wb * sb.depth + wc * sc.depth;
                    let slot = py as usize * width as usize + px as usize;
                    if z >= depth[slot] {
                        continue;
                    }
                    depth[slot] = z;

                    let normal = normals
                        .as_ref()
                        .and_then(|n| (n[a] * wa + n[b] * wb + n[c] * wc).try_normalize(f32::EPSILON))
                        .unwrap_or(face_normal);
                    image.put_pixel(px, py, self.settings.material.shade(&normal, light, light));
                }
            }
        }
    }
}

/// Twice the signed area of the triangle (a, b, p)
fn edge(a: &ScreenVertex, b: &ScreenVertex, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

impl Renderer for RasterRenderer {
    fn configure(&mut self, settings: &RenderSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings.clone();
        log::debug!(
            "Raster renderer configured for {}x{}",
            settings.width,
            settings.height
        );
        Ok(())
    }

    fn render(&mut self, scene: &dyn Scene) -> Result<RenderedImage> {
        let camera = scene.camera();
        let light = camera
            .forward()
            .map(|f| -f)
            .ok_or_else(|| Error::Render("camera sits on its look-at target".to_string()))?;

        let view_proj = camera.projection_matrix(self.settings.aspect_ratio()) * camera.view_matrix();
        let (width, height) = (self.settings.width, self.settings.height);

        let mut image = RenderedImage::from_pixel(width, height, self.settings.background_pixel());
        let mut depth = vec![f32::INFINITY; width as usize * height as usize];

        for object in scene.objects() {
            self.draw_object(object, &view_proj, &light, &mut image, &mut depth);
        }

        self.frames += 1;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Projection, TrackTo};
    use crate::scene::SceneGraph;
    use image::Rgb;
    use meshorbit_core::PolygonMesh;

    fn facing_triangle(z: f32) -> PolygonMesh {
        PolygonMesh::from_vertices_and_faces(
            vec![
                Point3f::new(-0.5, -0.5, z),
                Point3f::new(0.5, -0.5, z),
                Point3f::new(0.0, 0.5, z),
            ],
            vec![vec![0, 1, 2]],
        )
    }

    fn scene_looking_down() -> SceneGraph {
        let mut scene = SceneGraph::new();
        scene.set_projection(Projection::Orthographic { scale: 2.0 });
        scene.track_to(TrackTo::origin());
        scene.set_camera_position(Point3f::new(0.0, 0.0, 3.0));
        scene
    }

    fn renderer() -> RasterRenderer {
        RasterRenderer::new(RenderSettings::with_resolution(64, 64)).unwrap()
    }

    #[test]
    fn test_empty_scene_is_background() {
        let scene = scene_looking_down();
        let image = renderer().render(&scene).unwrap();

        assert_eq!(image.dimensions(), (64, 64));
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_triangle_covers_center_only() {
        let mut scene = scene_looking_down();
        scene.install_mesh("tri", facing_triangle(0.0));

        let mut renderer = renderer();
        let image = renderer.render(&scene).unwrap();

        assert_eq!(*image.get_pixel(32, 32), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(1, 1), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(62, 62), Rgb([0, 0, 0]));
        assert_eq!(renderer.frames_rendered(), 1);
    }

    #[test]
    fn test_back_face_is_drawn() {
        let mut scene = scene_looking_down();
        let mut mesh = facing_triangle(0.0);
        mesh.faces[0].reverse();
        scene.install_mesh("tri", mesh);

        let image = renderer().render(&scene).unwrap();
        assert_ne!(*image.get_pixel(32, 32), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_geometry_outside_view_is_clipped() {
        let mut scene = scene_looking_down();
        let mut mesh = facing_triangle(0.0);
        for v in &mut mesh.vertices {
            v.x += 5.0;
        }
        scene.install_mesh("far", mesh);

        let image = renderer().render(&scene).unwrap();
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_oversized_settings_rejected() {
        assert!(RasterRenderer::new(RenderSettings::with_resolution(70_000, 70_000)).is_err());
        assert!(renderer()
            .configure(&RenderSettings::with_resolution(70_000, 70_000))
            .is_err());
    }

    #[test]
    fn test_configure_changes_resolution() {
        let mut renderer = renderer();
        renderer
            .configure(&RenderSettings::with_resolution(16, 8))
            .unwrap();
        let image = renderer.render(&scene_looking_down()).unwrap();
        assert_eq!(image.dimensions(), (16, 8));

        assert!(renderer
            .configure(&RenderSettings::with_resolution(0, 8))
            .is_err());
    }

    #[test]
    fn test_camera_on_target_fails() {
        let mut scene = scene_looking_down();
        scene.set_camera_position(Point3f::origin());
        assert!(matches!(renderer().render(&scene), Err(Error::Render(_))));
    }
}
