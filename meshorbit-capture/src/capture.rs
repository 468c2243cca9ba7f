//! Capture orchestration
//!
//! A session imports one mesh, installs and normalizes it in the scene,
//! then moves the camera through every orbit pose, rendering and saving one
//! image per pose. The mesh is removed from the scene before the session
//! returns, on success and on failure alike.

use crate::config::CaptureConfig;
use crate::session::{transition, InstalledMesh, SessionState};
use meshorbit_core::{generate, normalize, CameraPose, Error, Result};
use meshorbit_io::{mesh_identifier, ImporterRegistry};
use meshorbit_render::{Renderer, Scene};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extension of every saved image
pub const IMAGE_EXTENSION: &str = "png";

/// Path of the image for pose `index` of mesh `name`
pub fn image_path(output_dir: &Path, name: &str, index: usize) -> PathBuf {
    output_dir
        .join(name)
        .join(format!("{}_{}.{}", name, index, IMAGE_EXTENSION))
}

/// Drives a scene and renderer through capture sessions
///
/// Construction validates the configuration, generates the orbit and does
/// the one-time renderer and camera setup; nothing touches the file system
/// until [`Capture::capture`] runs.
pub struct Capture<'a, S: Scene, R: Renderer> {
    scene: &'a mut S,
    renderer: &'a mut R,
    importers: ImporterRegistry,
    config: CaptureConfig,
    poses: Vec<CameraPose>,
    state: SessionState,
}

impl<'a, S: Scene, R: Renderer> Capture<'a, S, R> {
    /// Set up a capture with the built-in importers
    pub fn new(scene: &'a mut S, renderer: &'a mut R, config: CaptureConfig) -> Result<Self> {
        config.validate()?;
        let poses = generate(&config.orbit)?;

        renderer.configure(&config.render)?;
        scene.set_projection(config.camera.projection);
        scene.track_to(config.camera.track);

        Ok(Self {
            scene,
            renderer,
            importers: ImporterRegistry::with_defaults(),
            config,
            poses,
            state: SessionState::Idle,
        })
    }

    /// Replace the importer registry
    pub fn with_importers(mut self, importers: ImporterRegistry) -> Self {
        self.importers = importers;
        self
    }

    /// The configuration in use
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// The orbit poses every session walks through, in order
    pub fn poses(&self) -> &[CameraPose] {
        &self.poses
    }

    /// Last state the most recent session reached
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Render every orbit pose of one mesh
    ///
    /// Images go to `output_dir/<name>/<name>_<i>.png`, where `name` is the
    /// mesh file's stem and `i` the zero-based pose index. Existing images
    /// are overwritten. The first error aborts the session and is returned
    /// unchanged once the mesh has been removed from the scene.
    pub fn capture(&mut self, mesh_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        self.state = SessionState::Idle;

        match self.run_session(mesh_path, output_dir) {
            Ok(saved) => {
                transition(&mut self.state, SessionState::Done);
                log::info!(
                    "Captured {} view(s) of {}",
                    saved.len(),
                    mesh_path.display()
                );
                Ok(saved)
            }
            Err(e) => {
                transition(&mut self.state, SessionState::Failed);
                log::error!("Capture of {} failed: {}", mesh_path.display(), e);
                Err(e)
            }
        }
    }

    fn run_session(&mut self, mesh_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        transition(&mut self.state, SessionState::Importing);
        let name = mesh_identifier(mesh_path)?;
        let mesh = self.importers.import(mesh_path)?;
        log::info!(
            "Loaded {} ({} vertices, {} faces)",
            name,
            mesh.vertex_count(),
            mesh.face_count()
        );

        transition(&mut self.state, SessionState::Normalizing);
        let mut installed = InstalledMesh::install(&mut *self.scene, &name, mesh);

        let outcome = render_orbit(
            &mut installed,
            &mut *self.renderer,
            &self.poses,
            &self.config,
            &mut self.state,
            output_dir,
        );

        transition(&mut self.state, SessionState::Cleanup);
        installed.release();
        outcome
    }
}

fn render_orbit<S: Scene, R: Renderer>(
    installed: &mut InstalledMesh<'_, S>,
    renderer: &mut R,
    poses: &[CameraPose],
    config: &CaptureConfig,
    state: &mut SessionState,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let name = installed.name().to_string();
    let mesh = installed.mesh_mut().ok_or_else(|| {
        Error::InvalidData(format!("scene lost mesh '{}' after install", name))
    })?;
    normalize(mesh)?;

    let image_dir = output_dir.join(&name);
    fs::create_dir_all(&image_dir)?;

    let mut saved = Vec::with_capacity(poses.len());
    for (index, pose) in poses.iter().enumerate() {
        transition(state, SessionState::Rendering(index));
        installed.set_camera_position(pose.position);
        log::debug!(
            "Pose {}: camera at ({:.3}, {:.3}, {:.3})",
            index,
            pose.position.x,
            pose.position.y,
            pose.position.z
        );

        let started = Instant::now();
        let image = renderer.render(&**installed)?;
        if let Some(limit) = config.render_timeout {
            let elapsed = started.elapsed();
            if elapsed > limit {
                return Err(Error::RenderTimeout {
                    pose: index,
                    elapsed,
                    limit,
                });
            }
        }

        let path = image_path(output_dir, &name, index);
        renderer.save(&image, &path)?;
        log::info!("Saved to {}", path.display());
        saved.push(path);
    }

    Ok(saved)
}

/// Capture one mesh with the reference configuration
pub fn capture<S: Scene, R: Renderer>(
    scene: &mut S,
    renderer: &mut R,
    mesh_path: &Path,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    Capture::new(scene, renderer, CaptureConfig::default())?.capture(mesh_path, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshorbit_render::{RenderSettings, RenderedImage, SceneGraph};

    struct NullRenderer;

    impl Renderer for NullRenderer {
        fn configure(&mut self, _settings: &RenderSettings) -> Result<()> {
            Ok(())
        }

        fn render(&mut self, _scene: &dyn Scene) -> Result<RenderedImage> {
            Ok(RenderedImage::new(1, 1))
        }

        fn save(&mut self, _image: &RenderedImage, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_image_path_layout() {
        let path = image_path(Path::new("/out"), "chair", 7);
        assert_eq!(path, PathBuf::from("/out/chair/chair_7.png"));
    }

    #[test]
    fn test_new_sets_up_camera_once() {
        let mut scene = SceneGraph::new();
        let mut renderer = NullRenderer;
        let capture = Capture::new(&mut scene, &mut renderer, CaptureConfig::default()).unwrap();

        assert_eq!(capture.poses().len(), 12);
        assert_eq!(capture.state(), SessionState::Idle);
        drop(capture);

        assert!(scene.camera().constraint.is_some());
    }

    #[test]
    fn test_invalid_radius_rejected_at_setup() {
        let mut scene = SceneGraph::new();
        let mut renderer = NullRenderer;
        let mut config = CaptureConfig::default();
        config.orbit.radius = 0.0;

        let result = Capture::new(&mut scene, &mut renderer, config);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        assert!(scene.camera().constraint.is_none());
    }
}
