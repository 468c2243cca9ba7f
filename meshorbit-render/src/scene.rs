//! Scene interface and the in-memory scene

use crate::camera::{Camera, Projection, TrackTo};
use meshorbit_core::{Point3f, PolygonMesh};

/// A named mesh installed in a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub mesh: PolygonMesh,
}

/// The operations the capture pipeline needs from a scene
///
/// A scene is single, stateful and shared: one capture session at a time
/// writes to it.
pub trait Scene {
    /// Install a mesh under `name`, replacing any object with the same name
    fn install_mesh(&mut self, name: &str, mesh: PolygonMesh);

    /// Look up an installed mesh
    fn mesh(&self, name: &str) -> Option<&PolygonMesh>;

    /// Look up an installed mesh for in-place edits
    fn mesh_mut(&mut self, name: &str) -> Option<&mut PolygonMesh>;

    /// Remove every object named exactly `name`, returning how many went
    fn remove_mesh(&mut self, name: &str) -> usize;

    /// All installed objects in installation order
    fn objects(&self) -> &[SceneObject];

    /// The scene camera
    fn camera(&self) -> &Camera;

    /// Move the camera
    fn set_camera_position(&mut self, position: Point3f);

    /// Set the camera projection
    fn set_projection(&mut self, projection: Projection);

    /// Constrain the camera to keep looking at a target
    fn track_to(&mut self, constraint: TrackTo);
}

/// Scene kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    objects: Vec<SceneObject>,
    camera: Camera,
}

impl SceneGraph {
    /// Create an empty scene with a default camera
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object without replacing existing ones
    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Number of installed objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Scene for SceneGraph {
    fn install_mesh(&mut self, name: &str, mesh: PolygonMesh) {
        if self.remove_mesh(name) > 0 {
            log::warn!("Replacing existing scene object '{}'", name);
        }
        self.objects.push(SceneObject {
            name: name.to_string(),
            mesh,
        });
    }

    fn mesh(&self, name: &str) -> Option<&PolygonMesh> {
        self.objects.iter().find(|o| o.name == name).map(|o| &o.mesh)
    }

    fn mesh_mut(&mut self, name: &str) -> Option<&mut PolygonMesh> {
        self.objects
            .iter_mut()
            .find(|o| o.name == name)
            .map(|o| &mut o.mesh)
    }

    fn remove_mesh(&mut self, name: &str) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.name != name);
        before - self.objects.len()
    }

    fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn set_camera_position(&mut self, position: Point3f) {
        self.camera.position = position;
    }

    fn set_projection(&mut self, projection: Projection) {
        self.camera.projection = projection;
    }

    fn track_to(&mut self, constraint: TrackTo) {
        self.camera.constraint = Some(constraint);
    }
}
