//! Session state and scoped mesh installation

use meshorbit_core::PolygonMesh;
use meshorbit_render::Scene;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Where a capture session is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Importing,
    Normalizing,
    Rendering(usize),
    Cleanup,
    Done,
    Failed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Rendering(i) => write!(f, "Rendering[{}]", i),
            other => write!(f, "{:?}", other),
        }
    }
}

pub(crate) fn transition(state: &mut SessionState, next: SessionState) {
    log::debug!("Session {} -> {}", state, next);
    *state = next;
}

/// A mesh installed in a scene for the lifetime of this guard
///
/// Every object carrying the mesh's name is removed from the scene when the
/// guard is released or dropped, whichever comes first.
pub struct InstalledMesh<'s, S: Scene> {
    scene: &'s mut S,
    name: String,
    released: bool,
}

impl<'s, S: Scene> InstalledMesh<'s, S> {
    /// Install `mesh` under `name`
    pub fn install(scene: &'s mut S, name: &str, mesh: PolygonMesh) -> Self {
        scene.install_mesh(name, mesh);
        Self {
            scene,
            name: name.to_string(),
            released: false,
        }
    }

    /// Name the mesh was installed under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The installed mesh, if the scene still holds it
    pub fn mesh_mut(&mut self) -> Option<&mut PolygonMesh> {
        self.scene.mesh_mut(&self.name)
    }

    /// Remove the mesh now, returning how many scene objects went
    pub fn release(mut self) -> usize {
        self.remove()
    }

    fn remove(&mut self) -> usize {
        if self.released {
            return 0;
        }
        self.released = true;
        let removed = self.scene.remove_mesh(&self.name);
        log::debug!("Removed {} scene object(s) named '{}'", removed, self.name);
        removed
    }
}

impl<S: Scene> Deref for InstalledMesh<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.scene
    }
}

impl<S: Scene> DerefMut for InstalledMesh<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.scene
    }
}

impl<S: Scene> Drop for InstalledMesh<'_, S> {
    fn drop(&mut self) {
        self.remove();
    }
}
