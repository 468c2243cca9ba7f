//! Camera and look-at constraint

use meshorbit_core::{Error, Point3f, Result, Vector3f};
use nalgebra::{Matrix4, Orthographic3, Perspective3};
use serde::{Deserialize, Serialize};

/// Orthographic view width used by the reference capture
pub const REFERENCE_ORTHO_SCALE: f32 = 2.0;

/// Camera projection type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Parallel projection; `scale` is the visible extent along the wider
    /// image axis, in world units
    Orthographic { scale: f32 },
    /// Pinhole projection with a vertical field of view in radians
    Perspective { fov_y: f32 },
}

impl Projection {
    /// Reject non-positive scales and degenerate fields of view
    pub fn validate(&self) -> Result<()> {
        match *self {
            Projection::Orthographic { scale } if !(scale > 0.0 && scale.is_finite()) => Err(
                Error::InvalidConfig(format!("orthographic scale must be positive, got {}", scale)),
            ),
            Projection::Perspective { fov_y }
                if !(fov_y > 0.0 && fov_y < std::f32::consts::PI) =>
            {
                Err(Error::InvalidConfig(format!(
                    "perspective field of view must be in (0, pi), got {}",
                    fov_y
                )))
            }
            _ => Ok(()),
        }
    }

    /// Projection matrix for an image with the given aspect ratio (width / height)
    pub fn matrix(&self, aspect_ratio: f32, near: f32, far: f32) -> Matrix4<f32> {
        match *self {
            Projection::Orthographic { scale } => {
                let (half_w, half_h) = if aspect_ratio >= 1.0 {
                    (scale / 2.0, scale / 2.0 / aspect_ratio)
                } else {
                    (scale / 2.0 * aspect_ratio, scale / 2.0)
                };
                Orthographic3::new(-half_w, half_w, -half_h, half_h, near, far).into_inner()
            }
            Projection::Perspective { fov_y } => {
                Perspective3::new(aspect_ratio, fov_y, near, far).into_inner()
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Orthographic {
            scale: REFERENCE_ORTHO_SCALE,
        }
    }
}

/// Keeps the camera's -Z axis pointed at `target`, with its Y axis as close
/// to `up` as the view direction allows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackTo {
    pub target: Point3f,
    pub up: Vector3f,
}

impl TrackTo {
    /// Track the world origin with world +Z as up
    pub fn origin() -> Self {
        Self {
            target: Point3f::origin(),
            up: Vector3f::z(),
        }
    }
}

impl Default for TrackTo {
    fn default() -> Self {
        Self::origin()
    }
}

/// A camera in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3f,
    pub target: Point3f,
    pub up: Vector3f,
    pub projection: Projection,
    pub near: f32,
    pub far: f32,
    pub constraint: Option<TrackTo>,
}

impl Camera {
    /// Create a new camera looking at `target`
    pub fn new(position: Point3f, target: Point3f, up: Vector3f, projection: Projection) -> Self {
        Self {
            position,
            target,
            up,
            projection,
            near: 0.1,
            far: 100.0,
            constraint: None,
        }
    }

    /// Target and up vector in effect, honoring the constraint if set
    pub fn aim(&self) -> (Point3f, Vector3f) {
        match self.constraint {
            Some(track) => (track.target, track.up),
            None => (self.target, self.up),
        }
    }

    /// Unit view direction, `None` when the camera sits on its target
    pub fn forward(&self) -> Option<Vector3f> {
        let (target, _) = self.aim();
        (target - self.position).try_normalize(f32::EPSILON)
    }

    /// Get the view matrix
    ///
    /// When the view direction is parallel to the up vector (a camera
    /// straight above the target) world +Y stands in for up, then +X.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let (target, up) = self.aim();
        let Some(forward) = self.forward() else {
            return Matrix4::identity();
        };

        let up = [up, Vector3f::y(), Vector3f::x()]
            .into_iter()
            .find(|candidate| forward.cross(candidate).norm() > 1e-6)
            .unwrap_or_else(Vector3f::y);

        Matrix4::look_at_rh(&self.position, &target, &up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Matrix4<f32> {
        self.projection.matrix(aspect_ratio, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3f::new(0.0, 0.0, 5.0),
            Point3f::origin(),
            Vector3f::y(),
            Projection::default(),
        )
    }
}
