//! Perspective camera state.

use glam::{Quat, Vec3};

use crate::transform::look_rotation;

/// Where the camera starts before any control or fly-in moves it.
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 20.0, 30.0);

/// A perspective camera looking down its local -Z axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// The scene camera at its initial position, looking at the origin.
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: INITIAL_CAMERA_POSITION,
            rotation: Quat::IDENTITY,
            fov_y_degrees: 75.0,
            aspect,
            near: 0.1,
            far: 100_000.0,
        };
        camera.look_at(Vec3::ZERO);
        camera
    }

    /// Turn the camera toward `target`. Leaves the rotation unchanged when
    /// the direction is degenerate.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(rotation) = look_rotation(self.position - target) {
            self.rotation = rotation;
        }
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
