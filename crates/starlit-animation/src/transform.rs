use glam::{EulerRot, Mat3, Quat, Vec3};

/// Translation plus an intrinsic X-then-Y-then-Z Euler rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
}

impl Transform {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Map a point from local to parent space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.quat() * local
    }
}

/// Rotation that turns local +Z toward `forward` while keeping +Y up.
///
/// Returns `None` when `forward` is zero, non-finite or vertical.
pub fn look_rotation(forward: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = Vec3::Y.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}
