//! Damped auto-rotating orbit around a target.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::Camera;

const POLE_EPSILON: f32 = 1e-6;

/// Orbit controls in spherical coordinates about `target`.
///
/// `enabled` gates user input only; auto-rotation keeps running while the
/// controls are updated.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub auto_rotate: bool,
    /// 1.0 is one full turn per minute at 60 fps.
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_factor: f32,
    theta_delta: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: false,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            min_distance: 15.0,
            max_distance: 300.0,
            damping_factor: 0.05,
            theta_delta: 0.0,
        }
    }
}

impl OrbitControls {
    /// Azimuth added by auto-rotation every frame.
    pub fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }

    /// Advance one frame: apply damped azimuth rotation, clamp the distance
    /// and turn the camera toward the target.
    pub fn update(&mut self, camera: &mut Camera) {
        let offset = camera.position - self.target;
        let length = offset.length();

        let mut theta = offset.x.atan2(offset.z);
        let phi = if length > 0.0 {
            (offset.y / length).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        if self.auto_rotate {
            self.theta_delta -= self.auto_rotation_angle();
        }
        theta += self.theta_delta * self.damping_factor;
        self.theta_delta *= 1.0 - self.damping_factor;

        let phi = phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let radius = length.clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        camera.position = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
        camera.look_at(self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn azimuth(p: Vec3) -> f32 {
        p.x.atan2(p.z)
    }

    #[test]
    fn test_auto_rotation_angle() {
        let controls = OrbitControls::default();
        assert!((controls.auto_rotation_angle() - TAU / 7200.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_preserves_distance_and_height() {
        let mut controls = OrbitControls::default();
        let mut camera = Camera::default();
        let start = camera.position;
        for _ in 0..120 {
            controls.update(&mut camera);
        }
        assert!((camera.position.length() - start.length()).abs() < 1e-3);
        assert!((camera.position.y - start.y).abs() < 1e-3);
        assert!(
            azimuth(camera.position) < azimuth(start),
            "auto-rotate turns the azimuth negative"
        );
    }

    #[test]
    fn test_damped_rate_converges_to_auto_rotation_angle() {
        let mut controls = OrbitControls::default();
        let mut camera = Camera::default();
        for _ in 0..600 {
            controls.update(&mut camera);
        }
        let before = azimuth(camera.position);
        controls.update(&mut camera);
        let step = before - azimuth(camera.position);
        assert!(
            (step - controls.auto_rotation_angle()).abs() < 1e-5,
            "steady-state step {step}"
        );
    }

    #[test]
    fn test_distance_is_clamped() {
        let mut controls = OrbitControls::default();
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 15.0).abs() < 1e-4);

        camera.position = Vec3::new(0.0, 0.0, 1000.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_camera_faces_target() {
        let mut controls = OrbitControls::default();
        let mut camera = Camera::default();
        controls.update(&mut camera);
        let expected = (controls.target - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-4);
    }

    #[test]
    fn test_no_auto_rotate_holds_still() {
        let mut controls = OrbitControls {
            auto_rotate: false,
            ..OrbitControls::default()
        };
        let mut camera = Camera::default();
        let start = camera.position;
        controls.update(&mut camera);
        assert!((camera.position - start).length() < 1e-4);
    }
}
