//! The camera together with everything that moves it.

use glam::Vec3;

use crate::camera::Camera;
use crate::controls::OrbitControls;
use crate::fly_in::{CameraFlyIn, FlyInStep};

/// Where the one-shot fly-in is in its lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub enum FlyInPhase {
    NotStarted,
    Running(CameraFlyIn),
    Finished,
}

/// Owns the camera, its orbit controls and the fly-in.
///
/// While the fly-in runs it has exclusive control of the camera; otherwise
/// the orbit controls update it every frame.
#[derive(Clone, Debug)]
pub struct CameraRig {
    camera: Camera,
    controls: OrbitControls,
    fly_in: FlyInPhase,
}

impl CameraRig {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            controls: OrbitControls::default(),
            fly_in: FlyInPhase::NotStarted,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn fly_in(&self) -> &FlyInPhase {
        &self.fly_in
    }

    /// Begin the fly-in from the current camera position and take its first
    /// step immediately. Does nothing and returns `false` if it has already
    /// been started.
    pub fn start_fly_in(&mut self) -> bool {
        if !matches!(self.fly_in, FlyInPhase::NotStarted) {
            return false;
        }
        self.controls.enabled = false;
        self.fly_in = FlyInPhase::Running(CameraFlyIn::new(self.camera.position));
        self.step_fly_in();
        true
    }

    /// Per-frame update: step the fly-in if it is running, otherwise let the
    /// orbit controls move the camera.
    pub fn update(&mut self) {
        if matches!(self.fly_in, FlyInPhase::Running(_)) {
            self.step_fly_in();
        } else {
            self.controls.update(&mut self.camera);
        }
    }

    fn step_fly_in(&mut self) {
        let FlyInPhase::Running(fly) = &mut self.fly_in else {
            return;
        };
        match fly.step() {
            Some(FlyInStep::Moving(position)) => self.place(position),
            Some(FlyInStep::Finished(position)) => self.finish(Some(position)),
            None => self.finish(None),
        }
    }

    fn finish(&mut self, position: Option<Vec3>) {
        if let Some(position) = position {
            self.place(position);
        }
        self.controls.target = Vec3::ZERO;
        self.controls.enabled = true;
        self.fly_in = FlyInPhase::Finished;
        log::info!("Camera fly-in finished");
    }

    fn place(&mut self, position: Vec3) {
        self.camera.position = position;
        self.camera.look_at(Vec3::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rig_orbits_before_fly_in() {
        let mut rig = CameraRig::new(Camera::default());
        let start = rig.camera().position;
        rig.update();
        assert_ne!(rig.camera().position, start, "auto-rotate moves the idle camera");
        assert!(!rig.controls().enabled);
    }

    #[test]
    fn test_fly_in_runs_once_and_enables_controls() {
        let mut rig = CameraRig::new(Camera::default());
        assert!(rig.start_fly_in());
        assert!(!rig.start_fly_in(), "second start is ignored");
        assert!(matches!(rig.fly_in(), FlyInPhase::Running(_)));

        for _ in 0..1000 {
            rig.update();
            if matches!(rig.fly_in(), FlyInPhase::Finished) {
                break;
            }
        }
        assert!(matches!(rig.fly_in(), FlyInPhase::Finished));
        assert!(rig.controls().enabled);
        assert_eq!(rig.camera().position, Vec3::new(-40.0, 100.0, 100.0));
        assert!(!rig.start_fly_in(), "finished fly-in never restarts");
    }

    #[test]
    fn test_fly_in_starts_from_rotated_position() {
        let mut rig = CameraRig::new(Camera::default());
        for _ in 0..200 {
            rig.update();
        }
        let before = rig.camera().position;
        rig.start_fly_in();
        let FlyInPhase::Running(fly) = rig.fly_in() else {
            panic!("fly-in should be running");
        };
        assert_eq!(fly.waypoints()[0], before);
    }
}
