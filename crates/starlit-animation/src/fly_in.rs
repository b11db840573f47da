//! Scripted three-leg camera flight played once when the intro starts.

use std::f64::consts::PI;

use glam::Vec3;

/// Timeline advance per frame.
const TIMELINE_STEP: f64 = 0.002;

/// Share of the timeline taken by each leg. The legs sum to 1.15, so the
/// last leg is cut short of its full duration.
const LEG_DURATIONS: [f64; 3] = [0.2, 0.55, 0.4];

/// Depth the second leg pulls back to.
const PULLBACK_Z: f32 = 160.0;

/// Final resting position of the camera.
const FINAL_POSITION: Vec3 = Vec3::new(-40.0, 100.0, 100.0);

/// Result of advancing the fly-in by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlyInStep {
    /// Camera should move here and look at the origin.
    Moving(Vec3),
    /// The flight is over; pin the camera here.
    Finished(Vec3),
}

/// A one-shot camera path: down to the galaxy plane, back along +Z, then an
/// eased climb to the final viewpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraFlyIn {
    waypoints: [Vec3; 4],
    t: f64,
    finished: bool,
}

impl CameraFlyIn {
    /// Plan the flight from the camera's current position.
    pub fn new(start: Vec3) -> Self {
        let p1 = Vec3::new(start.x, 0.0, start.z);
        let p2 = Vec3::new(start.x, 0.0, PULLBACK_Z);
        Self {
            waypoints: [start, p1, p2, FINAL_POSITION],
            t: 0.0,
            finished: false,
        }
    }

    pub fn waypoints(&self) -> &[Vec3; 4] {
        &self.waypoints
    }

    /// Normalized timeline position.
    pub fn timeline(&self) -> f64 {
        self.t
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance the timeline by one frame. Returns `None` once finished.
    pub fn step(&mut self) -> Option<FlyInStep> {
        if self.finished {
            return None;
        }
        self.t += TIMELINE_STEP;
        let [d1, d2, d3] = LEG_DURATIONS;
        let [p0, p1, p2, p3] = self.waypoints;

        let position = if self.t < d1 {
            p0.lerp(p1, (self.t / d1) as f32)
        } else if self.t < d1 + d2 {
            p1.lerp(p2, ((self.t - d1) / d2) as f32)
        } else if self.t < d1 + d2 + d3 {
            let k = (self.t - d1 - d2) / d3;
            let ease = 0.5 - 0.5 * (PI * k).cos();
            p2.lerp(p3, ease as f32)
        } else {
            self.finished = true;
            return Some(FlyInStep::Finished(p3));
        };
        Some(FlyInStep::Moving(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(fly: &mut CameraFlyIn) -> (usize, Vec3) {
        let mut frames = 0;
        loop {
            frames += 1;
            match fly.step() {
                Some(FlyInStep::Moving(_)) => {}
                Some(FlyInStep::Finished(p)) => return (frames, p),
                None => panic!("fly-in ended without a Finished step"),
            }
        }
    }

    #[test]
    fn test_waypoints_from_start() {
        let fly = CameraFlyIn::new(Vec3::new(3.0, 20.0, 30.0));
        let [p0, p1, p2, p3] = *fly.waypoints();
        assert_eq!(p0, Vec3::new(3.0, 20.0, 30.0));
        assert_eq!(p1, Vec3::new(3.0, 0.0, 30.0));
        assert_eq!(p2, Vec3::new(3.0, 0.0, 160.0));
        assert_eq!(p3, FINAL_POSITION);
    }

    #[test]
    fn test_first_step_moves_toward_p1() {
        let start = Vec3::new(0.0, 20.0, 30.0);
        let mut fly = CameraFlyIn::new(start);
        let Some(FlyInStep::Moving(p)) = fly.step() else {
            panic!("first step must move");
        };
        assert!(p.y < start.y, "camera descends first, got {p}");
        assert!((p - Vec3::new(0.0, 19.8, 30.0)).length() < 1e-4);
    }

    #[test]
    fn test_finishes_at_final_position_once() {
        let mut fly = CameraFlyIn::new(Vec3::new(0.0, 20.0, 30.0));
        let (frames, end) = run_to_end(&mut fly);
        assert_eq!(end, FINAL_POSITION);
        assert!(fly.is_finished());
        assert!(
            (574..=577).contains(&frames),
            "1.15 / 0.002 frames expected, took {frames}"
        );
        assert_eq!(fly.step(), None, "fly-in never restarts");
    }

    #[test]
    fn test_path_is_continuous() {
        let mut fly = CameraFlyIn::new(Vec3::new(0.0, 20.0, 30.0));
        let mut last = Vec3::new(0.0, 20.0, 30.0);
        while let Some(step) = fly.step() {
            let p = match step {
                FlyInStep::Moving(p) | FlyInStep::Finished(p) => p,
            };
            assert!((p - last).length() < 2.0, "jump from {last} to {p}");
            last = p;
        }
    }
}
