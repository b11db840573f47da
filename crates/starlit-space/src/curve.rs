//! Cubic Bézier paths for shooting stars.

use glam::Vec3;
use rand::Rng;

/// An immutable cubic Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl CubicBezier {
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the Bernstein form at `t` in [0, 1].
    pub fn point_at(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        self.p0 * b0 + self.p1 * b1 + self.p2 * b2 + self.p3 * b3
    }

    /// Whether every control point is finite.
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }
}

/// Uniform draw in `[lo, lo + span)`.
fn offset<R: Rng>(rng: &mut R, lo: f32, span: f32) -> f32 {
    lo + rng.random::<f32>() * span
}

/// A left-to-right sweep across the scene.
///
/// The start lies in x ∈ [-200, -100), y, z ∈ [-100, 100). The end lies in
/// x ∈ [600, 800) within ±100 of the start on y and z. Control points pull
/// 200 units inward from either end with ±50 of jitter.
pub fn random_curve<R: Rng>(rng: &mut R) -> CubicBezier {
    let start = Vec3::new(
        offset(rng, -200.0, 100.0),
        offset(rng, -100.0, 200.0),
        offset(rng, -100.0, 200.0),
    );
    let end = Vec3::new(
        offset(rng, 600.0, 200.0),
        start.y + offset(rng, -100.0, 200.0),
        start.z + offset(rng, -100.0, 200.0),
    );
    let control1 = Vec3::new(
        start.x + offset(rng, 200.0, 100.0),
        start.y + offset(rng, -50.0, 100.0),
        start.z + offset(rng, -50.0, 100.0),
    );
    let control2 = Vec3::new(
        end.x + offset(rng, -200.0, 100.0),
        end.y + offset(rng, -50.0, 100.0),
        end.z + offset(rng, -50.0, 100.0),
    );
    CubicBezier::new(start, control1, control2, end)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn sample() -> CubicBezier {
        CubicBezier::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 2.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_endpoints_are_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..50 {
            let curve = random_curve(&mut rng);
            assert_eq!(curve.point_at(0.0), curve.p0);
            assert_eq!(curve.point_at(1.0), curve.p3);
        }
    }

    #[test]
    fn test_midpoint_of_symmetric_curve() {
        let mid = sample().point_at(0.5);
        assert!((mid - Vec3::new(2.0, 1.5, 0.0)).length() < 1e-6, "got {mid}");
    }

    #[test]
    fn test_point_at_is_pure() {
        let curve = sample();
        assert_eq!(curve.point_at(0.37), curve.point_at(0.37));
    }

    #[test]
    fn test_random_curve_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let c = random_curve(&mut rng);
            assert!((-200.0..-100.0).contains(&c.p0.x));
            assert!((-100.0..100.0).contains(&c.p0.y));
            assert!((-100.0..100.0).contains(&c.p0.z));
            assert!((600.0..800.0).contains(&c.p3.x));
            // Offsets are recovered by subtraction, so allow for rounding.
            let eps = 1e-3;
            assert!((c.p3.y - c.p0.y).abs() <= 100.0 + eps);
            assert!((c.p3.z - c.p0.z).abs() <= 100.0 + eps);
            let d1 = c.p1 - c.p0;
            assert!(d1.x >= 200.0 - eps && d1.x <= 300.0 + eps, "control 1 x offset {}", d1.x);
            assert!(d1.y.abs() <= 50.0 + eps && d1.z.abs() <= 50.0 + eps);
            let d2 = c.p2 - c.p3;
            assert!(d2.x >= -200.0 - eps && d2.x <= -100.0 + eps, "control 2 x offset {}", d2.x);
            assert!(c.is_finite());
        }
    }

    #[test]
    fn test_non_finite_curve_detected() {
        let mut curve = sample();
        curve.p2 = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(!curve.is_finite());
    }
}
