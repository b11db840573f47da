//! Proximity-based LOD selection between a near and a far representation.

use std::sync::Arc;

use glam::Vec3;

/// Distance under which a point counts as "near" the camera.
pub const NEAR_THRESHOLD: f32 = 5.0;

/// Which of the two precomputed representations a group displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Opaque, depth-tested close-up representation.
    Near,
    /// Additive, transparent distant representation.
    Far,
}

/// Geometry that exposes its points in group-local space.
pub trait PointSet {
    /// Local-space point positions.
    fn points(&self) -> &[Vec3];
}

impl PointSet for [Vec3] {
    fn points(&self) -> &[Vec3] {
        self
    }
}

impl PointSet for Vec<Vec3> {
    fn points(&self) -> &[Vec3] {
        self
    }
}

impl PointSet for Arc<[Vec3]> {
    fn points(&self) -> &[Vec3] {
        self
    }
}

/// Selects a representation from camera proximity.
#[derive(Clone, Debug)]
pub struct LodSelector {
    threshold: f32,
}

impl LodSelector {
    /// Create a selector with a custom threshold.
    ///
    /// # Panics
    ///
    /// Panics if the threshold is not a positive finite number.
    pub fn new(threshold: f32) -> Self {
        assert!(
            threshold.is_finite() && threshold > 0.0,
            "threshold must be positive and finite"
        );
        Self { threshold }
    }

    /// The near/far switch distance.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Pick `Near` if any point, offset by `pivot`, lies strictly within the
    /// threshold of `camera`; otherwise `Far`.
    ///
    /// Every point is considered. A centroid test would move the switch
    /// boundary for elongated clouds.
    pub fn select(&self, points: &[Vec3], pivot: Vec3, camera: Vec3) -> Representation {
        let near = points
            .iter()
            .any(|&p| (pivot + p).distance(camera) < self.threshold);
        if near {
            Representation::Near
        } else {
            Representation::Far
        }
    }
}

impl Default for LodSelector {
    fn default() -> Self {
        Self::new(NEAR_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of_points() -> Vec<Vec3> {
        (0..10).map(|i| Vec3::new(i as f32 * 10.0, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_empty_group_is_far() {
        let selector = LodSelector::default();
        assert_eq!(
            selector.select(&[], Vec3::ZERO, Vec3::ZERO),
            Representation::Far
        );
    }

    #[test]
    fn test_single_point_within_threshold_is_near() {
        let selector = LodSelector::default();
        let points = line_of_points();
        // Camera right next to the last point, far from the centroid.
        let camera = Vec3::new(92.0, 0.0, 0.0);
        assert_eq!(selector.select(&points, Vec3::ZERO, camera), Representation::Near);
    }

    #[test]
    fn test_any_point_rule_differs_from_centroid_rule() {
        let selector = LodSelector::default();
        let points = line_of_points();
        let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let camera = Vec3::new(0.0, 3.0, 0.0);
        assert!(camera.distance(centroid) > NEAR_THRESHOLD);
        assert_eq!(selector.select(&points, Vec3::ZERO, camera), Representation::Near);
    }

    #[test]
    fn test_threshold_is_strict() {
        let selector = LodSelector::default();
        let points = vec![Vec3::ZERO];
        let at_threshold = Vec3::new(NEAR_THRESHOLD, 0.0, 0.0);
        assert_eq!(
            selector.select(&points, Vec3::ZERO, at_threshold),
            Representation::Far
        );
        let inside = Vec3::new(NEAR_THRESHOLD - 0.01, 0.0, 0.0);
        assert_eq!(selector.select(&points, Vec3::ZERO, inside), Representation::Near);
    }

    #[test]
    fn test_pivot_offsets_points() {
        let selector = LodSelector::default();
        let points = vec![Vec3::ZERO];
        let pivot = Vec3::new(50.0, 0.0, 0.0);
        assert_eq!(selector.select(&points, pivot, Vec3::ZERO), Representation::Far);
        assert_eq!(
            selector.select(&points, pivot, Vec3::new(49.0, 0.0, 0.0)),
            Representation::Near
        );
    }

    #[test]
    fn test_selection_is_pure() {
        let selector = LodSelector::default();
        let points = line_of_points();
        let camera = Vec3::new(31.0, 2.0, 1.0);
        let first = selector.select(&points, Vec3::ZERO, camera);
        let second = selector.select(&points, Vec3::ZERO, camera);
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "positive")]
    fn test_non_positive_threshold_panics() {
        LodSelector::new(0.0);
    }
}
