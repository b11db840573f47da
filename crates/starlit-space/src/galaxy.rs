//! Spiral galaxy particle distribution.
//!
//! Radii follow a steep power law so most samples land close to the center;
//! a share of those is discarded to hollow out the core. The resulting group
//! is sized to the surviving particles, never to the requested count.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::color::{Rgb, hex_to_linear, lerp_rgb, scale_rgb};

/// Samples closer than this to the center are subject to discarding.
pub const CORE_RADIUS: f32 = 30.0;

/// Chance that a galaxy sample inside [`CORE_RADIUS`] is dropped.
pub const CORE_DISCARD_PROBABILITY: f32 = 0.7;

/// Shape and palette of a spiral distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalaxyParams {
    /// Candidate samples drawn.
    pub count: usize,
    pub arms: u32,
    pub radius: f32,
    /// Extra rotation per unit of radius.
    pub spin: f32,
    /// Jitter scale relative to the sample radius.
    pub randomness: f32,
    /// Exponent applied to the uniform radius draw.
    pub randomness_power: i32,
    /// sRGB color at the center.
    pub inside_color: u32,
    /// sRGB color at `radius`.
    pub outside_color: u32,
}

impl GalaxyParams {
    /// The main spiral.
    pub const SPIRAL: Self = Self {
        count: 100_000,
        arms: 6,
        radius: 100.0,
        spin: 0.5,
        randomness: 0.2,
        randomness_power: 20,
        inside_color: 0xff66ff,
        outside_color: 0x66ffff,
    };

    /// Same arms as the spiral, tinted for the photo clouds.
    pub const PHOTO_CLOUDS: Self = Self {
        inside_color: 0xd63ed6,
        outside_color: 0x48b8b8,
        ..Self::SPIRAL
    };

    pub(crate) fn sample_radius<R: Rng>(&self, rng: &mut R) -> f32 {
        rng.random::<f32>().powi(self.randomness_power) * self.radius
    }

    pub(crate) fn sample_jitter<R: Rng>(&self, rng: &mut R, radius: f32) -> Vec3 {
        let scale = self.randomness * radius;
        let x = (rng.random::<f32>() - 0.5) * scale;
        let y = (rng.random::<f32>() - 0.5) * scale * 0.5;
        let z = (rng.random::<f32>() - 0.5) * scale;
        Vec3::new(x, y, z)
    }

    /// Place sample `index` on its arm.
    pub(crate) fn arm_position(&self, index: usize, radius: f32, jitter: Vec3) -> Vec3 {
        let arms = self.arms.max(1);
        let branch = (index % arms as usize) as f32 / arms as f32 * TAU;
        let angle = branch + radius * self.spin;
        Vec3::new(
            angle.cos() * radius + jitter.x,
            jitter.y,
            angle.sin() * radius + jitter.z,
        )
    }

    /// Radial gradient color with brightness jitter in [0.7, 1.0).
    pub(crate) fn sample_color<R: Rng>(&self, rng: &mut R, radius: f32) -> Rgb {
        let base = lerp_rgb(
            hex_to_linear(self.inside_color),
            hex_to_linear(self.outside_color),
            radius / self.radius,
        );
        scale_rgb(base, 0.7 + 0.3 * rng.random::<f32>())
    }
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self::SPIRAL
    }
}

/// Parallel position/color buffers of a point cloud.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleGroup {
    positions: Vec<Vec3>,
    colors: Vec<Rgb>,
    requested: usize,
}

impl ParticleGroup {
    pub(crate) fn with_capacity(requested: usize) -> Self {
        Self {
            positions: Vec::with_capacity(requested),
            colors: Vec::with_capacity(requested),
            requested,
        }
    }

    pub(crate) fn push(&mut self, position: Vec3, color: Rgb) {
        self.positions.push(position);
        self.colors.push(color);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.positions.shrink_to_fit();
        self.colors.shrink_to_fit();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Candidate samples drawn during generation.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Candidates dropped by the core discard.
    pub fn discarded(&self) -> usize {
        self.requested - self.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

/// Generates the spiral galaxy. Deterministic for a given seed.
pub struct GalaxyGenerator {
    seed: u64,
    params: GalaxyParams,
}

impl GalaxyGenerator {
    /// Generator for the main spiral.
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, GalaxyParams::SPIRAL)
    }

    pub fn with_params(seed: u64, params: GalaxyParams) -> Self {
        Self { seed, params }
    }

    pub fn params(&self) -> &GalaxyParams {
        &self.params
    }

    pub fn generate(&self) -> ParticleGroup {
        let params = &self.params;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut group = ParticleGroup::with_capacity(params.count);

        for i in 0..params.count {
            let radius = params.sample_radius(&mut rng);
            let jitter = params.sample_jitter(&mut rng, radius);
            if radius < CORE_RADIUS && rng.random::<f32>() < CORE_DISCARD_PROBABILITY {
                continue;
            }
            let position = params.arm_position(i, radius, jitter);
            let color = params.sample_color(&mut rng, radius);
            group.push(position, color);
        }

        group.shrink_to_fit();
        log::debug!(
            "Generated galaxy: {} of {} particles kept",
            group.len(),
            group.requested()
        );
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_strictly_between_zero_and_requested() {
        let group = GalaxyGenerator::new(42).generate();
        assert!(group.len() > 0, "galaxy must keep some particles");
        assert!(
            group.len() < 100_000,
            "core discard must drop some particles, kept {}",
            group.len()
        );
        assert_eq!(group.requested(), 100_000);
        assert_eq!(group.discarded(), group.requested() - group.len());
    }

    #[test]
    fn test_buffers_have_equal_length() {
        let group = GalaxyGenerator::new(3).generate();
        assert_eq!(group.positions().len(), group.colors().len());
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = GalaxyGenerator::new(7).generate();
        let b = GalaxyGenerator::new(7).generate();
        assert_eq!(a, b, "same seed must produce identical buffers");

        let c = GalaxyGenerator::new(8).generate();
        assert_ne!(a.positions(), c.positions(), "different seeds should differ");
    }

    #[test]
    fn test_colors_are_scaled_convex_combinations() {
        let params = GalaxyParams::SPIRAL;
        let inside = hex_to_linear(params.inside_color);
        let outside = hex_to_linear(params.outside_color);
        let group = GalaxyGenerator::new(11).generate();

        for color in group.colors() {
            for ch in 0..3 {
                let lo = inside[ch].min(outside[ch]) * 0.7;
                let hi = inside[ch].max(outside[ch]);
                assert!(
                    color[ch] >= lo - 1e-5 && color[ch] <= hi + 1e-5,
                    "channel {ch} = {} outside [{lo}, {hi}]",
                    color[ch]
                );
                assert!((0.0..=1.0).contains(&color[ch]));
            }
        }
    }

    #[test]
    fn test_positions_stay_near_galaxy_radius() {
        let params = GalaxyParams::SPIRAL;
        let group = GalaxyGenerator::new(5).generate();
        // Horizontal jitter is at most half of randomness * radius per axis.
        let bound = params.radius * (1.0 + params.randomness);
        for p in group.positions() {
            assert!(p.length() <= bound, "point {p} escaped the galaxy");
            assert!(p.y.abs() <= params.radius * params.randomness * 0.25 + 1e-4);
        }
    }

    #[test]
    fn test_zero_count_yields_empty_group() {
        let params = GalaxyParams {
            count: 0,
            ..GalaxyParams::SPIRAL
        };
        let group = GalaxyGenerator::with_params(1, params).generate();
        assert!(group.is_empty());
        assert_eq!(group.discarded(), 0);
    }

    #[test]
    fn test_arm_position_without_jitter_lies_on_arm() {
        let params = GalaxyParams::SPIRAL;
        let p = params.arm_position(0, 10.0, Vec3::ZERO);
        let angle = 10.0 * params.spin;
        assert!((p - Vec3::new(angle.cos() * 10.0, 0.0, angle.sin() * 10.0)).length() < 1e-5);

        // Index 3 of 6 arms sits half a turn around.
        let q = params.arm_position(3, 10.0, Vec3::ZERO);
        let angle = std::f32::consts::PI + 10.0 * params.spin;
        assert!((q - Vec3::new(angle.cos() * 10.0, 0.0, angle.sin() * 10.0)).length() < 1e-4);
    }
}
