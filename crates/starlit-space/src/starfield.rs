//! Background starfield: uniformly scattered white points in a large cube.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Stars in the background field.
pub const STAR_COUNT: usize = 10_000;

/// Edge length of the cube the stars are scattered in.
const STARFIELD_EXTENT: f32 = 900.0;

/// Share of the stars drawn before the intro.
const IDLE_DRAW_FRACTION: f64 = 0.1;

/// Static star positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Starfield {
    positions: Vec<Vec3>,
}

impl Starfield {
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Stars drawn while the scene is idle.
    pub fn idle_draw_count(&self) -> usize {
        (self.positions.len() as f64 * IDLE_DRAW_FRACTION).floor() as usize
    }

    /// Length of the drawn prefix for the given session phase.
    pub fn draw_count(&self, intro_started: bool) -> usize {
        if intro_started {
            self.positions.len()
        } else {
            self.idle_draw_count()
        }
    }
}

/// Generates a deterministic starfield from a seed.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: usize,
}

impl StarfieldGenerator {
    /// Create a new generator with the given seed and star count.
    pub fn new(seed: u64, star_count: usize) -> Self {
        Self { seed, star_count }
    }

    /// Generate the starfield. Deterministic for a given seed.
    pub fn generate(&self) -> Starfield {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let positions = (0..self.star_count)
            .map(|_| {
                let x = (rng.random::<f32>() - 0.5) * STARFIELD_EXTENT;
                let y = (rng.random::<f32>() - 0.5) * STARFIELD_EXTENT;
                let z = (rng.random::<f32>() - 0.5) * STARFIELD_EXTENT;
                Vec3::new(x, y, z)
            })
            .collect();
        Starfield { positions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_count_matches() {
        let field = StarfieldGenerator::new(42, STAR_COUNT).generate();
        assert_eq!(field.len(), STAR_COUNT);
    }

    #[test]
    fn test_stars_inside_cube() {
        let field = StarfieldGenerator::new(42, 2000).generate();
        let half = STARFIELD_EXTENT / 2.0;
        for p in field.positions() {
            assert!(p.abs().max_element() <= half, "star {p} outside the cube");
        }
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let a = StarfieldGenerator::new(123, 500).generate();
        let b = StarfieldGenerator::new(123, 500).generate();
        assert_eq!(a, b, "same seed should produce identical starfields");
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = StarfieldGenerator::new(1, 100).generate();
        let b = StarfieldGenerator::new(2, 100).generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_draw_range_tenth_until_intro() {
        let field = StarfieldGenerator::new(5, STAR_COUNT).generate();
        assert_eq!(field.idle_draw_count(), 1000);
        assert_eq!(field.draw_count(false), 1000);
        assert_eq!(field.draw_count(true), STAR_COUNT);

        let small = StarfieldGenerator::new(5, 15).generate();
        assert_eq!(small.draw_count(false), 1, "draw range floors");
    }

    #[test]
    fn test_empty_starfield() {
        let field = StarfieldGenerator::new(0, 0).generate();
        assert!(field.is_empty());
        assert_eq!(field.draw_count(false), 0);
    }
}
