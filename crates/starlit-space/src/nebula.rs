//! Decorative nebula glows and the central glow sprite.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::color::hsl_to_rgb;

/// Number of colored nebula sprites.
pub const NEBULA_COUNT: usize = 15;

const NEBULA_SCALE: f32 = 100.0;
const NEBULA_SPREAD: f32 = 175.0;
const NEBULA_OPACITY: f32 = 0.55;
const NEBULA_TEXTURE_SIZE: u32 = 256;
const NEBULA_SATURATION: f32 = 0.8;
const NEBULA_LIGHTNESS: f32 = 0.5;
const NEBULA_CORE_ALPHA: f32 = 0.6;

/// An additive, camera-facing sprite textured with a radial gradient from
/// `core_color` at the center to transparent black at the rim.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowSprite {
    pub position: Vec3,
    /// Uniform world-space size.
    pub scale: f32,
    /// RGBA at the gradient center.
    pub core_color: [f32; 4],
    /// Material opacity before any scene-wide fade.
    pub opacity: f32,
    /// Edge length of the painted gradient texture in pixels.
    pub texture_size: u32,
}

/// The faint white glow at the galaxy center.
pub fn central_glow() -> GlowSprite {
    GlowSprite {
        position: Vec3::ZERO,
        scale: 8.0,
        core_color: [1.0, 1.0, 1.0, 0.8],
        opacity: 0.25,
        texture_size: 156,
    }
}

/// Scatters randomly tinted glow sprites around the galaxy.
pub struct NebulaGenerator {
    seed: u64,
    count: usize,
}

impl NebulaGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            count: NEBULA_COUNT,
        }
    }

    pub fn with_count(seed: u64, count: usize) -> Self {
        Self { seed, count }
    }

    /// Generate the sprites. Deterministic for a given seed.
    pub fn generate(&self) -> Vec<GlowSprite> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        (0..self.count)
            .map(|_| {
                let hue = rng.random::<f32>() * 360.0;
                let [r, g, b] = hsl_to_rgb(hue, NEBULA_SATURATION, NEBULA_LIGHTNESS);
                let x = (rng.random::<f32>() - 0.5) * NEBULA_SPREAD;
                let y = (rng.random::<f32>() - 0.5) * NEBULA_SPREAD;
                let z = (rng.random::<f32>() - 0.5) * NEBULA_SPREAD;
                GlowSprite {
                    position: Vec3::new(x, y, z),
                    scale: NEBULA_SCALE,
                    core_color: [r, g, b, NEBULA_CORE_ALPHA],
                    opacity: NEBULA_OPACITY,
                    texture_size: NEBULA_TEXTURE_SIZE,
                }
            })
            .collect()
    }
}
