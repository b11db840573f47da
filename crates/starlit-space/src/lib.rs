//! Procedural content for the scene: the spiral galaxy, per-image photo
//! clouds, nebula glows, the background starfield and shooting-star curves.
//!
//! Everything here is generated once from a seed and is immutable afterwards.

pub mod color;
pub mod curve;
pub mod galaxy;
pub mod nebula;
pub mod photo_cloud;
pub mod starfield;

pub use color::{Rgb, WHITE, hex_to_linear, hsl_to_rgb, lerp_rgb, scale_rgb, srgb_to_linear};
pub use curve::{CubicBezier, random_curve};
pub use galaxy::{
    CORE_DISCARD_PROBABILITY, CORE_RADIUS, GalaxyGenerator, GalaxyParams, ParticleGroup,
};
pub use nebula::{GlowSprite, NEBULA_COUNT, NebulaGenerator, central_glow};
pub use photo_cloud::{CloudGeometry, PhotoCloud, PhotoCloudGenerator};
pub use starfield::{STAR_COUNT, Starfield, StarfieldGenerator};
