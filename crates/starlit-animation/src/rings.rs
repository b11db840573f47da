//! Text rings orbiting the planet.
//!
//! Each ring repeats its text around a circle, spins by a fixed angle every
//! frame, wobbles with sinusoidal tilt, roll and pitch, and keeps every glyph
//! turned toward the camera about the vertical axis.

use std::f64::consts::{PI, TAU};

use glam::Vec3;
use thiserror::Error;

use crate::transform::Transform;

/// Radius of the planet the rings surround.
pub const PLANET_RADIUS: f32 = 10.0;

/// One ring per entry, innermost first.
pub const RING_TEXTS: [&str; 3] = [
    "Huyen Dieu De Thuong",
    "You Are Mine",
    "Wishing You Happiness",
];

const RING_RADIUS_FACTOR: f64 = 1.1;
const RING_GAP: f64 = 5.0;
const CHAR_WIDTH: f64 = 0.7;
const TEXT_SPACING: f64 = 2.0;
const INITIAL_ANGLE_OFFSET: f64 = 0.15 * PI * 0.5;
const RING_SPEED: f64 = 0.008;
const BOB_AMPLITUDE: f64 = 0.3;
const BOB_RATE: f64 = 0.7;

/// Per-glyph update failure. The glyph keeps its previous orientation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RingError {
    #[error("glyph {glyph} of ring {ring} has no usable direction to the camera")]
    DegenerateDirection { ring: usize, glyph: usize },
}

/// Sinusoidal wobble parameters of a ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingMotion {
    pub tilt_speed: f64,
    pub roll_speed: f64,
    pub pitch_speed: f64,
    pub tilt_amplitude: f64,
    pub roll_amplitude: f64,
    pub pitch_amplitude: f64,
    pub tilt_phase: f64,
    pub roll_phase: f64,
    pub pitch_phase: f64,
}

impl Default for RingMotion {
    fn default() -> Self {
        Self {
            tilt_speed: 0.0,
            roll_speed: 0.0,
            pitch_speed: 0.0,
            tilt_amplitude: PI / 3.0,
            roll_amplitude: PI / 6.0,
            pitch_amplitude: PI / 8.0,
            tilt_phase: TAU,
            roll_phase: TAU,
            pitch_phase: TAU,
        }
    }
}

/// A single character placed on a ring.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub character: char,
    /// Angle on the ring at layout time, before any spin.
    pub initial_angle: f64,
    /// Position in ring space.
    pub position: Vec3,
    /// Rotation about the local vertical axis.
    pub yaw: f32,
}

impl Glyph {
    pub fn local_transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: Vec3::new(0.0, self.yaw, 0.0),
        }
    }
}

/// One ring of repeated text.
#[derive(Clone, Debug, PartialEq)]
pub struct RingGroup {
    index: usize,
    radius: f64,
    glyphs: Vec<Glyph>,
    angle_offset: f64,
    speed: f64,
    motion: RingMotion,
    transform: Transform,
}

impl RingGroup {
    /// Lay `text` out around ring `index` of `ring_count`.
    ///
    /// The text is repeated until it wraps the whole circle, characters are
    /// placed last-to-first, and each glyph sits at its character's center
    /// angle.
    pub fn layout(index: usize, ring_count: usize, text: &str) -> Self {
        let radius = PLANET_RADIUS as f64 * RING_RADIUS_FACTOR + index as f64 * RING_GAP;
        let chars: Vec<char> = text.chars().collect();
        let char_angle = CHAR_WIDTH / radius;
        let single_text_angle = char_angle * chars.len() as f64 + TEXT_SPACING / radius;
        let repeats = (TAU / single_text_angle).ceil() as usize;

        let mut glyphs = Vec::with_capacity(repeats * chars.len());
        for repeat in 0..repeats {
            let mut current = repeat as f64 * single_text_angle;
            for &character in chars.iter().rev() {
                let angle = current + char_angle / 2.0;
                // Outer rings start with their axes swapped until the first update.
                let (x, z) = if index > 1 {
                    (angle.sin() * radius, angle.cos() * radius)
                } else {
                    (angle.cos() * radius, angle.sin() * radius)
                };
                glyphs.push(Glyph {
                    character,
                    initial_angle: angle,
                    position: Vec3::new(x as f32, 0.0, z as f32),
                    yaw: 0.0,
                });
                current += char_angle;
            }
        }

        let transform = Transform {
            translation: Vec3::ZERO,
            rotation: Vec3::new(base_tilt(index, ring_count) as f32, 0.0, 0.0),
        };

        Self {
            index,
            radius,
            glyphs,
            angle_offset: INITIAL_ANGLE_OFFSET,
            speed: RING_SPEED,
            motion: RingMotion::default(),
            transform,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn angle_offset(&self) -> f64 {
        self.angle_offset
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn motion(&self) -> &RingMotion {
        &self.motion
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Advance the ring one frame and re-face every glyph toward `camera`.
    ///
    /// `time` is wall-clock seconds. Glyphs that cannot be oriented are
    /// reported and left as they were; the rest of the ring still updates.
    pub fn update(&mut self, ring_count: usize, time: f64, camera: Vec3) -> Vec<RingError> {
        self.angle_offset += self.speed;

        let m = self.motion;
        let tilt = (time * m.tilt_speed + m.tilt_phase).sin() * m.tilt_amplitude;
        let roll = (time * m.roll_speed + m.roll_phase).cos() * m.roll_amplitude;
        let pitch = (time * m.pitch_speed + m.pitch_phase).sin() * m.pitch_amplitude;
        let bob = (time * (m.tilt_speed * BOB_RATE) + m.tilt_phase).sin() * BOB_AMPLITUDE;

        self.transform.rotation = Vec3::new(
            (base_tilt(self.index, ring_count) + tilt) as f32,
            pitch as f32,
            roll as f32,
        );
        self.transform.translation.y = bob as f32;

        let mut errors = Vec::new();
        for (i, glyph) in self.glyphs.iter_mut().enumerate() {
            let angle = glyph.initial_angle + self.angle_offset;
            glyph.position = Vec3::new(
                (angle.cos() * self.radius) as f32,
                0.0,
                (angle.sin() * self.radius) as f32,
            );
            let world = self.transform.transform_point(glyph.position);
            match (camera - world).try_normalize() {
                Some(dir) => glyph.yaw = dir.x.atan2(dir.z),
                None => errors.push(RingError::DegenerateDirection {
                    ring: self.index,
                    glyph: i,
                }),
            }
        }
        errors
    }

    /// World position of glyph `i` under the current ring transform.
    pub fn glyph_world_position(&self, i: usize) -> Option<Vec3> {
        self.glyphs
            .get(i)
            .map(|g| self.transform.transform_point(g.position))
    }
}

fn base_tilt(index: usize, ring_count: usize) -> f64 {
    index as f64 / ring_count.max(1) as f64 * PI
}

/// Availability of the text rings, which depend on an asynchronously loaded
/// font.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RingState {
    /// The font has not arrived yet.
    #[default]
    Pending,
    Ready(Vec<RingGroup>),
    /// The font failed to load. The scene simply has no rings.
    Unavailable,
}

impl RingState {
    /// Lay out one ring per text.
    pub fn build(texts: &[&str]) -> Self {
        let count = texts.len();
        let rings = texts
            .iter()
            .enumerate()
            .map(|(i, text)| RingGroup::layout(i, count, text))
            .collect();
        Self::Ready(rings)
    }

    /// The rings, or an empty slice when none exist.
    pub fn rings(&self) -> &[RingGroup] {
        match self {
            Self::Ready(rings) => rings,
            Self::Pending | Self::Unavailable => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Advance every ring one frame. A no-op unless ready.
    pub fn update(&mut self, time: f64, camera: Vec3) -> Vec<RingError> {
        let Self::Ready(rings) = self else {
            return Vec::new();
        };
        let count = rings.len();
        rings
            .iter_mut()
            .flat_map(|ring| ring.update(count, time, camera))
            .collect()
    }
}
