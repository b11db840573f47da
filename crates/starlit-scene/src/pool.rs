//! Bounded pool of shooting stars travelling along random Bézier curves.
//!
//! Every frame each live star ages, fades in or out, and advances along its
//! curve; a star whose progress passes 1 is removed in that same frame. Then,
//! if the pool has room, a new star spawns with a small fixed probability.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starlit_space::{CubicBezier, WHITE, hex_to_linear, random_curve};

use crate::error::SceneError;
use crate::object::{Category, Drawable, MaterialState};

/// Trail line tint.
const TRAIL_COLOR: u32 = 0x99eaff;

/// Trail opacity relative to the head.
const TRAIL_OPACITY_FACTOR: f64 = 0.7;

/// Radius of the head sphere.
pub const HEAD_RADIUS: f32 = 2.0;

/// Radius of the glow shell around the head.
pub const GLOW_RADIUS: f32 = 3.0;

/// Tunables of the pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoolParams {
    /// Most stars alive at once.
    pub capacity: usize,
    /// Chance per frame of spawning when below capacity.
    pub spawn_probability: f64,
    /// Life, in frames, the fade-out is keyed to.
    pub max_life: u32,
    /// Sample points in each trail, head included.
    pub trail_length: usize,
    /// Curve parameter between consecutive trail samples.
    pub trail_step: f64,
    /// Frames spent fading in and fading out.
    pub fade_ticks: u32,
    /// Lower bound and width of the uniform speed draw.
    pub min_speed: f64,
    pub speed_range: f64,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            capacity: 3,
            spawn_probability: 0.02,
            max_life: 300,
            trail_length: 100,
            trail_step: 0.01,
            fade_ticks: 30,
            min_speed: 0.001,
            speed_range: 0.001,
        }
    }
}

/// Lifecycle stage of a star still in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarStage {
    /// Created, not yet advanced.
    Spawned,
    /// Advanced at least once.
    Aging,
}

/// A single shooting star.
#[derive(Clone, Debug)]
pub struct ShootingStar {
    id: u64,
    curve: CubicBezier,
    progress: f64,
    speed: f64,
    life: u32,
    max_life: u32,
    head: Vec3,
    trail: Vec<Vec3>,
    glow_time: f64,
    head_material: Drawable,
    glow_material: Drawable,
    trail_material: Drawable,
}

impl ShootingStar {
    fn new(id: u64, curve: CubicBezier, speed: f64, params: &PoolParams) -> Self {
        let last = params.trail_length.saturating_sub(1).max(1) as f32;
        let trail = (0..params.trail_length)
            .map(|i| curve.point_at(i as f32 / last))
            .collect();
        Self {
            id,
            curve,
            progress: 0.0,
            speed,
            life: 0,
            max_life: params.max_life,
            head: curve.p0,
            trail,
            glow_time: 0.0,
            head_material: Drawable::new(
                Category::Fadeable,
                MaterialState::transparent(0.0, Some(WHITE)),
            ),
            glow_material: Drawable::new(Category::Fadeable, MaterialState::transparent(1.0, None)),
            trail_material: Drawable::new(
                Category::Fadeable,
                MaterialState::transparent(
                    TRAIL_OPACITY_FACTOR as f32,
                    Some(hex_to_linear(TRAIL_COLOR)),
                ),
            ),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn max_life(&self) -> u32 {
        self.max_life
    }

    pub fn stage(&self) -> StarStage {
        if self.life == 0 {
            StarStage::Spawned
        } else {
            StarStage::Aging
        }
    }

    /// Current head position.
    pub fn head(&self) -> Vec3 {
        self.head
    }

    /// Trail samples, head first.
    pub fn trail(&self) -> &[Vec3] {
        &self.trail
    }

    /// Time fed to the glow shader.
    pub fn glow_time(&self) -> f64 {
        self.glow_time
    }

    pub fn head_material(&self) -> &Drawable {
        &self.head_material
    }

    pub fn glow_material(&self) -> &Drawable {
        &self.glow_material
    }

    pub fn trail_material(&self) -> &Drawable {
        &self.trail_material
    }

    pub fn drawables(&self) -> [&Drawable; 3] {
        [&self.head_material, &self.glow_material, &self.trail_material]
    }

    /// Head, glow and trail materials, for the visibility pass.
    pub fn drawables_mut(&mut self) -> [&mut Drawable; 3] {
        [
            &mut self.head_material,
            &mut self.glow_material,
            &mut self.trail_material,
        ]
    }

    /// Advance one frame. Returns `Ok(false)` once progress has passed 1 and
    /// the star must be removed.
    fn advance(&mut self, params: &PoolParams, time: f64) -> Result<bool, SceneError> {
        self.life += 1;
        let opacity = life_opacity(self.life, self.max_life, params.fade_ticks);
        self.progress += self.speed;
        if self.progress > 1.0 {
            return Ok(false);
        }

        let head = self.curve.point_at(self.progress as f32);
        if !head.is_finite() {
            return Err(SceneError::NonFiniteSample {
                id: self.id,
                progress: self.progress,
            });
        }
        let Some((first, rest)) = self.trail.split_first_mut() else {
            return Err(SceneError::EmptyTrail { id: self.id });
        };
        *first = head;
        for (j, point) in rest.iter_mut().enumerate() {
            let t = (self.progress - (j + 1) as f64 * params.trail_step).max(0.0);
            *point = self.curve.point_at(t as f32);
        }

        self.head = head;
        self.head_material.material.opacity = opacity as f32;
        self.trail_material.material.opacity = (opacity * TRAIL_OPACITY_FACTOR) as f32;
        self.glow_time = time;
        Ok(true)
    }
}

/// Opacity for a star at `life`: ramps up over the first `fade_ticks`, down
/// over the last `fade_ticks` before `max_life`, clamped to [0, 1].
pub fn life_opacity(life: u32, max_life: u32, fade_ticks: u32) -> f64 {
    let fade = fade_ticks.max(1) as f64;
    let opacity = if life < fade_ticks {
        life as f64 / fade
    } else if life as i64 > max_life as i64 - fade_ticks as i64 {
        (max_life as f64 - life as f64) / fade
    } else {
        1.0
    };
    opacity.clamp(0.0, 1.0)
}

/// What happened to the pool during one update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoolUpdate {
    /// Stars whose progress passed 1.
    pub expired: Vec<u64>,
    /// Stars dropped because their update failed.
    pub failed: Vec<SceneError>,
    pub spawned: Option<u64>,
}

/// The bounded collection of live shooting stars.
#[derive(Clone, Debug)]
pub struct ShootingStarPool {
    params: PoolParams,
    stars: Vec<ShootingStar>,
    rng: ChaCha8Rng,
    next_id: u64,
}

impl ShootingStarPool {
    /// A pool holding one freshly spawned star.
    pub fn new(seed: u64) -> Self {
        let mut pool = Self::empty(seed, PoolParams::default());
        pool.spawn();
        pool
    }

    /// A pool with no stars yet.
    pub fn empty(seed: u64, params: PoolParams) -> Self {
        Self {
            params,
            stars: Vec::with_capacity(params.capacity),
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 0,
        }
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    pub fn stars(&self) -> &[ShootingStar] {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut [ShootingStar] {
        &mut self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&ShootingStar> {
        self.stars.iter().find(|s| s.id == id)
    }

    /// Spawn a star on a random curve with a random speed, if there is room.
    pub fn spawn(&mut self) -> Option<u64> {
        if self.stars.len() >= self.params.capacity {
            return None;
        }
        let curve = random_curve(&mut self.rng);
        let speed = self.params.min_speed + self.rng.random::<f64>() * self.params.speed_range;
        self.spawn_with(curve, speed)
    }

    /// Spawn a star with an explicit curve and speed, if there is room.
    pub fn spawn_with(&mut self, curve: CubicBezier, speed: f64) -> Option<u64> {
        if self.stars.len() >= self.params.capacity {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.stars
            .push(ShootingStar::new(id, curve, speed, &self.params));
        tracing::trace!(id, speed, "Shooting star spawned");
        Some(id)
    }

    /// Advance every star, drop expired or failing ones, then maybe spawn.
    pub fn update(&mut self, time: f64) -> PoolUpdate {
        let params = self.params;
        let mut report = PoolUpdate::default();

        self.stars.retain_mut(|star| match star.advance(&params, time) {
            Ok(true) => true,
            Ok(false) => {
                report.expired.push(star.id);
                false
            }
            Err(err) => {
                tracing::warn!(id = star.id, "Removing shooting star: {err}");
                report.failed.push(err);
                false
            }
        });

        if self.stars.len() < params.capacity
            && self.rng.random::<f64>() < params.spawn_probability
        {
            report.spawned = self.spawn();
        }
        report
    }
}
