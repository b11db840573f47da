//! Capabilities the engine needs from its host: drawing, asset loading and
//! audio playback.
//!
//! Asset loads complete asynchronously. Providers report results as
//! [`AssetEvent`]s on a channel the engine drains at the start of each frame.

use crossbeam_channel::{Receiver, Sender};
use glam::Vec3;
use starlit_animation::Camera;
use starlit_space::Rgb;

use crate::scene::Scene;
use crate::session::SessionState;

/// A texture owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// A particle system registered with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// A loaded font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u64);

/// A decoded image, referenced by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

/// Point data handed to the renderer when a particle system is created.
#[derive(Clone, Copy, Debug)]
pub struct ParticleBuffers<'a> {
    pub label: &'a str,
    pub positions: &'a [Vec3],
    /// Per-vertex colors, when the system uses them.
    pub colors: Option<&'a [Rgb]>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Closest intersection along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub point: Vec3,
}

/// Something a pointer ray can be tested against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickTarget {
    Sphere { center: Vec3, radius: f32 },
}

/// Everything the renderer needs to draw one frame.
pub struct FrameView<'a> {
    pub frame: u64,
    pub camera: &'a Camera,
    pub scene: &'a Scene,
    pub session: &'a SessionState,
}

/// Square area within a canvas, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Off-screen drawing the host performs to produce a texture.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasJob {
    /// Radial gradient from `core` at the center to transparent black.
    RadialGlow { size: u32, core: [f32; 4] },
    /// `image` drawn into `rect` of a `size`×`size` canvas with a neon glow.
    NeonFit {
        image: ImageHandle,
        size: u32,
        rect: CanvasRect,
    },
    /// Procedural planet surface texture.
    PlanetSurface { size: u32, seed: u64 },
}

/// Fit an image of `width`×`height` inside a square canvas of `size`
/// pixels, keeping the aspect ratio and centering it.
pub fn neon_fit(width: u32, height: u32, size: u32) -> CanvasRect {
    let size = size as f32;
    if width == 0 || height == 0 {
        return CanvasRect {
            x: size / 2.0,
            y: size / 2.0,
            width: 0.0,
            height: 0.0,
        };
    }
    let aspect = width as f32 / height as f32;
    let (w, h) = if aspect > 1.0 {
        (size, size / aspect)
    } else {
        (size * aspect, size)
    };
    CanvasRect {
        x: (size - w) / 2.0,
        y: (size - h) / 2.0,
        width: w,
        height: h,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackOptions {
    pub looped: bool,
    pub volume: f32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            looped: true,
            volume: 0.7,
        }
    }
}

/// Completion of an asynchronous asset load.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetEvent {
    ImageLoaded { group: usize, image: ImageHandle },
    ImageFailed { group: usize, reason: String },
    FontLoaded(FontHandle),
    FontFailed { reason: String },
}

pub type AssetSender = Sender<AssetEvent>;
pub type AssetReceiver = Receiver<AssetEvent>;

/// Channel connecting an asset provider to the engine.
pub fn asset_channel() -> (AssetSender, AssetReceiver) {
    crossbeam_channel::unbounded()
}

/// Draws the scene.
pub trait Renderer {
    fn create_particle_system(&mut self, buffers: &ParticleBuffers<'_>) -> RenderHandle;

    fn render(&mut self, view: &FrameView<'_>);

    /// Ray from the camera through the pixel at (`x`, `y`).
    fn screen_to_ray(&self, x: f32, y: f32, camera: &Camera) -> Ray;

    fn intersect(&self, ray: &Ray, target: &PickTarget) -> Option<Hit>;
}

/// Loads images and fonts and paints canvas textures.
pub trait AssetProvider {
    /// Start loading the image for photo cloud `group`. The result arrives as
    /// an [`AssetEvent`].
    fn load_image(&mut self, group: usize, path: &str);

    /// Start loading the ring font. The result arrives as an [`AssetEvent`].
    fn load_font(&mut self, url: &str);

    /// Paint a canvas synchronously and upload it as a texture.
    fn paint_canvas(&mut self, job: &CanvasJob) -> TextureHandle;
}

pub trait AudioPlayer {
    fn play(&mut self, url: &str, options: PlaybackOptions);
}
