//! Disk-backed asset provider.
//!
//! Images and the ring font are loaded on a small pool of worker threads.
//! Results are reported to the engine as [`AssetEvent`]s. Decoded images wait
//! in a shared map until the engine asks for them to be fitted into a canvas.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Sender, unbounded};
use dashmap::DashMap;
use image::{Rgba, RgbaImage, imageops};
use noise::{NoiseFn, Perlin};
use starlit_scene::{
    AssetEvent, AssetProvider, AssetSender, CanvasJob, CanvasRect, FontHandle, ImageHandle,
    TextureHandle,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure to load one asset. Reported to the engine, never fatal.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("{} is not a typeface font: {reason}", path.display())]
    Font { path: PathBuf, reason: String },

    #[error("failed to spawn asset worker: {0}")]
    Spawn(std::io::Error),
}

enum LoadTask {
    Image { group: usize, path: PathBuf },
    Font { path: PathBuf },
}

/// Loads assets from a root directory.
pub struct DiskAssets {
    root: PathBuf,
    tasks: Option<Sender<LoadTask>>,
    decoded: Arc<DashMap<u64, RgbaImage>>,
    in_flight: Arc<AtomicU64>,
    textures: HashMap<TextureHandle, RgbaImage>,
    next_texture: u64,
}

impl DiskAssets {
    /// Start `thread_count` workers that report on `events`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Spawn`] if a worker thread cannot be started.
    pub fn new(root: &Path, events: AssetSender, thread_count: usize) -> Result<Self, AssetError> {
        let (task_tx, task_rx) = unbounded::<LoadTask>();
        let decoded = Arc::new(DashMap::new());
        let in_flight = Arc::new(AtomicU64::new(0));
        let next_id = Arc::new(AtomicU64::new(0));

        for _ in 0..thread_count.max(1) {
            let receiver = task_rx.clone();
            let events = events.clone();
            let decoded = Arc::clone(&decoded);
            let in_flight = Arc::clone(&in_flight);
            let next_id = Arc::clone(&next_id);

            std::thread::Builder::new()
                .name("asset-loader".into())
                .spawn(move || {
                    while let Ok(task) = receiver.recv() {
                        let id = next_id.fetch_add(1, Ordering::Relaxed);
                        let event = run_task(task, id, &decoded);
                        in_flight.fetch_sub(1, Ordering::Relaxed);
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                })
                .map_err(AssetError::Spawn)?;
        }

        Ok(Self {
            root: root.to_path_buf(),
            tasks: Some(task_tx),
            decoded,
            in_flight,
            textures: HashMap::new(),
            next_texture: 0,
        })
    }

    /// A provider with a default worker count based on CPU cores.
    pub fn with_defaults(root: &Path, events: AssetSender) -> Result<Self, AssetError> {
        let threads = num_cpus::get().saturating_sub(2).clamp(1, 4);
        Self::new(root, events, threads)
    }

    /// Loads submitted but not yet reported.
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Pixels of a painted texture.
    pub fn texture(&self, handle: TextureHandle) -> Option<&RgbaImage> {
        self.textures.get(&handle)
    }

    fn submit(&self, task: LoadTask) {
        let Some(tasks) = &self.tasks else {
            return;
        };
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        if tasks.send(task).is_err() {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            warn!("Asset workers are gone, dropping load request");
        }
    }

    fn store(&mut self, pixels: RgbaImage) -> TextureHandle {
        let handle = TextureHandle(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(handle, pixels);
        handle
    }
}

impl Drop for DiskAssets {
    fn drop(&mut self) {
        // Closing the task channel lets the workers exit.
        self.tasks.take();
    }
}

impl AssetProvider for DiskAssets {
    fn load_image(&mut self, group: usize, path: &str) {
        let path = self.root.join(path);
        debug!(group, path = %path.display(), "Loading image");
        self.submit(LoadTask::Image { group, path });
    }

    fn load_font(&mut self, url: &str) {
        let path = self.root.join(url);
        debug!(path = %path.display(), "Loading font");
        self.submit(LoadTask::Font { path });
    }

    fn paint_canvas(&mut self, job: &CanvasJob) -> TextureHandle {
        let pixels = match job {
            CanvasJob::RadialGlow { size, core } => radial_glow(*size, *core),
            CanvasJob::NeonFit { image, size, rect } => {
                let source = self.decoded.remove(&image.id).map(|(_, pixels)| pixels);
                if source.is_none() {
                    warn!(image = image.id, "Fitting an image that was never decoded");
                }
                neon_canvas(source.as_ref(), *size, *rect)
            }
            CanvasJob::PlanetSurface { size, seed } => planet_surface(*size, *seed),
        };
        self.store(pixels)
    }
}

fn run_task(task: LoadTask, id: u64, decoded: &DashMap<u64, RgbaImage>) -> AssetEvent {
    match task {
        LoadTask::Image { group, path } => match decode_image(&path) {
            Ok(pixels) => {
                let image = ImageHandle {
                    id,
                    width: pixels.width(),
                    height: pixels.height(),
                };
                decoded.insert(id, pixels);
                AssetEvent::ImageLoaded { group, image }
            }
            Err(err) => AssetEvent::ImageFailed {
                group,
                reason: err.to_string(),
            },
        },
        LoadTask::Font { path } => match check_font(&path) {
            Ok(()) => AssetEvent::FontLoaded(FontHandle(id)),
            Err(err) => AssetEvent::FontFailed {
                reason: err.to_string(),
            },
        },
    }
}

fn decode_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Accept any JSON object carrying a `glyphs` table.
fn check_font(path: &Path) -> Result<(), AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let font: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| AssetError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    if font.get("glyphs").is_some_and(|g| g.is_object()) {
        Ok(())
    } else {
        Err(AssetError::Font {
            path: path.to_path_buf(),
            reason: "missing glyph table".into(),
        })
    }
}

fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Gradient from `core` at the center to transparent black at the rim.
fn radial_glow(size: u32, core: [f32; 4]) -> RgbaImage {
    let half = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - half;
        let dy = y as f32 + 0.5 - half;
        let t = ((dx * dx + dy * dy).sqrt() / half.max(f32::EPSILON)).min(1.0);
        let k = 1.0 - t;
        Rgba(to_rgba8([core[0] * k, core[1] * k, core[2] * k, core[3] * k]))
    })
}

/// Fit `source` into `rect` of a transparent square canvas.
fn neon_canvas(source: Option<&RgbaImage>, size: u32, rect: CanvasRect) -> RgbaImage {
    let mut canvas = RgbaImage::new(size, size);
    let (width, height) = (rect.width.round() as u32, rect.height.round() as u32);
    let Some(source) = source else {
        return canvas;
    };
    if width > 0 && height > 0 {
        let fitted = imageops::resize(source, width, height, imageops::FilterType::Triangle);
        imageops::overlay(
            &mut canvas,
            &fitted,
            rect.x.round() as i64,
            rect.y.round() as i64,
        );
    }
    canvas
}

/// Banded storm texture for the planet.
fn planet_surface(size: u32, seed: u64) -> RgbaImage {
    let perlin = Perlin::new(seed as u32);
    let scale = 4.0 / size.max(1) as f64;
    RgbaImage::from_fn(size, size, |x, y| {
        let n = perlin.get([x as f64 * scale, y as f64 * scale * 3.0, 0.0]);
        let band = ((y as f64 * scale * 6.0 + n * 2.0).sin() * 0.5 + 0.5) as f32;
        Rgba(to_rgba8([
            0.35 + 0.4 * band,
            0.2 + 0.3 * band,
            0.55 + 0.35 * band,
            1.0,
        ]))
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use starlit_scene::{asset_channel, neon_fit};

    use super::*;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 220, 255]));
        image.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_image_load_reports_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 40, 20);
        let (tx, rx) = asset_channel();
        let mut assets = DiskAssets::new(dir.path(), tx, 1).unwrap();

        assets.load_image(3, "a.png");
        let event = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        let AssetEvent::ImageLoaded { group, image } = event.clone() else {
            panic!("expected a loaded image, got {event:?}");
        };
        assert_eq!(assets.in_flight_count(), 0, "reported loads are no longer pending");
        assert_eq!(group, 3);
        assert_eq!((image.width, image.height), (40, 20));

        let texture = assets.paint_canvas(&CanvasJob::NeonFit {
            image,
            size: 256,
            rect: neon_fit(40, 20, 256),
        });
        let pixels = assets.texture(texture).unwrap();
        assert_eq!(pixels.dimensions(), (256, 256));
        assert_eq!(pixels.get_pixel(128, 128).0[3], 255, "image drawn in the middle");
        assert_eq!(pixels.get_pixel(128, 2).0[3], 0, "letterbox stays transparent");
    }

    #[test]
    fn test_missing_image_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = asset_channel();
        let mut assets = DiskAssets::new(dir.path(), tx, 1).unwrap();
        assets.load_image(0, "missing.jpg");
        let event = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(matches!(event, AssetEvent::ImageFailed { group: 0, .. }));
        assert_eq!(assets.in_flight_count(), 0, "failed loads are no longer pending");
    }

    #[test]
    fn test_font_requires_glyph_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.json"), r#"{"glyphs": {"a": {}}}"#).unwrap();
        std::fs::write(dir.path().join("bad.json"), r#"{"name": "x"}"#).unwrap();
        let (tx, rx) = asset_channel();
        let mut assets = DiskAssets::new(dir.path(), tx, 1).unwrap();

        assets.load_font("good.json");
        let good = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(matches!(good, AssetEvent::FontLoaded(_)));

        assets.load_font("bad.json");
        let bad = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(matches!(bad, AssetEvent::FontFailed { .. }));

        assets.load_font("absent.json");
        let absent = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(matches!(absent, AssetEvent::FontFailed { .. }));
    }

    #[test]
    fn test_radial_glow_fades_to_rim() {
        let glow = radial_glow(64, [1.0, 1.0, 1.0, 0.8]);
        let center = glow.get_pixel(32, 32).0;
        let corner = glow.get_pixel(0, 0).0;
        assert!(center[3] > 190, "center alpha {}", center[3]);
        assert_eq!(corner, [0, 0, 0, 0]);
    }

    #[test]
    fn test_planet_surface_is_opaque_and_deterministic() {
        let a = planet_surface(32, 9);
        let b = planet_surface(32, 9);
        assert_eq!(a, b);
        assert!(a.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_unknown_image_paints_blank_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = asset_channel();
        let mut assets = DiskAssets::new(dir.path(), tx, 1).unwrap();
        let texture = assets.paint_canvas(&CanvasJob::NeonFit {
            image: ImageHandle {
                id: 99,
                width: 10,
                height: 10,
            },
            size: 16,
            rect: neon_fit(10, 10, 16),
        });
        let pixels = assets.texture(texture).unwrap();
        assert!(pixels.pixels().all(|p| p.0[3] == 0));
    }
}
