//! Headless host for the Starlit scene.
//!
//! Provides platform directories, the display-paced frame loop and host
//! implementations of the scene's rendering, asset and audio capabilities.

pub mod assets;
pub mod audio;
pub mod frame_loop;
pub mod platform;
pub mod renderer;

pub use assets::{AssetError, DiskAssets};
pub use audio::LoggingAudio;
pub use frame_loop::{FrameLoop, MAX_FRAME_TIME, frame_interval};
pub use renderer::{HeadlessRenderer, ParticleSystemInfo, ray_sphere};
