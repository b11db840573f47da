//! The animated galaxy scene: object model, visibility state machine,
//! shooting-star pool and the frame engine that drives them through
//! host-provided rendering, asset and audio capabilities.

pub mod engine;
pub mod error;
pub mod external;
pub mod object;
pub mod pool;
pub mod scene;
pub mod session;


pub use engine::{EngineSettings, FrameStats, PHOTO_TEXTURE_SIZE, SceneEngine};
pub use error::SceneError;
pub use external::{
    AssetEvent, AssetProvider, AssetReceiver, AssetSender, AudioPlayer, CanvasJob, CanvasRect,
    FontHandle, FrameView, Hit, ImageHandle, ParticleBuffers, PickTarget, PlaybackOptions, Ray,
    RenderHandle, Renderer, TextureHandle, asset_channel, neon_fit,
};
pub use object::{Blending, Category, Drawable, MaterialState, PointMaterial};
pub use pool::{PoolParams, PoolUpdate, ShootingStar, ShootingStarPool, StarStage, life_opacity};
pub use scene::{CloudObject, GalaxyObject, GlowObject, Planet, Scene, StarfieldObject};
pub use session::{FADE_STEP, IDLE_OPACITY, Phase, SessionState};
