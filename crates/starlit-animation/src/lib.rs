//! Time-driven motion: object transforms, the camera with its orbit controls
//! and one-shot fly-in, and the orbiting text rings.

mod camera;
mod controls;
mod fly_in;
mod rig;
mod rings;
mod transform;

pub use camera::{Camera, INITIAL_CAMERA_POSITION};
pub use controls::OrbitControls;
pub use fly_in::{CameraFlyIn, FlyInStep};
pub use rig::{CameraRig, FlyInPhase};
pub use rings::{
    Glyph, PLANET_RADIUS, RING_TEXTS, RingError, RingGroup, RingMotion, RingState,
};
pub use transform::{Transform, look_rotation};
