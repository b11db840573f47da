use starlit_animation::RingError;
use thiserror::Error;

/// Failures isolated to a single scene object. None of them stops a frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("shooting star {id} sampled a non-finite point at progress {progress}")]
    NonFiniteSample { id: u64, progress: f64 },

    #[error("shooting star {id} has an empty trail")]
    EmptyTrail { id: u64 },

    #[error("no photo cloud for image group {0}")]
    UnknownPhotoGroup(usize),

    #[error("image for photo cloud {group} is unavailable: {reason}")]
    ImageUnavailable { group: usize, reason: String },

    #[error("font is unavailable: {0}")]
    FontUnavailable(String),

    #[error(transparent)]
    Glyph(#[from] RingError),
}
