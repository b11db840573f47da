//! Audio player that only records and logs playback requests.

use starlit_scene::{AudioPlayer, PlaybackOptions};
use tracing::info;

#[derive(Debug, Default)]
pub struct LoggingAudio {
    played: Vec<(String, PlaybackOptions)>,
}

impl LoggingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request so far, oldest first.
    pub fn played(&self) -> &[(String, PlaybackOptions)] {
        &self.played
    }
}

impl AudioPlayer for LoggingAudio {
    fn play(&mut self, url: &str, options: PlaybackOptions) {
        info!(url, looped = options.looped, volume = options.volume, "Playing audio");
        self.played.push((url.to_string(), options));
    }
}
