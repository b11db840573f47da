//! Command-line argument parsing for the Starlit host.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Starlit command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "starlit", about = "Animated galaxy scene")]
pub struct CliArgs {
    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Seed for procedural generation and shooting stars.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many frames.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Click the planet on this frame.
    #[arg(long)]
    pub click_at: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(seed) = args.seed {
            self.session.seed = Some(seed);
        }
        if let Some(frames) = args.frames {
            self.session.max_frames = Some(frames);
        }
        if let Some(frame) = args.click_at {
            self.session.click_at_frame = Some(frame);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> CliArgs {
        CliArgs {
            width: None,
            height: None,
            seed: None,
            frames: None,
            click_at: None,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            seed: Some(42),
            click_at: Some(10),
            ..no_overrides()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.session.seed, Some(42));
        assert_eq!(config.session.click_at_frame, Some(10));
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.session.max_frames, None);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&no_overrides());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["starlit", "--frames", "600", "--log-level", "debug"]);
        assert_eq!(args.frames, Some(600));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.seed.is_none());
    }
}
