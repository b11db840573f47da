//! Structured logging for the Starlit host.
//!
//! Installs a `tracing` subscriber with an uptime-stamped console layer and,
//! in debug builds, a JSON file layer next to the other platform files. The
//! filter comes from `RUST_LOG` when set, otherwise from the configured level.

use std::path::{Path, PathBuf};

use starlit_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "starlit.log";

/// Everything [`init_logging`] needs, resolved ahead of time.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    /// Directive string handed to [`EnvFilter`].
    pub filter: String,
    /// Where to write the JSON log, if anywhere.
    pub file: Option<PathBuf>,
}

impl LogSettings {
    /// Resolve settings from the host config.
    ///
    /// File logging is only enabled for debug builds with a log directory.
    pub fn resolve(config: Option<&Config>, log_dir: Option<&Path>, debug_build: bool) -> Self {
        let filter = config
            .map(|c| c.debug.log_level.trim())
            .filter(|level| !level.is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string();
        let file = if debug_build {
            log_dir.map(|dir| dir.join(LOG_FILE_NAME))
        } else {
            None
        };
        Self { filter, file }
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber has already been installed.
pub fn init_logging(settings: &LogSettings) -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_file) = settings.file.as_deref().and_then(open_log_file) {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();
        return subscriber.with(file_layer).try_init();
    }

    subscriber.try_init()
}

fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).ok()?;
    }
    std::fs::File::create(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_without_config() {
        let settings = LogSettings::resolve(None, None, false);
        assert_eq!(settings.filter, DEFAULT_FILTER);
        assert!(settings.file.is_none());
    }

    #[test]
    fn test_config_level_is_used() {
        let mut config = Config::default();
        config.debug.log_level = "debug,starlit_scene=trace".to_string();
        let settings = LogSettings::resolve(Some(&config), None, false);
        assert_eq!(settings.filter, "debug,starlit_scene=trace");
        assert!(EnvFilter::try_new(&settings.filter).is_ok());
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        let settings = LogSettings::resolve(Some(&config), None, false);
        assert_eq!(settings.filter, DEFAULT_FILTER);
    }

    #[test]
    fn test_file_only_in_debug_builds() {
        let dir = tempfile::tempdir().unwrap();
        let release = LogSettings::resolve(None, Some(dir.path()), false);
        assert!(release.file.is_none());

        let debug = LogSettings::resolve(None, Some(dir.path()), true);
        assert_eq!(debug.file, Some(dir.path().join(LOG_FILE_NAME)));
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(LOG_FILE_NAME);
        assert!(open_log_file(&path).is_some());
        assert!(path.exists());
    }
}
