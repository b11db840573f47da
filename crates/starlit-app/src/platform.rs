//! Platform directory resolution.
//!
//! Config, asset data and logs live under the OS-conventional locations
//! (XDG on Linux, Known Folders on Windows, Library on macOS).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Directories used by the Starlit host.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Root that asset paths in the config are resolved against.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "starlit";

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| app_config.clone())
            .join(APP_NAME);

        Ok(Self {
            config_dir: app_config.join("config"),
            data_dir,
            log_dir: app_config.join("logs"),
        })
    }

    /// Resolve directories and create them on disk.
    pub fn resolve_and_create() -> Result<Self, PlatformError> {
        let dirs = Self::resolve()?;
        dirs.create_dirs()?;
        Ok(dirs)
    }

    /// Directories rooted under `root`, for tests and `--config` overrides.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            data_dir: app_dir.join("data"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root_nests_under_app_name() {
        let root = Path::new("base");
        let dirs = PlatformDirs::resolve_with_root(root);
        assert_eq!(dirs.config_dir, root.join("starlit").join("config"));
        assert_eq!(dirs.data_dir, root.join("starlit").join("data"));
        assert_eq!(dirs.log_dir, root.join("starlit").join("logs"));
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().expect("create_dirs failed for temp root");

        assert!(dirs.config_dir.exists(), "config_dir was not created");
        assert!(dirs.data_dir.exists(), "data_dir was not created");
        assert!(dirs.log_dir.exists(), "log_dir was not created");
    }

    #[test]
    fn test_platform_dirs_are_absolute_when_resolvable() {
        let Ok(dirs) = PlatformDirs::resolve() else {
            return;
        };
        assert!(dirs.config_dir.is_absolute(), "config_dir is not absolute");
        assert!(dirs.data_dir.is_absolute(), "data_dir is not absolute");
        assert!(dirs.log_dir.is_absolute(), "log_dir is not absolute");
    }
}
