//! Host settings for the Starlit scene.
//!
//! Scene parameters are compile-time constants living next to the code that
//! uses them. This crate only carries what the host application needs at
//! runtime: window size, session seed and frame limit, asset locations and
//! the log level. Settings persist to `config.ron` and can be overridden from
//! the command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AssetConfig, Config, DebugConfig, SessionConfig, WindowConfig};
pub use error::ConfigError;
