//! Application configuration.

/// Configuration types and defaults.
pub mod app_config;
/// Command line arguments.
pub mod args;
/// Configuration file storage.
pub mod storage;

pub use app_config::{AppConfig, LogLevel, UiConfig};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
