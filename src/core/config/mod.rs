//! Application configuration management
//!
//! This module handles all configuration aspects:
//! - CLI arguments parsing
//! - User configuration files
//! - Resolved application settings

pub mod settings;
pub mod user_config;

// Simple, clear re-exports
pub use crate::core::cli::CliArgs;
pub use settings::{
    log_startup_warnings, SceneSettings, StartupWarnings, DEFAULT_LOG_FILTER, DEFAULT_OBJECT_COUNT, DEFAULT_WINDOW_SIZE,
    MAX_OBJECT_COUNT, WINDOW_TITLE,
};
pub use user_config::ConfigFile;
