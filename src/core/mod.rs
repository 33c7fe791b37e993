//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Application initialization and configuration
//! - Settings and CLI handling
//! - Running the app and reporting startup failures

pub mod app;
pub mod cli;
pub mod config;
pub mod runner;

// Re-export commonly used items
pub use app::create_app;
pub use cli::CliArgs;
pub use config::SceneSettings;
pub use runner::run_app;
