//! Bevy plugin configuration shared by every scene

pub mod plugins;

// Re-export commonly used items
pub use plugins::{configure_default_plugins, configure_logging, SetupPlugin};
