//! Application logging functionality
//!
//! Console logging comes from Bevy's `LogPlugin`. With `--log-to-file` an
//! extra fmt layer also writes to a daily rolling file under
//! ~/.config/snapscene/logs/.

use crate::core::config::{ConfigFile, SceneSettings};
use bevy::log::BoxedLayer;
use bevy::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::Layer;

/// Log files are named `snapscene.log.YYYY-MM-DD` (UTC date)
pub const LOG_FILE_PREFIX: &str = "snapscene.log";

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    let date = chrono::Utc::now().format("%Y-%m-%d");
    logs_dir().join(format!("{LOG_FILE_PREFIX}.{date}"))
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    fs::create_dir_all(logs_dir())?;
    Ok(())
}

/// `LogPlugin` hook adding the file layer when settings ask for it
pub fn file_log_layer(app: &mut App) -> Option<BoxedLayer> {
    let log_to_file = app
        .world()
        .get_resource::<SceneSettings>()
        .is_some_and(|settings| settings.log_to_file);
    if !log_to_file {
        return None;
    }

    let appender = tracing_appender::rolling::daily(logs_dir(), LOG_FILE_PREFIX);
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(appender)
        .boxed();
    Some(layer)
}
