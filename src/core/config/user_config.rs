//! User configuration file handling
//!
//! Manages settings from ~/.config/snapscene/settings.json

use super::settings::MAX_OBJECT_COUNT;
use crate::scenes::SceneKind;
use crate::selection::ModifierKey;
use anyhow::Context;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration from ~/.config/snapscene/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Scene to open when none is given on the command line
    pub default_scene: Option<SceneKind>,
    /// Key that turns clicks into selection toggles
    pub selection_modifier: Option<ModifierKey>,
    /// Number of boxes in the snap scene
    pub object_count: Option<usize>,
    /// `tracing` filter directive, e.g. "snapscene=debug,wgpu=error"
    pub log_filter: Option<String>,
}

impl ConfigFile {
    /// Get the path to the snapscene config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("snapscene")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> anyhow::Result<Option<Self>> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file; a missing file is `Ok(None)`
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Values present in the file but unusable
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(count) = self.object_count {
            if !(1..=MAX_OBJECT_COUNT).contains(&count) {
                problems.push(format!(
                    "Ignoring object_count {count} from settings.json, expected 1..={MAX_OBJECT_COUNT}"
                ));
            }
        }
        problems
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings file written by `--new-config`
    pub fn example() -> Self {
        Self {
            default_scene: Some(SceneKind::Snap),
            selection_modifier: Some(ModifierKey::Shift),
            object_count: Some(super::settings::DEFAULT_OBJECT_COUNT),
            log_filter: None,
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/snapscene directory
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory for `--log-to-file`
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        Self::initialize_in(&Self::config_dir())
    }

    pub fn initialize_in(config_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = config_dir.join("settings.json");
        if !settings_path.exists() {
            Self::example().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}
