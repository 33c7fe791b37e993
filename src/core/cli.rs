//! Command line interface for snapscene
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs.

use crate::core::config::MAX_OBJECT_COUNT;
use crate::scenes::SceneKind;
use crate::selection::ModifierKey;
use bevy::prelude::*;
use clap::Parser;

/// snapscene CLI arguments
///
/// Examples:
///   snapscene                          # Open the snap scene
///   snapscene --scene cube             # Open the spinning wireframe scene
///   snapscene --objects 25 --seed 7    # 25 boxes in a reproducible layout
///   snapscene --modifier control       # Hold Ctrl instead of Shift to group
#[derive(Parser, Debug, Resource, Clone, Default)]
#[clap(
    name = "snapscene",
    version,
    about = "Interactive 3D scene demos built with Rust and Bevy",
    long_about = "snapscene hosts two small 3D demos. In the snap scene boxes can be dragged individually, or grouped by holding the selection modifier and clicking them, then dragged together. The cube scene shows a wireframe triangle cloud controlled from a debug panel."
)]
pub struct CliArgs {
    /// Scene to open
    #[clap(
        long = "scene",
        short = 's',
        value_enum,
        help = "Scene to open (snap or cube)"
    )]
    pub scene: Option<SceneKind>,

    /// Number of draggable boxes in the snap scene
    #[clap(
        long = "objects",
        short = 'n',
        help = "Number of boxes in the snap scene",
        long_help = "Number of draggable boxes created at startup in the snap scene. Must be between 1 and 256. Defaults to 10."
    )]
    pub objects: Option<usize>,

    /// Seed for the random layout
    #[clap(
        long = "seed",
        help = "Seed for random colors and positions",
        long_help = "Seed for the random number generator used to place and color objects. The same seed always produces the same layout."
    )]
    pub seed: Option<u64>,

    /// Modifier key that turns clicks into selection toggles
    #[clap(
        long = "modifier",
        short = 'm',
        value_enum,
        help = "Key to hold while clicking to group objects"
    )]
    pub modifier: Option<ModifierKey>,

    /// Write logs to a daily rolling file
    #[clap(
        long = "log-to-file",
        help = "Also write logs to ~/.config/snapscene/logs/",
        long_help = "Also write logs to a daily rolling file in ~/.config/snapscene/logs/. Run with --new-config first so the directory exists."
    )]
    pub log_to_file: bool,

    /// Initialize user configuration directory with default settings
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings",
        long_help = "Initialize the ~/.config/snapscene directory with a settings.json file and a logs directory, then exit."
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    pub fn validate(&self) -> Result<(), String> {
        if let Some(objects) = self.objects {
            if objects == 0 || objects > MAX_OBJECT_COUNT {
                return Err(format!(
                    "Invalid object count: {objects}\nThe snap scene supports between 1 and {MAX_OBJECT_COUNT} objects."
                ));
            }
        }

        Ok(())
    }

    /// Accepted but pointless argument combinations
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.objects.is_some() && self.scene == Some(SceneKind::Cube) {
            warnings.push("--objects has no effect on the cube scene".to_string());
        }
        warnings
    }

    /// Create default CLI args for web builds
    ///
    /// For WASM builds, we start the snap scene since command line arguments
    /// are not available in the browser environment.
    #[cfg(target_arch = "wasm32")]
    pub fn default_for_web() -> Self {
        Self::default()
    }
}
