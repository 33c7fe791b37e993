//! Resolved application settings
//!
//! Combines CLI arguments, the user config file and built-in defaults into
//! one resource. CLI wins over the config file, which wins over defaults.

use crate::core::cli::CliArgs;
use crate::core::config::ConfigFile;
use crate::scenes::SceneKind;
use crate::selection::ModifierKey;
use bevy::prelude::*;

pub const WINDOW_TITLE: &str = "snapscene";
pub const DEFAULT_WINDOW_SIZE: (f32, f32) = (1280.0, 800.0);

/// Boxes in the snap scene when nothing else is configured
pub const DEFAULT_OBJECT_COUNT: usize = 10;
pub const MAX_OBJECT_COUNT: usize = 256;

#[cfg(debug_assertions)]
pub const DEFAULT_LOG_FILTER: &str =
    "snapscene=debug,bevy_render=warn,bevy_winit=warn,wgpu=warn,naga=warn,winit=warn";
#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_FILTER: &str = "snapscene=info,bevy=warn,wgpu=error,naga=warn,winit=error";

/// Settings for the running demo
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SceneSettings {
    pub scene: SceneKind,
    pub object_count: usize,
    /// Fixed RNG seed for reproducible layouts
    pub seed: Option<u64>,
    pub modifier: ModifierKey,
    pub log_filter: String,
    pub log_to_file: bool,
}

/// Problems noticed while resolving settings.
///
/// Settings are resolved before `LogPlugin` installs a subscriber, so these
/// are held here and logged by the first startup system.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct StartupWarnings(pub Vec<String>);

impl StartupWarnings {
    /// Collect warnings about the CLI arguments and the loaded config file
    pub fn collect(
        cli_args: &CliArgs,
        config: &anyhow::Result<Option<ConfigFile>>,
    ) -> Self {
        let mut warnings = cli_args.warnings();
        match config {
            Ok(Some(config)) => warnings.extend(config.problems()),
            Ok(None) => {}
            Err(e) => warnings.push(format!("{e:#}, using defaults")),
        }
        Self(warnings)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Log and drain the warnings gathered before logging was up
pub fn log_startup_warnings(mut warnings: ResMut<StartupWarnings>) {
    for warning in std::mem::take(&mut warnings.0) {
        warn!("{}", warning);
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            object_count: DEFAULT_OBJECT_COUNT,
            seed: None,
            modifier: ModifierKey::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_to_file: false,
        }
    }
}

impl SceneSettings {
    /// Resolve settings from CLI arguments and an optional config file
    pub fn resolve(cli_args: &CliArgs, config: Option<&ConfigFile>) -> Self {
        let defaults = Self::default();

        let scene = cli_args
            .scene
            .or_else(|| config.and_then(|c| c.default_scene))
            .unwrap_or(defaults.scene);

        let modifier = cli_args
            .modifier
            .or_else(|| config.and_then(|c| c.selection_modifier))
            .unwrap_or(defaults.modifier);

        let config_count = config
            .and_then(|c| c.object_count)
            .filter(|count| (1..=MAX_OBJECT_COUNT).contains(count));
        let object_count = cli_args
            .objects
            .or(config_count)
            .unwrap_or(defaults.object_count);

        let log_filter = config
            .and_then(|c| c.log_filter.clone())
            .unwrap_or(defaults.log_filter);

        Self {
            scene,
            object_count,
            seed: cli_args.seed,
            modifier,
            log_filter,
            log_to_file: cli_args.log_to_file,
        }
    }
}
