//! Application builder and initialization
//!
//! This module provides the main app creation function

use super::plugins::{CubeScenePlugins, SnapScenePlugins};
use crate::core::config::{CliArgs, ConfigFile, SceneSettings, StartupWarnings};
use crate::scenes::{snap, SceneKind};
use crate::systems::{configure_default_plugins, SetupPlugin};
use anyhow::Result;
use bevy::prelude::*;
use bevy::winit::WinitSettings;

/// Creates a fully configured Bevy application for the chosen scene.
///
/// Settings are resolved from the CLI arguments and the user config file
/// before any plugin is added, so logging can pick them up. Problems found
/// on the way are logged at startup through [`StartupWarnings`].
pub fn create_app(cli_args: CliArgs) -> Result<App> {
    cli_args
        .validate()
        .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;

    let config = ConfigFile::load();
    let warnings = StartupWarnings::collect(&cli_args, &config);
    let config = config.ok().flatten();
    let settings = SceneSettings::resolve(&cli_args, config.as_ref());

    let mut app = App::new();
    app.insert_resource(warnings);
    configure_resources(&mut app, cli_args, settings.clone());
    configure_window_plugins(&mut app, &settings);
    add_plugin_groups(&mut app, settings.scene);
    info!("Starting {} scene", settings.scene.as_str());
    Ok(app)
}

/// Sets up application resources and configuration
fn configure_resources(app: &mut App, cli_args: CliArgs, settings: SceneSettings) {
    let background_color = match settings.scene {
        SceneKind::Snap => snap::BACKGROUND_COLOR,
        SceneKind::Cube => Color::BLACK,
    };
    let renders_continuously = settings.scene.renders_continuously();

    app.insert_resource(cli_args)
        .insert_resource(settings)
        .insert_resource(ClearColor(background_color));

    // Snap redraws only on input and drag events, cube animates every frame
    #[cfg(not(target_arch = "wasm32"))]
    {
        if renders_continuously {
            app.insert_resource(WinitSettings::game());
        } else {
            app.insert_resource(WinitSettings::desktop_app());
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = renders_continuously;
        app.insert_resource(WinitSettings::game());
    }
}

/// Configure window and default plugins
fn configure_window_plugins(app: &mut App, settings: &SceneSettings) {
    app.add_plugins(configure_default_plugins(settings));
}

/// Add the plugin groups for the chosen scene
fn add_plugin_groups(app: &mut App, scene: SceneKind) {
    debug!("Adding plugin groups...");

    app.add_plugins(SetupPlugin);
    match scene {
        SceneKind::Snap => app.add_plugins(SnapScenePlugins),
        SceneKind::Cube => app.add_plugins(CubeScenePlugins),
    };

    debug!("All plugin groups added successfully");
}
