//! Default plugin configuration for snapscene
//!
//! Window, logging and gizmo setup shared by both scenes.

use crate::core::config::{
    log_startup_warnings, SceneSettings, StartupWarnings, DEFAULT_WINDOW_SIZE, WINDOW_TITLE,
};
use crate::logging;
use bevy::gizmos::{config::DefaultGizmoConfigGroup, config::GizmoConfigStore};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

/// Width of wireframe gizmo lines in pixels
const GIZMO_LINE_WIDTH: f32 = 1.5;

/// Configure logging from the resolved settings
pub fn configure_logging(settings: &SceneSettings) -> LogPlugin {
    #[cfg(debug_assertions)]
    let level = Level::DEBUG;
    #[cfg(not(debug_assertions))]
    let level = Level::INFO;

    LogPlugin {
        level,
        filter: settings.log_filter.clone(),
        custom_layer: logging::file_log_layer,
        ..default()
    }
}

/// Configure default Bevy plugins for the application
pub fn configure_default_plugins(settings: &SceneSettings) -> bevy::app::PluginGroupBuilder {
    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: format!("{WINDOW_TITLE} - {}", settings.scene.as_str()),
                resolution: DEFAULT_WINDOW_SIZE.into(),
                // Tell wasm to resize the window according to the available canvas
                fit_canvas_to_parent: true,
                // Tells wasm not to override default event handling, like F5, Ctrl+R etc.
                prevent_default_event_handling: false,
                ..default()
            }),
            ..default()
        })
        .set(configure_logging(settings))
}

/// System to configure gizmo appearance
fn configure_gizmos(mut gizmo_store: ResMut<GizmoConfigStore>) {
    let (config, _) = gizmo_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = GIZMO_LINE_WIDTH;
    debug!("Configured gizmo line width to {}px", GIZMO_LINE_WIDTH);
}

/// Plugin to organize setup systems
pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StartupWarnings>()
            .add_systems(Startup, (log_startup_warnings, configure_gizmos));
    }
}
