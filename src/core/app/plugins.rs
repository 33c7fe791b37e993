//! Plugin group definitions for snapscene
//!
//! One group per scene, so only the chosen demo's systems are scheduled

use bevy::app::{PluginGroup, PluginGroupBuilder};

/// Plugin group for the box dragging scene
#[derive(Default)]
pub struct SnapScenePlugins;

impl PluginGroup for SnapScenePlugins {
    fn build(self) -> PluginGroupBuilder {
        use crate::drag::DragPlugin;
        use crate::scenes::snap::SnapScenePlugin;

        PluginGroupBuilder::start::<Self>()
            .add(DragPlugin) // Must be added before the scene, which seeds its targets
            .add(SnapScenePlugin)
    }
}

/// Plugin group for the wireframe cube scene
#[derive(Default)]
pub struct CubeScenePlugins;

impl PluginGroup for CubeScenePlugins {
    fn build(self) -> PluginGroupBuilder {
        use crate::scenes::cube::CubeScenePlugin;

        PluginGroupBuilder::start::<Self>().add(CubeScenePlugin)
    }
}
