//! Bevy implementation of the selection backend

use super::SnapCamera;
use crate::drag::DragControls;
use crate::selection::{ray_from_ndc, Container, DraggableSet, Highlight, SelectionBackend};
use bevy::ecs::system::SystemParam;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::transform::commands::BuildChildrenTransformExt;
use bevy::window::RequestRedraw;

/// Emissive tint of a selected box (`#aaaaaa`)
pub fn selected_tint() -> LinearRgba {
    Color::srgb_u8(0xaa, 0xaa, 0xaa).to_linear()
}

pub fn emissive_for(highlight: Highlight) -> LinearRgba {
    match highlight {
        Highlight::None => LinearRgba::BLACK,
        Highlight::Selected => selected_tint(),
    }
}

/// Everything the coordinator needs from the ECS for one click
#[derive(SystemParam)]
pub struct SceneBackend<'w, 's> {
    commands: Commands<'w, 's>,
    ray_cast: MeshRayCast<'w, 's>,
    cameras: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<SnapCamera>>,
    material_handles: Query<'w, 's, &'static MeshMaterial3d<StandardMaterial>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    drag_controls: ResMut<'w, DragControls>,
    redraw: EventWriter<'w, RequestRedraw>,
}

impl SelectionBackend<Entity> for SceneBackend<'_, '_> {
    fn ray_cast(&mut self, ndc: Vec2, candidates: &[Entity]) -> Option<Entity> {
        let Ok((camera, camera_transform)) = self.cameras.single() else {
            warn!("No snap camera available for picking");
            return None;
        };
        let ray = ray_from_ndc(camera, camera_transform, ndc)?;
        let filter = |entity: Entity| candidates.contains(&entity);
        let settings = MeshRayCastSettings::default().with_filter(&filter);
        self.ray_cast
            .cast_ray(ray, &settings)
            .first()
            .map(|(entity, _)| *entity)
    }

    fn attach(&mut self, object: Entity, container: Container<Entity>) {
        let mut entity = self.commands.entity(object);
        match container {
            Container::Root => {
                entity.remove_parent_in_place();
            }
            Container::Group(group) => {
                entity.set_parent_in_place(group);
            }
        }
    }

    fn set_highlight(&mut self, object: Entity, highlight: Highlight) {
        let Ok(handle) = self.material_handles.get(object) else {
            warn!("Entity {:?} has no material to highlight", object);
            return;
        };
        if let Some(material) = self.materials.get_mut(&handle.0) {
            material.emissive = emissive_for(highlight);
        }
    }

    fn set_drag_targets(&mut self, draggable: &DraggableSet<Entity>) {
        self.drag_controls
            .set_targets(draggable.targets().to_vec(), draggable.is_grouped());
    }

    fn request_render(&mut self) {
        self.redraw.write(RequestRedraw);
    }
}
