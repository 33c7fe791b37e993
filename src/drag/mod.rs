//! Pointer dragging of scene objects
//!
//! Objects are dragged on a plane facing the camera through the point where
//! the drag started. The target list and the group flag are replaced
//! wholesale by whoever owns selection; in group mode the first target is
//! moved whenever any of its children is grabbed.
//!
//! Targets are expected to be scene-root entities, so their local and world
//! translations coincide.

use crate::selection::input::intersect_plane;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Drag subsystem state
#[derive(Resource, Debug, Clone, Default)]
pub struct DragControls {
    targets: Vec<Entity>,
    transform_group: bool,
    session: Option<DragSession>,
}

/// An in-progress drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub entity: Entity,
    pub plane_origin: Vec3,
    pub plane_normal: Dir3,
    /// Grab point minus the target's translation at drag start
    pub offset: Vec3,
}

impl DragSession {
    /// Translation that keeps the grab point under `pointer_on_plane`
    pub fn translation_for(&self, pointer_on_plane: Vec3) -> Vec3 {
        pointer_on_plane - self.offset
    }
}

/// Notifications fired while dragging
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Started(Entity),
    Moved(Entity),
    Ended(Entity),
}

impl DragControls {
    pub fn new(targets: Vec<Entity>, transform_group: bool) -> Self {
        Self {
            targets,
            transform_group,
            session: None,
        }
    }

    /// Replace the targets and the group flag together.
    ///
    /// A drag in progress on an entity that is no longer a target is dropped.
    pub fn set_targets(&mut self, targets: Vec<Entity>, transform_group: bool) {
        self.targets = targets;
        self.transform_group = transform_group;
        if let Some(session) = self.session {
            if !self.targets.contains(&session.entity) {
                debug!("Dropping drag on {:?}, no longer a drag target", session.entity);
                self.session = None;
            }
        }
    }

    pub fn targets(&self) -> &[Entity] {
        &self.targets
    }

    pub fn transform_group(&self) -> bool {
        self.transform_group
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Entity that should move when `hit` (with optional parent) is grabbed
    pub fn resolve_target(&self, hit: Entity, parent: Option<Entity>) -> Option<Entity> {
        if self.transform_group {
            parent.filter(|parent| self.targets.contains(parent))
        } else if self.targets.contains(&hit) {
            Some(hit)
        } else {
            None
        }
    }

    pub fn begin(&mut self, session: DragSession) {
        self.session = Some(session);
    }

    pub fn end(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

/// Plugin for pointer dragging
pub struct DragPlugin;

impl Plugin for DragPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragControls>()
            .add_event::<DragEvent>()
            .add_systems(Update, (begin_drag, update_drag, end_drag).chain());
    }
}

fn cursor_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
) -> Option<Ray3d> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.single().ok()?;
    camera.viewport_to_world(camera_transform, cursor).ok()
}

/// Start dragging the target under the cursor on left press
#[allow(clippy::too_many_arguments)]
pub fn begin_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    parents: Query<&ChildOf>,
    transforms: Query<&GlobalTransform>,
    mut ray_cast: MeshRayCast,
    mut controls: ResMut<DragControls>,
    mut events: EventWriter<DragEvent>,
) {
    if controls.is_dragging() || !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(ray) = cursor_ray(&windows, &cameras) else {
        return;
    };

    let parent_of = |entity: Entity| parents.get(entity).ok().map(ChildOf::parent);
    let filter = |entity: Entity| controls.resolve_target(entity, parent_of(entity)).is_some();
    let settings = MeshRayCastSettings::default().with_filter(&filter);
    let Some((hit_entity, hit_point)) = ray_cast
        .cast_ray(ray, &settings)
        .first()
        .map(|(entity, hit)| (*entity, hit.point))
    else {
        return;
    };

    let Some(target) = controls.resolve_target(hit_entity, parent_of(hit_entity)) else {
        return;
    };
    let Ok(target_transform) = transforms.get(target) else {
        return;
    };
    let Ok((_, camera_transform)) = cameras.single() else {
        return;
    };

    controls.begin(DragSession {
        entity: target,
        plane_origin: hit_point,
        plane_normal: camera_transform.forward(),
        offset: hit_point - target_transform.translation(),
    });
    debug!("Started dragging {:?}", target);
    events.write(DragEvent::Started(target));
}

/// Follow the cursor across the drag plane
pub fn update_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut transforms: Query<&mut Transform>,
    mut controls: ResMut<DragControls>,
    mut events: EventWriter<DragEvent>,
) {
    let Some(session) = controls.session().copied() else {
        return;
    };
    if !mouse.pressed(MouseButton::Left) {
        return;
    }
    let Some(ray) = cursor_ray(&windows, &cameras) else {
        return;
    };
    let Some(point) = intersect_plane(ray, session.plane_origin, session.plane_normal) else {
        return;
    };
    let Ok(mut transform) = transforms.get_mut(session.entity) else {
        warn!("Drag target {:?} disappeared", session.entity);
        controls.end();
        return;
    };

    let translation = session.translation_for(point);
    if transform.translation != translation {
        transform.translation = translation;
        events.write(DragEvent::Moved(session.entity));
    }
}

/// Finish the drag on left release
pub fn end_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    mut controls: ResMut<DragControls>,
    mut events: EventWriter<DragEvent>,
) {
    if !mouse.just_released(MouseButton::Left) || !controls.is_dragging() {
        return;
    }
    if let Some(session) = controls.end() {
        debug!("Finished dragging {:?}", session.entity);
        events.write(DragEvent::Ended(session.entity));
    }
}
