//! Snap scene
//!
//! A pool of boxes that can be dragged one at a time, or shift-clicked into
//! a selection group and dragged together.

pub mod backend;
pub mod layout;

use crate::core::config::SceneSettings;
use crate::drag::{DragControls, DragEvent};
use crate::selection::{screen_to_ndc, ClickOutcome, KeyTransition, SelectionCoordinator};
use backend::SceneBackend;
use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, RequestRedraw};
use layout::{random_layouts, BOX_SIZE};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

pub const BACKGROUND_COLOR: Color = Color::srgb(0.941, 0.941, 0.941);
const AMBIENT_BRIGHTNESS: f32 = 400.0;
const SPOT_LIGHT_INTENSITY: f32 = 5.0e10;
const SPOT_LIGHT_RANGE: f32 = 5000.0;

/// Marker for the snap scene camera
#[derive(Component, Debug, Default)]
pub struct SnapCamera;

/// Marker for the container that holds selected boxes
#[derive(Component, Debug, Default)]
pub struct SelectionGroup;

/// Marker for boxes in the object pool, with their pool index
#[derive(Component, Debug, Clone, Copy)]
pub struct PoolObject(pub usize);

/// Selection state for the snap scene
#[derive(Resource, Debug)]
pub struct SnapSelection(pub SelectionCoordinator<Entity>);

pub struct SnapScenePlugin;

impl Plugin for SnapScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_snap_scene).add_systems(
            Update,
            (
                track_selection_modifier,
                clear_selection_on_escape,
                handle_selection_click.after(crate::drag::end_drag),
                redraw_on_drag,
            )
                .chain()
                .run_if(resource_exists::<SnapSelection>),
        );
    }
}

/// Spawn camera, lights, the selection group and the box pool
pub fn setup_snap_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut drag_controls: ResMut<DragControls>,
    settings: Res<SceneSettings>,
) {
    commands.spawn((
        Name::new("Snap Camera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 70.0_f32.to_radians(),
            near: 1.0,
            far: 5000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, 1000.0),
        SnapCamera,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0x50, 0x50, 0x50),
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.spawn((
        Name::new("Spot Light"),
        SpotLight {
            intensity: SPOT_LIGHT_INTENSITY,
            range: SPOT_LIGHT_RANGE,
            outer_angle: PI / 9.0,
            inner_angle: PI / 12.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 500.0, 2000.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let group = commands
        .spawn((
            Name::new("Selection Group"),
            Transform::default(),
            Visibility::default(),
            SelectionGroup,
        ))
        .id();

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let cube = meshes.add(Cuboid::from_length(BOX_SIZE));
    let pool: Vec<Entity> = random_layouts(&mut rng, settings.object_count)
        .into_iter()
        .enumerate()
        .map(|(index, layout)| {
            let material = materials.add(StandardMaterial {
                base_color: layout.color,
                perceptual_roughness: 0.9,
                ..default()
            });
            commands
                .spawn((
                    Name::new(format!("Box {index}")),
                    Mesh3d(cube.clone()),
                    MeshMaterial3d(material),
                    layout.transform(),
                    PoolObject(index),
                ))
                .id()
        })
        .collect();

    info!(
        "Snap scene ready: {} boxes, hold {} and click to group",
        pool.len(),
        settings.modifier.as_str()
    );

    let coordinator = SelectionCoordinator::new(pool, group, settings.modifier);
    let draggable = coordinator.draggable();
    drag_controls.set_targets(draggable.targets().to_vec(), draggable.is_grouped());
    commands.insert_resource(SnapSelection(coordinator));
}

/// Feed key presses and releases to the coordinator
pub fn track_selection_modifier(
    mut keys: EventReader<KeyboardInput>,
    mut selection: ResMut<SnapSelection>,
) {
    for event in keys.read() {
        let transition = match event.state {
            ButtonState::Pressed => KeyTransition::Pressed(event.key_code),
            ButtonState::Released => KeyTransition::Released(event.key_code),
        };
        let was_held = selection.0.modifier_held();
        let held = selection.0.handle_key(transition);
        if held != was_held {
            debug!("Selection modifier held: {}", held);
        }
    }
}

/// Escape releases every selected box
pub fn clear_selection_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut selection: ResMut<SnapSelection>,
    mut backend: SceneBackend,
) {
    if !keys.just_pressed(KeyCode::Escape) || selection.0.selection_len() == 0 {
        return;
    }
    let released = selection.0.clear_selection(&mut backend);
    info!("Cleared selection of {} boxes", released);
}

/// Route left clicks through the coordinator
pub fn handle_selection_click(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut selection: ResMut<SnapSelection>,
    mut backend: SceneBackend,
) {
    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(ndc) = window
        .cursor_position()
        .and_then(|cursor| screen_to_ndc(cursor, window.size()))
    else {
        return;
    };

    match selection.0.handle_click(ndc, &mut backend) {
        ClickOutcome::Ignored => {}
        ClickOutcome::Missed => debug!("Selection click hit nothing"),
        ClickOutcome::Selected(entity) => {
            debug!(
                "Selected {:?} ({} in group)",
                entity,
                selection.0.selection_len()
            );
        }
        ClickOutcome::Deselected(entity) => {
            debug!(
                "Deselected {:?} ({} in group)",
                entity,
                selection.0.selection_len()
            );
        }
    }
}

/// Ask for a frame whenever something is dragged
pub fn redraw_on_drag(mut drags: EventReader<DragEvent>, mut redraw: EventWriter<RequestRedraw>) {
    if drags
        .read()
        .any(|event| matches!(event, DragEvent::Moved(_)))
    {
        redraw.write(RequestRedraw);
    }
}
