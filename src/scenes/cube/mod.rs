//! Cube scene
//!
//! A cloud of random triangles drawn as a wireframe, positioned, recolored
//! and spun from the debug panel.

pub mod panel;
pub mod params;
pub mod spin;

use crate::core::config::SceneSettings;
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Mesh, PrimitiveTopology};
use panel::{handle_panel_input, refresh_panel_text, spawn_debug_panel, DebugPanel};
use params::CubeParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spin::{animate_spin, start_spin, Spin, SpinRequested};

pub const TRIANGLE_COUNT: usize = 100;
/// Vertex coordinates fall in [-HALF_EXTENT, HALF_EXTENT)
pub const HALF_EXTENT: f32 = 5.0;

/// Marker for the triangle mesh, holding its vertices for wireframe drawing
#[derive(Component, Debug, Clone)]
pub struct TriangleCloud {
    pub positions: Vec<[f32; 3]>,
}

pub struct CubeScenePlugin;

impl Plugin for CubeScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CubeParams>()
            .init_resource::<DebugPanel>()
            .add_event::<SpinRequested>()
            .add_systems(Startup, (setup_cube_scene, spawn_debug_panel))
            .add_systems(
                Update,
                (
                    handle_panel_input,
                    (start_spin, animate_spin).chain(),
                    apply_cube_params,
                    refresh_panel_text,
                    draw_wireframe,
                )
                    .chain(),
            );
    }
}

/// Three vertices per triangle, every coordinate uniform in the extent
pub fn random_triangle_positions(rng: &mut impl Rng, count: usize) -> Vec<[f32; 3]> {
    (0..count * 3)
        .map(|_| {
            [
                rng.gen_range(-HALF_EXTENT..HALF_EXTENT),
                rng.gen_range(-HALF_EXTENT..HALF_EXTENT),
                rng.gen_range(-HALF_EXTENT..HALF_EXTENT),
            ]
        })
        .collect()
}

pub fn triangle_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_computed_flat_normals()
}

pub fn setup_cube_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    params: Res<CubeParams>,
    settings: Res<SceneSettings>,
) {
    commands.spawn((
        Name::new("Cube Camera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let positions = random_triangle_positions(&mut rng, TRIANGLE_COUNT);
    let mesh = meshes.add(triangle_mesh(positions.clone()));
    let material = materials.add(StandardMaterial {
        base_color: params.bevy_color(),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        Name::new("Triangle Cloud"),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(params.position),
        Visibility::default(),
        Spin::default(),
        TriangleCloud { positions },
    ));

    info!("Cube scene ready: {} triangles", TRIANGLE_COUNT);
}

/// Push panel values onto the mesh
pub fn apply_cube_params(
    params: Res<CubeParams>,
    mut clouds: Query<
        (
            &mut Transform,
            &mut Visibility,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<TriangleCloud>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !params.is_changed() {
        return;
    }
    for (mut transform, mut visibility, material) in &mut clouds {
        transform.translation = params.position;
        // The filled mesh only shows when not in wireframe mode
        *visibility = if params.visible && !params.wireframe {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = params.bevy_color();
        }
    }
}

/// Draw triangle edges with gizmos while wireframe mode is on
pub fn draw_wireframe(
    params: Res<CubeParams>,
    clouds: Query<(&GlobalTransform, &TriangleCloud)>,
    mut gizmos: Gizmos,
) {
    if !params.visible || !params.wireframe {
        return;
    }
    let color = params.bevy_color();
    for (transform, cloud) in &clouds {
        for triangle in cloud.positions.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]]
                .map(|vertex| transform.transform_point(Vec3::from_array(vertex)));
            gizmos.linestrip([a, b, c, a], color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_positions_in_extent() {
        let mut rng = StdRng::seed_from_u64(3);
        let positions = random_triangle_positions(&mut rng, TRIANGLE_COUNT);
        assert_eq!(positions.len(), TRIANGLE_COUNT * 3);
        for vertex in positions {
            for coordinate in vertex {
                assert!((-HALF_EXTENT..HALF_EXTENT).contains(&coordinate));
            }
        }
    }

    #[test]
    fn test_triangle_mesh_has_flat_normals() {
        let mut rng = StdRng::seed_from_u64(9);
        let mesh = triangle_mesh(random_triangle_positions(&mut rng, 4));
        assert_eq!(mesh.count_vertices(), 12);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
    }
}
