use std::f32::consts::FRAC_PI_2;

use bevy::{light::CascadeShadowConfigBuilder, prelude::*};
use walkthrough_shared::collision::ground_slab;

use crate::player::Collision;

/// Side length of the square ground plane (meters).
const GROUND_SIZE: f32 = 500.0;
const GROUND_THICKNESS: f32 = 1.0;
/// Surface id reserved for the ground; model meshes are numbered from 1.
pub const GROUND_SURFACE_ID: u32 = 0;

const GRID_CELLS: u32 = 50;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, (setup, register_ground));
    app.add_systems(Update, draw_grid);
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("World setup");

    commands.spawn((
        Name::new("Ground"),
        Transform::default(),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x3a, 0x7d, 0x44),
            perceptual_roughness: 0.8,
            metallic: 0.2,
            ..default()
        })),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: true,
    });

    // Sun
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            color: Color::srgb_u8(0xff, 0xf5, 0xe6),
            ..default()
        },
        CascadeShadowConfigBuilder {
            maximum_distance: 300.0,
            first_cascade_far_bound: 20.0,
            ..default()
        }
        .build(),
        Transform::from_xyz(60.0, 80.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Cool fill from the opposite side
    commands.spawn((
        DirectionalLight {
            illuminance: 4_000.0,
            shadows_enabled: false,
            color: Color::srgb_u8(0x8b, 0xb7, 0xf0),
            ..default()
        },
        Transform::from_xyz(-40.0, 50.0, -30.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Indoor point lights
    for (position, intensity, range) in [
        (Vec3::new(0.0, 10.0, 0.0), 800_000.0, 50.0),
        (Vec3::new(-15.0, 8.0, 15.0), 600_000.0, 40.0),
        (Vec3::new(15.0, 8.0, -15.0), 600_000.0, 40.0),
    ] {
        commands.spawn((
            PointLight {
                intensity,
                range,
                color: Color::srgb_u8(0xff, 0xf5, 0xe6),
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(position),
        ));
    }
}

/// The ground is collidable from the first frame, before any model is loaded.
fn register_ground(mut collision: ResMut<Collision>) {
    let slab = ground_slab(
        GROUND_SURFACE_ID,
        GROUND_SIZE * 0.5,
        0.0,
        GROUND_THICKNESS,
    );
    if let Err(e) = collision.register(&slab) {
        error!("Failed to register ground: {e}");
    }
}

fn draw_grid(mut gizmos: Gizmos) {
    let spacing = GROUND_SIZE / GRID_CELLS as f32;
    gizmos.grid(
        Isometry3d::new(Vec3::new(0.0, 0.01, 0.0), Quat::from_rotation_x(FRAC_PI_2)),
        UVec2::splat(GRID_CELLS),
        Vec2::splat(spacing),
        Color::srgba(0.33, 0.33, 0.33, 0.2),
    );
}
