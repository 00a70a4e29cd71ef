use bevy::{core_pipeline::tonemapping::Tonemapping, prelude::*};

use crate::{
    player::{Navigation, NavigationStep},
    transform::to_bevy,
};

/// Background and fog color.
pub const SKY_COLOR: Color = Color::srgb_u8(0x1a, 0x1a, 0x2e);

const FOG_START: f32 = 80.0;
const FOG_END: f32 = 300.0;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(SKY_COLOR));
    app.add_systems(Startup, add_camera);
    app.add_systems(Update, follow_navigation.after(NavigationStep));
}

fn add_camera(mut commands: Commands, navigation: Res<Navigation>) {
    let pose = navigation.camera_pose();
    commands.spawn((
        Camera3d::default(),
        Tonemapping::Reinhard,
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(to_bevy(&pose.eye)).looking_at(to_bevy(&pose.target), Vec3::Y),
        DistanceFog {
            color: SKY_COLOR,
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
    ));
}

/// Place the camera at the navigator's eye, looking at its target.
fn follow_navigation(
    navigation: Res<Navigation>,
    mut camera: Single<&mut Transform, With<Camera3d>>,
) {
    let pose = navigation.camera_pose();
    let eye = to_bevy(&pose.eye);
    let target = to_bevy(&pose.target);
    if eye.distance_squared(target) <= f32::EPSILON {
        return;
    }
    **camera = Transform::from_translation(eye).looking_at(target, Vec3::Y);
}
