use bevy::prelude::*;
use jackrun_shared::ThirdPersonCamera;
use leafwing_input_manager::prelude::ActionState;

use crate::{
    convert,
    input::CharacterAction,
    settings::ClientSettings,
    simulation::{LocalCharacter, SimScene},
};

/// Placement parameters of the follow camera.
#[derive(Resource, Default)]
pub struct CameraRig(pub ThirdPersonCamera);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<CameraRig>();
    app.add_systems(Startup, add_camera);
    app.add_systems(Update, zoom);
    app.add_systems(
        PostUpdate,
        follow_character.before(TransformSystems::Propagate),
    );
}

fn add_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 2.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: Color::srgba(0.35, 0.48, 0.66, 1.0),
            directional_light_color: Color::srgba(1.0, 0.95, 0.85, 0.5),
            directional_light_exponent: 30.0,
            falloff: FogFalloff::from_visibility_colors(
                300.0,
                Color::srgb(0.35, 0.5, 0.66),
                Color::srgb(0.8, 0.8, 0.7),
            ),
        },
    ));
}

fn zoom(
    actions: Res<ActionState<CharacterAction>>,
    settings: Res<ClientSettings>,
    mut rig: ResMut<CameraRig>,
) {
    let notches = actions.value(&CharacterAction::Zoom);
    if notches != 0.0 {
        // Wheel up zooms in.
        rig.0.adjust_distance(-notches * settings.zoom_step);
    }
}

fn follow_character(
    sim: Res<SimScene>,
    local: Res<LocalCharacter>,
    rig: Res<CameraRig>,
    mut camera: Single<&mut Transform, With<Camera3d>>,
) {
    let Some(handle) = local.0 else {
        return;
    };
    let Some(pose) = sim.scene.camera_pose(handle, &rig.0) else {
        return;
    };

    camera.translation = convert::point3(pose.position);
    camera.rotation = convert::quat(pose.rotation);
}
