//! Owns the character scene and drives it from bevy's fixed timestep.

use bevy::prelude::*;
use jackrun_shared::{
    CharacterHandle, CharacterScene,
    collision::Vec3 as SimVec3,
    constants::{CHARACTER_NAME, PHYSICS_HZ},
};
use leafwing_input_manager::prelude::ActionState;

use crate::{input::CharacterAction, settings::ClientSettings, world};

#[derive(Resource)]
pub struct SimScene {
    pub scene: CharacterScene,
}

/// The character driven by local input. `None` when a loaded scene has no such node.
#[derive(Resource, Default)]
pub struct LocalCharacter(pub Option<CharacterHandle>);

/// Raised after the scene has been replaced by a load; views re-acquire their handles.
#[derive(Message)]
pub struct SceneReloaded;

pub(super) fn plugin(app: &mut App) {
    let mut scene = CharacterScene::new(world::scenery());
    let jack = scene.spawn_character(CHARACTER_NAME, SimVec3::new(0.0, 1.0, 0.0));

    app.insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ));
    app.insert_resource(SimScene { scene });
    app.insert_resource(LocalCharacter(Some(jack)));
    app.add_message::<SceneReloaded>();

    app.add_systems(FixedUpdate, step_scene);
    app.add_systems(Update, save_or_load);
}

fn step_scene(time: Res<Time>, mut sim: ResMut<SimScene>) {
    sim.scene.fixed_update(time.delta_secs());
}

fn save_or_load(
    actions: Res<ActionState<CharacterAction>>,
    settings: Res<ClientSettings>,
    mut sim: ResMut<SimScene>,
    mut local: ResMut<LocalCharacter>,
    mut reloaded: MessageWriter<SceneReloaded>,
) {
    let path = &settings.save_path;

    if actions.just_pressed(&CharacterAction::Save)
        && let Err(err) = sim.scene.save_to(path)
    {
        log::error!("failed to save {}: {err}", path.display());
    }

    if actions.just_pressed(&CharacterAction::Load) {
        match sim.scene.load_from(path) {
            Ok(()) => {
                local.0 = sim.scene.find_character(CHARACTER_NAME);
                if local.0.is_none() {
                    log::warn!("{} has no character named {CHARACTER_NAME}", path.display());
                }
                reloaded.write(SceneReloaded);
            }
            Err(err) => log::error!("failed to load {}: {err}", path.display()),
        }
    }
}
