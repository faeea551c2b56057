use bevy::prelude::*;
use jackrun_shared::Control;
use leafwing_input_manager::prelude::*;

use crate::{
    settings::ClientSettings,
    simulation::{LocalCharacter, SimScene},
};

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharacterAction {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    #[actionlike(DualAxis)]
    Look,
    #[actionlike(Axis)]
    Zoom,
    ToggleAutoRun,
    Save,
    Load,
}

impl CharacterAction {
    fn input_map() -> InputMap<Self> {
        let mut input_map = InputMap::new([
            (Self::Forward, KeyCode::KeyW),
            (Self::Back, KeyCode::KeyS),
            (Self::Left, KeyCode::KeyA),
            (Self::Right, KeyCode::KeyD),
            (Self::Jump, KeyCode::Space),
            (Self::ToggleAutoRun, KeyCode::KeyR),
            (Self::Save, KeyCode::F5),
            (Self::Load, KeyCode::F7),
        ]);
        input_map.insert_dual_axis(Self::Look, MouseMove::default());
        input_map.insert_axis(Self::Zoom, MouseScrollAxis::Y);
        input_map
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<CharacterAction>::default());

    app.register_type::<CharacterAction>();
    app.insert_resource(CharacterAction::input_map());
    app.insert_resource(ActionState::<CharacterAction>::default());

    app.add_systems(Update, (toggle_auto_run, sample_controls).chain());
}

fn toggle_auto_run(actions: Res<ActionState<CharacterAction>>, mut settings: ResMut<ClientSettings>) {
    if actions.just_pressed(&CharacterAction::ToggleAutoRun) {
        settings.auto_run = !settings.auto_run;
        log::info!("auto-run {}", if settings.auto_run { "on" } else { "off" });
    }
}

/// Copy the frame's input into the local character's controls. Physics steps read them.
fn sample_controls(
    actions: Res<ActionState<CharacterAction>>,
    settings: Res<ClientSettings>,
    local: Res<LocalCharacter>,
    mut sim: ResMut<SimScene>,
) {
    let Some(handle) = local.0 else {
        return;
    };
    let Some(controls) = sim.scene.controls_mut(handle) else {
        return;
    };

    controls.release_all();
    controls.set(
        Control::Forward,
        settings.auto_run || actions.pressed(&CharacterAction::Forward),
    );
    controls.set(Control::Back, actions.pressed(&CharacterAction::Back));
    controls.set(Control::Left, actions.pressed(&CharacterAction::Left));
    controls.set(Control::Right, actions.pressed(&CharacterAction::Right));
    controls.set(Control::Jump, actions.pressed(&CharacterAction::Jump));

    let look = actions.axis_pair(&CharacterAction::Look) * settings.mouse_sensitivity;
    controls.add_look(look.x, look.y);
}
