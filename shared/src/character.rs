use serde::{Deserialize, Serialize};

use crate::controls::ControlState;

/// Persistent grounding/jump state of one character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterState {
    /// A qualifying ground contact was seen since the last movement step.
    pub on_ground: bool,
    /// A new jump may be triggered (jump input was released since the last jump).
    pub ok_to_jump: bool,
    /// Seconds accumulated while not on ground.
    pub in_air_timer: f32,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            on_ground: false,
            ok_to_jump: true,
            in_air_timer: 0.0,
        }
    }
}

/// The saved attribute set of a character.
///
/// Field names match the scene file. Missing fields fall back to their defaults,
/// unknown fields (older files carried lane flags) are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterAttributes {
    #[serde(rename = "Controls Yaw")]
    pub yaw: f32,
    #[serde(rename = "Controls Pitch")]
    pub pitch: f32,
    #[serde(rename = "On Ground")]
    pub on_ground: bool,
    #[serde(rename = "OK To Jump")]
    pub ok_to_jump: bool,
    #[serde(rename = "In Air Timer")]
    pub in_air_timer: f32,
}

impl Default for CharacterAttributes {
    fn default() -> Self {
        Self::capture(&CharacterState::default(), &ControlState::default())
    }
}

impl CharacterAttributes {
    pub fn capture(state: &CharacterState, controls: &ControlState) -> Self {
        Self {
            yaw: controls.yaw,
            pitch: controls.pitch,
            on_ground: state.on_ground,
            ok_to_jump: state.ok_to_jump,
            in_air_timer: state.in_air_timer,
        }
    }

    pub fn state(&self) -> CharacterState {
        CharacterState {
            on_ground: self.on_ground,
            ok_to_jump: self.ok_to_jump,
            in_air_timer: self.in_air_timer,
        }
    }

    /// Restored controls: look angles only, no held buttons.
    pub fn controls(&self) -> ControlState {
        ControlState::new(self.yaw, self.pitch)
    }
}
