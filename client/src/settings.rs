use std::path::PathBuf;

use bevy::prelude::*;
use jackrun_shared::constants::YAW_SENSITIVITY;

/// Client tunables.
#[derive(Resource, Clone, Debug)]
pub struct ClientSettings {
    /// Hold forward without input, like the original sample.
    pub auto_run: bool,
    /// Degrees of look per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Distance change per wheel notch.
    pub zoom_step: f32,
    pub save_path: PathBuf,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            auto_run: true,
            mouse_sensitivity: YAW_SENSITIVITY,
            zoom_step: 0.5,
            save_path: PathBuf::from("scenes/character_demo.json"),
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ClientSettings>();
}
