//! Scene save/load.
//!
//! A scene file holds every character node: name, transform, velocity and the
//! character attribute set. Loading replaces all characters, so handles taken before
//! the load go stale and callers re-acquire by name.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    character::CharacterAttributes,
    collision::{Quat, Vec3},
    scene::CharacterScene,
};

pub const SCENE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene file is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported scene format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    #[serde(default = "Vec3::zeros")]
    pub linear_velocity: Vec3,
    #[serde(default)]
    pub attributes: CharacterAttributes,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub version: u32,
    pub nodes: Vec<NodeSnapshot>,
}

impl SceneSnapshot {
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version != SCENE_FORMAT_VERSION {
            return Err(SceneError::UnsupportedVersion {
                found: snapshot.version,
                expected: SCENE_FORMAT_VERSION,
            });
        }
        Ok(snapshot)
    }
}

impl CharacterScene {
    pub fn snapshot(&self) -> SceneSnapshot {
        let nodes = self
            .characters
            .iter()
            .filter_map(|(_, character)| {
                let pose = self.physics.pose(character.body.body)?;
                Some(NodeSnapshot {
                    name: character.name().to_string(),
                    position: pose.translation,
                    rotation: pose.rotation,
                    linear_velocity: pose.linear_velocity,
                    attributes: CharacterAttributes::capture(&character.state, &character.controls),
                })
            })
            .collect();

        SceneSnapshot {
            version: SCENE_FORMAT_VERSION,
            nodes,
        }
    }

    /// Replace every character with the snapshot's nodes.
    ///
    /// Held buttons are not part of the snapshot; restored characters start released.
    pub fn restore(&mut self, snapshot: &SceneSnapshot) {
        for character in self.characters.clear() {
            self.physics.remove_character(character.body);
        }

        for node in &snapshot.nodes {
            self.insert_character(
                &node.name,
                node.position,
                node.rotation,
                node.linear_velocity,
                node.attributes.state(),
                node.attributes.controls(),
            );
        }
        log::info!("restored {} character(s)", snapshot.nodes.len());
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.snapshot().to_json()?)?;
        log::info!("saved scene to {}", path.display());
        Ok(())
    }

    /// Load a scene file. On error the current scene is left untouched.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let snapshot = SceneSnapshot::from_json(&fs::read_to_string(path)?)?;
        self.restore(&snapshot);
        log::info!("loaded scene from {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CHARACTER_NAME;
    use crate::controls::Control;

    const DT: f32 = 1.0 / 60.0;

    fn settled_demo() -> (CharacterScene, crate::registry::CharacterHandle) {
        let (mut scene, jack) = CharacterScene::demo();
        for _ in 0..60 {
            scene.fixed_update(DT);
        }
        (scene, jack)
    }

    #[test]
    fn snapshot_carries_transform_and_attributes() {
        let (mut scene, jack) = settled_demo();
        scene.controls_mut(jack).expect("jack").add_look(30.0, 10.0);

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.version, SCENE_FORMAT_VERSION);
        assert_eq!(snapshot.nodes.len(), 1);

        let node = &snapshot.nodes[0];
        assert_eq!(node.name, CHARACTER_NAME);
        assert_eq!(node.attributes.yaw, 30.0);
        assert_eq!(node.attributes.pitch, 10.0);
        assert!(node.position.y.abs() < 0.2);
    }

    #[test]
    fn restore_replaces_characters_and_invalidates_handles() {
        let (mut scene, jack) = settled_demo();
        scene.controls_mut(jack).expect("jack").set(Control::Forward, true);
        scene.controls_mut(jack).expect("jack").add_look(45.0, 0.0);
        let snapshot = scene.snapshot();

        scene.restore(&snapshot);

        assert!(scene.character(jack).is_none());
        let again = scene.find_character(CHARACTER_NAME).expect("re-acquired");
        let character = scene.character(again).expect("jack");
        assert_eq!(character.controls.yaw, 45.0);
        assert!(!character.controls.is_down(Control::Forward));
        assert_eq!(scene.characters().count(), 1);
    }

    #[test]
    fn rejects_unknown_version() {
        let json = r#"{ "version": 99, "nodes": [] }"#;
        let err = SceneSnapshot::from_json(json).expect_err("version");
        assert!(matches!(
            err,
            SceneError::UnsupportedVersion { found: 99, expected: SCENE_FORMAT_VERSION }
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = SceneSnapshot::from_json("{ not json").expect_err("json");
        assert!(matches!(err, SceneError::Json(_)));
    }

    #[test]
    fn missing_file_leaves_scene_untouched() {
        let (mut scene, jack) = settled_demo();
        let path = std::env::temp_dir().join("jackrun-missing-scene-file.json");
        let _ = fs::remove_file(&path);

        let err = scene.load_from(&path).expect_err("missing");
        assert!(matches!(err, SceneError::Io(_)));
        assert!(scene.character(jack).is_some());
    }

    #[test]
    fn save_then_load_from_disk() {
        let (scene, _) = settled_demo();
        let dir = std::env::temp_dir().join(format!("jackrun-save-{}", std::process::id()));
        let path = dir.join("scenes").join("demo.json");

        scene.save_to(&path).expect("save");

        let mut loaded = CharacterScene::default();
        loaded.load_from(&path).expect("load");
        let jack = loaded.find_character(CHARACTER_NAME).expect("jack");
        let original = scene.snapshot().nodes[0].position;
        let restored = loaded.character_pose(jack).expect("pose").translation;
        assert!((original - restored).norm() < 1.0e-5);

        let _ = fs::remove_dir_all(&dir);
    }
}
