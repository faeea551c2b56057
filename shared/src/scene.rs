//! Per-frame orchestration of characters over the physics scene.
//!
//! Ordering within one fixed step:
//! 1. facing from controls, movement step (impulses queued), animation advance
//! 2. physics step
//! 3. contact events of each character fed to the ground classifier
//!
//! Ground set in (3) is consumed by (1) of the next step.

use crate::{
    animation::AnimationController,
    camera::{CameraPose, ThirdPersonCamera},
    character::CharacterState,
    collision::{GroundSettings, Point3, Quat, Vec3},
    constants::{CHARACTER_NAME, WALK_CYCLE_SECONDS},
    controls::ControlState,
    handles::{BodyHandle, ContactEventSource},
    movement::{MovementController, MovementSettings},
    rapier_world::{BodyPose, CapsuleSpec, CharacterBody, PhysicsScene, WorldStaticDef},
    registry::{CharacterHandle, Registry},
};

/// A controllable character: physics body, controller state, controls and animation.
#[derive(Debug)]
pub struct Character {
    name: String,
    pub(crate) body: CharacterBody,
    pub state: CharacterState,
    pub controls: ControlState,
    animation: AnimationController,
}

impl Character {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> CharacterBody {
        self.body
    }

    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }
}

pub struct CharacterScene {
    pub(crate) physics: PhysicsScene,
    pub(crate) characters: Registry<Character>,
    controller: MovementController,
    ground: GroundSettings,
    capsule: CapsuleSpec,
}

impl Default for CharacterScene {
    fn default() -> Self {
        Self::new(vec![WorldStaticDef::floor()])
    }
}

impl CharacterScene {
    pub fn new(statics: Vec<WorldStaticDef>) -> Self {
        Self {
            physics: PhysicsScene::new(statics),
            characters: Registry::new(),
            controller: MovementController::default(),
            ground: GroundSettings::default(),
            capsule: CapsuleSpec::default(),
        }
    }

    /// The sample scene: the floor and the player character standing at the origin.
    pub fn demo() -> (Self, CharacterHandle) {
        let mut scene = Self::default();
        let jack = scene.spawn_character(CHARACTER_NAME, Vec3::new(0.0, 1.0, 0.0));
        (scene, jack)
    }

    pub fn with_movement_settings(mut self, settings: MovementSettings) -> Self {
        self.controller = MovementController::new(settings);
        self
    }

    pub fn with_ground_settings(mut self, settings: GroundSettings) -> Self {
        self.ground = settings;
        self
    }

    pub fn physics(&self) -> &PhysicsScene {
        &self.physics
    }

    pub fn spawn_character(&mut self, name: &str, position: Vec3) -> CharacterHandle {
        self.insert_character(
            name,
            position,
            Quat::identity(),
            Vec3::zeros(),
            CharacterState::default(),
            ControlState::default(),
        )
    }

    pub(crate) fn insert_character(
        &mut self,
        name: &str,
        position: Vec3,
        rotation: Quat,
        linear_velocity: Vec3,
        state: CharacterState,
        controls: ControlState,
    ) -> CharacterHandle {
        let body = self
            .physics
            .spawn_character(self.capsule, position, rotation, linear_velocity);
        let handle = self.characters.insert(Character {
            name: name.to_string(),
            body,
            state,
            controls,
            animation: AnimationController::new(WALK_CYCLE_SECONDS),
        });
        log::info!("spawned character {name} at {position:?}");
        handle
    }

    pub fn remove_character(&mut self, handle: CharacterHandle) -> bool {
        match self.characters.remove(handle) {
            Some(character) => {
                self.physics.remove_character(character.body);
                true
            }
            None => false,
        }
    }

    pub fn character(&self, handle: CharacterHandle) -> Option<&Character> {
        self.characters.get(handle)
    }

    pub fn character_mut(&mut self, handle: CharacterHandle) -> Option<&mut Character> {
        self.characters.get_mut(handle)
    }

    /// Controls of a live character, for the input sampler to write into.
    pub fn controls_mut(&mut self, handle: CharacterHandle) -> Option<&mut ControlState> {
        self.characters.get_mut(handle).map(|c| &mut c.controls)
    }

    /// Re-acquire a character by node name, e.g. after a scene load.
    pub fn find_character(&self, name: &str) -> Option<CharacterHandle> {
        self.characters.find(|c| c.name == name)
    }

    pub fn characters(&self) -> impl Iterator<Item = (CharacterHandle, &Character)> {
        self.characters.iter()
    }

    pub fn character_pose(&self, handle: CharacterHandle) -> Option<BodyPose> {
        let character = self.characters.get(handle)?;
        self.physics.pose(character.body.body)
    }

    /// Run one fixed physics step of `dt_seconds` for every character.
    pub fn fixed_update(&mut self, dt_seconds: f32) {
        let Self {
            physics,
            characters,
            controller,
            ground,
            ..
        } = self;

        for (handle, character) in characters.iter_mut() {
            let facing = character.controls.orientation();
            physics.set_facing(character.body.body, facing);

            let mut body = physics.body_handle(character.body.body);
            let outcome = controller.advance(
                &mut character.state,
                &character.controls,
                body.as_mut().map(|b| b as &mut dyn BodyHandle),
                Some(&mut character.animation),
                dt_seconds,
                facing,
            );
            if outcome.jumped {
                log::debug!("{} ({handle:?}) jumped", character.name);
            }
            character.animation.update(dt_seconds);
        }

        physics.step(dt_seconds);

        for (_, character) in characters.iter_mut() {
            let Some(pose) = physics.pose(character.body.body) else {
                continue;
            };
            for event in physics.contacts(character.body.collider).contact_events() {
                ground.classify(&mut character.state, &event.contacts, pose.translation.y);
            }
        }
    }

    /// Trailing camera for a character, pulled in front of blocking scenery.
    pub fn camera_pose(
        &self,
        handle: CharacterHandle,
        camera: &ThirdPersonCamera,
    ) -> Option<CameraPose> {
        let character = self.characters.get(handle)?;
        let pose = self.physics.pose(character.body.body)?;
        let facing = character.controls.orientation();

        Some(camera.place(
            Point3::from(pose.translation),
            facing,
            character.controls.pitch,
            |origin, direction, max_distance| {
                self.physics
                    .cast_scenery_ray(origin, direction, max_distance)
            },
        ))
    }
}
