pub mod animation;
pub mod bitmask_flags;
pub mod camera;
pub mod character;
pub mod collision;
pub mod constants;
pub mod controls;
pub mod handles;
pub mod movement;
pub mod persist;
pub mod rapier_world;
pub mod registry;
pub mod scene;

pub use animation::{AnimationController, AnimationPlayback};
pub use camera::{CameraPose, ThirdPersonCamera, head_look_rotation, pitch_rotation};
pub use character::{CharacterAttributes, CharacterState};
pub use collision::{ContactEvent, ContactRecord, GroundSettings, on_collision};
pub use controls::{Control, ControlState};
pub use handles::{AnimationHandle, BodyHandle, ContactEventSource};
pub use movement::{AdvanceOutcome, MovementController, MovementSettings};
pub use persist::{NodeSnapshot, SCENE_FORMAT_VERSION, SceneError, SceneSnapshot};
pub use rapier_world::{
    BodyPose, CapsuleSpec, CharacterBody, ColliderShapeDef, PhysicsScene, WorldStaticDef,
    collider_from_def,
};
pub use registry::{CharacterHandle, Registry};
pub use scene::{Character, CharacterScene};
