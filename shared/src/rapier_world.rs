//! Rapier-backed physics scene for the character sample.
//!
//! Holds the full dynamics pipeline: static scenery, dynamic character bodies, contact
//! reporting and scenery ray casts. The movement controller only sees it through the
//! [`BodyHandle`] and [`ContactEventSource`] adaptors defined here.
//!
//! Design goals
//! - Deterministic: given the same inputs (statics sorted by `id`), build identical sets.
//! - Resting contacts keep being reported: character bodies never sleep.

use rapier3d::na::{Translation3, UnitQuaternion};
use rapier3d::prelude::*;

use crate::{
    collision::{ContactEvent, ContactRecord, Point3, Quat, Vec3},
    constants::GRAVITY_MPS2,
    handles::{BodyHandle, ContactEventSource},
};

/// Collider `user_data` bit marking world scenery. Camera rays only hit these.
pub const SCENERY_LAYER: u128 = 1 << 1;

/// Largest separation (meters) at which a manifold point still counts as touching.
///
/// Resting contacts hover around zero within the solver's allowed error; predicted points
/// further apart than this are near misses and are not reported.
pub const TOUCH_TOLERANCE: f32 = 0.005;

/// Canonical definition of an immutable world collider.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },
}

impl WorldStaticDef {
    /// The default floor: a 200 x 1 x 200 box whose top face sits at y = 0.
    pub fn floor() -> Self {
        Self {
            id: 0,
            translation: vector![0.0, -0.5, 0.0],
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: vector![100.0, 0.5, 100.0],
            },
        }
    }
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The pose lives on the parent fixed body, so the collider is built in body-local space.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),
    };

    builder.user_data(SCENERY_LAYER).build()
}

/// Character capsule. The body origin is at the feet; the capsule is lifted by `offset_y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleSpec {
    pub diameter: f32,
    /// Total height including both caps.
    pub height: f32,
    pub offset_y: f32,
    pub mass: f32,
}

impl Default for CapsuleSpec {
    fn default() -> Self {
        Self {
            diameter: 0.7,
            height: 1.8,
            offset_y: 0.9,
            mass: 1.0,
        }
    }
}

impl CapsuleSpec {
    pub fn radius(&self) -> f32 {
        self.diameter * 0.5
    }

    /// Half-length of the cylinder section.
    pub fn half_height(&self) -> f32 {
        ((self.height - self.diameter) * 0.5).max(0.0)
    }
}

/// Handles of a character's body and capsule collider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

/// Pose and velocity of a body, as read back after a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyPose {
    pub translation: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
}

pub struct PhysicsScene {
    gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl Default for PhysicsScene {
    fn default() -> Self {
        Self::new(vec![WorldStaticDef::floor()])
    }
}

impl PhysicsScene {
    /// Build a scene from static collider definitions, inserted in `id` order.
    pub fn new(mut statics: Vec<WorldStaticDef>) -> Self {
        statics.sort_by_key(|d| d.id);

        let mut scene = Self {
            gravity: vector![0.0, -GRAVITY_MPS2, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        };

        for def in &statics {
            scene.insert_static(def);
        }
        // Populate the broad-phase so scenery queries work before the first real step.
        scene.step(scene.integration_parameters.dt);
        log::debug!("physics scene built with {} statics", statics.len());

        scene
    }

    /// Insert a static as a fixed rigid-body + attached scenery collider.
    ///
    /// Ray casts see it after the next [`PhysicsScene::step`].
    pub fn insert_static(&mut self, def: &WorldStaticDef) -> RigidBodyHandle {
        let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
        let rb_handle = self.bodies.insert(RigidBodyBuilder::fixed().pose(iso).build());
        self.colliders
            .insert_with_parent(collider_from_def(def), rb_handle, &mut self.bodies);
        rb_handle
    }

    /// Insert a dynamic character body.
    ///
    /// Rotations are locked so only the controller turns the character, and the body
    /// never sleeps so contacts are reported while standing still.
    pub fn spawn_character(
        &mut self,
        capsule: CapsuleSpec,
        translation: Vec3,
        rotation: Quat,
        linear_velocity: Vec3,
    ) -> CharacterBody {
        let iso = Isometry::from_parts(Translation3::from(translation), rotation);
        let rb = RigidBodyBuilder::dynamic()
            .pose(iso)
            .linvel(linear_velocity)
            .lock_rotations()
            .can_sleep(false)
            .build();
        let body = self.bodies.insert(rb);

        let collider = ColliderBuilder::capsule_y(capsule.half_height(), capsule.radius())
            .translation(vector![0.0, capsule.offset_y, 0.0])
            .mass(capsule.mass)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        CharacterBody { body, collider }
    }

    pub fn remove_character(&mut self, character: CharacterBody) {
        self.bodies.remove(
            character.body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Integrate one step of `dt_seconds`. Impulses applied before this call are consumed.
    pub fn step(&mut self, dt_seconds: f32) {
        if dt_seconds <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt_seconds;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    pub fn pose(&self, handle: RigidBodyHandle) -> Option<BodyPose> {
        self.bodies.get(handle).map(|rb| BodyPose {
            translation: *rb.translation(),
            rotation: *rb.rotation(),
            linear_velocity: *rb.linvel(),
        })
    }

    /// Turn a body to face `rotation` without touching its velocity.
    pub fn set_facing(&mut self, handle: RigidBodyHandle, rotation: Quat) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_rotation(rotation, false);
        }
    }

    /// Impulse adaptor for a body, if it still exists.
    pub fn body_handle(&mut self, handle: RigidBodyHandle) -> Option<RapierBody<'_>> {
        self.bodies.get_mut(handle).map(|body| RapierBody { body })
    }

    /// Contact events of `collider` produced by the last step.
    pub fn contacts(&self, collider: ColliderHandle) -> CharacterContacts<'_> {
        CharacterContacts {
            colliders: &self.colliders,
            narrow_phase: &self.narrow_phase,
            collider,
        }
    }

    /// Distance along `direction` (unit) to the first scenery collider within `max_distance`.
    pub fn cast_scenery_ray(&self, origin: Point3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let is_scenery = |_: ColliderHandle, co: &Collider| co.user_data & SCENERY_LAYER != 0;
        let filter = QueryFilter::default().predicate(&is_scenery);
        let pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        );

        let ray = Ray::new(origin, direction);
        pipeline
            .cast_ray(&ray, max_distance, true)
            .map(|(_handle, toi)| toi)
    }
}

/// [`BodyHandle`] over a Rapier rigid body.
pub struct RapierBody<'a> {
    body: &'a mut RigidBody,
}

impl BodyHandle for RapierBody<'_> {
    fn linear_velocity(&self) -> Vec3 {
        *self.body.linvel()
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.body.apply_impulse(impulse, true);
    }
}

/// [`ContactEventSource`] over the narrow-phase pairs of one collider.
pub struct CharacterContacts<'a> {
    colliders: &'a ColliderSet,
    narrow_phase: &'a NarrowPhase,
    collider: ColliderHandle,
}

impl ContactEventSource for CharacterContacts<'_> {
    /// One event per touching pair. Normals point toward the character.
    ///
    /// Predicted points separated by more than [`TOUCH_TOLERANCE`] are skipped.
    fn contact_events(&self) -> Vec<ContactEvent> {
        let Some(own) = self.colliders.get(self.collider) else {
            return Vec::new();
        };

        let mut events = Vec::new();
        for pair in self.narrow_phase.contact_pairs_with(self.collider) {
            if !pair.has_any_active_contact {
                continue;
            }
            // Manifold normals point from collider1 to collider2.
            let is_first = pair.collider1 == self.collider;

            let mut contacts = Vec::new();
            for manifold in &pair.manifolds {
                let normal = if is_first {
                    -manifold.data.normal
                } else {
                    manifold.data.normal
                };
                for point in manifold.points.iter().filter(|p| p.dist <= TOUCH_TOLERANCE) {
                    let local = if is_first {
                        point.local_p1
                    } else {
                        point.local_p2
                    };
                    contacts.push(ContactRecord {
                        position: own.position() * local,
                        normal,
                        distance: point.dist,
                        impulse: point.data.impulse,
                    });
                }
            }

            if !contacts.is_empty() {
                events.push(ContactEvent { contacts });
            }
        }
        events
    }
}
