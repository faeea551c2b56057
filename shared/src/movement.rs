use crate::{
    character::CharacterState,
    collision::{Quat, Vec3},
    constants::{
        BRAKE_FORCE, FORWARD, IN_AIR_THRESHOLD, INAIR_MOVE_FORCE, JUMP_FORCE, LEFT, MOVE_FORCE,
        RIGHT, UP, WALK_ANIMATION, WALK_BLEND_TIME, WALK_SPEED_SCALE,
    },
    controls::{Control, ControlState},
    handles::{AnimationHandle, BodyHandle},
};

/// Tunables of the movement step. Defaults come from [`crate::constants`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementSettings {
    pub move_force: f32,
    pub in_air_move_force: f32,
    pub brake_force: f32,
    pub jump_force: f32,
    /// Seconds without ground contact that still count as grounded.
    pub in_air_threshold: f32,
    pub walk_blend_time: f32,
    pub walk_speed_scale: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_force: MOVE_FORCE,
            in_air_move_force: INAIR_MOVE_FORCE,
            brake_force: BRAKE_FORCE,
            jump_force: JUMP_FORCE,
            in_air_threshold: IN_AIR_THRESHOLD,
            walk_blend_time: WALK_BLEND_TIME,
            walk_speed_scale: WALK_SPEED_SCALE,
        }
    }
}

/// Output of a single [`MovementController::advance`] step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdvanceOutcome {
    /// Grounded, or airborne for less than the in-air threshold.
    pub soft_grounded: bool,
    /// Normalized local movement direction (zero when idle).
    pub move_dir: Vec3,
    /// A jump impulse was applied this step.
    pub jumped: bool,
    /// Planar (XZ) speed read from the body before any impulse.
    pub plane_speed: f32,
}

/// Turns held controls and grounding state into impulses and walk animation requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct MovementController {
    pub settings: MovementSettings,
}

impl MovementController {
    pub fn new(settings: MovementSettings) -> Self {
        Self { settings }
    }

    /// Run one fixed step. Must run before the physics integrator consumes impulses.
    ///
    /// Behavior
    /// - Accumulates in-air time, or resets it when the last step saw ground.
    /// - Pushes toward held directions relative to `orientation`, weaker while airborne.
    /// - While (soft) grounded: brakes planar velocity and handles the jump debounce.
    /// - Plays or fades the walk animation and scales its speed with planar speed.
    /// - Clears `on_ground`; contact events of the next physics step re-affirm it.
    ///
    /// A missing `body` or `animation` only skips that collaborator's side effects.
    pub fn advance(
        &self,
        state: &mut CharacterState,
        controls: &ControlState,
        mut body: Option<&mut dyn BodyHandle>,
        animation: Option<&mut dyn AnimationHandle>,
        dt_seconds: f32,
        orientation: Quat,
    ) -> AdvanceOutcome {
        let s = &self.settings;
        let dt = dt_seconds.max(0.0);

        // 1) Air time with a short grace period.
        if state.on_ground {
            state.in_air_timer = 0.0;
        } else {
            state.in_air_timer += dt;
        }
        let soft_grounded = state.in_air_timer < s.in_air_threshold;

        // 2) Desired local direction. Back is deliberately never actionable.
        let velocity = match body.as_deref() {
            Some(body) => body.linear_velocity(),
            None => {
                log::debug!("movement step without a rigid body");
                Vec3::zeros()
            }
        };
        let plane_velocity = Vec3::new(velocity.x, 0.0, velocity.z);

        let mut move_dir = Vec3::zeros();
        if controls.is_down(Control::Forward) {
            move_dir += FORWARD;
        }
        if controls.is_down(Control::Right) {
            move_dir += RIGHT;
        }
        if controls.is_down(Control::Left) {
            move_dir += LEFT;
        }
        // Diagonals are no faster than a single axis.
        if move_dir.norm_squared() > 0.0 {
            move_dir.normalize_mut();
        }

        let mut jumped = false;
        if let Some(body) = body.as_deref_mut() {
            // 3) Propulsion relative to facing.
            let force = if soft_grounded {
                s.move_force
            } else {
                s.in_air_move_force
            };
            body.apply_impulse(orientation * move_dir * force);

            if soft_grounded {
                // 4) Velocity proportional braking limits ground speed.
                body.apply_impulse(-plane_velocity * s.brake_force);

                // 5) Jump must be released between jumps.
                if controls.is_down(Control::Jump) {
                    if state.ok_to_jump {
                        body.apply_impulse(UP * s.jump_force);
                        state.ok_to_jump = false;
                        jumped = true;
                        log::trace!("jump impulse applied");
                    }
                } else {
                    state.ok_to_jump = true;
                }
            }
        } else if soft_grounded && !controls.is_down(Control::Jump) {
            state.ok_to_jump = true;
        }

        // 6) Walk animation follows ground movement.
        let plane_speed = plane_velocity.norm();
        match animation {
            Some(animation) => {
                if soft_grounded && move_dir != Vec3::zeros() {
                    animation.play_exclusive(WALK_ANIMATION, 0, true, s.walk_blend_time);
                } else {
                    animation.stop(WALK_ANIMATION, s.walk_blend_time);
                }
                animation.set_speed(WALK_ANIMATION, plane_speed * s.walk_speed_scale);
            }
            None => log::debug!("movement step without an animation controller"),
        }

        // 7) Ground must be re-affirmed by the next contact phase.
        state.on_ground = false;

        AdvanceOutcome {
            soft_grounded,
            move_dir,
            jumped,
            plane_speed,
        }
    }
}
