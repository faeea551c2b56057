use nalgebra::Vector3;

/// Impulse applied per fixed step toward the desired direction while grounded.
pub const MOVE_FORCE: f32 = 0.8;

/// Impulse applied per fixed step toward the desired direction while airborne.
///
/// Much weaker than [`MOVE_FORCE`]: some air control, but no full steering.
pub const INAIR_MOVE_FORCE: f32 = 0.02;

/// Braking impulse factor applied against planar (XZ) velocity while grounded.
///
/// Velocity proportional, so top ground speed settles around `MOVE_FORCE / BRAKE_FORCE`.
pub const BRAKE_FORCE: f32 = 0.2;

/// Upward impulse applied on the step a jump is triggered.
pub const JUMP_FORCE: f32 = 7.0;

/// Seconds a character may lose ground contact and still count as grounded.
pub const IN_AIR_THRESHOLD: f32 = 0.1;

/// Fade in/out time of the walk animation (seconds).
pub const WALK_BLEND_TIME: f32 = 0.2;

/// Walk playback speed per meter/second of planar velocity.
pub const WALK_SPEED_SCALE: f32 = 0.3;

/// Resource name of the walk cycle.
pub const WALK_ANIMATION: &str = "Models/Jack_Walk.ani";

/// Length of one walk cycle at playback speed 1.0 (seconds).
pub const WALK_CYCLE_SECONDS: f32 = 1.0;

/// Name of the player character node. Used to re-acquire the handle after a load.
pub const CHARACTER_NAME: &str = "Jack";

/// Mouse/look sensitivity in degrees per pixel of motion.
pub const YAW_SENSITIVITY: f32 = 0.1;

/// Look pitch limit (degrees, symmetric).
pub const PITCH_LIMIT_DEG: f32 = 80.0;

/// Gravity in meters per second squared (negative Y).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Fixed physics step rate (Hz).
pub const PHYSICS_HZ: f64 = 60.0;

/// Basis vectors for local movement.
///
/// Y up, right handed, facing down -Z (the same convention the renderer uses).
pub const FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);
pub const BACK: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);
pub const LEFT: Vector3<f32> = Vector3::new(-1.0, 0.0, 0.0);
pub const RIGHT: Vector3<f32> = Vector3::new(1.0, 0.0, 0.0);
pub const UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
