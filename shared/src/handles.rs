//! Collaborator seams used by the movement controller.
//!
//! The controller never looks these up itself: callers pass them into every step.

use crate::collision::{ContactEvent, Vec3};

/// The physics body steered by the controller.
pub trait BodyHandle {
    fn linear_velocity(&self) -> Vec3;

    /// Apply an impulse at the center of mass. Multiple calls within a step accumulate.
    fn apply_impulse(&mut self, impulse: Vec3);
}

/// Named animation playback.
pub trait AnimationHandle {
    /// Fade `name` in over `blend_time` while fading every other animation on the same
    /// track out.
    fn play_exclusive(&mut self, name: &str, track: u8, looped: bool, blend_time: f32);

    /// Fade `name` out over `blend_time`.
    fn stop(&mut self, name: &str, blend_time: f32);

    fn set_speed(&mut self, name: &str, speed: f32);
}

/// Source of the contact events raised for one body during the last physics step.
pub trait ContactEventSource {
    fn contact_events(&self) -> Vec<ContactEvent>;
}
