use nalgebra::{UnitQuaternion, Vector3};

use crate::{bitmask_flags::BitmaskFlags, constants::PITCH_LIMIT_DEG, define_bitmask_flags};

define_bitmask_flags!(
    /// Discrete character inputs. The discriminant is the bit index.
    Control,
    u32,
    {
        Forward,
        Back,
        Left,
        Right,
        Jump,
    }
);

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Forward,
        Control::Back,
        Control::Left,
        Control::Right,
        Control::Jump,
    ];
}

/// Held buttons plus look angles for one character.
///
/// Written once per rendered frame by input sampling, read once per physics step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlState {
    pub buttons: BitmaskFlags<u32>,
    /// Degrees. Positive turns clockwise seen from above.
    pub yaw: f32,
    /// Degrees. Positive looks down.
    pub pitch: f32,
}

impl ControlState {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            buttons: BitmaskFlags::default(),
            yaw,
            pitch,
        }
    }

    #[inline]
    pub fn is_down(&self, control: Control) -> bool {
        self.buttons.has(control)
    }

    #[inline]
    pub fn set(&mut self, control: Control, down: bool) {
        self.buttons.set(control, down);
    }

    /// Release every button. Look angles are kept.
    pub fn release_all(&mut self) {
        self.buttons.clear();
    }

    /// Accumulate look motion (degrees) and keep pitch inside the look limit.
    pub fn add_look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    /// Yaw-only facing rotation.
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -self.yaw.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FORWARD, RIGHT};

    #[test]
    fn buttons_are_independent_bits() {
        let mut controls = ControlState::default();
        controls.set(Control::Left, true);
        controls.set(Control::Jump, true);

        assert!(controls.is_down(Control::Left));
        assert!(controls.is_down(Control::Jump));
        assert!(!controls.is_down(Control::Right));
        assert_eq!(controls.buttons.bits, 0b10100);

        controls.set(Control::Left, false);
        assert!(!controls.is_down(Control::Left));
        assert!(controls.is_down(Control::Jump));
    }

    #[test]
    fn release_all_keeps_look_angles() {
        let mut controls = ControlState::new(30.0, -10.0);
        for control in Control::ALL {
            controls.set(control, true);
        }

        controls.release_all();

        assert!(controls.buttons.is_empty());
        assert_eq!(controls.yaw, 30.0);
        assert_eq!(controls.pitch, -10.0);
    }

    #[test]
    fn pitch_is_clamped_to_look_limit() {
        let mut controls = ControlState::default();
        controls.add_look(5.0, 200.0);
        assert_eq!(controls.pitch, PITCH_LIMIT_DEG);

        controls.add_look(5.0, -500.0);
        assert_eq!(controls.pitch, -PITCH_LIMIT_DEG);
        assert_eq!(controls.yaw, 10.0);
    }

    #[test]
    fn positive_yaw_turns_forward_toward_right() {
        let controls = ControlState::new(90.0, 0.0);
        let facing = controls.orientation() * FORWARD;

        assert!((facing - RIGHT).norm() < 1.0e-5);
    }
}
