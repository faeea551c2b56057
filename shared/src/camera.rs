//! Third-person camera placement.
//!
//! The camera trails the character along the look direction and is pulled in when
//! scenery blocks the view. The ray cast itself is supplied by the caller.

use nalgebra::{UnitQuaternion, Vector3};

use crate::collision::{Point3, Quat, Vec3};
use crate::constants::BACK;

pub const CAMERA_MIN_DIST: f32 = 1.0;
pub const CAMERA_INITIAL_DIST: f32 = 5.0;
pub const CAMERA_MAX_DIST: f32 = 20.0;

/// Height of the aim point above the character origin (meters).
pub const AIM_HEIGHT: f32 = 1.7;

/// Head pitch limit (degrees), narrower than the look limit to keep the pose natural.
pub const HEAD_PITCH_LIMIT_DEG: f32 = 45.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Point3,
    pub rotation: Quat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThirdPersonCamera {
    /// Preferred distance behind the aim point.
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub aim_height: f32,
}

impl Default for ThirdPersonCamera {
    fn default() -> Self {
        Self {
            distance: CAMERA_INITIAL_DIST,
            min_distance: CAMERA_MIN_DIST,
            max_distance: CAMERA_MAX_DIST,
            aim_height: AIM_HEIGHT,
        }
    }
}

impl ThirdPersonCamera {
    /// Zoom in or out, staying inside the distance limits.
    pub fn adjust_distance(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(self.min_distance, self.max_distance);
    }

    /// Place the camera behind a character at `position` facing `facing`, looking
    /// `pitch_deg` down.
    ///
    /// `raycast(origin, direction, max_distance)` returns the distance to the first
    /// blocking scenery hit, if any.
    pub fn place<F>(&self, position: Point3, facing: Quat, pitch_deg: f32, raycast: F) -> CameraPose
    where
        F: FnOnce(Point3, Vec3, f32) -> Option<f32>,
    {
        let dir = facing * pitch_rotation(pitch_deg);
        let aim_point = position + facing * Vec3::new(0.0, self.aim_height, 0.0);
        let ray_dir = dir * BACK;

        let mut distance = self.distance;
        if let Some(hit) = raycast(aim_point, ray_dir, distance) {
            distance = distance.min(hit);
        }
        let distance = distance.clamp(self.min_distance, self.max_distance);

        CameraPose {
            position: aim_point + ray_dir * distance,
            rotation: dir,
        }
    }
}

/// Rotation about the local right axis. Positive pitch looks down.
#[inline]
pub fn pitch_rotation(pitch_deg: f32) -> Quat {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -pitch_deg.to_radians())
}

/// Head orientation following the look pitch, limited to [`HEAD_PITCH_LIMIT_DEG`].
#[inline]
pub fn head_look_rotation(facing: Quat, pitch_deg: f32) -> Quat {
    let limited = pitch_deg.clamp(-HEAD_PITCH_LIMIT_DEG, HEAD_PITCH_LIMIT_DEG);
    facing * pitch_rotation(limited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FORWARD;

    fn origin() -> Point3 {
        Point3::new(0.0, 0.0, 0.0)
    }

    #[test]
    fn unobstructed_camera_sits_behind_aim_point() {
        let camera = ThirdPersonCamera::default();
        let pose = camera.place(origin(), Quat::identity(), 0.0, |_, _, _| None);

        let expected = Point3::new(0.0, AIM_HEIGHT, CAMERA_INITIAL_DIST);
        assert!((pose.position - expected).norm() < 1.0e-5);
        assert!((pose.rotation * FORWARD - FORWARD).norm() < 1.0e-5);
    }

    #[test]
    fn scenery_hit_pulls_camera_in() {
        let camera = ThirdPersonCamera::default();
        let pose = camera.place(origin(), Quat::identity(), 0.0, |_, dir, max| {
            assert!((dir - BACK).norm() < 1.0e-5);
            assert_eq!(max, CAMERA_INITIAL_DIST);
            Some(2.5)
        });

        assert!((pose.position.z - 2.5).abs() < 1.0e-5);
    }

    #[test]
    fn very_close_hit_is_clamped_to_minimum() {
        let camera = ThirdPersonCamera::default();
        let pose = camera.place(origin(), Quat::identity(), 0.0, |_, _, _| Some(0.1));

        assert!((pose.position.z - CAMERA_MIN_DIST).abs() < 1.0e-5);
    }

    #[test]
    fn looking_down_raises_camera() {
        let camera = ThirdPersonCamera::default();
        let pose = camera.place(origin(), Quat::identity(), 30.0, |_, _, _| None);

        assert!(pose.position.y > AIM_HEIGHT);
        // The camera looks down toward the character.
        assert!((pose.rotation * FORWARD).y < 0.0);
    }

    #[test]
    fn zoom_respects_limits() {
        let mut camera = ThirdPersonCamera::default();
        camera.adjust_distance(100.0);
        assert_eq!(camera.distance, CAMERA_MAX_DIST);
        camera.adjust_distance(-100.0);
        assert_eq!(camera.distance, CAMERA_MIN_DIST);
    }

    #[test]
    fn head_pitch_is_limited() {
        let head = head_look_rotation(Quat::identity(), 80.0);
        let limit = head_look_rotation(Quat::identity(), HEAD_PITCH_LIMIT_DEG);
        assert!(head.angle_to(&limit) < 1.0e-5);
    }
}
