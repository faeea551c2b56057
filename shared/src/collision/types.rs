/*!
Contact data types and math aliases.

This module contains no algorithms. Records are produced by the physics scene
once per touching pair per step and consumed immediately by the classifier.
*/

use nalgebra as na;

pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// One contact point between the character body and another body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactRecord {
    /// World-space contact position.
    pub position: Point3,
    /// World-space unit normal, pointing toward the character.
    pub normal: Vec3,
    /// Signed separation distance (negative when penetrating).
    pub distance: f32,
    /// Impulse magnitude applied by the solver at this point.
    pub impulse: f32,
}

impl ContactRecord {
    pub fn new(position: Point3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            distance: 0.0,
            impulse: 0.0,
        }
    }
}

/// All contacts between the character and one other body during one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactEvent {
    pub contacts: Vec<ContactRecord>,
}
