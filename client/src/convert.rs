//! Conversions between the simulation's nalgebra types and bevy's glam types.

use bevy::prelude::{Quat, Vec3};
use jackrun_shared::collision;

#[inline]
pub fn vec3(v: collision::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn point3(p: collision::Point3) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

#[inline]
pub fn quat(q: collision::Quat) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}
