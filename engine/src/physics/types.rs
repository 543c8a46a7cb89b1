//! Math types shared by the physics world, re-exported from glam, plus the
//! conversions to and from rapier's nalgebra types.

pub use glam::{Affine3A, Mat3, Quat, Vec3};
use rapier3d::na as nalgebra;
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude::{Isometry, Point, Real, Rotation, Translation, Vector, point, vector};

/// World vertical. The movement solver projects camera forward onto the plane
/// orthogonal to this and the ground ray points along its negation.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Nominal physics increment passed to every `PhysicsWorld::step` call.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

#[inline]
pub fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x as Real, v.y as Real, v.z as Real]
}

#[inline]
pub fn to_point(v: Vec3) -> Point<Real> {
    point![v.x as Real, v.y as Real, v.z as Real]
}

#[inline]
pub fn to_rotation(q: Quat) -> Rotation<Real> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

#[inline]
pub fn to_isometry(position: Vec3, rotation: Quat) -> Isometry<Real> {
    Isometry::from_parts(Translation::from(to_vector(position)), to_rotation(rotation))
}

#[inline]
pub fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn from_rotation(r: &Rotation<Real>) -> Quat {
    Quat::from_xyzw(r.i, r.j, r.k, r.w)
}
