//! Rigid bodies
//!
//! A body is either fixed (mass 0, never moves) or dynamic (mass > 0,
//! integrated under gravity). Bodies are addressed through `BodyHandle`s issued
//! by the `PhysicsWorld` they were inserted into.

use glam::{Quat, Vec3};

use super::shape::{CollisionShape, ShapeAttachment};
use crate::error::{ControllerError, ControllerResult};

/// Stable identifier of a body inside one `PhysicsWorld`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    /// Raw index, for debug output.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Simulated body with pose, velocity and attached shapes.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// World position of the body origin
    pub position: Vec3,
    /// World orientation (unit quaternion)
    pub orientation: Quat,
    /// Linear velocity in units per second
    pub velocity: Vec3,
    /// Angular velocity in radians per second (world axes)
    pub angular_velocity: Vec3,
    /// 0 for fixed bodies
    mass: f32,
    /// Per-axis multiplier on rotational response; (0,0,0) locks rotation
    pub angular_factor: Vec3,
    attachments: Vec<ShapeAttachment>,
}

impl RigidBody {
    /// Create a fixed body. Fixed bodies ignore gravity and never move.
    pub fn fixed(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 0.0,
            angular_factor: Vec3::ONE,
            attachments: Vec::new(),
        }
    }

    /// Create a dynamic body. Fails unless `mass` is positive and finite.
    pub fn dynamic(mass: f32, position: Vec3) -> ControllerResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ControllerError::InvalidMass(mass));
        }
        Ok(Self {
            mass,
            ..Self::fixed(position, Quat::IDENTITY)
        })
    }

    /// Builder form of [`RigidBody::add_shape`].
    pub fn with_shape(mut self, shape: CollisionShape, offset: Vec3, rotation: Quat) -> Self {
        self.add_shape(shape, offset, rotation);
        self
    }

    /// Builder form of setting the angular factor.
    pub fn with_angular_factor(mut self, factor: Vec3) -> Self {
        self.angular_factor = factor;
        self
    }

    /// Append a shape at a local offset and rotation. Order is preserved.
    pub fn add_shape(&mut self, shape: CollisionShape, offset: Vec3, rotation: Quat) {
        self.attachments
            .push(ShapeAttachment::new(shape, offset, rotation));
    }

    pub fn attachments(&self) -> &[ShapeAttachment] {
        &self.attachments
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0
    }

    pub fn is_fixed(&self) -> bool {
        !self.is_dynamic()
    }

    /// Horizontal (XZ) part of the velocity.
    pub fn horizontal_velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z)
    }

    /// Lowest and highest body-frame Y over all attachments, or `None` without shapes.
    pub fn local_y_extent(&self) -> Option<(f32, f32)> {
        self.attachments
            .iter()
            .map(ShapeAttachment::body_y_extent)
            .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_body_has_zero_mass() {
        let body = RigidBody::fixed(Vec3::ONE, Quat::IDENTITY);
        assert_eq!(body.mass(), 0.0);
        assert!(body.is_fixed());
    }

    #[test]
    fn test_dynamic_rejects_bad_mass() {
        assert!(RigidBody::dynamic(0.0, Vec3::ZERO).is_err());
        assert!(RigidBody::dynamic(-1.0, Vec3::ZERO).is_err());
        assert!(RigidBody::dynamic(f32::NAN, Vec3::ZERO).is_err());
        let body = RigidBody::dynamic(2.0, Vec3::ZERO).unwrap();
        assert!(body.is_dynamic());
        assert_eq!(body.mass(), 2.0);
    }

    #[test]
    fn test_local_extent_spans_attachments() {
        let body = RigidBody::dynamic(1.0, Vec3::ZERO)
            .unwrap()
            .with_shape(CollisionShape::ball(1.0), Vec3::new(0.0, -1.0, 0.0), Quat::IDENTITY)
            .with_shape(CollisionShape::ball(1.0), Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY);
        assert_eq!(body.local_y_extent(), Some((-2.0, 2.0)));
        assert_eq!(RigidBody::fixed(Vec3::ZERO, Quat::IDENTITY).local_y_extent(), None);
    }
}
