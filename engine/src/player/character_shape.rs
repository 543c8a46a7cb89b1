//! Character Shape
//!
//! The character collides as a capsule built from three primitives stacked on
//! the body's local Y axis: a bottom cap sphere, a cylinder, and a top cap
//! sphere. Rotation is locked so the capsule always stays upright.
//!
//! ```text
//!        ___
//!       /   \   top cap     (radius R, center +(C - R))
//!      |     |
//!      |     |  cylinder    (radius R, height H - 2R)
//!      |     |
//!       \___/   bottom cap  (radius R, center -(C - R))
//! ```

use glam::{Quat, Vec3};

use crate::error::{ControllerError, ControllerResult};
use crate::physics::{CollisionShape, RigidBody};

/// Polygon count of the cylinder section.
pub const CYLINDER_SEGMENTS: u32 = 16;

/// Validated character dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterShape {
    height: f32,
    width: f32,
}

impl CharacterShape {
    /// Requires `0 < width < height`, both finite.
    pub fn new(height: f32, width: f32) -> ControllerResult<Self> {
        let valid = height.is_finite() && width.is_finite() && width > 0.0 && width < height;
        if !valid {
            return Err(ControllerError::InvalidCharacterDimensions { height, width });
        }
        Ok(Self { height, width })
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Cap and cylinder radius (W/2).
    pub fn radius(&self) -> f32 {
        self.width * 0.5
    }

    /// Half the total height (H/2).
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    /// Distance from the body origin to either cap center.
    fn cap_offset(&self) -> f32 {
        self.half_height() - self.radius()
    }

    /// Shapes in attachment order: bottom cap, cylinder, top cap.
    pub fn attachments(&self) -> [(CollisionShape, Vec3, Quat); 3] {
        let radius = self.radius();
        let cap = self.cap_offset();
        [
            (CollisionShape::ball(radius), Vec3::new(0.0, -cap, 0.0), Quat::IDENTITY),
            (
                CollisionShape::cylinder(radius, self.height - 2.0 * radius, CYLINDER_SEGMENTS),
                Vec3::ZERO,
                Quat::IDENTITY,
            ),
            (CollisionShape::ball(radius), Vec3::new(0.0, cap, 0.0), Quat::IDENTITY),
        ]
    }

    /// Lowest and highest local Y of the composite: `(-H/2, +H/2)`.
    pub fn local_bounds(&self) -> (f32, f32) {
        (-self.half_height(), self.half_height())
    }

    /// Dynamic body at `position` carrying the composite, rotation locked.
    pub fn build_body(&self, mass: f32, position: Vec3) -> ControllerResult<RigidBody> {
        let mut body = RigidBody::dynamic(mass, position)?.with_angular_factor(Vec3::ZERO);
        for (shape, offset, rotation) in self.attachments() {
            body.add_shape(shape, offset, rotation);
        }
        Ok(body)
    }
}
