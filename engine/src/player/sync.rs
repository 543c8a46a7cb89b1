//! Transform Synchronization
//!
//! Copies the simulated body pose into the character's render transform and
//! places the camera at eye height above it. The camera's orientation is left
//! alone; mouse look owns it.

use glam::{Mat4, Quat, Vec3};

use crate::physics::RigidBody;

/// Default camera height above the body origin.
pub const EYE_OFFSET: f32 = 1.5;

/// Pose of the character as the renderer should draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for RenderTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl RenderTransform {
    /// Copy of the body pose, verbatim.
    pub fn from_body(body: &RigidBody) -> Self {
        Self {
            position: body.position,
            orientation: body.orientation,
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Pack for GPU upload.
    pub fn to_uniform(&self) -> ModelUniform {
        ModelUniform {
            model: self.to_matrix().to_cols_array_2d(),
        }
    }
}

/// Per-object model matrix for a vertex shader.
///
/// WGSL layout (64 bytes total):
///   offset 0: model (mat4x4<f32>) = 64 bytes, column-major
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

static_assertions::assert_eq_size!(ModelUniform, [u8; 64]);

/// Camera position for a body: origin raised by `eye_offset` on +Y.
pub fn camera_position(body: &RigidBody, eye_offset: f32) -> Vec3 {
    body.position + Vec3::new(0.0, eye_offset, 0.0)
}

/// Render transform and camera position derived from `body`.
pub fn sync_transforms(body: &RigidBody, eye_offset: f32) -> (RenderTransform, Vec3) {
    (RenderTransform::from_body(body), camera_position(body, eye_offset))
}
