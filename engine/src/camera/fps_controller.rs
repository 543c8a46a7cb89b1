//! FPS Camera Module
//!
//! Pointer-locked look control: mouse deltas rotate yaw/pitch directly, no
//! smoothing. The camera's position is owned by the transform synchronizer;
//! this type only owns orientation.

use glam::Vec3;

use super::CameraFrame;
use crate::physics::WORLD_UP;

/// Pitch limit: 89 degrees in radians
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Default mouse sensitivity in radians per pixel
pub const DEFAULT_SENSITIVITY: f32 = 0.002;

/// First-person look controller.
///
/// ## Usage
/// ```rust,ignore
/// let mut camera = FpsCamera::with_position(Vec3::new(0.0, 10.0, 10.0));
///
/// // Raw mouse delta in pixels while the pointer is locked
/// camera.apply_mouse_delta(dx, dy);
///
/// let frame = camera.frame();
/// ```
#[derive(Clone, Debug)]
pub struct FpsCamera {
    /// Camera position in world space (written by the synchronizer)
    pub position: Vec3,
    /// Horizontal angle (radians), unrestricted
    pub yaw: f32,
    /// Vertical angle (radians), clamped to +-89 degrees
    pub pitch: f32,
    /// Mouse sensitivity in radians per pixel
    pub sensitivity: f32,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl FpsCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set orientation directly; pitch is clamped.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Rotate by a mouse delta in pixels.
    ///
    /// Positive `dx` turns right (increases yaw); positive `dy` looks down.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Unit view direction. Yaw 0, pitch 0 looks toward -Z.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Turn to face `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        let distance = to_target.length();
        if distance > 0.001 {
            self.yaw = to_target.x.atan2(-to_target.z);
            self.pitch = (to_target.y / distance).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    /// Snapshot for the movement solver.
    pub fn frame(&self) -> CameraFrame {
        CameraFrame {
            position: self.position,
            forward: self.forward(),
            up: WORLD_UP,
        }
    }
}
