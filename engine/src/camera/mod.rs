//! Camera Module
//!
//! Look control and the camera snapshot handed to the movement solver.
//! Window-system agnostic.

pub mod fps_controller;

use glam::Vec3;

pub use fps_controller::FpsCamera;

/// Camera position and facing for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub position: Vec3,
    /// Unit view direction
    pub forward: Vec3,
    /// World vertical used to flatten `forward`
    pub up: Vec3,
}

impl CameraFrame {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward,
            up: Vec3::Y,
        }
    }

    /// Forward with the vertical component removed, normalized.
    ///
    /// Zero when looking straight up or down.
    pub fn planar_forward(&self) -> Vec3 {
        let up = self.up.normalize_or_zero();
        (self.forward - up * self.forward.dot(up)).normalize_or_zero()
    }

    /// `up x planar_forward`, normalized. Zero when `planar_forward` is zero.
    ///
    /// With forward -Z and up +Y this is -X: the camera's left.
    pub fn planar_right(&self) -> Vec3 {
        self.up.cross(self.planar_forward()).normalize_or_zero()
    }
}
