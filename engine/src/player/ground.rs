//! Ground Detection
//!
//! A single ray straight down from the character's origin against every
//! renderable mesh. The character is grounded when the nearest hit is within
//! the threshold. Nothing carries over between frames.

use glam::Vec3;

use crate::config::GroundConfig;
use crate::scene::{Scene, raycast_scene};

/// Default grounded threshold (inclusive), in world units from the body origin.
pub const GROUND_THRESHOLD: f32 = 2.1;

/// Binary locomotion phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundPhase {
    Grounded,
    Airborne,
}

/// Result of one ground check.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundState {
    pub grounded: bool,
    /// Distance to the nearest surface below, `None` when the ray hit nothing
    pub clearance: Option<f32>,
}

impl GroundState {
    /// Airborne with no surface below.
    pub const AIRBORNE: Self = Self {
        grounded: false,
        clearance: None,
    };

    pub fn phase(&self) -> GroundPhase {
        if self.grounded {
            GroundPhase::Grounded
        } else {
            GroundPhase::Airborne
        }
    }
}

/// Stateless downward ray check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundDetector {
    pub threshold: f32,
    pub direction: Vec3,
}

impl Default for GroundDetector {
    fn default() -> Self {
        Self {
            threshold: GROUND_THRESHOLD,
            direction: Vec3::NEG_Y,
        }
    }
}

impl GroundDetector {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn from_config(config: &GroundConfig) -> Self {
        Self {
            threshold: config.threshold,
            direction: config.ray_direction,
        }
    }

    /// Classify from a measured hit distance.
    pub fn classify(&self, clearance: Option<f32>) -> GroundState {
        GroundState {
            grounded: clearance.is_some_and(|distance| distance <= self.threshold),
            clearance,
        }
    }

    /// Cast the ground ray into `scene` below `position`.
    pub fn detect(&self, scene: &Scene, position: Vec3) -> GroundState {
        let clearance = raycast_scene(scene, position, self.direction).map(|hit| hit.distance);
        self.classify(clearance)
    }
}
