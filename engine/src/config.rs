//! Controller Configuration
//!
//! Centralized configuration for the world, the character, ground detection,
//! tuning sliders and the initial camera. `Default` returns the values the
//! controller was tuned with; every field may be overridden from JSON.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::fps_controller::DEFAULT_SENSITIVITY;
use crate::error::{ControllerError, ControllerResult};
use crate::physics::{DEFAULT_GRAVITY, FIXED_TIMESTEP};

/// Slider value to move speed (units/s per unit slider).
pub const SPEED_SLIDER_SCALE: f32 = 100.0;

/// Slider value to jump impulse (units/s per unit slider).
pub const JUMP_SLIDER_SCALE: f32 = 10.0;

/// How the frame driver advances the physics world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// Exactly one fixed step per frame, whatever the real frame interval.
    #[default]
    PerFrame,
    /// Accumulate real frame time and run whole fixed steps, capped per frame.
    FixedAccumulator,
}

/// Physics world parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity acceleration vector
    pub gravity: Vec3,
    /// Fixed physics step (seconds)
    pub fixed_step: f32,
    pub step_mode: StepMode,
    /// Upper bound on steps per frame in `FixedAccumulator` mode
    pub max_substeps: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            fixed_step: FIXED_TIMESTEP,
            step_mode: StepMode::PerFrame,
            max_substeps: 4,
        }
    }
}

/// Character body parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Total height (top cap to bottom cap)
    pub height: f32,
    /// Diameter of the caps and the cylinder
    pub width: f32,
    pub mass: f32,
    /// Body position when the character finishes loading
    pub spawn_position: Vec3,
    /// Camera height above the body origin
    pub eye_offset: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            height: 4.0,
            width: 2.0,
            mass: 1.0,
            spawn_position: Vec3::new(0.0, 7.0, 0.0),
            eye_offset: 1.5,
        }
    }
}

/// Ground ray parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Maximum hit distance (inclusive) that counts as grounded
    pub threshold: f32,
    pub ray_direction: Vec3,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            threshold: 2.1,
            ray_direction: Vec3::NEG_Y,
        }
    }
}

/// Raw slider positions, mapped through [`MovementTuning::from_sliders`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub speed_slider: f32,
    pub jump_slider: f32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            speed_slider: 1.0,
            jump_slider: 1.0,
        }
    }
}

/// Initial camera placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Radians per pixel of mouse movement
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 10.0),
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

/// Top-level configuration for a [`crate::driver::FrameDriver`].
///
/// Missing sections and fields fall back to their defaults:
///
/// ```json
/// { "character": { "height": 3.0 }, "world": { "step_mode": "fixed_accumulator" } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub world: WorldConfig,
    pub character: CharacterConfig,
    pub ground: GroundConfig,
    pub tuning: TuningConfig,
    pub camera: CameraConfig,
}

impl ControllerConfig {
    /// Parse from a JSON document.
    pub fn from_json_str(json: &str) -> ControllerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ControllerResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ControllerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> ControllerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Tuning derived from the configured slider positions.
    pub fn movement_tuning(&self) -> MovementTuning {
        MovementTuning::from_sliders(self.tuning.speed_slider, self.tuning.jump_slider)
    }
}

/// Live movement parameters, read once per frame (last write wins).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementTuning {
    /// Horizontal speed scale
    pub move_speed: f32,
    /// Vertical velocity set on jump
    pub jump_impulse: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self::from_sliders(1.0, 1.0)
    }
}

impl MovementTuning {
    pub fn new(move_speed: f32, jump_impulse: f32) -> Self {
        Self {
            move_speed,
            jump_impulse,
        }
    }

    /// Map UI slider positions to tuning values.
    pub fn from_sliders(speed: f32, jump: f32) -> Self {
        Self {
            move_speed: speed * SPEED_SLIDER_SCALE,
            jump_impulse: jump * JUMP_SLIDER_SCALE,
        }
    }
}
