//! Player Module
//!
//! The controlled character: its collision shape, ground check, locomotion
//! and render sync.
//!
//! # Components
//!
//! - [`CharacterShape`] - Capsule-like composite of two spheres and a cylinder
//! - [`GroundDetector`] - Downward ray classifying grounded/airborne
//! - [`MovementSolver`] - Camera-relative horizontal velocity, heading and jumps
//! - [`sync_transforms`] - Body pose to render transform and camera position

pub mod character_shape;
pub mod ground;
pub mod movement_controller;
pub mod sync;

pub use character_shape::{CYLINDER_SEGMENTS, CharacterShape};
pub use ground::{GROUND_THRESHOLD, GroundDetector, GroundPhase, GroundState};
pub use movement_controller::{MovementOutcome, MovementSolver};
pub use sync::{EYE_OFFSET, ModelUniform, RenderTransform, camera_position, sync_transforms};
