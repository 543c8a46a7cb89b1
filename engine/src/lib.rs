//! Walkabout Engine Library
//!
//! A capsule character controller for a single player walking through static
//! scenery. The library owns physics, ground checks and locomotion; it hands
//! plain transforms to whatever renders the scene.
//!
//! # Modules
//!
//! - [`physics`] - Rigid bodies and collision shapes stepped by rapier
//! - [`scene`] - Renderable scene graph and nearest-hit ray casting
//! - [`colliders`] - Static collider conversion from loaded meshes
//! - [`player`] - Character shape, ground detection, movement solver, transform sync
//! - [`camera`] - Mouse-look camera and the per-frame camera snapshot
//! - [`input`] - Key bindings and held movement intents
//! - [`driver`] - Per-frame loop and asynchronous load delivery
//! - [`config`] - JSON configuration
//! - [`debug`] - World-space shape listing for overlays
//!
//! # Example
//!
//! ```ignore
//! use walkabout_engine::{ColliderRecipe, ControllerConfig, FrameDriver, KeyCode, LoadEvent};
//! use walkabout_engine::scene::{MeshGeometry, SceneNode};
//!
//! let mut driver = FrameDriver::new(ControllerConfig::default())?;
//!
//! // Loaders may run on other threads
//! let loads = driver.sender();
//! std::thread::spawn(move || {
//!     let map = SceneNode::mesh("map", MeshGeometry::plane(50.0, 0.0));
//!     let _ = loads.send(LoadEvent::StaticAsset { root: map, recipe: ColliderRecipe::BoundingBox });
//!     let _ = loads.send(LoadEvent::Character { spawn: None });
//! });
//!
//! driver.handle_key(KeyCode::W, true);
//! loop {
//!     let output = driver.frame(1.0 / 60.0);
//!     if let Some(character) = output.character {
//!         // Upload character.to_uniform(), place the camera at output.camera_position
//!     }
//! }
//! ```

pub mod camera;
pub mod colliders;
pub mod config;
pub mod debug;
pub mod driver;
pub mod error;
pub mod input;
pub mod logging;
pub mod physics;
pub mod player;
pub mod scene;

pub use camera::{CameraFrame, FpsCamera};
pub use colliders::{ColliderRecipe, ColliderSkip, StaticCollider};
pub use config::{ControllerConfig, MovementTuning, StepMode};
pub use driver::{ControllerState, FrameDriver, FrameOutput, LoadEvent};
pub use error::{ControllerError, ControllerResult};
pub use input::{InputState, KeyBindings, KeyCode};
pub use physics::{BodyHandle, CollisionShape, PhysicsWorld, RigidBody};
pub use player::{
    CharacterShape, GroundDetector, GroundPhase, GroundState, MovementOutcome, MovementSolver,
    RenderTransform,
};
