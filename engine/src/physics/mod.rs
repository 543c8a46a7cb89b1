//! Physics module
//!
//! Rigid-body world for one dynamic character moving through fixed scenery,
//! stepped by rapier. Crate code works with glam types and the
//! [`CollisionShape`] enum; conversion to rapier happens inside [`world`].
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, velocities in m/s, gravity in m/s².
//!
//! # Submodules
//!
//! - [`types`] - glam re-exports, world constants and rapier conversions
//! - [`shape`] - Collision shapes and body attachments
//! - [`body`] - Rigid bodies and handles
//! - [`collision`] - Ray-AABB and ray-triangle queries for the render scene
//! - [`world`] - Body registry and the rapier pipeline

pub mod body;
pub mod collision;
pub mod shape;
pub mod types;
pub mod world;

pub use body::{BodyHandle, RigidBody};
pub use collision::{RayHit, ray_aabb_intersect, ray_triangle_intersect};
pub use shape::{CollisionShape, ShapeAttachment};
pub use types::{FIXED_TIMESTEP, Quat, Vec3, WORLD_UP};
pub use world::{DEFAULT_GRAVITY, PhysicsWorld};
