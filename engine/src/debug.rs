//! Debug Shapes
//!
//! Read-only snapshot of every collision shape in world space, for wireframe
//! overlays and logging.

use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::physics::{BodyHandle, CollisionShape, PhysicsWorld};

/// One attachment placed in world space.
#[derive(Debug, Clone)]
pub struct DebugShape {
    pub body: BodyHandle,
    /// Fixed scenery vs. the dynamic character
    pub fixed: bool,
    pub shape: Arc<CollisionShape>,
    pub position: Vec3,
    pub rotation: Quat,
}

/// World-space placement of every attachment of every body, in insertion order.
pub fn collect_debug_shapes(world: &PhysicsWorld) -> Vec<DebugShape> {
    world
        .bodies()
        .flat_map(|(handle, body)| {
            body.attachments().iter().map(move |attachment| {
                let (position, rotation) = attachment.world_pose(body.position, body.orientation);
                DebugShape {
                    body: handle,
                    fixed: body.is_fixed(),
                    shape: Arc::clone(&attachment.shape),
                    position,
                    rotation,
                }
            })
        })
        .collect()
}
