//! Scene Raycast
//!
//! Nearest-hit ray cast against renderable mesh triangles, recursing through
//! groups. Each mesh is first culled by its world-space bounding box.

use glam::{Affine3A, Vec3};

use super::{NodeKind, Scene, SceneNode};
use crate::physics::collision::{RayHit, facing_normal, ray_aabb_intersect, ray_triangle_intersect};

/// Cast a ray through every root of `scene`.
///
/// # Arguments
/// * `origin` - Ray origin in world space
/// * `direction` - Ray direction (normalized by this function)
///
/// # Returns
/// The closest hit, or `None` if nothing is hit or `direction` is zero.
pub fn raycast_scene(scene: &Scene, origin: Vec3, direction: Vec3) -> Option<RayHit> {
    let direction = direction.try_normalize()?;
    let mut best: Option<RayHit> = None;
    for root in scene.roots() {
        nearest(&mut best, raycast_node(root, &Affine3A::IDENTITY, origin, direction));
    }
    best
}

/// Cast a ray against one subtree placed under `parent`.
///
/// `direction` must already be unit length.
pub fn raycast_node(node: &SceneNode, parent: &Affine3A, origin: Vec3, direction: Vec3) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    node.traverse(parent, &mut |node: &SceneNode, world: &Affine3A| {
        let NodeKind::Mesh(Some(geometry)) = &node.kind else {
            return;
        };
        let Some(local_bounds) = geometry.bounding_box() else {
            return;
        };
        let bounds = local_bounds.transformed(world);
        let Some(entry) = ray_aabb_intersect(origin, direction, bounds.min, bounds.max) else {
            return;
        };
        if best.is_some_and(|b| b.distance < entry) {
            return;
        }

        for local_tri in geometry.triangles() {
            let tri = local_tri.map(|v| world.transform_point3(v));
            let Some(distance) = ray_triangle_intersect(origin, direction, tri) else {
                continue;
            };
            if best.is_some_and(|b| b.distance <= distance) {
                continue;
            }
            let normal = facing_normal(tri, direction).unwrap_or(-direction);
            best = Some(RayHit::new(origin + direction * distance, normal, distance));
        }
    });
    best
}

fn nearest(best: &mut Option<RayHit>, candidate: Option<RayHit>) {
    if let Some(hit) = candidate {
        if best.is_none_or(|b| hit.distance < b.distance) {
            *best = Some(hit);
        }
    }
}
