//! Static Collider Conversion
//!
//! Turns loaded scenery meshes into fixed collision bodies. Each asset picks a
//! [`ColliderRecipe`]:
//!
//! - `BoundingBox` - box from the mesh's local bounding box (terrain, cliffs)
//! - `TriangleMesh` - exact triangles (buildings the character walks into)
//! - `BoundingSphere` - scaled bounding sphere (small decorations)
//!
//! Meshes with no geometry or no computable bounds are skipped with a warning;
//! the rest of the asset still gets its colliders.

use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::physics::{CollisionShape, RigidBody};
use crate::scene::{MeshGeometry, NodeKind, SceneNode};

/// How a mesh is approximated for collision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColliderRecipe {
    BoundingBox,
    TriangleMesh,
    /// Bounding sphere radius multiplied by `radius_scale`.
    BoundingSphere { radius_scale: f32 },
}

impl ColliderRecipe {
    /// Decorations collide with half their bounding radius so the character
    /// can brush past foliage.
    pub const DECORATION: Self = Self::BoundingSphere { radius_scale: 0.5 };
}

/// A fixed collision shape placed in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCollider {
    /// Name of the mesh it came from
    pub source: String,
    pub shape: CollisionShape,
    pub position: Vec3,
    pub rotation: Quat,
}

impl StaticCollider {
    /// Zero-mass body carrying this collider at its origin.
    pub fn into_body(self) -> RigidBody {
        RigidBody::fixed(self.position, self.rotation).with_shape(self.shape, Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Why a mesh produced no collider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColliderSkip {
    #[error("mesh '{0}' has no geometry")]
    MissingGeometry(String),
    #[error("bounding volume cannot be computed for '{0}'")]
    DegenerateBounds(String),
    #[error("mesh '{0}' has no complete triangles")]
    NoTriangles(String),
}

/// Convert one mesh, placed by its accumulated world transform.
pub fn collider_for_mesh(
    name: &str,
    geometry: Option<&MeshGeometry>,
    world: &Affine3A,
    recipe: ColliderRecipe,
) -> Result<StaticCollider, ColliderSkip> {
    let geometry = geometry
        .filter(|g| !g.is_empty())
        .ok_or_else(|| ColliderSkip::MissingGeometry(name.to_string()))?;
    let (scale, rotation, translation) = world.to_scale_rotation_translation();
    let scale = scale.abs();

    let (shape, position, rotation) = match recipe {
        ColliderRecipe::BoundingBox => {
            let bounds = geometry
                .bounding_box()
                .ok_or_else(|| ColliderSkip::DegenerateBounds(name.to_string()))?;
            (
                CollisionShape::cuboid(bounds.half_extents() * scale),
                world.transform_point3(bounds.center()),
                rotation,
            )
        }
        ColliderRecipe::TriangleMesh => {
            let vertices: Vec<Vec3> = geometry.positions().iter().map(|v| *v * scale).collect();
            let shape = CollisionShape::trimesh(vertices, geometry.triangle_indices());
            if shape.triangles().next().is_none() {
                return Err(ColliderSkip::NoTriangles(name.to_string()));
            }
            (shape, translation, rotation)
        }
        ColliderRecipe::BoundingSphere { radius_scale } => {
            let sphere = geometry
                .bounding_sphere()
                .ok_or_else(|| ColliderSkip::DegenerateBounds(name.to_string()))?;
            let radius = sphere.radius * scale.max_element() * radius_scale;
            (
                CollisionShape::ball(radius),
                world.transform_point3(sphere.center),
                Quat::IDENTITY,
            )
        }
    };

    Ok(StaticCollider {
        source: name.to_string(),
        shape,
        position,
        rotation,
    })
}

/// Walk an asset's scene tree and convert every mesh with `recipe`.
///
/// Skipped meshes are logged at warn level and left out of the result.
pub fn build_static_colliders(root: &SceneNode, recipe: ColliderRecipe) -> Vec<StaticCollider> {
    let mut colliders = Vec::new();
    root.traverse(&Affine3A::IDENTITY, &mut |node: &SceneNode, world: &Affine3A| {
        let NodeKind::Mesh(geometry) = &node.kind else {
            return;
        };
        match collider_for_mesh(&node.name, geometry.as_ref(), world, recipe) {
            Ok(collider) => colliders.push(collider),
            Err(skip) => log::warn!("skipping collider: {skip}"),
        }
    });
    log::debug!(
        "'{}': {} static collider(s) from {} node(s)",
        root.name,
        colliders.len(),
        root.node_count()
    );
    colliders
}
