//! Collision shapes
//!
//! Immutable primitives attached to rigid bodies. Shapes are shared through
//! `Arc` so a body list can be cloned for debug views without copying meshes.
//! The physics world hands them to rapier through [`CollisionShape::to_shared_shape`].

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Quat, Vec3};
use rapier3d::prelude::{Point, Real, SharedShape};

use super::types::to_point;

/// Geometric primitive attached to a body.
///
/// All shapes are centered on their local origin. The cylinder axis is local Y.
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    /// Box with the given half-extents along local X/Y/Z.
    Box { half_extents: Vec3 },
    /// Sphere of the given radius.
    Sphere { radius: f32 },
    /// Cylinder (possibly tapered) along local Y.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        /// Radial tessellation, kept for debug drawing only.
        segments: u32,
    },
    /// Exact triangle soup. `indices.len()` is a multiple of three.
    TriangleMesh {
        vertices: Vec<Vec3>,
        indices: Vec<u32>,
    },
}

impl CollisionShape {
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box { half_extents }
    }

    pub fn ball(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Straight cylinder with equal caps.
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        Self::Cylinder {
            radius_top: radius,
            radius_bottom: radius,
            height,
            segments,
        }
    }

    /// Triangle mesh. Trailing indices that do not form a whole triangle are dropped.
    pub fn trimesh(vertices: Vec<Vec3>, mut indices: Vec<u32>) -> Self {
        let whole = indices.len() - indices.len() % 3;
        indices.truncate(whole);
        Self::TriangleMesh { vertices, indices }
    }

    /// Short lowercase name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Cylinder { .. } => "cylinder",
            Self::TriangleMesh { .. } => "trimesh",
        }
    }

    /// Vertical extent `(min_y, max_y)` of this shape in its own frame.
    pub fn local_y_extent(&self) -> (f32, f32) {
        match self {
            Self::Box { half_extents } => (-half_extents.y, half_extents.y),
            Self::Sphere { radius } => (-radius, *radius),
            Self::Cylinder { height, .. } => (-height * 0.5, height * 0.5),
            Self::TriangleMesh { vertices, .. } => vertices
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v.y), hi.max(v.y))
                }),
        }
    }

    /// Rapier collision shape, or `None` when the shape has no usable volume
    /// (non-positive sizes, a mesh without valid triangles).
    ///
    /// Tapered cylinders become the convex hull of their two rings.
    pub fn to_shared_shape(&self) -> Option<SharedShape> {
        match self {
            Self::Box { half_extents } => (half_extents.min_element() > 0.0)
                .then(|| SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)),
            Self::Sphere { radius } => (*radius > 0.0).then(|| SharedShape::ball(*radius)),
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => {
                if *height <= 0.0 || radius_top.max(*radius_bottom) <= 0.0 {
                    return None;
                }
                if radius_top == radius_bottom {
                    return Some(SharedShape::cylinder(height * 0.5, *radius_top));
                }
                let segments = (*segments).max(3);
                let ring = |y: f32, r: f32| {
                    (0..segments).map(move |i| {
                        let a = TAU * i as f32 / segments as f32;
                        to_point(Vec3::new(r * a.cos(), y, r * a.sin()))
                    })
                };
                let points: Vec<Point<Real>> = ring(-height * 0.5, *radius_bottom)
                    .chain(ring(height * 0.5, *radius_top))
                    .collect();
                SharedShape::convex_hull(&points)
            }
            Self::TriangleMesh { vertices, indices } => {
                let triangles: Vec<[u32; 3]> = indices
                    .chunks_exact(3)
                    .filter(|tri| tri.iter().all(|&i| (i as usize) < vertices.len()))
                    .map(|tri| [tri[0], tri[1], tri[2]])
                    .collect();
                if triangles.is_empty() {
                    return None;
                }
                let points = vertices.iter().copied().map(to_point).collect();
                Some(SharedShape::trimesh(points, triangles))
            }
        }
    }

    /// Iterate the triangles of a mesh shape. Empty for primitives.
    ///
    /// Triangles with out-of-range indices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        let (vertices, indices): (&[Vec3], &[u32]) = match self {
            Self::TriangleMesh { vertices, indices } => (vertices.as_slice(), indices.as_slice()),
            _ => (&[], &[]),
        };
        indices.chunks_exact(3).filter_map(move |tri| {
            let a = vertices.get(tri[0] as usize)?;
            let b = vertices.get(tri[1] as usize)?;
            let c = vertices.get(tri[2] as usize)?;
            Some([*a, *b, *c])
        })
    }
}

/// A shape placed on a body at a local offset and rotation.
#[derive(Debug, Clone)]
pub struct ShapeAttachment {
    pub shape: Arc<CollisionShape>,
    pub offset: Vec3,
    pub rotation: Quat,
}

impl ShapeAttachment {
    pub fn new(shape: CollisionShape, offset: Vec3, rotation: Quat) -> Self {
        Self {
            shape: Arc::new(shape),
            offset,
            rotation,
        }
    }

    /// Attachment at the body origin with no rotation.
    pub fn centered(shape: CollisionShape) -> Self {
        Self::new(shape, Vec3::ZERO, Quat::IDENTITY)
    }

    /// World-space pose of this attachment given its body's pose.
    pub fn world_pose(&self, body_position: Vec3, body_rotation: Quat) -> (Vec3, Quat) {
        (
            body_position + body_rotation * self.offset,
            body_rotation * self.rotation,
        )
    }

    /// Vertical extent in the body frame. Exact for spheres and for boxes,
    /// cylinders and meshes whose rotation keeps local Y vertical.
    pub fn body_y_extent(&self) -> (f32, f32) {
        let (lo, hi) = self.shape.local_y_extent();
        (self.offset.y + lo, self.offset.y + hi)
    }
}
