//! Ray queries
//!
//! Ray-AABB (slab method) and ray-triangle (Moller-Trumbore) intersection.
//! The scene raycaster uses the AABB test as a cull before walking a mesh's
//! triangles.
//!
//! # Example
//!
//! ```ignore
//! use walkabout_engine::physics::collision::{ray_aabb_intersect, ray_triangle_intersect};
//! use glam::Vec3;
//!
//! let origin = Vec3::new(0.0, 2.0, 0.0);
//! let down = Vec3::NEG_Y;
//!
//! if let Some(t) = ray_aabb_intersect(origin, down, Vec3::splat(-1.0), Vec3::new(1.0, 0.0, 1.0)) {
//!     println!("box top is {t} below");
//! }
//! ```

use glam::Vec3;

/// Parallel-ray tolerance for the triangle test.
const TRIANGLE_EPSILON: f32 = 1e-7;

/// Nearest intersection of a ray with scene geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec3,
    /// Geometric normal of the hit triangle, facing the ray origin
    pub normal: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

impl RayHit {
    pub fn new(point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            point,
            normal,
            distance,
        }
    }
}

/// Ray-AABB intersection using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (normalized)
/// * `aabb_min` / `aabb_max` - Box corners
///
/// # Returns
///
/// * `Some(t)` - Distance to the entry point, or to the exit point when the
///   origin is inside the box
/// * `None` - Miss, or the box is entirely behind the origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Axis-parallel rays get an effectively infinite inverse so the slab
    // comparisons still order correctly.
    let inv = |d: f32| {
        if d.abs() > 1e-10 {
            1.0 / d
        } else {
            f32::MAX * if d.is_sign_negative() { -1.0 } else { 1.0 }
        }
    };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 { Some(t_min) } else { Some(t_max) }
    } else {
        None
    }
}

/// Ray-triangle intersection (Moller-Trumbore), two-sided.
///
/// Returns the distance along `ray_dir` to the hit, or `None` for a miss,
/// a parallel ray, or a hit behind the origin.
pub fn ray_triangle_intersect(ray_origin: Vec3, ray_dir: Vec3, tri: [Vec3; 3]) -> Option<f32> {
    let [a, b, c] = tri;
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray_dir.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < TRIANGLE_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray_origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Unit normal of a triangle oriented against `ray_dir`, or `None` if degenerate.
pub fn facing_normal(tri: [Vec3; 3], ray_dir: Vec3) -> Option<Vec3> {
    let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).try_normalize()?;
    Some(if n.dot(ray_dir) > 0.0 { -n } else { n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_aabb_hit_from_above() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::NEG_Y,
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        assert!((t.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_aabb_miss_beside() {
        let t = ray_aabb_intersect(
            Vec3::new(3.0, 5.0, 0.0),
            Vec3::NEG_Y,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let t = ray_aabb_intersect(Vec3::new(0.0, -5.0, 0.0), Vec3::NEG_Y, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_aabb_origin_inside_returns_exit() {
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::NEG_Y, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!((t.unwrap() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_aabb_flat_box() {
        // Zero-thickness boxes still register (ground planes).
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::NEG_Y,
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(10.0, 0.0, 10.0),
        );
        assert!((t.unwrap() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_triangle_hit_both_sides() {
        let tri = [
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let down = ray_triangle_intersect(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, tri);
        let up = ray_triangle_intersect(Vec3::new(0.0, -3.0, 0.0), Vec3::Y, tri);
        assert!((down.unwrap() - 3.0).abs() < 1e-5);
        assert!((up.unwrap() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_triangle_miss_and_parallel() {
        let tri = [Vec3::ZERO, Vec3::X, Vec3::Z];
        assert!(ray_triangle_intersect(Vec3::new(2.0, 1.0, 2.0), Vec3::NEG_Y, tri).is_none());
        assert!(ray_triangle_intersect(Vec3::new(0.0, 0.0, -1.0), Vec3::Z, tri).is_none());
    }

    #[test]
    fn test_facing_normal_points_at_origin() {
        let tri = [Vec3::ZERO, Vec3::Z, Vec3::X];
        let n = facing_normal(tri, Vec3::NEG_Y).unwrap();
        assert!((n - Vec3::Y).length() < 1e-5);
    }
}
