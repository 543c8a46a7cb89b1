//! Mesh geometry and bounding volumes
//!
//! Decoded vertex data as handed over by the asset loader, plus the bounding
//! box / bounding sphere computations the collider converter needs.

use std::borrow::Cow;

use glam::{Affine3A, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all points, or `None` for an empty or
    /// non-finite point set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next().filter(|p| p.is_finite())?;
        iter.try_fold((first, first), |(min, max), p| {
            p.is_finite().then(|| (min.min(p), max.max(p)))
        })
        .map(|(min, max)| Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Bounds of this box after an affine transform (all eight corners).
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let corners = (0..8).map(|i| {
            let pick = |bit: u32, lo: f32, hi: f32| if i & bit == 0 { lo } else { hi };
            transform.transform_point3(Vec3::new(
                pick(1, self.min.x, self.max.x),
                pick(2, self.min.y, self.max.y),
                pick(4, self.min.z, self.max.z),
            ))
        });
        // Eight finite corners always produce a box.
        Self::from_points(corners).unwrap_or(*self)
    }
}

/// Bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Triangle geometry of one renderable mesh.
///
/// `indices` is optional; a non-indexed mesh lists triangles as consecutive
/// vertex triples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    positions: Vec<Vec3>,
    indices: Option<Vec<u32>>,
}

impl MeshGeometry {
    pub fn new(positions: Vec<Vec3>, indices: Option<Vec<u32>>) -> Self {
        Self { positions, indices }
    }

    /// Non-indexed geometry.
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self::new(positions, None)
    }

    /// Axis-aligned quad in the XZ plane at height `y`, facing up.
    pub fn plane(half_size: f32, y: f32) -> Self {
        let s = half_size;
        Self::new(
            vec![
                Vec3::new(-s, y, -s),
                Vec3::new(s, y, -s),
                Vec3::new(s, y, s),
                Vec3::new(-s, y, s),
            ],
            Some(vec![0, 2, 1, 0, 3, 2]),
        )
    }

    /// Closed box centered on the origin.
    pub fn cuboid(half_extents: Vec3) -> Self {
        let h = half_extents;
        let positions = (0..8)
            .map(|i| {
                Vec3::new(
                    if i & 1 == 0 { -h.x } else { h.x },
                    if i & 2 == 0 { -h.y } else { h.y },
                    if i & 4 == 0 { -h.z } else { h.z },
                )
            })
            .collect();
        #[rustfmt::skip]
        let indices = vec![
            0, 1, 3, 0, 3, 2, // -z
            4, 6, 7, 4, 7, 5, // +z
            0, 4, 5, 0, 5, 1, // -y
            2, 3, 7, 2, 7, 6, // +y
            0, 2, 6, 0, 6, 4, // -x
            1, 5, 7, 1, 7, 3, // +x
        ];
        Self::new(positions, Some(indices))
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index list, synthesizing `0..n` for non-indexed geometry.
    pub fn triangle_indices(&self) -> Vec<u32> {
        match &self.indices {
            Some(indices) => indices.clone(),
            None => (0..self.positions.len() as u32).collect(),
        }
    }

    /// Triangles in mesh-local space. Out-of-range indices are skipped.
    pub fn triangles(&self) -> TriangleIter<'_> {
        match &self.indices {
            Some(indices) => TriangleIter::borrowed(&self.positions, indices),
            None => TriangleIter::owned(&self.positions, self.triangle_indices()),
        }
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Sphere centered on the bounding-box center, enclosing every vertex.
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        let center = self.bounding_box()?.center();
        let radius = self
            .positions
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0_f32, f32::max)
            .sqrt();
        radius.is_finite().then_some(BoundingSphere { center, radius })
    }
}

/// Iterator over index triples, over either borrowed or synthesized indices.
pub struct TriangleIter<'a> {
    positions: &'a [Vec3],
    indices: Cow<'a, [u32]>,
    cursor: usize,
}

impl<'a> TriangleIter<'a> {
    fn borrowed(positions: &'a [Vec3], indices: &'a [u32]) -> Self {
        Self {
            positions,
            indices: Cow::Borrowed(indices),
            cursor: 0,
        }
    }

    fn owned(positions: &'a [Vec3], indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Cow::Owned(indices),
            cursor: 0,
        }
    }
}

impl Iterator for TriangleIter<'_> {
    type Item = [Vec3; 3];

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor + 3 <= self.indices.len() {
            let tri = &self.indices[self.cursor..self.cursor + 3];
            self.cursor += 3;
            let fetch = |i: u32| self.positions.get(i as usize).copied();
            if let (Some(a), Some(b), Some(c)) = (fetch(tri[0]), fetch(tri[1]), fetch(tri[2])) {
                return Some([a, b, c]);
            }
        }
        None
    }
}
