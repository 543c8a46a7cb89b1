//! Scene Module
//!
//! Renderable scene graph: groups and meshes with local transforms. The
//! ground detector ray-casts against this graph (not against physics shapes)
//! and the collider converter walks it to build static colliders.
//!
//! # Components
//!
//! - [`geometry`] - Mesh vertex data and bounding volumes
//! - [`raycast`] - Nearest-hit ray cast through the whole graph

pub mod geometry;
pub mod raycast;

use glam::{Affine3A, Quat, Vec3};

pub use geometry::{Aabb, BoundingSphere, MeshGeometry};
pub use raycast::{raycast_node, raycast_scene};

/// Local translation/rotation/scale of a scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// What a node carries besides its children.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure grouping node.
    Group,
    /// Renderable mesh. `None` when the loader produced a mesh without
    /// usable geometry; such meshes are skipped with a warning.
    Mesh(Option<MeshGeometry>),
}

/// One node of the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            kind: NodeKind::Group,
            children: Vec::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, geometry: MeshGeometry) -> Self {
        Self {
            kind: NodeKind::Mesh(Some(geometry)),
            ..Self::group(name)
        }
    }

    /// Mesh node whose geometry failed to decode.
    pub fn empty_mesh(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Mesh(None),
            ..Self::group(name)
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh(_))
    }

    /// Visit this node and every descendant, depth-first, with its
    /// accumulated world transform.
    pub fn traverse(&self, parent: &Affine3A, visit: &mut impl FnMut(&SceneNode, &Affine3A)) {
        let world = *parent * self.transform.to_affine();
        visit(self, &world);
        for child in &self.children {
            child.traverse(&world, visit);
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }
}

/// Root collection of renderable scene nodes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    roots: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: SceneNode) {
        self.roots.push(node);
    }

    pub fn roots(&self) -> &[SceneNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Visit every node of every root with its world transform.
    pub fn traverse(&self, visit: &mut impl FnMut(&SceneNode, &Affine3A)) {
        for root in &self.roots {
            root.traverse(&Affine3A::IDENTITY, visit);
        }
    }
}
