//! Physics World
//!
//! Owns every body and steps them with rapier. Each [`RigidBody`] is the
//! crate-side view of one rapier body: controller code reads and writes the
//! view, and [`PhysicsWorld::step`] pushes dynamic views into rapier, runs the
//! pipeline, then reads the results back. Fixed bodies are never written after
//! insertion.
//!
//! # Step
//!
//! 1. Copy pose and velocity of each dynamic view into its rapier body.
//!    Angular velocity is masked by the body's angular factor first.
//! 2. `PhysicsPipeline::step` with the world gravity: integration, broad
//!    phase, narrow phase and contact solving.
//! 3. Copy pose and velocity back into the views.

use glam::Vec3;
use rapier3d::prelude::*;

use super::body::{BodyHandle, RigidBody};
use super::types::{from_rotation, from_vector, to_isometry, to_vector};
use crate::error::{ControllerError, ControllerResult};

/// Default gravity: five times earth gravity, for a snappy fall.
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.82 * 5.0, 0.0);

/// Container and stepper for all rigid bodies.
pub struct PhysicsWorld {
    gravity: Vec3,
    bodies: Vec<RigidBody>,
    /// rapier handle per body, same order as `bodies`
    handles: Vec<RigidBodyHandle>,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("gravity", &self.gravity)
            .field("bodies", &self.bodies.len())
            .field("colliders", &self.collider_set.len())
            .finish()
    }
}

impl PhysicsWorld {
    /// Create an empty world with the given gravity.
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            handles: Vec::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Register a body and return its handle.
    ///
    /// Fixed bodies become rapier fixed bodies. Dynamic bodies carry their
    /// mass as additional mass on zero-density colliders, never sleep, use
    /// CCD, and collide without friction so horizontal velocity is kept.
    /// Attachments without usable volume are logged and left out of the
    /// simulation.
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len());
        let pose = to_isometry(body.position, body.orientation);

        let builder = if body.is_dynamic() {
            let locks = body.angular_factor;
            RigidBodyBuilder::dynamic()
                .position(pose)
                .linvel(to_vector(body.velocity))
                .angvel(to_vector(body.angular_velocity * locks))
                .additional_mass(body.mass())
                .enabled_rotations(locks.x != 0.0, locks.y != 0.0, locks.z != 0.0)
                .can_sleep(false)
                .ccd_enabled(true)
        } else {
            RigidBodyBuilder::fixed().position(pose)
        };
        let rapier_handle = self.rigid_body_set.insert(builder.build());

        let mut colliders = 0;
        for attachment in body.attachments() {
            let Some(shape) = attachment.shape.to_shared_shape() else {
                log::warn!(
                    "{:?}: {} attachment has no usable volume; not simulated",
                    handle,
                    attachment.shape.kind()
                );
                continue;
            };
            let mut collider = ColliderBuilder::new(shape)
                .position(to_isometry(attachment.offset, attachment.rotation));
            if body.is_dynamic() {
                collider = collider
                    .density(0.0)
                    .friction(0.0)
                    .friction_combine_rule(CoefficientCombineRule::Min);
            }
            self.collider_set
                .insert_with_parent(collider.build(), rapier_handle, &mut self.rigid_body_set);
            colliders += 1;
        }

        log::trace!(
            "inserted {} body {:?} with {} collider(s)",
            if body.is_dynamic() { "dynamic" } else { "fixed" },
            handle,
            colliders
        );
        self.bodies.push(body);
        self.handles.push(rapier_handle);
        handle
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    /// Mutable access to a dynamic body. Fixed bodies are not handed out
    /// mutably, so they cannot move after creation.
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0).filter(|b| b.is_dynamic())
    }

    /// Like [`PhysicsWorld::get`], but a missing body is an error.
    pub fn body(&self, handle: BodyHandle) -> ControllerResult<&RigidBody> {
        self.get(handle).ok_or(ControllerError::UnknownBody(handle))
    }

    /// Like [`PhysicsWorld::get_mut`], but a missing or fixed body is an error.
    pub fn body_mut(&mut self, handle: BodyHandle) -> ControllerResult<&mut RigidBody> {
        self.get_mut(handle).ok_or(ControllerError::UnknownBody(handle))
    }

    /// All bodies with their handles, in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (BodyHandle(i), b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of fixed bodies (static scenery).
    pub fn fixed_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_fixed()).count()
    }

    /// Number of colliders handed to rapier across all bodies.
    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    /// Advance every dynamic body by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }

        for (body, &rapier_handle) in self.bodies.iter().zip(&self.handles) {
            if body.is_fixed() {
                continue;
            }
            if let Some(rb) = self.rigid_body_set.get_mut(rapier_handle) {
                rb.set_position(to_isometry(body.position, body.orientation), true);
                rb.set_linvel(to_vector(body.velocity), true);
                rb.set_angvel(to_vector(body.angular_velocity * body.angular_factor), true);
            }
        }

        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &to_vector(self.gravity),
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        for (body, &rapier_handle) in self.bodies.iter_mut().zip(&self.handles) {
            if body.is_fixed() {
                continue;
            }
            if let Some(rb) = self.rigid_body_set.get(rapier_handle) {
                body.position = from_vector(rb.translation());
                body.orientation = from_rotation(rb.rotation());
                body.velocity = from_vector(rb.linvel());
                body.angular_velocity = from_vector(rb.angvel());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;
    use crate::physics::CollisionShape;
    use crate::player::CharacterShape;

    fn floor_world() -> PhysicsWorld {
        let mut world = PhysicsWorld::default();
        world.insert(
            RigidBody::fixed(Vec3::new(0.0, -0.5, 0.0), Quat::IDENTITY)
                .with_shape(CollisionShape::cuboid(Vec3::new(50.0, 0.5, 50.0)), Vec3::ZERO, Quat::IDENTITY),
        );
        world
    }

    #[test]
    fn test_gravity_accelerates_dynamic_body() {
        let mut world = PhysicsWorld::default();
        let h = world.insert(RigidBody::dynamic(1.0, Vec3::new(0.0, 10.0, 0.0)).unwrap());
        world.step(0.1);
        let body = world.get(h).unwrap();
        assert!((body.velocity.y - DEFAULT_GRAVITY.y * 0.1).abs() < 1e-3);
        assert!(body.position.y < 10.0);
    }

    #[test]
    fn test_fixed_body_never_moves() {
        let mut world = floor_world();
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        let (_, floor) = world.bodies().next().unwrap();
        assert_eq!(floor.position, Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(floor.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_fixed_body_not_mutable() {
        let mut world = floor_world();
        let (h, _) = world.bodies().next().unwrap();
        assert!(world.get_mut(h).is_none());
        assert!(world.body_mut(h).is_err());
    }

    #[test]
    fn test_sphere_comes_to_rest_on_floor() {
        let mut world = floor_world();
        let h = world.insert(
            RigidBody::dynamic(1.0, Vec3::new(0.0, 3.0, 0.0))
                .unwrap()
                .with_shape(CollisionShape::ball(1.0), Vec3::ZERO, Quat::IDENTITY),
        );
        for _ in 0..180 {
            world.step(1.0 / 60.0);
        }
        let body = world.get(h).unwrap();
        assert!((body.position.y - 1.0).abs() < 0.05, "y = {}", body.position.y);
    }

    #[test]
    fn test_horizontal_velocity_survives_floor_contact() {
        let mut world = floor_world();
        let h = world.insert(
            RigidBody::dynamic(1.0, Vec3::new(0.0, 1.0, 0.0))
                .unwrap()
                .with_shape(CollisionShape::ball(1.0), Vec3::ZERO, Quat::IDENTITY),
        );
        world.get_mut(h).unwrap().velocity = Vec3::new(2.0, 0.0, 0.0);
        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }
        let body = world.get(h).unwrap();
        assert!((body.velocity.x - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_angular_factor_locks_rotation() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let h = world.insert(
            RigidBody::dynamic(1.0, Vec3::ZERO)
                .unwrap()
                .with_shape(CollisionShape::ball(1.0), Vec3::ZERO, Quat::IDENTITY)
                .with_angular_factor(Vec3::ZERO),
        );
        world.get_mut(h).unwrap().angular_velocity = Vec3::new(3.0, 3.0, 3.0);
        world.step(0.1);
        let body = world.get(h).unwrap();
        assert!(body.orientation.angle_between(Quat::IDENTITY) < 1e-5);
        assert!(body.angular_velocity.length() < 1e-5);
    }

    #[test]
    fn test_every_attachment_becomes_a_collider() {
        let mut world = floor_world();
        let shape = CharacterShape::new(4.0, 2.0).unwrap();
        world.insert(shape.build_body(1.0, Vec3::new(0.0, 5.0, 0.0)).unwrap());
        assert_eq!(world.collider_count(), 4);
    }

    #[test]
    fn test_degenerate_attachment_is_not_simulated() {
        let mut world = PhysicsWorld::default();
        world.insert(
            RigidBody::fixed(Vec3::ZERO, Quat::IDENTITY)
                .with_shape(CollisionShape::trimesh(Vec::new(), Vec::new()), Vec3::ZERO, Quat::IDENTITY),
        );
        assert_eq!(world.len(), 1);
        assert_eq!(world.collider_count(), 0);
    }

    #[test]
    fn test_very_thin_character_lands() {
        // Narrow cylinders cost the same as wide ones.
        let mut world = floor_world();
        let shape = CharacterShape::new(4.0, 1e-3).unwrap();
        let h = world.insert(shape.build_body(1.0, Vec3::new(0.0, 2.5, 0.0)).unwrap());
        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }
        let body = world.get(h).unwrap();
        assert!((body.position.y - 2.0).abs() < 0.05, "y = {}", body.position.y);
        assert_eq!(world.collider_count(), 4);
    }

    #[test]
    fn test_non_positive_step_is_ignored() {
        let mut world = PhysicsWorld::default();
        let h = world.insert(RigidBody::dynamic(1.0, Vec3::ZERO).unwrap());
        world.step(0.0);
        world.step(f32::NAN);
        assert_eq!(world.get(h).unwrap().velocity, Vec3::ZERO);
    }
}
