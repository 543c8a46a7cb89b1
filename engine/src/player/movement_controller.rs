//! Movement Solver
//!
//! Converts held intents plus camera facing into the character's horizontal
//! velocity, turns the body to face its motion, and fires jumps while
//! grounded.
//!
//! # Movement Model
//!
//! - Direction is camera-relative on the XZ plane: forward is the camera's
//!   view flattened onto the ground, strafing uses `up x forward`.
//! - Horizontal velocity is *set* to `direction * move_speed * dt` while any
//!   horizontal intent is held. Releasing all keys leaves it untouched: there
//!   is no deceleration, the body keeps sliding.
//! - Vertical velocity belongs to gravity, except that a jump while grounded
//!   overwrites it with `jump_impulse`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use walkabout_engine::player::MovementSolver;
//!
//! let solver = MovementSolver::default();
//!
//! // Each frame, after the physics step:
//! let outcome = solver.solve(body, &input, &camera.frame(), &tuning, dt, &scene);
//! if outcome.jumped {
//!     log::debug!("jump");
//! }
//! ```

use glam::{Quat, Vec3};

use super::ground::{GroundDetector, GroundState};
use crate::camera::CameraFrame;
use crate::config::MovementTuning;
use crate::input::InputState;
use crate::physics::RigidBody;
use crate::scene::Scene;

/// What one solver pass did to the body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementOutcome {
    /// A horizontal velocity was written this frame
    pub moved: bool,
    /// Yaw (radians about +Y) written to the body, when `moved`
    pub heading: Option<f32>,
    /// Ground check result
    pub ground: GroundState,
    /// Vertical velocity was set to the jump impulse
    pub jumped: bool,
}

/// Camera-relative locomotion for one dynamic body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementSolver {
    pub detector: GroundDetector,
}

impl MovementSolver {
    pub fn new(detector: GroundDetector) -> Self {
        Self { detector }
    }

    /// Unnormalized world direction requested by the held intents.
    ///
    /// Zero when nothing is held, when opposite intents cancel, or when the
    /// camera looks straight up or down.
    pub fn wish_direction(input: &InputState, camera: &CameraFrame) -> Vec3 {
        let forward = camera.planar_forward();
        let right = camera.planar_right();

        let mut dir = Vec3::ZERO;
        if input.forward {
            dir += forward;
        }
        if input.backward {
            dir -= forward;
        }
        if input.left {
            dir += right;
        }
        if input.right {
            dir -= right;
        }
        dir
    }

    /// Write horizontal velocity and heading.
    ///
    /// # Arguments
    /// * `body` - Character body; only velocity X/Z and orientation are written
    /// * `input` - Held intents
    /// * `camera` - Camera facing this frame
    /// * `tuning` - Current speed scale
    /// * `dt` - Frame time in seconds
    ///
    /// # Returns
    /// The heading (yaw about +Y) if the body was moved.
    pub fn apply_movement(
        body: &mut RigidBody,
        input: &InputState,
        camera: &CameraFrame,
        tuning: &MovementTuning,
        dt: f32,
    ) -> Option<f32> {
        let dir = Self::wish_direction(input, camera).try_normalize()?;
        let step = dir * tuning.move_speed * dt;
        if !step.is_finite() {
            return None;
        }

        body.velocity.x = step.x;
        body.velocity.z = step.z;

        // Adding 0.0 clears a negative zero, so facing -Z is always +PI.
        let heading = (step.x + 0.0).atan2(step.z);
        body.orientation = Quat::from_rotation_y(heading);
        Some(heading)
    }

    /// Set vertical velocity to the jump impulse if jump is held while grounded.
    pub fn apply_jump(
        body: &mut RigidBody,
        input: &InputState,
        ground: &GroundState,
        tuning: &MovementTuning,
    ) -> bool {
        if input.jump && ground.grounded {
            body.velocity.y = tuning.jump_impulse;
            true
        } else {
            false
        }
    }

    /// Full pass: movement, ground ray, jump gate.
    ///
    /// Call once per frame after the physics step.
    pub fn solve(
        &self,
        body: &mut RigidBody,
        input: &InputState,
        camera: &CameraFrame,
        tuning: &MovementTuning,
        dt: f32,
        scene: &Scene,
    ) -> MovementOutcome {
        let heading = Self::apply_movement(body, input, camera, tuning, dt);
        let ground = self.detector.detect(scene, body.position);
        let jumped = Self::apply_jump(body, input, &ground, tuning);

        log::trace!(
            "solver: velocity={:?} heading={:?} ground={:?} jump={}",
            body.velocity,
            heading,
            ground.phase(),
            jumped
        );

        MovementOutcome {
            moved: heading.is_some(),
            heading,
            ground,
            jumped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MeshGeometry, SceneNode};
    use std::f32::consts::PI;

    const DT: f32 = 1.0 / 60.0;

    fn character() -> RigidBody {
        RigidBody::dynamic(1.0, Vec3::new(0.0, 2.0, 0.0)).unwrap()
    }

    fn looking_down_neg_z() -> CameraFrame {
        CameraFrame::new(Vec3::new(0.0, 10.0, 10.0), Vec3::NEG_Z)
    }

    fn held(forward: bool, backward: bool, left: bool, right: bool, jump: bool) -> InputState {
        InputState {
            forward,
            backward,
            left,
            right,
            jump,
        }
    }

    fn floor() -> Scene {
        let mut scene = Scene::new();
        scene.add(SceneNode::mesh("floor", MeshGeometry::plane(20.0, 0.0)));
        scene
    }

    #[test]
    fn test_forward_sets_velocity_and_heading() {
        let mut body = character();
        body.velocity.y = -3.0;
        let tuning = MovementTuning::new(5.0, 10.0);

        let heading = MovementSolver::apply_movement(
            &mut body,
            &held(true, false, false, false, false),
            &looking_down_neg_z(),
            &tuning,
            DT,
        )
        .unwrap();

        assert!(body.velocity.x.abs() < 1e-6);
        assert_eq!(body.velocity.y, -3.0);
        assert!((body.velocity.z + 5.0 / 60.0).abs() < 1e-6);
        assert_eq!(heading, 0.0_f32.atan2(-1.0));
        assert_eq!(heading, PI);
        let facing = body.orientation * Vec3::Z;
        assert!((facing - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_heading_sign_follows_sideways_motion() {
        let mut body = character();
        let tuning = MovementTuning::new(5.0, 0.0);
        let back_left = held(false, true, true, false, false);
        let heading = MovementSolver::apply_movement(&mut body, &back_left, &looking_down_neg_z(), &tuning, DT)
            .unwrap();
        // Backward is +Z and left is -X: atan2(-1, 1).
        assert!((heading + PI / 4.0).abs() < 1e-5, "heading {heading}");

        let right = held(false, false, false, true, false);
        let heading = MovementSolver::apply_movement(&mut body, &right, &looking_down_neg_z(), &tuning, DT)
            .unwrap();
        assert!((heading - PI / 2.0).abs() < 1e-5, "heading {heading}");
    }

    #[test]
    fn test_left_moves_toward_negative_x() {
        let mut body = character();
        MovementSolver::apply_movement(
            &mut body,
            &held(false, false, true, false, false),
            &looking_down_neg_z(),
            &MovementTuning::new(6.0, 0.0),
            1.0,
        );
        assert!((body.velocity.x + 6.0).abs() < 1e-5);
        assert!(body.velocity.z.abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_magnitude_matches_straight() {
        let mut body = character();
        let tuning = MovementTuning::new(5.0, 0.0);
        MovementSolver::apply_movement(
            &mut body,
            &held(true, false, true, false, false),
            &looking_down_neg_z(),
            &tuning,
            DT,
        );
        let speed = body.horizontal_velocity().length();
        assert!((speed - 5.0 * DT).abs() < 1e-6);
    }

    #[test]
    fn test_no_input_keeps_sliding() {
        let mut body = character();
        body.velocity = Vec3::new(1.5, 0.0, -2.5);
        let before = body.orientation;
        let heading = MovementSolver::apply_movement(
            &mut body,
            &InputState::new(),
            &looking_down_neg_z(),
            &MovementTuning::default(),
            DT,
        );
        assert_eq!(heading, None);
        assert_eq!(body.velocity, Vec3::new(1.5, 0.0, -2.5));
        assert_eq!(body.orientation, before);
    }

    #[test]
    fn test_opposite_intents_cancel() {
        let mut body = character();
        body.velocity = Vec3::new(0.25, 0.0, 0.0);
        let heading = MovementSolver::apply_movement(
            &mut body,
            &held(true, true, false, false, false),
            &looking_down_neg_z(),
            &MovementTuning::default(),
            DT,
        );
        assert_eq!(heading, None);
        assert_eq!(body.velocity.x, 0.25);
    }

    #[test]
    fn test_vertical_camera_produces_no_nan() {
        let mut body = character();
        let camera = CameraFrame::new(Vec3::ZERO, Vec3::NEG_Y);
        let heading = MovementSolver::apply_movement(
            &mut body,
            &held(true, false, true, false, false),
            &camera,
            &MovementTuning::default(),
            DT,
        );
        assert_eq!(heading, None);
        assert!(body.velocity.is_finite());
    }

    #[test]
    fn test_pitched_camera_moves_on_plane() {
        let mut body = character();
        let camera = CameraFrame::new(Vec3::ZERO, Vec3::new(0.0, -0.8, -0.6));
        MovementSolver::apply_movement(
            &mut body,
            &held(true, false, false, false, false),
            &camera,
            &MovementTuning::new(1.0, 0.0),
            1.0,
        );
        assert_eq!(body.velocity.y, 0.0);
        assert!((body.velocity.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_jump_requires_ground() {
        let tuning = MovementTuning::new(5.0, 12.0);
        let jump = held(false, false, false, false, true);
        let grounded = GroundState {
            grounded: true,
            clearance: Some(2.0),
        };

        let mut body = character();
        assert!(MovementSolver::apply_jump(&mut body, &jump, &grounded, &tuning));
        assert_eq!(body.velocity.y, 12.0);

        let mut body = character();
        body.velocity.y = -4.0;
        assert!(!MovementSolver::apply_jump(&mut body, &jump, &GroundState::AIRBORNE, &tuning));
        assert_eq!(body.velocity.y, -4.0);

        let mut body = character();
        assert!(!MovementSolver::apply_jump(&mut body, &InputState::new(), &grounded, &tuning));
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_solve_runs_all_stages() {
        let solver = MovementSolver::default();
        let mut body = character();
        let outcome = solver.solve(
            &mut body,
            &held(true, false, false, false, true),
            &looking_down_neg_z(),
            &MovementTuning::new(5.0, 10.0),
            DT,
            &floor(),
        );
        assert!(outcome.moved);
        assert!(outcome.ground.grounded);
        assert!(outcome.jumped);
        assert_eq!(body.velocity.y, 10.0);
    }

    #[test]
    fn test_solve_airborne_no_jump() {
        let solver = MovementSolver::default();
        let mut body = RigidBody::dynamic(1.0, Vec3::new(0.0, 8.0, 0.0)).unwrap();
        let outcome = solver.solve(
            &mut body,
            &held(false, false, false, false, true),
            &looking_down_neg_z(),
            &MovementTuning::default(),
            DT,
            &floor(),
        );
        assert!(!outcome.moved);
        assert!(!outcome.jumped);
        assert_eq!(outcome.ground.clearance.map(|c| c.round()), Some(8.0));
    }
}
