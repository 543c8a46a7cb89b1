//! Frame Driver
//!
//! Owns the physics world, the render scene and the controller state, and runs
//! one frame at a time:
//!
//! 1. Drain completed asset loads and apply them.
//! 2. Step the physics world.
//! 3. Run the movement solver (horizontal velocity, heading, ground ray, jump).
//! 4. Sync the body pose into the render transform and the camera position.
//!
//! Loads may finish on any thread. Loaders send a [`LoadEvent`] through a
//! [`FrameDriver::sender`] clone; events are applied only between frames, so a
//! frame never sees a half-registered asset. Frames run fine before anything
//! has loaded.

use std::sync::mpsc::{self, Receiver, Sender};

use glam::Vec3;

use crate::camera::FpsCamera;
use crate::colliders::{ColliderRecipe, build_static_colliders};
use crate::config::{ControllerConfig, MovementTuning, StepMode};
use crate::error::{ControllerError, ControllerResult};
use crate::input::{InputState, KeyBindings, KeyCode};
use crate::physics::{BodyHandle, PhysicsWorld, RigidBody};
use crate::player::{
    CharacterShape, GroundDetector, GroundState, MovementOutcome, MovementSolver, RenderTransform,
    sync_transforms,
};
use crate::scene::{Scene, SceneNode};

/// A finished (or failed) asset load.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// Static scenery: rendered, ray-cast for ground, and turned into colliders.
    StaticAsset {
        root: SceneNode,
        recipe: ColliderRecipe,
    },
    /// Rendered and ray-cast for ground, no colliders.
    Scenery { root: SceneNode },
    /// The character model is ready; create its body. `None` spawns at the
    /// configured position.
    Character { spawn: Option<Vec3> },
    /// Loading failed. Logged; whatever the asset would have provided is absent.
    Failed { asset: String, reason: String },
}

/// Everything the per-frame components read and write.
#[derive(Debug, Clone)]
pub struct ControllerState {
    pub input: InputState,
    pub tuning: MovementTuning,
    /// Last ground check result
    pub ground: GroundState,
    pub camera: FpsCamera,
    /// Character body, once spawned
    pub character: Option<BodyHandle>,
    /// Character pose for the renderer, once spawned
    pub render: Option<RenderTransform>,
}

impl ControllerState {
    fn from_config(config: &ControllerConfig) -> Self {
        let mut camera = FpsCamera::with_position(config.camera.position);
        camera.sensitivity = config.camera.sensitivity;
        camera.set_orientation(config.camera.yaw, config.camera.pitch);
        Self {
            input: InputState::new(),
            tuning: config.movement_tuning(),
            ground: GroundState::AIRBORNE,
            camera,
            character: None,
            render: None,
        }
    }
}

/// What a renderer needs after one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Character pose, `None` until the character has loaded
    pub character: Option<RenderTransform>,
    pub camera_position: Vec3,
    pub ground: GroundState,
    /// Solver result, `None` until the character has loaded
    pub movement: Option<MovementOutcome>,
    /// Physics steps taken this frame
    pub physics_steps: u32,
}

/// Per-frame loop for a single controlled character.
pub struct FrameDriver {
    config: ControllerConfig,
    shape: CharacterShape,
    world: PhysicsWorld,
    scene: Scene,
    state: ControllerState,
    bindings: KeyBindings,
    solver: MovementSolver,
    loads_tx: Sender<LoadEvent>,
    loads_rx: Receiver<LoadEvent>,
    accumulator: f32,
    frame_count: u64,
}

impl FrameDriver {
    /// Validate `config` and build an empty world.
    pub fn new(config: ControllerConfig) -> ControllerResult<Self> {
        let shape = CharacterShape::new(config.character.height, config.character.width)?;
        let mass = config.character.mass;
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ControllerError::InvalidMass(mass));
        }

        let (loads_tx, loads_rx) = mpsc::channel();
        log::info!(
            "frame driver ready: character {}x{}, step {:.4}s ({:?})",
            shape.height(),
            shape.width(),
            config.world.fixed_step,
            config.world.step_mode
        );

        Ok(Self {
            world: PhysicsWorld::new(config.world.gravity),
            scene: Scene::new(),
            state: ControllerState::from_config(&config),
            bindings: KeyBindings::default(),
            solver: MovementSolver::new(GroundDetector::from_config(&config.ground)),
            shape,
            config,
            loads_tx,
            loads_rx,
            accumulator: 0.0,
            frame_count: 0,
        })
    }

    /// Channel end for loaders. Clone freely; send from any thread.
    pub fn sender(&self) -> Sender<LoadEvent> {
        self.loads_tx.clone()
    }

    /// Queue a load from the driver's own thread.
    pub fn submit(&self, event: LoadEvent) {
        // The receiver lives in `self`, so this cannot fail.
        let _ = self.loads_tx.send(event);
    }

    /// True once the character body exists.
    pub fn is_ready(&self) -> bool {
        self.state.character.is_some()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn character_shape(&self) -> &CharacterShape {
        &self.shape
    }

    pub fn character_body(&self) -> Option<&RigidBody> {
        self.state.character.and_then(|h| self.world.get(h))
    }

    pub fn character_body_mut(&mut self) -> Option<&mut RigidBody> {
        self.state.character.and_then(|h| self.world.get_mut(h))
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    pub fn camera_mut(&mut self) -> &mut FpsCamera {
        &mut self.state.camera
    }

    /// Raw key edge. Returns `true` if the key is bound.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        self.bindings.handle_key(&mut self.state.input, key, pressed)
    }

    /// Release all held intents (focus lost).
    pub fn release_all(&mut self) {
        self.state.input.reset();
    }

    /// UI slider positions; takes effect next frame.
    pub fn set_sliders(&mut self, speed: f32, jump: f32) {
        self.state.tuning = MovementTuning::from_sliders(speed, jump);
    }

    pub fn set_tuning(&mut self, tuning: MovementTuning) {
        self.state.tuning = tuning;
    }

    /// Pointer-locked mouse motion in pixels.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.state.camera.apply_mouse_delta(dx, dy);
    }

    /// Run one frame. `dt` is the real elapsed time since the last frame. It
    /// scales horizontal movement in every mode; physics consumes it only in
    /// [`StepMode::FixedAccumulator`]. Negative or non-finite values count as 0.
    pub fn frame(&mut self, dt: f32) -> FrameOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.frame_count += 1;
        self.drain_loads();

        let physics_steps = self.step_physics(dt);

        let mut movement = None;
        if let Some(handle) = self.state.character
            && let Some(body) = self.world.get_mut(handle)
        {
            let outcome = self.solver.solve(
                body,
                &self.state.input,
                &self.state.camera.frame(),
                &self.state.tuning,
                dt,
                &self.scene,
            );
            if outcome.ground.grounded != self.state.ground.grounded {
                log::debug!(
                    "frame {}: {:?} (clearance {:?})",
                    self.frame_count,
                    outcome.ground.phase(),
                    outcome.ground.clearance
                );
            }
            if outcome.jumped {
                log::debug!("frame {}: jump", self.frame_count);
            }
            self.state.ground = outcome.ground;

            let (render, eye) = sync_transforms(body, self.config.character.eye_offset);
            self.state.render = Some(render);
            self.state.camera.position = eye;
            movement = Some(outcome);
        }

        FrameOutput {
            character: self.state.render,
            camera_position: self.state.camera.position,
            ground: self.state.ground,
            movement,
            physics_steps,
        }
    }

    fn step_physics(&mut self, dt: f32) -> u32 {
        let fixed_step = self.config.world.fixed_step;
        match self.config.world.step_mode {
            StepMode::PerFrame => {
                self.world.step(fixed_step);
                1
            }
            StepMode::FixedAccumulator => {
                if fixed_step <= 0.0 || !fixed_step.is_finite() {
                    return 0;
                }
                self.accumulator += dt;
                let mut steps = 0;
                while self.accumulator >= fixed_step && steps < self.config.world.max_substeps {
                    self.world.step(fixed_step);
                    self.accumulator -= fixed_step;
                    steps += 1;
                }
                if steps == self.config.world.max_substeps && self.accumulator >= fixed_step {
                    log::trace!("frame {}: dropping {:.4}s of backlog", self.frame_count, self.accumulator);
                    self.accumulator %= fixed_step;
                }
                steps
            }
        }
    }

    fn drain_loads(&mut self) {
        while let Ok(event) = self.loads_rx.try_recv() {
            self.apply_load(event);
        }
    }

    fn apply_load(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::StaticAsset { root, recipe } => {
                let colliders = build_static_colliders(&root, recipe);
                let count = colliders.len();
                for collider in colliders {
                    self.world.insert(collider.into_body());
                }
                log::info!("loaded '{}' with {} collider(s) ({:?})", root.name, count, recipe);
                self.scene.add(root);
            }
            LoadEvent::Scenery { root } => {
                log::info!("loaded scenery '{}'", root.name);
                self.scene.add(root);
            }
            LoadEvent::Character { spawn } => self.spawn_character(spawn),
            LoadEvent::Failed { asset, reason } => {
                log::warn!("failed to load '{asset}': {reason}; collider absent");
            }
        }
    }

    fn spawn_character(&mut self, spawn: Option<Vec3>) {
        if self.state.character.is_some() {
            log::warn!("character already spawned; ignoring duplicate load");
            return;
        }
        let position = spawn.unwrap_or(self.config.character.spawn_position);
        let body = match self.shape.build_body(self.config.character.mass, position) {
            Ok(body) => body,
            Err(err) => {
                log::warn!("character absent: {err}");
                return;
            }
        };
        let (render, eye) = sync_transforms(&body, self.config.character.eye_offset);
        let handle = self.world.insert(body);
        self.state.character = Some(handle);
        self.state.render = Some(render);
        self.state.camera.position = eye;
        log::info!("character spawned at {position:?} as {handle:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MeshGeometry;

    fn ground() -> SceneNode {
        let slab = MeshGeometry::cuboid(Vec3::new(50.0, 0.5, 50.0));
        SceneNode::group("map").with_child(SceneNode::mesh("ground", slab))
    }

    #[test]
    fn test_rejects_invalid_character() {
        let mut config = ControllerConfig::default();
        config.character.width = 5.0;
        assert!(matches!(
            FrameDriver::new(config),
            Err(ControllerError::InvalidCharacterDimensions { .. })
        ));

        let mut config = ControllerConfig::default();
        config.character.mass = 0.0;
        assert!(matches!(FrameDriver::new(config), Err(ControllerError::InvalidMass(_))));
    }

    #[test]
    fn test_frames_run_before_loads() {
        let mut driver = FrameDriver::new(ControllerConfig::default()).unwrap();
        let output = driver.frame(1.0 / 60.0);
        assert!(!driver.is_ready());
        assert_eq!(output.character, None);
        assert_eq!(output.movement, None);
        assert_eq!(output.camera_position, Vec3::new(0.0, 10.0, 10.0));
        assert_eq!(output.physics_steps, 1);
    }

    #[test]
    fn test_loads_apply_at_frame_start() {
        let mut driver = FrameDriver::new(ControllerConfig::default()).unwrap();
        driver.submit(LoadEvent::StaticAsset {
            root: ground(),
            recipe: ColliderRecipe::BoundingBox,
        });
        driver.submit(LoadEvent::Character { spawn: None });
        assert!(!driver.is_ready());
        assert!(driver.world().is_empty());

        let output = driver.frame(1.0 / 60.0);
        assert!(driver.is_ready());
        assert_eq!(driver.world().fixed_count(), 1);
        assert_eq!(driver.scene().roots().len(), 1);
        let render = output.character.unwrap();
        assert!(render.position.y < 7.0);
        assert!((output.camera_position.y - (render.position.y + 1.5)).abs() < 1e-5);
    }

    #[test]
    fn test_duplicate_character_is_ignored() {
        let mut driver = FrameDriver::new(ControllerConfig::default()).unwrap();
        driver.submit(LoadEvent::Character { spawn: None });
        driver.submit(LoadEvent::Character {
            spawn: Some(Vec3::new(9.0, 9.0, 9.0)),
        });
        driver.frame(1.0 / 60.0);
        assert_eq!(driver.world().len(), 1);
    }

    #[test]
    fn test_failed_load_is_not_fatal() {
        let mut driver = FrameDriver::new(ControllerConfig::default()).unwrap();
        driver.submit(LoadEvent::Failed {
            asset: "house.glb".into(),
            reason: "404".into(),
        });
        driver.frame(1.0 / 60.0);
        assert!(driver.world().is_empty());
    }

    #[test]
    fn test_accumulator_caps_substeps() {
        let mut config = ControllerConfig::default();
        config.world.step_mode = StepMode::FixedAccumulator;
        config.world.max_substeps = 3;
        let mut driver = FrameDriver::new(config).unwrap();

        assert_eq!(driver.frame(0.5 / 60.0).physics_steps, 0);
        assert_eq!(driver.frame(0.6 / 60.0).physics_steps, 1);
        assert_eq!(driver.frame(1.0).physics_steps, 3);
        assert_eq!(driver.frame(0.0).physics_steps, 0);
    }

    #[test]
    fn test_movement_uses_frame_time() {
        let mut driver = FrameDriver::new(ControllerConfig::default()).unwrap();
        driver.set_tuning(MovementTuning::new(5.0, 0.0));
        driver.submit(LoadEvent::Character { spawn: None });
        driver.handle_key(KeyCode::W, true);

        driver.frame(1.0 / 30.0);
        let vz = driver.character_body().unwrap().velocity.z;
        assert!((vz + 5.0 / 30.0).abs() < 1e-5, "vz = {vz}");

        driver.frame(f32::NAN);
        assert_eq!(driver.character_body().unwrap().velocity.z, 0.0);
    }

    #[test]
    fn test_sliders_and_keys_reach_state() {
        let mut driver = FrameDriver::new(ControllerConfig::default()).unwrap();
        driver.set_sliders(0.05, 2.0);
        assert!(driver.handle_key(KeyCode::W, true));
        assert!(!driver.handle_key(KeyCode::Escape, true));
        assert!(driver.state().input.forward);
        assert!((driver.state().tuning.move_speed - 5.0).abs() < 1e-5);
        assert_eq!(driver.state().tuning.jump_impulse, 20.0);
        driver.release_all();
        assert!(!driver.state().input.forward);
    }
}
