//! Walkabout - headless controller demo
//!
//! Run with: `cargo run --bin walkabout -- --frames 300 --script "w:60,w+a:30,space:1,none:60"`
//!
//! Builds a small map (ground slab, a house, a few shrubs), loads it from a
//! background thread the way a real asset loader would, spawns the character
//! and drives it with a scripted key sequence. Frame output is logged.
//!
//! Script format: comma-separated `keys:frames` segments. Keys are `w`, `a`,
//! `s`, `d` and `space`, joined with `+`; `none` releases everything.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

use clap::Parser;
use glam::{Quat, Vec3};
use walkabout_engine::debug::collect_debug_shapes;
use walkabout_engine::scene::{MeshGeometry, SceneNode, Transform};
use walkabout_engine::{
    ColliderRecipe, ControllerConfig, ControllerResult, FrameDriver, KeyCode, LoadEvent, logging,
};

/// Drive the character controller without a window
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 240)]
    frames: u32,

    /// Scripted input, e.g. "w:60,w+a:30,space:1,none:60"
    #[arg(short, long, value_parser = parse_script, default_value = "none:30,w:90,space:1,w+d:60,none:60")]
    script: Script,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Held keys for a number of frames.
#[derive(Clone, Debug, PartialEq)]
struct ScriptStep {
    keys: Vec<KeyCode>,
    frames: u32,
}

#[derive(Clone, Debug, PartialEq)]
struct Script(Vec<ScriptStep>);

impl Script {
    /// Keys held on `frame`, or `None` once the script has run out.
    fn keys_at(&self, frame: u32) -> Option<&[KeyCode]> {
        let mut start = 0;
        for step in &self.0 {
            if frame < start + step.frames {
                return Some(&step.keys);
            }
            start += step.frames;
        }
        None
    }
}

fn parse_key(name: &str) -> Result<Option<KeyCode>, String> {
    match name.trim().to_ascii_lowercase().as_str() {
        "w" => Ok(Some(KeyCode::W)),
        "a" => Ok(Some(KeyCode::A)),
        "s" => Ok(Some(KeyCode::S)),
        "d" => Ok(Some(KeyCode::D)),
        "space" | "jump" => Ok(Some(KeyCode::Space)),
        "none" | "" => Ok(None),
        other => Err(format!("unknown key '{other}'")),
    }
}

fn parse_script(text: &str) -> Result<Script, String> {
    let mut steps = Vec::new();
    for segment in text.split(',').filter(|s| !s.trim().is_empty()) {
        let (keys, frames) = segment
            .split_once(':')
            .ok_or_else(|| format!("segment '{segment}' is not keys:frames"))?;
        let frames = frames
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("segment '{segment}': {e}"))?;
        let mut held = Vec::new();
        for name in keys.split('+') {
            if let Some(key) = parse_key(name)? {
                held.push(key);
            }
        }
        steps.push(ScriptStep { keys: held, frames });
    }
    Ok(Script(steps))
}

fn demo_map() -> Vec<LoadEvent> {
    let ground = SceneNode::group("map")
        .with_child(SceneNode::mesh("ground", MeshGeometry::cuboid(Vec3::new(60.0, 0.5, 60.0))))
        .with_transform(Transform::from_translation(Vec3::new(0.0, -0.5, 0.0)));

    let house = SceneNode::group("house").with_transform(Transform::from_translation_rotation(
        Vec3::new(12.0, 2.0, -14.0),
        Quat::from_rotation_y(0.4),
    ));
    let house = house.with_child(SceneNode::mesh("walls", MeshGeometry::cuboid(Vec3::new(4.0, 2.0, 3.0))));

    let mut shrubs = SceneNode::group("shrubs");
    for (i, x) in [-8.0_f32, -4.0, 6.0].into_iter().enumerate() {
        shrubs.add_child(
            SceneNode::mesh(format!("shrub_{i}"), MeshGeometry::cuboid(Vec3::splat(1.0)))
                .with_transform(Transform::from_translation(Vec3::new(x, 1.0, -20.0))),
        );
    }

    vec![
        LoadEvent::StaticAsset {
            root: ground,
            recipe: ColliderRecipe::BoundingBox,
        },
        LoadEvent::StaticAsset {
            root: house,
            recipe: ColliderRecipe::TriangleMesh,
        },
        LoadEvent::StaticAsset {
            root: shrubs,
            recipe: ColliderRecipe::DECORATION,
        },
        LoadEvent::Failed {
            asset: "mountain.glb".to_string(),
            reason: "not bundled with the headless demo".to_string(),
        },
        LoadEvent::Character { spawn: None },
    ]
}

/// Deliver the map from a loader thread; falls back to the caller's thread.
fn start_loading(loads: Sender<LoadEvent>) {
    let worker = loads.clone();
    let spawned = thread::Builder::new()
        .name("asset-loader".to_string())
        .spawn(move || {
            for event in demo_map() {
                if worker.send(event).is_err() {
                    break;
                }
            }
        });
    if let Err(err) = spawned {
        log::warn!("loader thread unavailable ({err}); loading inline");
        for event in demo_map() {
            let _ = loads.send(event);
        }
    }
}

fn main() -> ControllerResult<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => ControllerConfig::from_path(path)?,
        None => ControllerConfig::default(),
    };
    let dt = config.world.fixed_step;
    let mut driver = FrameDriver::new(config)?;
    // Walking speed for a readable log.
    driver.set_sliders(0.05, 1.2);
    start_loading(driver.sender());

    let bound = [KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D, KeyCode::Space];
    for frame in 0..args.frames {
        let held = args.script.keys_at(frame).unwrap_or(&[]);
        for key in bound {
            driver.handle_key(key, held.contains(&key));
        }

        let output = driver.frame(dt);
        if frame % 30 == 0 {
            match output.character {
                Some(character) => log::info!(
                    "frame {frame}: position {:.2?} {:?} camera {:.2?}",
                    character.position,
                    output.ground.phase(),
                    output.camera_position
                ),
                None => log::info!("frame {frame}: waiting for character"),
            }
        }
    }

    for shape in collect_debug_shapes(driver.world()) {
        log::debug!(
            "{:?} {} at {:.2?}{}",
            shape.body,
            shape.shape.kind(),
            shape.position,
            if shape.fixed { "" } else { " (character)" }
        );
    }
    if let Some(body) = driver.character_body() {
        log::info!(
            "finished after {} frames at {:.2?}, velocity {:.2?}",
            driver.frame_count(),
            body.position,
            body.velocity
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = parse_script("w+a:10, none:5,space:1").unwrap();
        assert_eq!(script.0.len(), 3);
        assert_eq!(script.0[0].keys, vec![KeyCode::W, KeyCode::A]);
        assert!(script.0[1].keys.is_empty());
        assert_eq!(script.keys_at(12), Some(&[][..]));
        assert_eq!(script.keys_at(15), Some(&[KeyCode::Space][..]));
        assert_eq!(script.keys_at(16), None);
    }

    #[test]
    fn test_parse_script_errors() {
        assert!(parse_script("w").is_err());
        assert!(parse_script("q:3").is_err());
        assert!(parse_script("w:-1").is_err());
    }

    #[test]
    fn test_demo_map_has_character() {
        let events = demo_map();
        assert!(events.iter().any(|e| matches!(e, LoadEvent::Character { .. })));
    }
}
