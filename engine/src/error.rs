//! Error types
//!
//! Construction-time failures for the controller. Nothing in the per-frame
//! path returns an error: missing pieces degrade to "absent" and are logged.

use std::path::PathBuf;

use thiserror::Error;

use crate::physics::BodyHandle;

/// Errors raised while building the world, the character or the configuration.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Character height/width violate `0 < width < height`.
    #[error("invalid character dimensions: height {height}, width {width} (need 0 < width < height)")]
    InvalidCharacterDimensions { height: f32, width: f32 },

    /// A dynamic body was requested with a non-positive or non-finite mass.
    #[error("dynamic body mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    /// A handle did not refer to a body in this world.
    #[error("no body registered for {0:?}")]
    UnknownBody(BodyHandle),

    /// Reading a configuration file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration JSON did not parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type ControllerResult<T> = Result<T, ControllerError>;
