//! Input Module
//!
//! Raw key edges in, held movement intents out. Look input (mouse deltas) is
//! handled by [`crate::camera::FpsCamera`].
//!
//! # Example
//!
//! ```rust,ignore
//! use walkabout_engine::input::{InputState, KeyBindings, KeyCode};
//!
//! let bindings = KeyBindings::default();
//! let mut input = InputState::new();
//!
//! bindings.handle_key(&mut input, KeyCode::W, true); // W pressed
//! if input.forward {
//!     // Move forward
//! }
//! ```

pub mod bindings;
pub mod keyboard;

pub use bindings::KeyBindings;
pub use keyboard::{InputState, Intent, KeyCode};
