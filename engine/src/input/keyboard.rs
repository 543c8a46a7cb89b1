//! Keyboard Input Module
//!
//! Key codes and the held-intent state driven by raw key edges.
//! Decoupled from winit; see [`super::bindings`] for the conversion.

/// Generic key codes, independent of the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letter keys
    W,
    A,
    S,
    D,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Space,
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Named movement intents the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

/// Held movement intents.
///
/// Each flag mirrors whether its key is currently down. Setting a flag to the
/// value it already has is a no-op, so auto-repeat key-down events do not
/// toggle anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// W / ArrowUp
    pub forward: bool,
    /// S / ArrowDown
    pub backward: bool,
    /// A / ArrowLeft - strafe left
    pub left: bool,
    /// D / ArrowRight - strafe right
    pub right: bool,
    /// Space
    pub jump: bool,
}

impl InputState {
    /// All intents released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one intent. Returns `true` if the flag actually changed.
    pub fn set(&mut self, intent: Intent, held: bool) -> bool {
        let flag = match intent {
            Intent::Forward => &mut self.forward,
            Intent::Backward => &mut self.backward,
            Intent::Left => &mut self.left,
            Intent::Right => &mut self.right,
            Intent::Jump => &mut self.jump,
        };
        let changed = *flag != held;
        *flag = held;
        changed
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        match intent {
            Intent::Forward => self.forward,
            Intent::Backward => self.backward,
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Jump => self.jump,
        }
    }

    /// Any of the four horizontal intents held.
    pub fn any_movement(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Release everything (e.g. on focus loss).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_changes() {
        let mut input = InputState::new();
        assert!(input.set(Intent::Forward, true));
        assert!(input.forward);
        assert!(!input.set(Intent::Forward, true));
        assert!(input.set(Intent::Forward, false));
        assert!(!input.forward);
    }

    #[test]
    fn test_any_movement_ignores_jump() {
        let mut input = InputState::new();
        input.set(Intent::Jump, true);
        assert!(!input.any_movement());
        input.set(Intent::Left, true);
        assert!(input.any_movement());
    }

    #[test]
    fn test_reset() {
        let mut input = InputState {
            forward: true,
            jump: true,
            ..Default::default()
        };
        input.reset();
        assert_eq!(input, InputState::new());
    }
}
