//! Key Bindings
//!
//! Maps raw key codes to movement intents. Each intent accepts a primary and
//! an alternate key (WASD plus the arrow keys by default).

use std::collections::HashMap;

use super::keyboard::{InputState, Intent, KeyCode};

/// Key-to-intent table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<KeyCode, Intent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::W, Intent::Forward);
        bindings.bind(KeyCode::ArrowUp, Intent::Forward);
        bindings.bind(KeyCode::S, Intent::Backward);
        bindings.bind(KeyCode::ArrowDown, Intent::Backward);
        bindings.bind(KeyCode::A, Intent::Left);
        bindings.bind(KeyCode::ArrowLeft, Intent::Left);
        bindings.bind(KeyCode::D, Intent::Right);
        bindings.bind(KeyCode::ArrowRight, Intent::Right);
        bindings.bind(KeyCode::Space, Intent::Jump);
        bindings
    }
}

impl KeyBindings {
    /// No keys bound.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind `key` to `intent`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: KeyCode, intent: Intent) {
        self.map.insert(key, intent);
    }

    pub fn intent_for(&self, key: KeyCode) -> Option<Intent> {
        self.map.get(&key).copied()
    }

    /// Apply a raw key edge to `input`.
    ///
    /// Returns `true` if the key was bound (whether or not the flag changed).
    pub fn handle_key(&self, input: &mut InputState, key: KeyCode, pressed: bool) -> bool {
        match self.intent_for(key) {
            Some(intent) => {
                input.set(intent, pressed);
                true
            }
            None => false,
        }
    }
}

impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(code: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as Winit;
        match code {
            Winit::KeyW => KeyCode::W,
            Winit::KeyA => KeyCode::A,
            Winit::KeyS => KeyCode::S,
            Winit::KeyD => KeyCode::D,
            Winit::ArrowUp => KeyCode::ArrowUp,
            Winit::ArrowDown => KeyCode::ArrowDown,
            Winit::ArrowLeft => KeyCode::ArrowLeft,
            Winit::ArrowRight => KeyCode::ArrowRight,
            Winit::Space => KeyCode::Space,
            Winit::Escape => KeyCode::Escape,
            _ => KeyCode::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_both_key_sets() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.intent_for(KeyCode::W), Some(Intent::Forward));
        assert_eq!(bindings.intent_for(KeyCode::ArrowUp), Some(Intent::Forward));
        assert_eq!(bindings.intent_for(KeyCode::ArrowLeft), Some(Intent::Left));
        assert_eq!(bindings.intent_for(KeyCode::Space), Some(Intent::Jump));
        assert_eq!(bindings.intent_for(KeyCode::Escape), None);
    }

    #[test]
    fn test_repeated_key_down_is_idempotent() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        for _ in 0..5 {
            bindings.handle_key(&mut input, KeyCode::D, true);
        }
        assert!(input.right);
        bindings.handle_key(&mut input, KeyCode::D, false);
        assert!(!input.right);
    }

    #[test]
    fn test_alternate_keys_share_a_flag() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        bindings.handle_key(&mut input, KeyCode::W, true);
        bindings.handle_key(&mut input, KeyCode::ArrowUp, false);
        // Last edge wins, regardless of which key produced it.
        assert!(!input.forward);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        assert!(!bindings.handle_key(&mut input, KeyCode::Unknown, true));
        assert_eq!(input, InputState::new());
    }

    #[test]
    fn test_winit_conversion() {
        assert_eq!(KeyCode::from(winit::keyboard::KeyCode::KeyW), KeyCode::W);
        assert_eq!(KeyCode::from(winit::keyboard::KeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(winit::keyboard::KeyCode::KeyZ), KeyCode::Unknown);
    }
}
