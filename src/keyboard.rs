use std::collections::HashMap;

use crate::input::{Key, Modifiers};

/// Tracks which keys are currently held and which have been freshly pressed
/// since the consumer last drained them.
///
/// Both maps remember the modifier state captured at press time. The fresh
/// set is cleared explicitly via [`clear_has_been_pressed`](Self::clear_has_been_pressed),
/// normally once per tick after the controller has acted on it.
#[derive(Debug, Clone, Default)]
pub struct KeyboardMonitor {
    held: HashMap<Key, Modifiers>,
    fresh: HashMap<Key, Modifiers>,
    modifiers: Modifiers,
}

impl KeyboardMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        self.modifiers = modifiers;
        if self.held.insert(key, modifiers).is_none() {
            // auto-repeat keeps a key "fresh" only on the first press
            self.fresh.insert(key, modifiers);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    /// Modifier state captured when `key` went down, if it is still held.
    pub fn pressed_modifiers(&self, key: Key) -> Option<Modifiers> {
        self.held.get(&key).copied()
    }

    /// Held with exactly the given modifier state.
    pub fn is_pressed_with(&self, key: Key, modifiers: Modifiers) -> bool {
        self.held.get(&key) == Some(&modifiers)
    }

    pub fn has_been_pressed(&self, key: Key) -> bool {
        self.fresh.contains_key(&key)
    }

    /// Freshly pressed with exactly the given modifier state.
    pub fn has_been_pressed_with(&self, key: Key, modifiers: Modifiers) -> bool {
        self.fresh.get(&key) == Some(&modifiers)
    }

    pub fn clear_has_been_pressed(&mut self) {
        self.fresh.clear();
    }

    pub fn is_any_pressed(&self) -> bool {
        !self.held.is_empty()
    }

    /// Modifier state of the most recent key event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Forget everything; call on focus loss, where key-up events are lost.
    pub fn reset(&mut self) {
        self.held.clear();
        self.fresh.clear();
        self.modifiers = Modifiers::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut kb = KeyboardMonitor::new();
        assert!(!kb.is_pressed(Key::W));

        kb.key_down(Key::W, Modifiers::NONE);
        assert!(kb.is_pressed(Key::W));
        assert!(kb.has_been_pressed(Key::W));

        kb.key_up(Key::W);
        assert!(!kb.is_pressed(Key::W));
        // fresh state survives release until explicitly drained
        assert!(kb.has_been_pressed(Key::W));
    }

    #[test]
    fn fresh_set_drains_explicitly() {
        let mut kb = KeyboardMonitor::new();
        kb.key_down(Key::Digit1, Modifiers::CTRL);
        assert!(kb.has_been_pressed_with(Key::Digit1, Modifiers::CTRL));

        kb.clear_has_been_pressed();
        assert!(!kb.has_been_pressed(Key::Digit1));
        // still held, just no longer fresh
        assert!(kb.is_pressed(Key::Digit1));
    }

    #[test]
    fn auto_repeat_is_not_fresh_again() {
        let mut kb = KeyboardMonitor::new();
        kb.key_down(Key::A, Modifiers::NONE);
        kb.clear_has_been_pressed();

        // OS auto-repeat delivers another down without an up
        kb.key_down(Key::A, Modifiers::NONE);
        assert!(!kb.has_been_pressed(Key::A));
    }

    #[test]
    fn modifiers_tracked_per_press() {
        let mut kb = KeyboardMonitor::new();
        kb.key_down(Key::Digit2, Modifiers::CTRL);
        kb.key_down(Key::W, Modifiers::NONE);

        assert_eq!(kb.pressed_modifiers(Key::Digit2), Some(Modifiers::CTRL));
        assert!(kb.is_pressed_with(Key::Digit2, Modifiers::CTRL));
        assert!(!kb.is_pressed_with(Key::W, Modifiers::CTRL));
        // latest event wins for the live modifier state
        assert_eq!(kb.modifiers(), Modifiers::NONE);
    }

    #[test]
    fn reset_clears_everything() {
        let mut kb = KeyboardMonitor::new();
        kb.key_down(Key::W, Modifiers::SHIFT);
        kb.reset();

        assert!(!kb.is_any_pressed());
        assert!(!kb.has_been_pressed(Key::W));
        assert_eq!(kb.modifiers(), Modifiers::NONE);
    }
}
