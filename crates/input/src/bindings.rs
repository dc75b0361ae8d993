use std::collections::{BTreeMap, BTreeSet};

use crate::{Action, Key};

/// Key to action table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: BTreeMap<Key, Action>,
}

impl Default for KeyBindings {
    /// WASD to walk, space to jump, right mouse to look around, F1 for
    /// the HUD and escape to quit.
    fn default() -> Self {
        let map = [
            (Key::W, Action::MoveForward),
            (Key::S, Action::MoveBack),
            (Key::A, Action::MoveLeft),
            (Key::D, Action::MoveRight),
            (Key::Space, Action::Jump),
            (Key::Escape, Action::Quit),
            (Key::F1, Action::ToggleHud),
            (Key::MouseLook, Action::Look),
        ]
        .into_iter()
        .collect();
        Self { map }
    }
}

impl KeyBindings {
    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.map.get(&key).copied()
    }

    pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
        self.map.insert(key, action)
    }
}

/// Pressed-state tracker.
///
/// Holding a key keeps its action in [`HeldActions::is_held`]; a fresh press
/// of a one-shot action is queued until [`HeldActions::take_pressed`].
#[derive(Debug, Default)]
pub struct HeldActions {
    held: BTreeSet<Action>,
    pressed: Vec<Action>,
}

impl HeldActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, bindings: &KeyBindings, key: Key, pressed: bool) {
        let Some(action) = bindings.action_for(key) else {
            return;
        };
        if pressed {
            // Key repeat re-sends presses; only the first one counts.
            if self.held.insert(action) && !action.is_continuous() {
                self.pressed.push(action);
            }
        } else {
            self.held.remove(&action);
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Drain one-shot presses since the last call.
    pub fn take_pressed(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pressed)
    }

    /// Forget all held keys, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let b = KeyBindings::default();
        assert_eq!(b.action_for(Key::W), Some(Action::MoveForward));
        assert_eq!(b.action_for(Key::Space), Some(Action::Jump));
        assert_eq!(b.action_for(Key::Escape), Some(Action::Quit));
        assert_eq!(b.action_for(Key::MouseLook), Some(Action::Look));
    }

    #[test]
    fn held_until_released() {
        let b = KeyBindings::default();
        let mut held = HeldActions::new();
        held.handle(&b, Key::W, true);
        assert!(held.is_held(Action::MoveForward));
        held.handle(&b, Key::W, false);
        assert!(!held.is_held(Action::MoveForward));
    }

    #[test]
    fn one_shot_fires_once_per_press() {
        let b = KeyBindings::default();
        let mut held = HeldActions::new();
        held.handle(&b, Key::F1, true);
        held.handle(&b, Key::F1, true); // repeat
        assert_eq!(held.take_pressed(), vec![Action::ToggleHud]);
        assert!(held.take_pressed().is_empty());

        held.handle(&b, Key::F1, false);
        held.handle(&b, Key::F1, true);
        assert_eq!(held.take_pressed(), vec![Action::ToggleHud]);
    }

    #[test]
    fn movement_is_not_queued() {
        let b = KeyBindings::default();
        let mut held = HeldActions::new();
        held.handle(&b, Key::D, true);
        assert!(held.take_pressed().is_empty());
    }

    #[test]
    fn rebinding_replaces_action() {
        let mut b = KeyBindings::default();
        assert_eq!(b.bind(Key::Space, Action::Quit), Some(Action::Jump));
        let mut held = HeldActions::new();
        held.handle(&b, Key::Space, true);
        assert_eq!(held.take_pressed(), vec![Action::Quit]);
    }
}
