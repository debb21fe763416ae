use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Keys any scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ShiftLeft,
    Space,
}

/// Errors from mapping raw key identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unmapped key: {0:?}")]
    Unmapped(String),
}

impl FromStr for Key {
    type Err = InputError;

    /// Accepts DOM `code` values (`"KeyW"`, `"ArrowUp"`, `"ShiftLeft"`,
    /// `"Space"`) and lower-case `key` values (`"w"`, `" "`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "KeyW" | "w" => Key::W,
            "KeyA" | "a" => Key::A,
            "KeyS" | "s" => Key::S,
            "KeyD" | "d" => Key::D,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ShiftLeft" => Key::ShiftLeft,
            "Space" | " " => Key::Space,
            other => return Err(InputError::Unmapped(other.to_string())),
        };
        Ok(key)
    }
}

/// What the player wants to do this frame, independent of the device.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    /// +1 forward, -1 backward.
    pub forward: f32,
    /// +1 right, -1 left.
    pub strafe: f32,
    pub sprint: bool,
    pub jump: bool,
}

impl MoveIntent {
    /// Hold forward, nothing else.
    pub fn forward() -> Self {
        Self {
            forward: 1.0,
            ..Self::default()
        }
    }

    /// Whether any planar movement is requested.
    pub fn is_moving(&self) -> bool {
        self.forward != 0.0 || self.strafe != 0.0
    }
}

/// Set of currently held keys.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: BTreeSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Apply a raw key event. Unknown identifiers are ignored.
    pub fn handle(&mut self, code: &str, pressed: bool) {
        match code.parse::<Key>() {
            Ok(key) if pressed => self.press(key),
            Ok(key) => self.release(key),
            Err(err) => tracing::trace!(%err, "ignoring key event"),
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Collapse held keys into an intent. Opposite keys cancel out.
    pub fn intent(&self) -> MoveIntent {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        let fwd = self.is_held(Key::W) || self.is_held(Key::ArrowUp);
        let back = self.is_held(Key::S) || self.is_held(Key::ArrowDown);
        let right = self.is_held(Key::D) || self.is_held(Key::ArrowRight);
        let left = self.is_held(Key::A) || self.is_held(Key::ArrowLeft);
        MoveIntent {
            forward: axis(fwd, back),
            strafe: axis(right, left),
            sprint: self.is_held(Key::ShiftLeft),
            jump: self.is_held(Key::Space),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_keys() {
        assert_eq!("KeyW".parse::<Key>(), Ok(Key::W));
        assert_eq!("w".parse::<Key>(), Ok(Key::W));
        assert_eq!("ArrowLeft".parse::<Key>(), Ok(Key::ArrowLeft));
        assert_eq!("Space".parse::<Key>(), Ok(Key::Space));
        assert_eq!(
            "KeyQ".parse::<Key>(),
            Err(InputError::Unmapped("KeyQ".into()))
        );
    }

    #[test]
    fn idle_intent_is_default() {
        let keys = KeyState::new();
        assert_eq!(keys.intent(), MoveIntent::default());
        assert!(!keys.intent().is_moving());
    }

    #[test]
    fn wasd_and_arrows_are_equivalent() {
        let mut a = KeyState::new();
        a.press(Key::W);
        a.press(Key::D);
        let mut b = KeyState::new();
        b.press(Key::ArrowUp);
        b.press(Key::ArrowRight);
        assert_eq!(a.intent(), b.intent());
        assert_eq!(a.intent().forward, 1.0);
        assert_eq!(a.intent().strafe, 1.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = KeyState::new();
        keys.press(Key::W);
        keys.press(Key::S);
        keys.press(Key::A);
        let intent = keys.intent();
        assert_eq!(intent.forward, 0.0);
        assert_eq!(intent.strafe, -1.0);
    }

    #[test]
    fn handle_tracks_press_and_release() {
        let mut keys = KeyState::new();
        keys.handle("ShiftLeft", true);
        keys.handle("Space", true);
        keys.handle("KeyZ", true);
        assert!(keys.intent().sprint);
        assert!(keys.intent().jump);

        keys.handle("Space", false);
        assert!(!keys.intent().jump);
        keys.clear();
        assert!(!keys.is_held(Key::ShiftLeft));
    }
}
