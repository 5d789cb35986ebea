// Fcitx-kbd Caps State
// Shift / caps-lock behavior of the on-screen text keyboard

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caps state of the text keyboard, independent of the engine's own modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapsState {
    /// Letters are lowercased
    #[default]
    None,
    /// Next letter is uppercased, then back to `None`
    Once,
    /// Letters are uppercased until unlocked
    Lock,
}

impl CapsState {
    /// State after a caps action.
    ///
    /// A press (`lock == false`) toggles `None`/`Once` and releases a lock.
    /// A double tap (`lock == true`) toggles the lock.
    pub fn toggled(self, lock: bool) -> Self {
        if lock {
            match self {
                CapsState::Lock => CapsState::None,
                _ => CapsState::Lock,
            }
        } else {
            match self {
                CapsState::None => CapsState::Once,
                _ => CapsState::None,
            }
        }
    }

    /// Returns true if letters are currently uppercased
    pub fn is_upper(self) -> bool {
        !matches!(self, CapsState::None)
    }

    /// Apply this state's casing to a letter label
    pub fn apply(self, text: &str) -> String {
        if self.is_upper() {
            text.to_uppercase()
        } else {
            text.to_lowercase()
        }
    }
}

impl fmt::Display for CapsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapsState::None => write!(f, "none"),
            CapsState::Once => write!(f, "once"),
            CapsState::Lock => write!(f, "lock"),
        }
    }
}
