// Fcitx-kbd Key Actions
// Discrete actions produced by keyboard layouts and consumed by dispatch

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::key::{text_to_scancode, KeySym, KeyStates};

/// Where an action originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// A key of the keyboard layout itself
    Keyboard,
    /// A popup preview or popup keyboard opened from a key
    Popup,
}

/// Windows a key can attach to the input view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    Clipboard,
    Emoji,
    Symbol,
}

/// Pages of the picker window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickerKind {
    Emoji,
    Emoticon,
    Symbol,
}

/// Swipe gesture reported by the selection-delete key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeEvent {
    Down,
    Up,
    Left,
    Right,
}

/// An action a key produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    /// Literal key press handed to the engine.
    ///
    /// `default == false` opts the key out of caps casing (e.g. swipe
    /// variants that are always uppercase).
    Fcitx {
        text: String,
        code: u16,
        states: KeyStates,
        default: bool,
    },
    /// Host editor context-menu command (select all, copy, ...)
    ContextMenu(i32),
    /// Android key code sent with a modifier combination
    CombinationKey {
        key_code: i32,
        alt: bool,
        ctrl: bool,
        shift: bool,
    },
    AttachWindow(WindowKind),
    Sym { sym: KeySym, states: KeyStates },
    Commit(String),
    /// Caps key: `lock == false` for a press, `true` for a double tap
    Caps { lock: bool },
    QuickPhrase,
    Unicode,
    LangSwitch,
    ShowInputMethodPicker,
    LayoutSwitch(String),
    MoveSelection { start: i32, end: i32 },
    DeleteSelection { total: i32 },
    DeleteSelectionAndSwipe(SwipeEvent),
    PickerSwitch(Option<PickerKind>),
    SpaceLongPress,
}

impl KeyAction {
    /// Literal key press with default casing and virtual key states.
    pub fn fcitx(text: impl Into<String>) -> Self {
        let text = text.into();
        KeyAction::Fcitx {
            code: text_to_scancode(&text),
            text,
            states: KeyStates::virtual_key(),
            default: true,
        }
    }

    /// Literal key press that keeps its casing regardless of caps state.
    pub fn fcitx_fixed(text: impl Into<String>) -> Self {
        match Self::fcitx(text) {
            KeyAction::Fcitx {
                text, code, states, ..
            } => KeyAction::Fcitx {
                text,
                code,
                states,
                default: false,
            },
            other => other,
        }
    }

    pub fn sym(sym: KeySym) -> Self {
        KeyAction::Sym {
            sym,
            states: KeyStates::virtual_key(),
        }
    }

    pub fn sym_with(sym: KeySym, states: KeyStates) -> Self {
        KeyAction::Sym { sym, states }
    }

    /// Literal text of a `Fcitx` action
    pub fn literal(&self) -> Option<&str> {
        match self {
            KeyAction::Fcitx { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_caps(&self) -> bool {
        matches!(self, KeyAction::Caps { .. })
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAction::Fcitx { text, states, .. } => {
                write!(f, "key '{}' [{:#x}]", text, states.bits())
            }
            KeyAction::ContextMenu(id) => write!(f, "context-menu {}", id),
            KeyAction::CombinationKey {
                key_code,
                alt,
                ctrl,
                shift,
            } => {
                write!(f, "combination ")?;
                if *ctrl {
                    write!(f, "Ctrl+")?;
                }
                if *alt {
                    write!(f, "Alt+")?;
                }
                if *shift {
                    write!(f, "Shift+")?;
                }
                write!(f, "{}", key_code)
            }
            KeyAction::AttachWindow(w) => write!(f, "attach {:?}", w),
            KeyAction::Sym { sym, states } => write!(f, "sym {} [{:#x}]", sym, states.bits()),
            KeyAction::Commit(text) => write!(f, "commit '{}'", text),
            KeyAction::Caps { lock } => write!(f, "caps (lock={})", lock),
            KeyAction::QuickPhrase => write!(f, "quickphrase"),
            KeyAction::Unicode => write!(f, "unicode"),
            KeyAction::LangSwitch => write!(f, "lang-switch"),
            KeyAction::ShowInputMethodPicker => write!(f, "im-picker"),
            KeyAction::LayoutSwitch(to) => write!(f, "layout-switch '{}'", to),
            KeyAction::MoveSelection { start, end } => write!(f, "move-selection {}..{}", start, end),
            KeyAction::DeleteSelection { total } => write!(f, "delete-selection {}", total),
            KeyAction::DeleteSelectionAndSwipe(e) => write!(f, "delete-selection-swipe {:?}", e),
            KeyAction::PickerSwitch(Some(k)) => write!(f, "picker {:?}", k),
            KeyAction::PickerSwitch(None) => write!(f, "picker"),
            KeyAction::SpaceLongPress => write!(f, "space-long-press"),
        }
    }
}
