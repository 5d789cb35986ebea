// Fcitx-kbd Layout Definitions
// Key definitions of the text keyboard and gesture-to-action resolution

use serde::{Deserialize, Serialize};

use crate::action::{KeyAction, WindowKind};
use crate::key::{KeyStates, KeySym};

/// Android `R.id` values of the host editor's context-menu commands.
pub mod context_menu {
    pub const SELECT_ALL: i32 = 0x0102_001f;
    pub const CUT: i32 = 0x0102_0020;
    pub const COPY: i32 = 0x0102_0021;
    pub const PASTE: i32 = 0x0102_0022;
}

/// Android `KEYCODE_Z`
const KEYCODE_Z: i32 = 54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    Up,
    Down,
}

/// Touch gesture performed on a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    Press,
    LongPress,
    DoubleTap,
    Repeat,
    /// Generic swipe (alternate character)
    Swipe,
    SwipeUp,
    SwipeDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Behavior {
    Press(KeyAction),
    LongPress(KeyAction),
    DoubleTap(KeyAction),
    Repeat(KeyAction),
    Swipe(KeyAction),
    SwipeCustomize(KeyAction, SwipeDirection),
}

impl Behavior {
    fn matches(&self, gesture: Gesture) -> bool {
        matches!(
            (self, gesture),
            (Behavior::Press(_), Gesture::Press)
                | (Behavior::LongPress(_), Gesture::LongPress)
                | (Behavior::DoubleTap(_), Gesture::DoubleTap)
                | (Behavior::Repeat(_), Gesture::Repeat)
                | (Behavior::Swipe(_), Gesture::Swipe)
                | (Behavior::SwipeCustomize(_, SwipeDirection::Up), Gesture::SwipeUp)
                | (Behavior::SwipeCustomize(_, SwipeDirection::Down), Gesture::SwipeDown)
        )
    }

    pub fn action(&self) -> &KeyAction {
        match self {
            Behavior::Press(a)
            | Behavior::LongPress(a)
            | Behavior::DoubleTap(a)
            | Behavior::Repeat(a)
            | Behavior::Swipe(a)
            | Behavior::SwipeCustomize(a, _) => a,
        }
    }
}

/// What a key is, for keys the keyboard treats specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyRole {
    Character,
    Caps,
    Backspace,
    Return,
    Space,
    Language,
    LayoutSwitch,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Appearance {
    Text(String),
    /// Main label with a smaller alternate label
    AltText { display: String, alt: String },
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyDef {
    pub role: KeyRole,
    pub appearance: Appearance,
    pub behaviors: Vec<Behavior>,
}

impl KeyDef {
    pub fn new(role: KeyRole, appearance: Appearance, behaviors: Vec<Behavior>) -> Self {
        Self {
            role,
            appearance,
            behaviors,
        }
    }

    /// Action bound to `gesture`, if this key reacts to it
    pub fn action_for(&self, gesture: Gesture) -> Option<&KeyAction> {
        self.behaviors
            .iter()
            .find(|b| b.matches(gesture))
            .map(Behavior::action)
    }

    /// Main label, if the key shows text
    pub fn display_text(&self) -> Option<&str> {
        match &self.appearance {
            Appearance::Text(t) => Some(t),
            Appearance::AltText { display, .. } => Some(display),
            Appearance::Image => None,
        }
    }

    pub fn alt_text(&self) -> Option<&str> {
        match &self.appearance {
            Appearance::AltText { alt, .. } => Some(alt),
            _ => None,
        }
    }
}

/// Position of a key in a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyPos {
    pub row: usize,
    pub col: usize,
}

/// Label a key view should currently show
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyLabel {
    pub pos: KeyPos,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Vec<KeyDef>>,
}

impl Layout {
    pub fn new(rows: Vec<Vec<KeyDef>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<KeyDef>] {
        &self.rows
    }

    pub fn get(&self, pos: KeyPos) -> Option<&KeyDef> {
        self.rows.get(pos.row).and_then(|r| r.get(pos.col))
    }

    /// Iterate over all keys with their positions
    pub fn keys(&self) -> impl Iterator<Item = (KeyPos, &KeyDef)> {
        self.rows.iter().enumerate().flat_map(|(row, keys)| {
            keys.iter()
                .enumerate()
                .map(move |(col, key)| (KeyPos { row, col }, key))
        })
    }

    /// First key whose main label equals `label` (case-insensitive for letters)
    pub fn find_label(&self, label: &str) -> Option<(KeyPos, &KeyDef)> {
        self.keys()
            .find(|(_, k)| k.display_text().is_some_and(|t| t.eq_ignore_ascii_case(label)))
    }

    pub fn find_role(&self, role: KeyRole) -> Option<(KeyPos, &KeyDef)> {
        self.keys().find(|(_, k)| k.role == role)
    }
}

/// Labels and actions of the long-press context shortcuts shown as alt text
/// on the lower letter rows.
pub fn context_shortcuts() -> Vec<(&'static str, KeyAction)> {
    vec![
        ("全选", KeyAction::ContextMenu(context_menu::SELECT_ALL)),
        ("剪切", KeyAction::ContextMenu(context_menu::CUT)),
        ("复制", KeyAction::ContextMenu(context_menu::COPY)),
        ("粘贴", KeyAction::ContextMenu(context_menu::PASTE)),
        ("剪贴", KeyAction::AttachWindow(WindowKind::Clipboard)),
        ("翻转", KeyAction::sym_with(KeySym::RETURN, KeyStates::SHIFT)),
        ("大写", KeyAction::sym_with(KeySym::RETURN, KeyStates::CTRL)),
        (
            "↶",
            KeyAction::CombinationKey {
                key_code: KEYCODE_Z,
                alt: false,
                ctrl: true,
                shift: false,
            },
        ),
        (
            "↷",
            KeyAction::CombinationKey {
                key_code: KEYCODE_Z,
                alt: false,
                ctrl: true,
                shift: true,
            },
        ),
        ("⇐", KeyAction::sym_with(KeySym::LOWER_L, KeyStates::CTRL)),
    ]
}

/// Action of a context shortcut label
pub fn context_action(label: &str) -> Option<KeyAction> {
    context_shortcuts()
        .into_iter()
        .find(|(l, _)| *l == label)
        .map(|(_, a)| a)
}

/// Letter key: press types the letter, swipe types its uppercase form.
pub fn alphabet_key(character: &str, alt: &str) -> KeyDef {
    KeyDef::new(
        KeyRole::Character,
        Appearance::AltText {
            display: character.to_string(),
            alt: alt.to_string(),
        },
        vec![
            Behavior::Press(KeyAction::fcitx(character)),
            Behavior::Swipe(KeyAction::fcitx_fixed(character.to_uppercase())),
        ],
    )
}

/// Key typing `character` on press and `alt` on swipe.
pub fn alt_key(character: &str, alt: &str) -> KeyDef {
    KeyDef::new(
        KeyRole::Character,
        Appearance::AltText {
            display: character.to_string(),
            alt: alt.to_string(),
        },
        vec![
            Behavior::Press(KeyAction::fcitx(character)),
            Behavior::Swipe(KeyAction::fcitx(alt)),
        ],
    )
}

fn digit_key(digit: u8, alt: &str) -> KeyDef {
    let sym = KeySym::digit(digit).unwrap_or(KeySym(0x30));
    KeyDef::new(
        KeyRole::Character,
        Appearance::AltText {
            display: digit.to_string(),
            alt: alt.to_string(),
        },
        vec![
            Behavior::Press(KeyAction::sym_with(sym, KeyStates::empty())),
            Behavior::Swipe(KeyAction::fcitx_fixed(alt.to_uppercase())),
        ],
    )
}

pub fn caps_key() -> KeyDef {
    KeyDef::new(
        KeyRole::Caps,
        Appearance::Image,
        vec![
            Behavior::SwipeCustomize(
                KeyAction::sym_with(KeySym::TAB, KeyStates::SHIFT),
                SwipeDirection::Up,
            ),
            Behavior::SwipeCustomize(
                KeyAction::sym_with(KeySym::PAGE_DOWN, KeyStates::empty()),
                SwipeDirection::Down,
            ),
            Behavior::Press(KeyAction::Caps { lock: false }),
            Behavior::LongPress(KeyAction::LangSwitch),
            Behavior::DoubleTap(KeyAction::Caps { lock: true }),
        ],
    )
}

pub fn backspace_key() -> KeyDef {
    KeyDef::new(
        KeyRole::Backspace,
        Appearance::Image,
        vec![
            Behavior::Press(KeyAction::sym(KeySym::BACKSPACE)),
            Behavior::Repeat(KeyAction::sym(KeySym::BACKSPACE)),
        ],
    )
}

pub fn space_key() -> KeyDef {
    KeyDef::new(
        KeyRole::Space,
        Appearance::Text(" ".to_string()),
        vec![
            Behavior::Press(KeyAction::sym(KeySym::SPACE)),
            Behavior::LongPress(KeyAction::SpaceLongPress),
        ],
    )
}

pub fn return_key() -> KeyDef {
    KeyDef::new(
        KeyRole::Return,
        Appearance::Image,
        vec![
            Behavior::Press(KeyAction::sym(KeySym::RETURN)),
            Behavior::LongPress(KeyAction::sym_with(KeySym::RETURN, KeyStates::SHIFT)),
            Behavior::Swipe(KeyAction::sym_with(KeySym::RETURN, KeyStates::CTRL)),
        ],
    )
}

pub fn language_key() -> KeyDef {
    KeyDef::new(
        KeyRole::Language,
        Appearance::Image,
        vec![
            Behavior::Press(KeyAction::LangSwitch),
            Behavior::LongPress(KeyAction::ShowInputMethodPicker),
        ],
    )
}

fn layout_switch_key() -> KeyDef {
    KeyDef::new(
        KeyRole::LayoutSwitch,
        Appearance::Text("?123".to_string()),
        vec![
            Behavior::Press(KeyAction::LayoutSwitch(String::new())),
            Behavior::Swipe(KeyAction::PickerSwitch(None)),
        ],
    )
}

/// Text keyboard layout: digit row, three letter rows and the bottom row.
pub fn text_layout() -> Layout {
    let shortcuts = context_shortcuts();
    let shortcut = |i: usize| shortcuts.get(i).map(|(l, _)| *l).unwrap_or(" ");

    let digits = ["!", "@", "#", "$", "%", "^", "&", "*", "(", ")"]
        .iter()
        .enumerate()
        .map(|(i, alt)| digit_key(((i + 1) % 10) as u8, alt))
        .collect();

    let top = [
        ("Q", "`"),
        ("W", "~"),
        ("E", "+"),
        ("R", "-"),
        ("T", "="),
        ("Y", "_"),
        ("U", "{"),
        ("I", "}"),
        ("O", "["),
        ("P", "]"),
    ]
    .iter()
    .map(|(c, a)| alphabet_key(c, a))
    .collect();

    let mut home: Vec<KeyDef> = [
        ("A", "\\"),
        ("S", "|"),
        ("D", "×"),
        ("F", "÷"),
        ("G", "←"),
        ("H", "→"),
    ]
    .iter()
    .map(|(c, a)| alphabet_key(c, a))
    .collect();
    home.push(alphabet_key("J", shortcut(7)));
    home.push(alphabet_key("K", shortcut(8)));
    home.push(alphabet_key("L", shortcut(9)));
    home.push(alt_key(";", ":"));

    let mut bottom = vec![caps_key()];
    for (i, c) in ["Z", "X", "C", "V", "B", "N", "M"].iter().enumerate() {
        bottom.push(alphabet_key(c, shortcut(i)));
    }
    bottom.push(backspace_key());

    let function_row = vec![
        layout_switch_key(),
        language_key(),
        alt_key("/", "?"),
        alt_key(",", "<"),
        space_key(),
        alt_key(".", ">"),
        alt_key("'", "\""),
        return_key(),
    ];

    Layout::new(vec![digits, top, home, bottom, function_row])
}
