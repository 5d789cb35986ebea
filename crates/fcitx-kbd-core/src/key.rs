// Fcitx-kbd Key Types
// Key symbols, key-state masks and scancode lookup shared by events and actions

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// An X11-style key symbol as understood by the engine.
///
/// This is a newtype wrapper around u32 for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct KeySym(pub u32);

impl KeySym {
    pub const SPACE: KeySym = KeySym(0x0020);
    pub const BACKSPACE: KeySym = KeySym(0xff08);
    pub const TAB: KeySym = KeySym(0xff09);
    pub const RETURN: KeySym = KeySym(0xff0d);
    pub const ESCAPE: KeySym = KeySym(0xff1b);
    pub const LEFT: KeySym = KeySym(0xff51);
    pub const RIGHT: KeySym = KeySym(0xff53);
    pub const PAGE_UP: KeySym = KeySym(0xff55);
    pub const PAGE_DOWN: KeySym = KeySym(0xff56);
    pub const LOWER_L: KeySym = KeySym(0x006c);

    pub const KP_MULTIPLY: KeySym = KeySym(0xffaa);
    pub const KP_ADD: KeySym = KeySym(0xffab);
    pub const KP_SEPARATOR: KeySym = KeySym(0xffac);
    pub const KP_SUBTRACT: KeySym = KeySym(0xffad);
    pub const KP_DECIMAL: KeySym = KeySym(0xffae);
    pub const KP_DIVIDE: KeySym = KeySym(0xffaf);
    pub const KP_0: KeySym = KeySym(0xffb0);
    pub const KP_9: KeySym = KeySym(0xffb9);
    pub const KP_EQUAL: KeySym = KeySym(0xffbd);

    /// Symbol for an ASCII digit key on the main row (`'0'..='9'`).
    pub fn digit(d: u8) -> Option<KeySym> {
        (d <= 9).then(|| KeySym(0x30 + d as u32))
    }

    /// Symbol for a keypad digit (`KP_0..KP_9`).
    pub fn keypad_digit(d: u8) -> Option<KeySym> {
        (d <= 9).then(|| KeySym(Self::KP_0.0 + d as u32))
    }

    /// Get the raw numeric value
    pub fn code(self) -> u32 {
        self.0
    }
}

impl From<u32> for KeySym {
    fn from(code: u32) -> Self {
        KeySym(code)
    }
}

impl fmt::Display for KeySym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

bitflags! {
    /// Modifier state mask attached to key events and key actions.
    ///
    /// Bit positions match the engine's key-state mask so values coming over
    /// the bridge can be carried through unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct KeyStates: u32 {
        const SHIFT = 1 << 0;
        const CAPS_LOCK = 1 << 1;
        const CTRL = 1 << 2;
        const ALT = 1 << 3;
        const NUM_LOCK = 1 << 4;
        const MOD3 = 1 << 5;
        const SUPER = 1 << 6;
        const MOD5 = 1 << 7;
        const MOUSE_PRESSED = 1 << 8;
        const HANDLED_MASK = 1 << 24;
        const IGNORED_MASK = 1 << 25;
        const SUPER2 = 1 << 26;
        const HYPER = 1 << 27;
        const META = 1 << 28;
        const VIRTUAL = 1 << 29;
        const REPEAT = 1 << 31;
    }
}

impl KeyStates {
    /// States attached to keys produced by the on-screen keyboard.
    pub const fn virtual_key() -> Self {
        Self::VIRTUAL
    }

    /// Build from the raw integer the engine sends. Unknown bits are kept.
    pub fn from_raw(raw: i32) -> Self {
        Self::from_bits_retain(raw as u32)
    }
}

impl Default for KeyStates {
    fn default() -> Self {
        Self::VIRTUAL
    }
}

/// Linux scancode of the key producing `c` on a US layout, or 0 (KEY_RESERVED).
pub fn char_to_scancode(c: char) -> u16 {
    match c.to_ascii_lowercase() {
        '1' | '!' => 2,
        '2' | '@' => 3,
        '3' | '#' => 4,
        '4' | '$' => 5,
        '5' | '%' => 6,
        '6' | '^' => 7,
        '7' | '&' => 8,
        '8' | '*' => 9,
        '9' | '(' => 10,
        '0' | ')' => 11,
        '-' | '_' => 12,
        '=' | '+' => 13,
        'q' => 16,
        'w' => 17,
        'e' => 18,
        'r' => 19,
        't' => 20,
        'y' => 21,
        'u' => 22,
        'i' => 23,
        'o' => 24,
        'p' => 25,
        '[' | '{' => 26,
        ']' | '}' => 27,
        'a' => 30,
        's' => 31,
        'd' => 32,
        'f' => 33,
        'g' => 34,
        'h' => 35,
        'j' => 36,
        'k' => 37,
        'l' => 38,
        ';' | ':' => 39,
        '\'' | '"' => 40,
        '`' | '~' => 41,
        '\\' | '|' => 43,
        'z' => 44,
        'x' => 45,
        'c' => 46,
        'v' => 47,
        'b' => 48,
        'n' => 49,
        'm' => 50,
        ',' | '<' => 51,
        '.' | '>' => 52,
        '/' | '?' => 53,
        ' ' => 57,
        _ => 0,
    }
}

/// Scancode of the first character of `text`, 0 for empty text.
pub fn text_to_scancode(text: &str) -> u16 {
    text.chars().next().map(char_to_scancode).unwrap_or(0)
}
