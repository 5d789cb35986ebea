// Fcitx-kbd Number Keyboard
// Numeric keypad layout; keypad syms become literals while composing

use super::layout::{
    backspace_key, return_key, Appearance, Behavior, Gesture, KeyDef, KeyPos, KeyRole, Layout,
};
use super::popup::PopupAction;
use super::sink::ActionSink;
use crate::action::{KeyAction, Source};
use crate::key::{KeyStates, KeySym};

/// Layout name the "ABC" key switches back to
pub const TEXT_LAYOUT: &str = "Text";
/// Picker page the "!?#" key opens
pub const SYMBOL_LAYOUT: &str = "Symbol";

/// Literal a keypad sym stands for, if it is one the number keyboard
/// substitutes.
pub fn keypad_literal(sym: KeySym) -> Option<&'static str> {
    const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    match sym {
        KeySym::KP_ADD => Some("+"),
        KeySym::KP_SUBTRACT => Some("-"),
        KeySym::KP_MULTIPLY => Some("*"),
        KeySym::KP_DIVIDE => Some("/"),
        KeySym::KP_DECIMAL => Some("."),
        s if (KeySym::KP_0.code()..=KeySym::KP_9.code()).contains(&s.code()) => {
            DIGITS.get((s.code() - KeySym::KP_0.code()) as usize).copied()
        }
        _ => None,
    }
}

fn numpad_key(label: &str, sym: KeySym) -> KeyDef {
    KeyDef::new(
        KeyRole::Character,
        Appearance::Text(label.to_string()),
        vec![Behavior::Press(KeyAction::sym_with(
            sym,
            KeyStates::VIRTUAL | KeyStates::NUM_LOCK,
        ))],
    )
}

fn switch_key(label: &str, target: &str) -> KeyDef {
    KeyDef::new(
        KeyRole::LayoutSwitch,
        Appearance::Text(label.to_string()),
        vec![Behavior::Press(KeyAction::LayoutSwitch(target.to_string()))],
    )
}

fn mini_space_key() -> KeyDef {
    KeyDef::new(
        KeyRole::Space,
        Appearance::Text(" ".to_string()),
        vec![Behavior::Press(KeyAction::sym(KeySym::SPACE))],
    )
}

fn kp(d: u8) -> KeySym {
    KeySym::keypad_digit(d).unwrap_or(KeySym::KP_0)
}

pub fn number_layout() -> Layout {
    Layout::new(vec![
        vec![
            numpad_key("+", KeySym::KP_ADD),
            numpad_key("1", kp(1)),
            numpad_key("2", kp(2)),
            numpad_key("3", kp(3)),
            numpad_key("/", KeySym::KP_DIVIDE),
        ],
        vec![
            numpad_key("-", KeySym::KP_SUBTRACT),
            numpad_key("4", kp(4)),
            numpad_key("5", kp(5)),
            numpad_key("6", kp(6)),
            mini_space_key(),
        ],
        vec![
            numpad_key("*", KeySym::KP_MULTIPLY),
            numpad_key("7", kp(7)),
            numpad_key("8", kp(8)),
            numpad_key("9", kp(9)),
            backspace_key(),
        ],
        vec![
            switch_key("ABC", TEXT_LAYOUT),
            numpad_key(",", KeySym::KP_SEPARATOR),
            switch_key("!?#", SYMBOL_LAYOUT),
            numpad_key("0", kp(0)),
            KeyDef::new(
                KeyRole::Character,
                Appearance::Text("=".to_string()),
                vec![Behavior::Press(KeyAction::fcitx("="))],
            ),
            numpad_key(".", KeySym::KP_DECIMAL),
            return_key(),
        ],
    ])
}

#[derive(Debug)]
pub struct NumberKeyboard<S: ActionSink> {
    layout: Layout,
    panel_active: bool,
    sink: S,
}

impl<S: ActionSink> NumberKeyboard<S> {
    pub fn new(sink: S) -> Self {
        Self {
            layout: number_layout(),
            panel_active: false,
            sink,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn on_panel_update(&mut self, active: bool) {
        self.panel_active = active;
    }

    /// Dispatch `action`. While the input panel is active, keypad syms are
    /// typed as their literal so the engine can compose with them.
    pub fn on_action(&mut self, action: KeyAction, source: Source) -> KeyAction {
        let transformed = match action {
            KeyAction::Sym { sym, states } if self.panel_active => match keypad_literal(sym) {
                Some(literal) => KeyAction::fcitx(literal),
                None => KeyAction::Sym { sym, states },
            },
            other => other,
        };
        self.sink.send(&transformed, source);
        transformed
    }

    pub fn press(&mut self, pos: KeyPos, gesture: Gesture) -> Option<KeyAction> {
        let action = self.layout.get(pos)?.action_for(gesture)?.clone();
        Some(self.on_action(action, Source::Keyboard))
    }

    /// Popups are disabled on this keyboard.
    pub fn on_popup_action(&self, action: PopupAction) -> Option<PopupAction> {
        log::trace!("number keyboard ignores popup for {:?}", action.key());
        None
    }
}
