// Fcitx-kbd Keyboard Module
// On-screen keyboards, their layouts and the action sink they dispatch to

pub mod caps;
pub mod layout;
pub mod number;
pub mod popup;
pub mod sink;
pub mod text;

pub use caps::CapsState;
pub use layout::{
    context_action, context_shortcuts, text_layout, Appearance, Behavior, Gesture, KeyDef,
    KeyLabel, KeyPos, KeyRole, Layout, SwipeDirection,
};
pub use number::{keypad_literal, number_layout, NumberKeyboard};
pub use popup::PopupAction;
pub use sink::{ActionSink, RecordingSink};
pub use text::{KeyboardEventBridge, TextKeyboard};
