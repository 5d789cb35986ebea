// Fcitx-kbd Core Library
// Engine event decoding and on-screen keyboard dispatch

pub mod action;
pub mod device;
pub mod event;
pub mod key;
pub mod keyboard;

#[cfg(feature = "settings")]
pub mod settings;

pub use action::{KeyAction, PickerKind, Source, SwipeEvent, WindowKind};
pub use device::{
    CandidateWindowConfig, FloatingCandidatesMode, InputDeviceManager, KeyDownOutcome,
    ModeDecision, PagingMode, ToolType,
};
pub use event::{decode, route_event, try_decode, DecodeError, Event, EventHandler, EventType, Param};
pub use key::{KeyStates, KeySym};
pub use keyboard::{
    ActionSink, CapsState, Gesture, KeyboardEventBridge, NumberKeyboard, RecordingSink,
    TextKeyboard,
};

#[cfg(feature = "settings")]
pub use settings::{Settings, SettingsError};
