// Fcitx-kbd Dispatch Scenarios
//
// Simulate typing sessions on the text keyboard: caps gestures, letter
// presses, input-method changes and punctuation mappings, checking what the
// engine receives.
//
// Run with: cargo test --test dispatch_scenarios

use fcitx_kbd_core::event::{route_event, Event, InputMethodEntry};
use fcitx_kbd_core::keyboard::{
    CapsState, Gesture, KeyRole, KeyboardEventBridge, RecordingSink, TextKeyboard,
};
use fcitx_kbd_core::{decode, KeyAction, KeyStates, Source};
use indexmap::IndexMap;

// =========================================================================
// Test Helpers
// =========================================================================

fn keyboard() -> TextKeyboard<RecordingSink> {
    TextKeyboard::new(RecordingSink::new())
}

fn tap_caps(kb: &mut TextKeyboard<RecordingSink>) {
    let caps = kb.position_of_role(KeyRole::Caps).unwrap();
    kb.press(caps, Gesture::Press);
}

fn double_tap_caps(kb: &mut TextKeyboard<RecordingSink>) {
    let caps = kb.position_of_role(KeyRole::Caps).unwrap();
    kb.press(caps, Gesture::DoubleTap);
}

/// Type one letter key and return the literal the engine received
fn type_letter(kb: &mut TextKeyboard<RecordingSink>, letter: &str) -> (String, KeyStates) {
    match kb.press_label(letter, Gesture::Press) {
        Some(KeyAction::Fcitx { text, states, .. }) => (text, states),
        other => panic!("letter {} produced {:?}", letter, other),
    }
}

fn comma_mapping() -> IndexMap<String, String> {
    let mut mapping = IndexMap::new();
    mapping.insert(",".to_string(), "，".to_string());
    mapping
}

// =========================================================================
// Caps state machine
// =========================================================================

#[test]
fn test_shift_once_then_lowercase() {
    let mut kb = keyboard();
    tap_caps(&mut kb);
    assert_eq!(kb.caps_state(), CapsState::Once);

    let (text, states) = type_letter(&mut kb, "h");
    assert_eq!(text, "H");
    assert!(states.contains(KeyStates::SHIFT));
    assert_eq!(kb.caps_state(), CapsState::None);

    let (text, _) = type_letter(&mut kb, "i");
    assert_eq!(text, "i");
}

#[test]
fn test_caps_lock_five_letters() {
    let mut kb = keyboard();
    double_tap_caps(&mut kb);
    assert_eq!(kb.caps_state(), CapsState::Lock);

    for letter in ["h", "e", "l", "l", "o"] {
        let (text, states) = type_letter(&mut kb, letter);
        assert_eq!(text, letter.to_uppercase());
        assert!(states.contains(KeyStates::CAPS_LOCK));
        assert_eq!(kb.caps_state(), CapsState::Lock);
    }
}

#[test]
fn test_single_tap_releases_lock() {
    let mut kb = keyboard();
    double_tap_caps(&mut kb);
    kb.on_action(KeyAction::Caps { lock: false }, Source::Keyboard);
    assert_eq!(kb.caps_state(), CapsState::None);
}

/// Keyboard already driven into `state` with caps gestures
fn keyboard_in(state: CapsState) -> TextKeyboard<RecordingSink> {
    let mut kb = keyboard();
    match state {
        CapsState::None => {}
        CapsState::Once => tap_caps(&mut kb),
        CapsState::Lock => double_tap_caps(&mut kb),
    }
    assert_eq!(kb.caps_state(), state);
    kb
}

#[test]
fn test_transition_table() {
    use CapsState::{Lock, None as Off, Once};
    use Source::{Keyboard, Popup};

    let plain = KeyStates::VIRTUAL;
    let shift = KeyStates::VIRTUAL | KeyStates::SHIFT;
    let locked = KeyStates::VIRTUAL | KeyStates::CAPS_LOCK;
    let press = KeyAction::Caps { lock: false };
    let double = KeyAction::Caps { lock: true };

    // (start, action, source) -> (state after, literal sent, states sent)
    let table: Vec<(CapsState, KeyAction, Source, CapsState, Option<&str>, Option<KeyStates>)> = vec![
        // letters from the keyboard
        (Off, KeyAction::fcitx("a"), Keyboard, Off, Some("a"), Some(plain)),
        (Once, KeyAction::fcitx("a"), Keyboard, Off, Some("A"), Some(shift)),
        (Lock, KeyAction::fcitx("a"), Keyboard, Lock, Some("A"), Some(locked)),
        // fixed-casing literals
        (Off, KeyAction::fcitx_fixed("Q"), Keyboard, Off, Some("Q"), Some(plain)),
        (Once, KeyAction::fcitx_fixed("q"), Keyboard, Off, Some("Q"), Some(shift)),
        (Lock, KeyAction::fcitx_fixed("q"), Keyboard, Lock, Some("Q"), Some(locked)),
        // popup picks keep their casing
        (Off, KeyAction::fcitx("é"), Popup, Off, Some("é"), Some(plain)),
        (Once, KeyAction::fcitx("é"), Popup, Off, Some("é"), Some(plain)),
        (Lock, KeyAction::fcitx("é"), Popup, Lock, Some("é"), Some(plain)),
        // caps gestures
        (Off, press.clone(), Keyboard, Once, None, None),
        (Once, press.clone(), Keyboard, Off, None, None),
        (Lock, press.clone(), Keyboard, Off, None, None),
        (Off, double.clone(), Keyboard, Lock, None, None),
        (Once, double.clone(), Keyboard, Lock, None, None),
        (Lock, double.clone(), Keyboard, Off, None, None),
        // other actions leave caps alone
        (Off, KeyAction::LangSwitch, Keyboard, Off, None, None),
        (Once, KeyAction::LangSwitch, Keyboard, Once, None, None),
        (Lock, KeyAction::LangSwitch, Keyboard, Lock, None, None),
    ];

    for (start, action, source, expected, text, states) in table {
        let mut kb = keyboard_in(start);
        let out = kb.on_action(action.clone(), source);
        let case = format!("{} + {} from {:?}", start, action, source);

        assert_eq!(kb.caps_state(), expected, "{}", case);
        assert_eq!(kb.sink().last(), Some(&out), "{}", case);
        assert_eq!(out.literal(), text, "{}", case);
        match (&out, states) {
            (KeyAction::Fcitx { states: sent, .. }, Some(want)) => {
                assert_eq!(*sent, want, "{}", case)
            }
            (KeyAction::Fcitx { .. }, None) => panic!("{}: unexpected literal {:?}", case, out),
            (_, Some(_)) => panic!("{}: expected a literal, got {:?}", case, out),
            (_, None) => assert_eq!(out, action, "{}", case),
        }
    }
}

#[test]
fn test_popup_caps_gesture_still_toggles() {
    let mut kb = keyboard();
    kb.on_action(KeyAction::Caps { lock: false }, Source::Popup);
    assert_eq!(kb.caps_state(), CapsState::Once);
}

// =========================================================================
// Input method changes
// =========================================================================

#[test]
fn test_input_method_change_resets_caps() {
    let setups: [fn(&mut TextKeyboard<RecordingSink>); 2] = [tap_caps, double_tap_caps];
    for setup in setups {
        let mut kb = keyboard();
        setup(&mut kb);
        assert_ne!(kb.caps_state(), CapsState::None);

        let im = InputMethodEntry::new("keyboard-us", "English", "En");
        let event = decode(6, vec![im.into()]);
        route_event(&event, &mut KeyboardEventBridge::new(&mut kb));

        assert_eq!(kb.caps_state(), CapsState::None);
        let (text, _) = type_letter(&mut kb, "a");
        assert_eq!(text, "a");
    }
}

#[test]
fn test_malformed_input_method_event_is_ignored() {
    let mut kb = keyboard();
    double_tap_caps(&mut kb);
    let event = decode(6, vec![42.into()]);
    assert!(matches!(event, Event::Unknown(_)));
    route_event(&event, &mut KeyboardEventBridge::new(&mut kb));
    assert_eq!(kb.caps_state(), CapsState::Lock);
}

// =========================================================================
// Punctuation
// =========================================================================

#[test]
fn test_punctuation_mapping_in_every_caps_state() {
    for caps_taps in 0..3 {
        let mut kb = keyboard();
        kb.set_punctuation_mapping(comma_mapping());
        match caps_taps {
            1 => tap_caps(&mut kb),
            2 => double_tap_caps(&mut kb),
            _ => {}
        }
        let out = kb.press_label(",", Gesture::Press).unwrap();
        assert_eq!(out.literal(), Some("，"));
    }
}

#[test]
fn test_unmapped_punctuation_untouched() {
    let mut kb = keyboard();
    kb.set_punctuation_mapping(comma_mapping());
    let out = kb.press_label(".", Gesture::Press).unwrap();
    assert_eq!(out.literal(), Some("."));
}

// =========================================================================
// Sessions
// =========================================================================

#[test]
fn test_sentence_session() {
    let mut kb = keyboard();
    kb.set_punctuation_mapping(comma_mapping());

    tap_caps(&mut kb);
    let mut typed = String::new();
    for label in ["h", "i", ",", "b", "o", "b"] {
        let action = kb.press_label(label, Gesture::Press).unwrap();
        typed.push_str(action.literal().unwrap_or_default());
    }
    assert_eq!(typed, "Hi，bob");
    assert_eq!(kb.sink().sent.len(), 7);
    assert_eq!(kb.sink().caps_changes, vec![CapsState::Once, CapsState::None]);
}
