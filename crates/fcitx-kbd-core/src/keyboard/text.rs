// Fcitx-kbd Text Keyboard
// Caps state machine, punctuation substitution and key dispatch

use indexmap::IndexMap;

use super::caps::CapsState;
use super::layout::{context_action, text_layout, Gesture, KeyDef, KeyLabel, KeyPos, KeyRole, Layout};
use super::popup::PopupAction;
use super::sink::ActionSink;
use crate::action::{KeyAction, Source};
use crate::event::{
    CandidateListData, EventHandler, InputMethodEntry, InputPanelData, PagedCandidateData,
};
use crate::key::{KeyStates, KeySym};

/// Label of the layout-switch key while the input panel is idle
pub const NUMBER_KEY_LABEL: &str = "?123";
/// Label of the layout-switch key while the input panel is active
pub const ESCAPE_KEY_LABEL: &str = "Esc";

/// The QWERTY text keyboard.
///
/// Owns its caps state and forwards every dispatched action to `S`.
#[derive(Debug)]
pub struct TextKeyboard<S: ActionSink> {
    layout: Layout,
    caps: CapsState,
    punctuation: IndexMap<String, String>,
    keep_letters_uppercase: bool,
    show_lang_switch_key: bool,
    candidates_shown: bool,
    panel_active: bool,
    space_label: String,
    sink: S,
}

impl<S: ActionSink> TextKeyboard<S> {
    pub fn new(sink: S) -> Self {
        Self::with_layout(text_layout(), sink)
    }

    pub fn with_layout(layout: Layout, sink: S) -> Self {
        Self {
            layout,
            caps: CapsState::None,
            punctuation: IndexMap::new(),
            keep_letters_uppercase: false,
            show_lang_switch_key: true,
            candidates_shown: false,
            panel_active: false,
            space_label: String::new(),
            sink,
        }
    }

    pub fn caps_state(&self) -> CapsState {
        self.caps
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn space_label(&self) -> &str {
        &self.space_label
    }

    pub fn set_keep_letters_uppercase(&mut self, keep: bool) {
        if self.keep_letters_uppercase != keep {
            self.keep_letters_uppercase = keep;
            self.refresh();
        }
    }

    pub fn set_show_lang_switch_key(&mut self, show: bool) {
        self.show_lang_switch_key = show;
    }

    pub fn is_lang_switch_visible(&self) -> bool {
        self.show_lang_switch_key
    }

    /// Replace the punctuation mapping of the current input method.
    pub fn set_punctuation_mapping(&mut self, mapping: IndexMap<String, String>) {
        log::debug!("punctuation mapping updated ({} entries)", mapping.len());
        self.punctuation = mapping;
    }

    pub fn punctuation_mapping(&self) -> &IndexMap<String, String> {
        &self.punctuation
    }

    /// Dispatch `action` and return what was forwarded to the sink.
    pub fn on_action(&mut self, action: KeyAction, source: Source) -> KeyAction {
        let transformed = match action {
            KeyAction::Fcitx {
                text,
                code,
                states,
                default,
            } => match source {
                Source::Keyboard => self.transform_literal(text, code, states, default),
                Source::Popup => {
                    if self.caps == CapsState::Once {
                        self.switch_caps(false);
                    }
                    KeyAction::Fcitx {
                        text,
                        code,
                        states,
                        default,
                    }
                }
            },
            KeyAction::Caps { lock } => {
                self.switch_caps(lock);
                KeyAction::Caps { lock }
            }
            other => other,
        };
        log::trace!("dispatch {} from {:?} (caps {})", transformed, source, self.caps);
        self.sink.send(&transformed, source);
        transformed
    }

    fn transform_literal(
        &mut self,
        text: String,
        code: u16,
        states: KeyStates,
        default: bool,
    ) -> KeyAction {
        if let Some(sub) = self.punctuation.get(&text) {
            if !is_single_letter(&text) {
                let action = KeyAction::Fcitx {
                    text: sub.clone(),
                    code,
                    states,
                    default,
                };
                // Casing is skipped but a one-shot shift is still spent
                if self.caps == CapsState::Once {
                    self.switch_caps(false);
                }
                return action;
            }
        }
        let text = self.transform_punctuation(&text);

        match self.caps {
            CapsState::None => KeyAction::Fcitx {
                text: if default { text.to_lowercase() } else { text },
                code,
                states,
                default,
            },
            CapsState::Once => {
                let action = KeyAction::Fcitx {
                    text: text.to_uppercase(),
                    code,
                    states: KeyStates::VIRTUAL | KeyStates::SHIFT,
                    default,
                };
                self.switch_caps(false);
                action
            }
            CapsState::Lock => KeyAction::Fcitx {
                text: text.to_uppercase(),
                code,
                states: KeyStates::VIRTUAL | KeyStates::CAPS_LOCK,
                default,
            },
        }
    }

    fn transform_punctuation(&self, text: &str) -> String {
        self.punctuation
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }

    fn transform_alphabet(&self, text: &str) -> String {
        self.caps.apply(text)
    }

    fn switch_caps(&mut self, lock: bool) {
        let next = self.caps.toggled(lock);
        log::debug!("caps {} -> {}", self.caps, next);
        self.caps = next;
        self.refresh();
    }

    fn refresh(&mut self) {
        let letters = self.letter_labels();
        self.sink.on_caps_changed(self.caps, &letters);
    }

    /// Resolve the key at `pos` for `gesture` and dispatch it.
    pub fn press(&mut self, pos: KeyPos, gesture: Gesture) -> Option<KeyAction> {
        let action = {
            let key = self.layout.get(pos)?;
            self.key_action(key, gesture)?
        };
        Some(self.on_action(action, Source::Keyboard))
    }

    /// Like [`press`](Self::press), addressing the key by its label.
    pub fn press_label(&mut self, label: &str, gesture: Gesture) -> Option<KeyAction> {
        let pos = self.position_of(label)?;
        self.press(pos, gesture)
    }

    /// Dispatch a character picked from a popup keyboard.
    pub fn pick_popup(&mut self, text: &str) -> KeyAction {
        let action = context_action(text).unwrap_or_else(|| KeyAction::fcitx(text));
        self.on_action(action, Source::Popup)
    }

    pub fn position_of(&self, label: &str) -> Option<KeyPos> {
        self.layout.find_label(label).map(|(pos, _)| pos)
    }

    pub fn position_of_role(&self, role: KeyRole) -> Option<KeyPos> {
        self.layout.find_role(role).map(|(pos, _)| pos)
    }

    /// Action `key` currently produces for `gesture`, taking candidate and
    /// panel state into account.
    pub fn key_action(&self, key: &KeyDef, gesture: Gesture) -> Option<KeyAction> {
        match key.role {
            KeyRole::Caps => self.caps_key_action(key, gesture),
            KeyRole::LayoutSwitch => self.number_key_action(key, gesture),
            KeyRole::Return if gesture == Gesture::Swipe && !self.panel_active => None,
            KeyRole::Language if !self.show_lang_switch_key => None,
            _ => key.action_for(gesture).cloned(),
        }
    }

    fn caps_key_action(&self, key: &KeyDef, gesture: Gesture) -> Option<KeyAction> {
        if self.candidates_shown {
            match gesture {
                Gesture::Press => Some(KeyAction::sym(KeySym::TAB)),
                Gesture::DoubleTap => None,
                g => key.action_for(g).cloned(),
            }
        } else {
            match gesture {
                Gesture::SwipeUp | Gesture::SwipeDown => None,
                g => key.action_for(g).cloned(),
            }
        }
    }

    fn number_key_action(&self, key: &KeyDef, gesture: Gesture) -> Option<KeyAction> {
        if self.panel_active {
            match gesture {
                Gesture::Press => Some(KeyAction::sym(KeySym::ESCAPE)),
                Gesture::LongPress => Some(KeyAction::LayoutSwitch(String::new())),
                g => key.action_for(g).cloned(),
            }
        } else {
            key.action_for(gesture).cloned()
        }
    }

    pub fn number_key_label(&self) -> &'static str {
        if self.panel_active {
            ESCAPE_KEY_LABEL
        } else {
            NUMBER_KEY_LABEL
        }
    }

    /// Entries of the layout-switch key's long-press menu. Empty while the
    /// panel is active, where a long press switches layout instead.
    pub fn number_key_menu(&self) -> Vec<(&'static str, KeyAction)> {
        if self.panel_active {
            return Vec::new();
        }
        vec![
            ("Emoji", KeyAction::PickerSwitch(None)),
            ("QuickPhrase", KeyAction::QuickPhrase),
            ("Unicode", KeyAction::Unicode),
        ]
    }

    pub fn on_attach(&mut self) {
        self.caps = CapsState::None;
        self.refresh();
    }

    /// Track a new input method and return the space-bar label.
    pub fn on_input_method_update(&mut self, im: &InputMethodEntry) -> String {
        self.space_label = im.display_name();
        if self.caps != CapsState::None {
            self.switch_caps(false);
        }
        self.space_label.clone()
    }

    pub fn on_candidate_update(&mut self, shown: bool) {
        self.candidates_shown = shown;
    }

    pub fn is_candidate_shown(&self) -> bool {
        self.candidates_shown
    }

    pub fn on_panel_update(&mut self, active: bool) {
        self.panel_active = active;
    }

    pub fn is_panel_active(&self) -> bool {
        self.panel_active
    }

    /// Main labels of the letter keys for the current caps state.
    pub fn letter_labels(&self) -> Vec<KeyLabel> {
        self.layout
            .keys()
            .filter(|(_, k)| k.alt_text().is_some())
            .filter_map(|(pos, k)| {
                let display = k.display_text()?;
                if !is_single_letter(display) {
                    return None;
                }
                let text = if self.keep_letters_uppercase {
                    display.to_uppercase()
                } else {
                    self.transform_alphabet(display)
                };
                Some(KeyLabel { pos, text })
            })
            .collect()
    }

    /// Alternate labels of alt-text keys and main labels of punctuation
    /// keys, after punctuation substitution.
    pub fn punctuation_labels(&self) -> Vec<KeyLabel> {
        self.layout
            .keys()
            .filter(|(_, k)| k.role == KeyRole::Character)
            .filter_map(|(pos, k)| {
                if let Some(alt) = k.alt_text() {
                    return Some(KeyLabel {
                        pos,
                        text: self.transform_punctuation(alt),
                    });
                }
                let display = k.display_text()?;
                let first = display.chars().next()?;
                if first.is_alphabetic() || first.is_whitespace() {
                    return None;
                }
                Some(KeyLabel {
                    pos,
                    text: self.transform_punctuation(display),
                })
            })
            .collect()
    }

    /// Single letters follow caps casing, other single characters are
    /// substituted, anything longer is unchanged.
    pub fn transform_popup_preview(&self, content: &str) -> String {
        let mut chars = content.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => self.transform_alphabet(content),
            (Some(_), None) => self.transform_punctuation(content),
            _ => content.to_string(),
        }
    }

    pub fn on_popup_action(&self, action: PopupAction) -> PopupAction {
        match action {
            PopupAction::Preview { key, content } => PopupAction::Preview {
                key,
                content: self.transform_popup_preview(&content),
            },
            PopupAction::PreviewUpdate { key, content } => PopupAction::PreviewUpdate {
                key,
                content: self.transform_popup_preview(&content),
            },
            PopupAction::ShowKeyboard { key, label } if is_single_letter(&label) => {
                PopupAction::ShowKeyboard {
                    key,
                    label: self.transform_alphabet(&label),
                }
            }
            other => other,
        }
    }
}

fn is_single_letter(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// Feeds engine events that concern the text keyboard into it.
pub struct KeyboardEventBridge<'a, S: ActionSink> {
    keyboard: &'a mut TextKeyboard<S>,
}

impl<'a, S: ActionSink> KeyboardEventBridge<'a, S> {
    pub fn new(keyboard: &'a mut TextKeyboard<S>) -> Self {
        Self { keyboard }
    }
}

impl<S: ActionSink> EventHandler for KeyboardEventBridge<'_, S> {
    fn on_input_method_change(&mut self, im: &InputMethodEntry) {
        self.keyboard.on_input_method_update(im);
    }

    fn on_candidate_list(&mut self, data: &CandidateListData) {
        self.keyboard.on_candidate_update(!data.candidates.is_empty());
    }

    fn on_paged_candidate(&mut self, data: &PagedCandidateData) {
        self.keyboard.on_candidate_update(!data.candidates.is_empty());
    }

    fn on_input_panel(&mut self, data: &InputPanelData) {
        let active =
            !(data.preedit.is_empty() && data.aux_up.is_empty() && data.aux_down.is_empty());
        self.keyboard.on_panel_update(active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{route_event, Event};
    use crate::keyboard::sink::RecordingSink;

    fn keyboard() -> TextKeyboard<RecordingSink> {
        TextKeyboard::new(RecordingSink::new())
    }

    fn literal(action: &KeyAction) -> &str {
        action.literal().unwrap_or_default()
    }

    fn states(action: &KeyAction) -> KeyStates {
        match action {
            KeyAction::Fcitx { states, .. } => *states,
            other => panic!("not a literal: {:?}", other),
        }
    }

    #[test]
    fn test_none_lowercases_default_literals() {
        let mut kb = keyboard();
        let out = kb.on_action(KeyAction::fcitx("Q"), Source::Keyboard);
        assert_eq!(literal(&out), "q");
        assert_eq!(kb.caps_state(), CapsState::None);

        let out = kb.on_action(KeyAction::fcitx_fixed("Q"), Source::Keyboard);
        assert_eq!(literal(&out), "Q");
    }

    #[test]
    fn test_once_uppercases_single_letter() {
        let mut kb = keyboard();
        kb.on_action(KeyAction::Caps { lock: false }, Source::Keyboard);
        assert_eq!(kb.caps_state(), CapsState::Once);

        let out = kb.on_action(KeyAction::fcitx("a"), Source::Keyboard);
        assert_eq!(literal(&out), "A");
        assert_eq!(states(&out), KeyStates::VIRTUAL | KeyStates::SHIFT);
        assert_eq!(kb.caps_state(), CapsState::None);

        let out = kb.on_action(KeyAction::fcitx("a"), Source::Keyboard);
        assert_eq!(literal(&out), "a");
    }

    #[test]
    fn test_lock_persists() {
        let mut kb = keyboard();
        kb.on_action(KeyAction::Caps { lock: true }, Source::Keyboard);
        for c in ["a", "b", "c", "d", "e"] {
            let out = kb.on_action(KeyAction::fcitx(c), Source::Keyboard);
            assert_eq!(literal(&out), c.to_uppercase());
            assert_eq!(states(&out), KeyStates::VIRTUAL | KeyStates::CAPS_LOCK);
        }
        assert_eq!(kb.caps_state(), CapsState::Lock);

        kb.on_action(KeyAction::Caps { lock: true }, Source::Keyboard);
        assert_eq!(kb.caps_state(), CapsState::None);
    }

    #[test]
    fn test_popup_pick_consumes_once_without_casing() {
        let mut kb = keyboard();
        kb.on_action(KeyAction::Caps { lock: false }, Source::Keyboard);
        let out = kb.on_action(KeyAction::fcitx("é"), Source::Popup);
        assert_eq!(literal(&out), "é");
        assert_eq!(kb.caps_state(), CapsState::None);
    }

    #[test]
    fn test_popup_pick_in_lock_keeps_lock() {
        let mut kb = keyboard();
        kb.on_action(KeyAction::Caps { lock: true }, Source::Keyboard);
        kb.pick_popup("ü");
        assert_eq!(kb.caps_state(), CapsState::Lock);
    }

    #[test]
    fn test_pick_popup_context_shortcut() {
        let mut kb = keyboard();
        let out = kb.pick_popup("复制");
        assert!(matches!(out, KeyAction::ContextMenu(_)));
        assert_eq!(kb.sink().sent[0].1, Source::Popup);
    }

    #[test]
    fn test_punctuation_substitution() {
        let mut kb = keyboard();
        let mut mapping = IndexMap::new();
        mapping.insert(",".to_string(), "，".to_string());
        kb.set_punctuation_mapping(mapping);

        for caps in [false, true] {
            if caps {
                kb.on_action(KeyAction::Caps { lock: false }, Source::Keyboard);
            }
            let out = kb.on_action(KeyAction::fcitx(","), Source::Keyboard);
            assert_eq!(literal(&out), "，");
        }
        assert_eq!(kb.caps_state(), CapsState::None);
    }

    #[test]
    fn test_mapped_punctuation_spends_shift_once() {
        let mut kb = keyboard();
        let mut mapping = IndexMap::new();
        mapping.insert(",".to_string(), "，".to_string());
        kb.set_punctuation_mapping(mapping);

        kb.on_action(KeyAction::Caps { lock: false }, Source::Keyboard);
        let out = kb.on_action(KeyAction::fcitx(","), Source::Keyboard);
        assert_eq!(literal(&out), "，");
        assert_eq!(states(&out), KeyStates::VIRTUAL);
        assert_eq!(kb.caps_state(), CapsState::None);
        assert_eq!(kb.sink().caps_changes, vec![CapsState::Once, CapsState::None]);

        let out = kb.on_action(KeyAction::fcitx("a"), Source::Keyboard);
        assert_eq!(literal(&out), "a");
    }

    #[test]
    fn test_mapped_punctuation_keeps_lock() {
        let mut kb = keyboard();
        let mut mapping = IndexMap::new();
        mapping.insert(",".to_string(), "，".to_string());
        kb.set_punctuation_mapping(mapping);

        kb.on_action(KeyAction::Caps { lock: true }, Source::Keyboard);
        let out = kb.on_action(KeyAction::fcitx(","), Source::Keyboard);
        assert_eq!(literal(&out), "，");
        assert_eq!(kb.caps_state(), CapsState::Lock);
    }

    #[test]
    fn test_other_actions_pass_through() {
        let mut kb = keyboard();
        kb.on_action(KeyAction::Caps { lock: true }, Source::Keyboard);
        let out = kb.on_action(KeyAction::sym(KeySym::BACKSPACE), Source::Keyboard);
        assert_eq!(out, KeyAction::sym(KeySym::BACKSPACE));
        assert_eq!(kb.caps_state(), CapsState::Lock);
        assert_eq!(kb.sink().last(), Some(&out));
    }

    #[test]
    fn test_refresh_on_every_caps_change() {
        let mut kb = keyboard();
        kb.on_action(KeyAction::Caps { lock: false }, Source::Keyboard);
        kb.on_action(KeyAction::fcitx("x"), Source::Keyboard);
        kb.on_action(KeyAction::Caps { lock: true }, Source::Keyboard);
        assert_eq!(
            kb.sink().caps_changes,
            vec![CapsState::Once, CapsState::None, CapsState::Lock]
        );
        let q = kb.sink().letters.iter().find(|l| l.pos == KeyPos { row: 1, col: 0 });
        assert_eq!(q.map(|l| l.text.as_str()), Some("Q"));
    }

    #[test]
    fn test_letter_labels_are_idempotent() {
        let mut kb = keyboard();
        let lower = kb.letter_labels();
        assert_eq!(lower, kb.letter_labels());
        assert_eq!(lower.len(), 26);
        assert!(lower.iter().all(|l| l.text.chars().all(char::is_lowercase)));

        kb.set_keep_letters_uppercase(true);
        assert!(kb
            .letter_labels()
            .iter()
            .all(|l| l.text.chars().all(char::is_uppercase)));
    }

    #[test]
    fn test_input_method_update_resets_caps() {
        let mut kb = keyboard();
        kb.on_action(KeyAction::Caps { lock: true }, Source::Keyboard);
        let label = kb.on_input_method_update(&InputMethodEntry::new("pinyin", "Pinyin", "拼"));
        assert_eq!(label, "拼");
        assert_eq!(kb.caps_state(), CapsState::None);
        assert_eq!(kb.space_label(), "拼");
    }

    #[test]
    fn test_attach_resets_caps() {
        let mut kb = keyboard();
        kb.on_action(KeyAction::Caps { lock: false }, Source::Keyboard);
        kb.on_attach();
        assert_eq!(kb.caps_state(), CapsState::None);
        assert_eq!(kb.sink().caps_changes.last(), Some(&CapsState::None));
    }

    #[test]
    fn test_press_resolves_layout() {
        let mut kb = keyboard();
        assert_eq!(kb.press_label("w", Gesture::Press), Some(KeyAction::fcitx("w")));
        let swiped = kb.press_label("w", Gesture::Swipe).unwrap();
        assert_eq!(literal(&swiped), "W");
        assert_eq!(kb.press_label("w", Gesture::DoubleTap), None);
    }

    #[test]
    fn test_caps_key_with_candidates_shown() {
        let mut kb = keyboard();
        let caps = kb.position_of_role(KeyRole::Caps).unwrap();
        assert_eq!(kb.press(caps, Gesture::SwipeUp), None);

        kb.on_candidate_update(true);
        assert_eq!(kb.press(caps, Gesture::Press), Some(KeyAction::sym(KeySym::TAB)));
        assert_eq!(kb.press(caps, Gesture::DoubleTap), None);
        assert_eq!(
            kb.press(caps, Gesture::SwipeDown),
            Some(KeyAction::sym_with(KeySym::PAGE_DOWN, KeyStates::empty()))
        );
        assert_eq!(kb.caps_state(), CapsState::None);

        kb.on_candidate_update(false);
        kb.press(caps, Gesture::Press);
        assert_eq!(kb.caps_state(), CapsState::Once);
    }

    #[test]
    fn test_number_key_follows_panel() {
        let mut kb = keyboard();
        let key = kb.position_of_role(KeyRole::LayoutSwitch).unwrap();
        assert_eq!(kb.number_key_label(), "?123");
        assert_eq!(
            kb.press(key, Gesture::Press),
            Some(KeyAction::LayoutSwitch(String::new()))
        );
        assert_eq!(kb.number_key_menu().len(), 3);

        kb.on_panel_update(true);
        assert_eq!(kb.number_key_label(), "Esc");
        assert_eq!(kb.press(key, Gesture::Press), Some(KeyAction::sym(KeySym::ESCAPE)));
        assert_eq!(
            kb.press(key, Gesture::LongPress),
            Some(KeyAction::LayoutSwitch(String::new()))
        );
        assert!(kb.number_key_menu().is_empty());
    }

    #[test]
    fn test_return_swipe_needs_active_panel() {
        let mut kb = keyboard();
        let ret = kb.position_of_role(KeyRole::Return).unwrap();
        assert_eq!(kb.press(ret, Gesture::Swipe), None);
        kb.on_panel_update(true);
        assert_eq!(
            kb.press(ret, Gesture::Swipe),
            Some(KeyAction::sym_with(KeySym::RETURN, KeyStates::CTRL))
        );
    }

    #[test]
    fn test_popup_preview_transform() {
        let mut kb = keyboard();
        let mut mapping = IndexMap::new();
        mapping.insert(".".to_string(), "。".to_string());
        kb.set_punctuation_mapping(mapping);

        assert_eq!(kb.transform_popup_preview("A"), "a");
        assert_eq!(kb.transform_popup_preview("."), "。");
        assert_eq!(kb.transform_popup_preview("ab"), "ab");

        kb.on_action(KeyAction::Caps { lock: true }, Source::Keyboard);
        let key = KeyPos { row: 1, col: 0 };
        assert_eq!(
            kb.on_popup_action(PopupAction::Preview {
                key,
                content: "q".to_string()
            }),
            PopupAction::Preview {
                key,
                content: "Q".to_string()
            }
        );
        assert_eq!(
            kb.on_popup_action(PopupAction::ShowKeyboard {
                key,
                label: "q".to_string()
            }),
            PopupAction::ShowKeyboard {
                key,
                label: "Q".to_string()
            }
        );
        assert_eq!(
            kb.on_popup_action(PopupAction::Dismiss { key }),
            PopupAction::Dismiss { key }
        );
    }

    #[test]
    fn test_punctuation_labels() {
        let mut kb = keyboard();
        let mut mapping = IndexMap::new();
        mapping.insert("<".to_string(), "《".to_string());
        kb.set_punctuation_mapping(mapping);
        let labels = kb.punctuation_labels();
        let comma = kb.position_of(",").unwrap();
        let label = labels.iter().find(|l| l.pos == comma).unwrap();
        assert_eq!(label.text, "《");
    }

    #[test]
    fn test_event_bridge() {
        let mut kb = keyboard();
        kb.on_action(KeyAction::Caps { lock: true }, Source::Keyboard);
        {
            let mut bridge = KeyboardEventBridge::new(&mut kb);
            let im = InputMethodEntry::new("keyboard-us", "English", "En");
            route_event(&Event::InputMethodChange(im), &mut bridge);
            let panel = InputPanelData {
                preedit: crate::event::FormattedText::plain("ni", 2),
                aux_up: crate::event::FormattedText::EMPTY,
                aux_down: crate::event::FormattedText::EMPTY,
            };
            route_event(&Event::InputPanel(panel), &mut bridge);
        }
        assert_eq!(kb.caps_state(), CapsState::None);
        assert_eq!(kb.space_label(), "English");
        assert!(kb.is_panel_active());
    }
}
