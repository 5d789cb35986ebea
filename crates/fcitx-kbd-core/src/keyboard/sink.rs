// Fcitx-kbd Action Sink
// Engine-facing destination of dispatched key actions

use super::caps::CapsState;
use super::layout::KeyLabel;
use crate::action::{KeyAction, Source};

/// Receives the actions a keyboard dispatches, plus refresh requests when
/// the caps state changes.
pub trait ActionSink {
    fn send(&mut self, action: &KeyAction, source: Source);

    /// Letter keys must be redrawn with `letters`
    fn on_caps_changed(&mut self, _state: CapsState, _letters: &[KeyLabel]) {}
}

impl<T: ActionSink + ?Sized> ActionSink for &mut T {
    fn send(&mut self, action: &KeyAction, source: Source) {
        (**self).send(action, source)
    }

    fn on_caps_changed(&mut self, state: CapsState, letters: &[KeyLabel]) {
        (**self).on_caps_changed(state, letters)
    }
}

/// Sink that keeps everything it is given, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub sent: Vec<(KeyAction, Source)>,
    pub caps_changes: Vec<CapsState>,
    pub letters: Vec<KeyLabel>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions only, without their sources
    pub fn actions(&self) -> Vec<KeyAction> {
        self.sent.iter().map(|(a, _)| a.clone()).collect()
    }

    pub fn last(&self) -> Option<&KeyAction> {
        self.sent.last().map(|(a, _)| a)
    }

    pub fn clear(&mut self) {
        self.sent.clear();
        self.caps_changes.clear();
        self.letters.clear();
    }
}

impl ActionSink for RecordingSink {
    fn send(&mut self, action: &KeyAction, source: Source) {
        self.sent.push((action.clone(), source));
    }

    fn on_caps_changed(&mut self, state: CapsState, letters: &[KeyLabel]) {
        self.caps_changes.push(state);
        self.letters = letters.to_vec();
    }
}
