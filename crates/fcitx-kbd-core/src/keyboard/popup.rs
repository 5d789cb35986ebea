// Fcitx-kbd Popup Actions
// Requests from a key to show, update or dismiss its popup

use serde::{Deserialize, Serialize};

use super::layout::KeyPos;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopupAction {
    /// Show the single-character preview bubble
    Preview { key: KeyPos, content: String },
    PreviewUpdate { key: KeyPos, content: String },
    /// Open the popup keyboard for the key labelled `label`
    ShowKeyboard { key: KeyPos, label: String },
    Dismiss { key: KeyPos },
    /// Commit whatever the popup keyboard has focused
    Trigger { key: KeyPos },
}

impl PopupAction {
    pub fn key(&self) -> KeyPos {
        match self {
            PopupAction::Preview { key, .. }
            | PopupAction::PreviewUpdate { key, .. }
            | PopupAction::ShowKeyboard { key, .. }
            | PopupAction::Dismiss { key }
            | PopupAction::Trigger { key } => *key,
        }
    }
}
