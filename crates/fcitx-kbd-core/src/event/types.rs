// Fcitx-kbd Event Payloads
// Data carried by each engine event variant

use std::fmt;
use std::hash::{Hash, Hasher};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::key::{KeyStates, KeySym};

bitflags! {
    /// Per-segment formatting of engine-provided text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TextFormatFlags: u32 {
        const UNDERLINE = 1 << 3;
        const HIGHLIGHT = 1 << 4;
        const DONT_COMMIT = 1 << 5;
        const BOLD = 1 << 6;
        const STRIKE = 1 << 7;
        const ITALIC = 1 << 8;
    }
}

impl Default for TextFormatFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormattedSegment {
    pub text: String,
    #[serde(default)]
    pub flags: TextFormatFlags,
}

/// Text split into formatted segments plus a cursor offset (-1 = no cursor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormattedText {
    #[serde(default)]
    pub segments: Vec<FormattedSegment>,
    #[serde(default = "no_cursor")]
    pub cursor: i32,
}

fn no_cursor() -> i32 {
    -1
}

impl FormattedText {
    pub const EMPTY: FormattedText = FormattedText {
        segments: Vec::new(),
        cursor: -1,
    };

    pub fn plain(text: impl Into<String>, cursor: i32) -> Self {
        Self {
            segments: vec![FormattedSegment {
                text: text.into(),
                flags: TextFormatFlags::empty(),
            }],
            cursor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }

    /// Total length in chars
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.text.chars().count()).sum()
    }
}

impl Default for FormattedText {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for FormattedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(&segment.text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InputMethodSubMode {
    pub name: String,
    pub label: String,
    pub icon: String,
}

/// Descriptor of an engine input method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InputMethodEntry {
    pub unique_name: String,
    pub name: String,
    pub icon: String,
    pub native_name: String,
    pub label: String,
    pub language_code: String,
    pub sub_mode: InputMethodSubMode,
}

impl InputMethodEntry {
    pub fn new(unique_name: impl Into<String>, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            unique_name: unique_name.into(),
            name: name.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Label shown on the space bar.
    ///
    /// The plain keyboard reports label "En"; it shows its full name instead.
    pub fn display_name(&self) -> String {
        let mut out = if self.label == "En" {
            self.name.clone()
        } else {
            self.label.clone()
        };
        let sub = if self.sub_mode.name.is_empty() {
            &self.sub_mode.label
        } else {
            &self.sub_mode.name
        };
        if !sub.is_empty() {
            out.push(' ');
            out.push_str(sub);
        }
        out
    }
}

/// An entry of the status area menu (engine "action").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusAction {
    pub id: i32,
    pub is_separator: bool,
    pub is_checkable: bool,
    pub is_checked: bool,
    pub name: String,
    pub icon: String,
    pub short_text: String,
    pub long_text: String,
    pub menu: Vec<StatusAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub label: String,
    pub text: String,
    pub comment: String,
}

impl Candidate {
    pub fn new(label: impl Into<String>, text: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            comment: comment.into(),
        }
    }
}

/// Orientation the engine asks the paged candidate view to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum LayoutHint {
    #[default]
    NotSet = 0,
    Vertical = 1,
    Horizontal = 2,
}

impl LayoutHint {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(LayoutHint::NotSet),
            1 => Some(LayoutHint::Vertical),
            2 => Some(LayoutHint::Horizontal),
            _ => None,
        }
    }

    pub fn to_i32(self) -> i32 {
        self as i32
    }
}

/// Candidate list for the scrolling candidate bar.
///
/// Equality and hashing ignore `current_page`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListData {
    pub total: i32,
    pub candidates: Vec<String>,
    pub current_page: i32,
}

impl Default for CandidateListData {
    fn default() -> Self {
        Self {
            total: -1,
            candidates: Vec::new(),
            current_page: -1,
        }
    }
}

impl PartialEq for CandidateListData {
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total && self.candidates == other.candidates
    }
}

impl Eq for CandidateListData {}

impl Hash for CandidateListData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total.hash(state);
        self.candidates.hash(state);
    }
}

impl fmt::Display for CandidateListData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<&str> = self.candidates.iter().take(5).map(String::as_str).collect();
        let more = if self.candidates.len() > 5 { ", ..." } else { "" };
        write!(
            f,
            "total={}, candidates=[{}{}], currentPage: {}",
            self.total,
            shown.join(", "),
            more,
            self.current_page
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitStringData {
    pub text: String,
    pub cursor: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputPanelData {
    pub preedit: FormattedText,
    pub aux_up: FormattedText,
    pub aux_down: FormattedText,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEventData {
    pub sym: KeySym,
    pub states: KeyStates,
    pub unicode: i32,
    pub up: bool,
    pub timestamp: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusAreaData {
    pub actions: Vec<StatusAction>,
    pub im: InputMethodEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeleteSurroundingData {
    pub before: i32,
    pub after: i32,
}

/// One page of candidates for the floating candidate window.
///
/// Equality and hashing ignore `current_page`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedCandidateData {
    pub candidates: Vec<Candidate>,
    pub cursor_index: i32,
    pub layout_hint: LayoutHint,
    pub has_prev: bool,
    pub has_next: bool,
    pub current_page: i32,
}

impl PagedCandidateData {
    /// No candidates on this page.
    pub const EMPTY: PagedCandidateData = PagedCandidateData {
        candidates: Vec::new(),
        cursor_index: -1,
        layout_hint: LayoutHint::NotSet,
        has_prev: false,
        has_next: false,
        current_page: -1,
    };

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl Default for PagedCandidateData {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for PagedCandidateData {
    fn eq(&self, other: &Self) -> bool {
        self.candidates == other.candidates
            && self.cursor_index == other.cursor_index
            && self.layout_hint == other.layout_hint
            && self.has_prev == other.has_prev
            && self.has_next == other.has_next
    }
}

impl Eq for PagedCandidateData {}

impl Hash for PagedCandidateData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.candidates.hash(state);
        self.cursor_index.hash(state);
        self.layout_hint.hash(state);
        self.has_prev.hash(state);
        self.has_next.hash(state);
    }
}
