// Fcitx-kbd Event Decoder
// Turns (tag, params) pairs from the engine callback into typed events

use serde::Serialize;
use strum_macros::{Display, EnumCount, EnumIter, FromRepr};

use super::param::{Param, ParamKind, ParamReader};
use super::types::{
    CandidateListData, CommitStringData, DeleteSurroundingData, FormattedText, InputMethodEntry,
    InputPanelData, KeyEventData, LayoutHint, PagedCandidateData, StatusAreaData,
};
use crate::key::{KeyStates, KeySym};

/// Event kinds in the order the engine numbers them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr, Serialize,
)]
#[repr(u8)]
pub enum EventType {
    CandidateList = 0,
    CommitString = 1,
    ClientPreedit = 2,
    InputPanel = 3,
    Ready = 4,
    Key = 5,
    InputMethodChange = 6,
    StatusArea = 7,
    DeleteSurrounding = 8,
    PagedCandidate = 9,
    Unknown = 10,
}

impl EventType {
    /// Look up the kind for an engine tag. `None` for tags outside the enumeration.
    pub fn from_tag(tag: i32) -> Option<Self> {
        u8::try_from(tag).ok().and_then(EventType::from_repr)
    }

    pub fn tag(self) -> i32 {
        self as i32
    }
}

/// A decoded engine event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Event {
    CandidateList(CandidateListData),
    CommitString(CommitStringData),
    ClientPreedit(FormattedText),
    InputPanel(InputPanelData),
    Ready,
    Key(KeyEventData),
    InputMethodChange(InputMethodEntry),
    StatusArea(StatusAreaData),
    DeleteSurrounding(DeleteSurroundingData),
    PagedCandidate(PagedCandidateData),
    /// Fallback carrying the raw parameters untouched
    Unknown(Vec<Param>),
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::CandidateList(_) => EventType::CandidateList,
            Event::CommitString(_) => EventType::CommitString,
            Event::ClientPreedit(_) => EventType::ClientPreedit,
            Event::InputPanel(_) => EventType::InputPanel,
            Event::Ready => EventType::Ready,
            Event::Key(_) => EventType::Key,
            Event::InputMethodChange(_) => EventType::InputMethodChange,
            Event::StatusArea(_) => EventType::StatusArea,
            Event::DeleteSurrounding(_) => EventType::DeleteSurrounding,
            Event::PagedCandidate(_) => EventType::PagedCandidate,
            Event::Unknown(_) => EventType::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Event::Unknown(_))
    }
}

/// Why a `(tag, params)` pair could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Unrecognized event tag: {0}")]
    UnrecognizedTag(i32),

    #[error("Malformed {event} parameter at slot {slot}: expected {expected}, found {}", describe_found(.found))]
    MalformedParameter {
        event: EventType,
        slot: usize,
        expected: ParamKind,
        found: Option<ParamKind>,
    },

    #[error("Malformed {event} parameter at slot {slot}: array needs {needed} elements, has {actual}")]
    ShortArray {
        event: EventType,
        slot: usize,
        needed: usize,
        actual: usize,
    },

    #[error("Malformed {event} parameter at slot {slot}: value {value} out of range")]
    OutOfRange {
        event: EventType,
        slot: usize,
        value: i32,
    },
}

fn describe_found(found: &Option<ParamKind>) -> String {
    match found {
        Some(kind) => kind.to_string(),
        None => "nothing".to_string(),
    }
}

/// Decode an engine event, reporting why decoding failed.
///
/// Extraction is all-or-nothing: any bad slot fails the whole event.
/// Parameters past the expected arity are ignored.
pub fn try_decode(tag: i32, params: &[Param]) -> Result<Event, DecodeError> {
    let event_type = match EventType::from_tag(tag) {
        Some(EventType::Unknown) | None => return Err(DecodeError::UnrecognizedTag(tag)),
        Some(t) => t,
    };
    let p = ParamReader::new(event_type, params);

    let event = match event_type {
        EventType::CandidateList => Event::CandidateList(CandidateListData {
            total: p.int(0)?,
            candidates: p.str_array(1)?,
            current_page: p.int(2)?,
        }),
        EventType::CommitString => Event::CommitString(CommitStringData {
            text: p.string(0)?,
            cursor: p.int(1)?,
        }),
        EventType::ClientPreedit => Event::ClientPreedit(p.text(0)?),
        EventType::InputPanel => Event::InputPanel(InputPanelData {
            preedit: p.text(0)?,
            aux_up: p.text(1)?,
            aux_down: p.text(2)?,
        }),
        EventType::Ready => Event::Ready,
        EventType::Key => {
            let raw = p.int(0)?;
            let sym = u32::try_from(raw).map_err(|_| DecodeError::OutOfRange {
                event: event_type,
                slot: 0,
                value: raw,
            })?;
            Event::Key(KeyEventData {
                sym: KeySym(sym),
                states: KeyStates::from_raw(p.int(1)?),
                unicode: p.int(2)?,
                up: p.boolean(3)?,
                timestamp: p.int(4)?,
            })
        }
        EventType::InputMethodChange => Event::InputMethodChange(p.input_method(0)?),
        EventType::StatusArea => Event::StatusArea(StatusAreaData {
            actions: p.actions(0)?,
            im: p.input_method(1)?,
        }),
        EventType::DeleteSurrounding => {
            let range = p.int_array_min(0, 2)?;
            Event::DeleteSurrounding(DeleteSurroundingData {
                before: range[0],
                after: range[1],
            })
        }
        EventType::PagedCandidate if p.len() == 0 => {
            Event::PagedCandidate(PagedCandidateData::EMPTY)
        }
        EventType::PagedCandidate => {
            let hint = p.int(2)?;
            let layout_hint = LayoutHint::from_i32(hint).ok_or(DecodeError::OutOfRange {
                event: event_type,
                slot: 2,
                value: hint,
            })?;
            Event::PagedCandidate(PagedCandidateData {
                candidates: p.candidates(0)?,
                cursor_index: p.int(1)?,
                layout_hint,
                has_prev: p.boolean(3)?,
                has_next: p.boolean(4)?,
                current_page: p.int(5)?,
            })
        }
        EventType::Unknown => return Err(DecodeError::UnrecognizedTag(tag)),
    };

    if p.len() > expected_arity(event_type) {
        log::trace!(
            "{} event carried {} params, {} used",
            event_type,
            p.len(),
            expected_arity(event_type)
        );
    }

    Ok(event)
}

/// Decode an engine event. Never fails: anything that cannot be decoded
/// comes back as [`Event::Unknown`] with the original parameters.
pub fn decode(tag: i32, params: Vec<Param>) -> Event {
    match try_decode(tag, &params) {
        Ok(event) => event,
        Err(err @ DecodeError::UnrecognizedTag(_)) => {
            log::debug!("{}", err);
            Event::Unknown(params)
        }
        Err(err) => {
            log::warn!("{}", err);
            Event::Unknown(params)
        }
    }
}

fn expected_arity(event_type: EventType) -> usize {
    match event_type {
        EventType::CandidateList => 3,
        EventType::CommitString => 2,
        EventType::ClientPreedit => 1,
        EventType::InputPanel => 3,
        EventType::Ready => 0,
        EventType::Key => 5,
        EventType::InputMethodChange => 1,
        EventType::StatusArea => 2,
        EventType::DeleteSurrounding => 1,
        EventType::PagedCandidate => 6,
        EventType::Unknown => 0,
    }
}
