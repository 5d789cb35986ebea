// Fcitx-kbd Event Module
// Typed events decoded from the engine bridge and their routing

mod decode;
mod handler;
mod param;
pub mod types;

pub use decode::{decode, try_decode, DecodeError, Event, EventType};
pub use handler::{route_event, route_event_all, EventHandler};
pub use param::{Param, ParamKind};
pub use types::{
    Candidate, CandidateListData, CommitStringData, DeleteSurroundingData, FormattedSegment,
    FormattedText, InputMethodEntry, InputMethodSubMode, InputPanelData, KeyEventData, LayoutHint,
    PagedCandidateData, StatusAction, StatusAreaData, TextFormatFlags,
};
