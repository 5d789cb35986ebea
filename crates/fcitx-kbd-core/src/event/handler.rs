// Fcitx-kbd Event Routing
// Hands each decoded event to the consumer registered for its kind

use super::decode::Event;
use super::param::Param;
use super::types::{
    CandidateListData, CommitStringData, DeleteSurroundingData, FormattedText, InputMethodEntry,
    InputPanelData, KeyEventData, PagedCandidateData, StatusAreaData,
};

/// Consumer of decoded engine events. Every method defaults to doing nothing,
/// so implementors only override the kinds they care about.
pub trait EventHandler {
    fn on_candidate_list(&mut self, _data: &CandidateListData) {}
    fn on_commit_string(&mut self, _data: &CommitStringData) {}
    fn on_client_preedit(&mut self, _text: &FormattedText) {}
    fn on_input_panel(&mut self, _data: &InputPanelData) {}
    fn on_ready(&mut self) {}
    fn on_key(&mut self, _data: &KeyEventData) {}
    fn on_input_method_change(&mut self, _im: &InputMethodEntry) {}
    fn on_status_area(&mut self, _data: &StatusAreaData) {}
    fn on_delete_surrounding(&mut self, _data: &DeleteSurroundingData) {}
    fn on_paged_candidate(&mut self, _data: &PagedCandidateData) {}
    fn on_unknown(&mut self, params: &[Param]) {
        log::debug!("unhandled engine event with {} params", params.len());
    }
}

/// Call exactly one handler method for `event`.
pub fn route_event<H: EventHandler + ?Sized>(event: &Event, handler: &mut H) {
    match event {
        Event::CandidateList(data) => handler.on_candidate_list(data),
        Event::CommitString(data) => handler.on_commit_string(data),
        Event::ClientPreedit(text) => handler.on_client_preedit(text),
        Event::InputPanel(data) => handler.on_input_panel(data),
        Event::Ready => handler.on_ready(),
        Event::Key(data) => handler.on_key(data),
        Event::InputMethodChange(im) => handler.on_input_method_change(im),
        Event::StatusArea(data) => handler.on_status_area(data),
        Event::DeleteSurrounding(data) => handler.on_delete_surrounding(data),
        Event::PagedCandidate(data) => handler.on_paged_candidate(data),
        Event::Unknown(params) => handler.on_unknown(params),
    }
}

/// Fan an event out to several handlers in order.
pub fn route_event_all(event: &Event, handlers: &mut [&mut dyn EventHandler]) {
    for handler in handlers.iter_mut() {
        route_event(event, &mut **handler);
    }
}
