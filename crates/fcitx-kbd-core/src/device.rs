// Fcitx-kbd Input Device Mode
// Chooses between the on-screen keyboard and a physical keyboard with floating candidates

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// How the floating candidate window is chosen.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum FloatingCandidatesMode {
    /// Follow the platform's decision on whether to show the input view
    #[default]
    SystemDefault,
    /// Follow the last device the user typed or touched with
    InputDevice,
    /// Always use the on-screen keyboard
    Disabled,
}

/// Candidate paging mode requested from the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum PagingMode {
    /// Candidates scroll in a horizontal bar
    #[default]
    Scroll = 0,
    /// Candidates are shown one page at a time
    Paged = 1,
}

impl PagingMode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Pointer tool reported by the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    Unknown,
    Finger,
    Stylus,
    Mouse,
    Eraser,
}

impl ToolType {
    /// Map an Android `MotionEvent.TOOL_TYPE_*` value.
    pub fn from_android(value: i32) -> Self {
        match value {
            1 => ToolType::Finger,
            2 => ToolType::Stylus,
            3 => ToolType::Mouse,
            4 => ToolType::Eraser,
            _ => ToolType::Unknown,
        }
    }

    fn is_touch(self) -> bool {
        matches!(self, ToolType::Finger | ToolType::Stylus)
    }
}

/// Candidate-window preferences the manager consults on every evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateWindowConfig {
    pub mode: FloatingCandidatesMode,
    /// Show the floating candidate window alongside the on-screen keyboard
    pub floating_window: bool,
    /// Hide candidates entirely while the on-screen keyboard is used
    pub hide_candidates: bool,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeDecision {
    pub use_virtual_keyboard: bool,
    /// New paging mode, only when it differs from the last one requested
    pub paging_mode_change: Option<PagingMode>,
    /// Whether the editor should report cursor anchor updates
    pub monitor_cursor_anchor: bool,
}

/// Result of a physical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDownOutcome {
    /// The input view must be shown even though no view was started
    pub force_show_input_view: bool,
    pub decision: Option<ModeDecision>,
}

#[derive(Debug, Clone)]
pub struct InputDeviceManager {
    config: CandidateWindowConfig,
    is_virtual_keyboard: bool,
    paging_mode: PagingMode,
    started_input_view: bool,
    null_input_type: bool,
}

impl Default for InputDeviceManager {
    fn default() -> Self {
        Self::new(CandidateWindowConfig::default())
    }
}

impl InputDeviceManager {
    pub fn new(config: CandidateWindowConfig) -> Self {
        Self {
            config,
            is_virtual_keyboard: true,
            paging_mode: PagingMode::Scroll,
            started_input_view: false,
            null_input_type: true,
        }
    }

    pub fn config(&self) -> &CandidateWindowConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CandidateWindowConfig) {
        self.config = config;
    }

    pub fn is_virtual_keyboard(&self) -> bool {
        self.is_virtual_keyboard
    }

    pub fn paging_mode(&self) -> PagingMode {
        self.paging_mode
    }

    /// Whether the floating candidate window should take input events.
    pub fn candidates_handle_events(&self) -> bool {
        if !self.is_virtual_keyboard {
            true
        } else if self.config.hide_candidates {
            false
        } else {
            self.config.floating_window
        }
    }

    fn apply_mode(&mut self, use_virtual_keyboard: bool) -> ModeDecision {
        let monitor_cursor_anchor = if !use_virtual_keyboard {
            true
        } else if self.config.hide_candidates {
            false
        } else {
            self.config.floating_window
        };

        let paging = if !use_virtual_keyboard
            || self.config.floating_window
            || self.config.hide_candidates
        {
            PagingMode::Paged
        } else {
            PagingMode::Scroll
        };
        let paging_mode_change = (paging != self.paging_mode).then(|| {
            log::debug!("candidate paging mode {:?} -> {:?}", self.paging_mode, paging);
            self.paging_mode = paging;
            paging
        });

        if use_virtual_keyboard != self.is_virtual_keyboard {
            log::info!(
                "switching to {} keyboard",
                if use_virtual_keyboard { "virtual" } else { "physical" }
            );
            self.is_virtual_keyboard = use_virtual_keyboard;
        }

        ModeDecision {
            use_virtual_keyboard,
            paging_mode_change,
            monitor_cursor_anchor,
        }
    }

    /// An input view starts. `null_input_type` is true when the editor
    /// reports no input class; `system_default` is the platform's own
    /// decision on showing the input view.
    pub fn evaluate_on_start_input_view(
        &mut self,
        null_input_type: bool,
        system_default: bool,
    ) -> ModeDecision {
        self.started_input_view = true;
        self.null_input_type = null_input_type;
        let use_virtual = match self.config.mode {
            FloatingCandidatesMode::SystemDefault => system_default,
            FloatingCandidatesMode::InputDevice => self.is_virtual_keyboard,
            FloatingCandidatesMode::Disabled => true,
        };
        self.apply_mode(use_virtual)
    }

    /// A physical key went down. Non-printing keys (back, home, volume)
    /// never change the mode.
    pub fn evaluate_on_key_down(
        &mut self,
        is_printing_key: bool,
        system_default: bool,
    ) -> KeyDownOutcome {
        if self.started_input_view {
            let decision = is_printing_key.then(|| self.evaluate_key_down_inner(system_default));
            return KeyDownOutcome {
                force_show_input_view: false,
                decision,
            };
        }
        let show = !self.null_input_type && is_printing_key;
        let decision = show.then(|| self.evaluate_key_down_inner(system_default));
        KeyDownOutcome {
            force_show_input_view: show,
            decision,
        }
    }

    fn evaluate_key_down_inner(&mut self, system_default: bool) -> ModeDecision {
        let use_virtual = match self.config.mode {
            FloatingCandidatesMode::SystemDefault => system_default,
            FloatingCandidatesMode::InputDevice => false,
            FloatingCandidatesMode::Disabled => true,
        };
        self.apply_mode(use_virtual)
    }

    /// The editor view was clicked. Ignored until an input view started.
    pub fn evaluate_on_view_clicked(&mut self, system_default: bool) -> Option<ModeDecision> {
        if !self.started_input_view {
            return None;
        }
        let use_virtual = match self.config.mode {
            FloatingCandidatesMode::SystemDefault => system_default,
            _ => true,
        };
        Some(self.apply_mode(use_virtual))
    }

    /// The editor reported the pointer tool in use. Touch tools switch to
    /// the virtual keyboard in `InputDevice` mode, other tools keep the
    /// current mode.
    pub fn evaluate_on_tool_type(
        &mut self,
        tool: ToolType,
        system_default: bool,
    ) -> Option<ModeDecision> {
        if !self.started_input_view {
            return None;
        }
        let use_virtual = match self.config.mode {
            FloatingCandidatesMode::SystemDefault => system_default,
            FloatingCandidatesMode::InputDevice => tool.is_touch() || self.is_virtual_keyboard,
            FloatingCandidatesMode::Disabled => true,
        };
        Some(self.apply_mode(use_virtual))
    }

    pub fn on_finish_input_view(&mut self) {
        self.started_input_view = false;
    }
}
