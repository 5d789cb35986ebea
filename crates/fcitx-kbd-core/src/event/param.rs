// Fcitx-kbd Event Parameters
// Untyped values crossing the engine bridge and slot-checked extraction

use std::fmt;

use serde::{Deserialize, Serialize};

use super::decode::{DecodeError, EventType};
use super::types::{Candidate, FormattedText, InputMethodEntry, StatusAction};

/// A single untyped value as delivered by the engine callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    Int(i32),
    Bool(bool),
    Str(String),
    StrArray(Vec<String>),
    IntArray(Vec<i32>),
    Text(FormattedText),
    InputMethod(InputMethodEntry),
    Actions(Vec<StatusAction>),
    Candidates(Vec<Candidate>),
}

/// Runtime shape of a [`Param`], used in decode diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Int,
    Bool,
    Str,
    StrArray,
    IntArray,
    Text,
    InputMethod,
    Actions,
    Candidates,
}

impl Param {
    pub fn kind(&self) -> ParamKind {
        match self {
            Param::Int(_) => ParamKind::Int,
            Param::Bool(_) => ParamKind::Bool,
            Param::Str(_) => ParamKind::Str,
            Param::StrArray(_) => ParamKind::StrArray,
            Param::IntArray(_) => ParamKind::IntArray,
            Param::Text(_) => ParamKind::Text,
            Param::InputMethod(_) => ParamKind::InputMethod,
            Param::Actions(_) => ParamKind::Actions,
            Param::Candidates(_) => ParamKind::Candidates,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Int => "int",
            ParamKind::Bool => "bool",
            ParamKind::Str => "string",
            ParamKind::StrArray => "string[]",
            ParamKind::IntArray => "int[]",
            ParamKind::Text => "formatted-text",
            ParamKind::InputMethod => "input-method",
            ParamKind::Actions => "action[]",
            ParamKind::Candidates => "candidate[]",
        };
        f.write_str(name)
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Param::Int(v)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Param::Bool(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Str(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Str(v)
    }
}

impl From<FormattedText> for Param {
    fn from(v: FormattedText) -> Self {
        Param::Text(v)
    }
}

impl From<InputMethodEntry> for Param {
    fn from(v: InputMethodEntry) -> Self {
        Param::InputMethod(v)
    }
}

/// Positional reader over an event's parameters.
///
/// Every accessor names the slot it reads so a shape mismatch reports which
/// slot failed and what it held.
pub(crate) struct ParamReader<'a> {
    event: EventType,
    params: &'a [Param],
}

macro_rules! slot_accessor {
    ($name:ident, $variant:ident, $out:ty) => {
        pub(crate) fn $name(&self, slot: usize) -> Result<$out, DecodeError> {
            match self.params.get(slot) {
                Some(Param::$variant(v)) => Ok(v.clone()),
                other => Err(self.mismatch(slot, ParamKind::$variant, other)),
            }
        }
    };
}

impl<'a> ParamReader<'a> {
    pub(crate) fn new(event: EventType, params: &'a [Param]) -> Self {
        Self { event, params }
    }

    pub(crate) fn len(&self) -> usize {
        self.params.len()
    }

    fn mismatch(&self, slot: usize, expected: ParamKind, found: Option<&Param>) -> DecodeError {
        DecodeError::MalformedParameter {
            event: self.event,
            slot,
            expected,
            found: found.map(Param::kind),
        }
    }

    slot_accessor!(int, Int, i32);
    slot_accessor!(boolean, Bool, bool);
    slot_accessor!(string, Str, String);
    slot_accessor!(str_array, StrArray, Vec<String>);
    slot_accessor!(int_array, IntArray, Vec<i32>);
    slot_accessor!(text, Text, FormattedText);
    slot_accessor!(input_method, InputMethod, InputMethodEntry);
    slot_accessor!(actions, Actions, Vec<StatusAction>);
    slot_accessor!(candidates, Candidates, Vec<Candidate>);

    /// Int array holding at least `n` elements.
    pub(crate) fn int_array_min(&self, slot: usize, n: usize) -> Result<Vec<i32>, DecodeError> {
        let values = self.int_array(slot)?;
        if values.len() < n {
            return Err(DecodeError::ShortArray {
                event: self.event,
                slot,
                needed: n,
                actual: values.len(),
            });
        }
        Ok(values)
    }
}
