// Fcitx-kbd Settings Module
// User preferences for the keyboard, candidate window and punctuation mapping

#![cfg(feature = "settings")]

use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use strum::IntoEnumIterator;

use crate::device::{CandidateWindowConfig, FloatingCandidatesMode};

/// Preferences loaded from a TOML file
/// (default: ~/.config/fcitx-kbd/settings.toml).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Letter keys always show uppercase labels
    keep_letters_uppercase: bool,

    show_lang_switch_key: bool,

    candidates: CandidateWindowConfig,

    /// Punctuation replacements, in file order
    punctuation: IndexMap<String, String>,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    keyboard: Option<KeyboardSection>,

    #[serde(default)]
    candidates: Option<CandidatesSection>,

    #[serde(default)]
    punctuation: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct KeyboardSection {
    #[serde(default)]
    keep_letters_uppercase: Option<toml::Value>,
    #[serde(default)]
    show_lang_switch_key: Option<toml::Value>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct CandidatesSection {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    floating_window: Option<toml::Value>,
    #[serde(default)]
    hide_candidates: Option<toml::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        Self {
            keep_letters_uppercase: false,
            show_lang_switch_key: true,
            candidates: CandidateWindowConfig::default(),
            punctuation: IndexMap::new(),
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        log::debug!("loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let parsed: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(keyboard) = parsed.keyboard {
            if let Some(v) = keyboard.keep_letters_uppercase {
                settings.keep_letters_uppercase = parse_bool_value(&v)?;
            }
            if let Some(v) = keyboard.show_lang_switch_key {
                settings.show_lang_switch_key = parse_bool_value(&v)?;
            }
        }

        if let Some(candidates) = parsed.candidates {
            if let Some(mode) = candidates.mode {
                settings.candidates.mode = parse_mode(&mode)?;
            }
            if let Some(v) = candidates.floating_window {
                settings.candidates.floating_window = parse_bool_value(&v)?;
            }
            if let Some(v) = candidates.hide_candidates {
                settings.candidates.hide_candidates = parse_bool_value(&v)?;
            }
        }

        if let Some(punctuation) = parsed.punctuation {
            for (from, to) in &punctuation {
                if from.is_empty() {
                    return Err(SettingsError::InvalidValue(format!(
                        "Empty punctuation key mapped to '{}'",
                        to
                    )));
                }
            }
            settings.punctuation = punctuation;
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fcitx-kbd").join("settings.toml"))
    }

    /// Load from default location (~/.config/fcitx-kbd/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        log::debug!("no settings file, using defaults");
        Ok(Self::new())
    }

    pub fn keep_letters_uppercase(&self) -> bool {
        self.keep_letters_uppercase
    }

    pub fn show_lang_switch_key(&self) -> bool {
        self.show_lang_switch_key
    }

    pub fn candidates(&self) -> CandidateWindowConfig {
        self.candidates
    }

    pub fn punctuation(&self) -> &IndexMap<String, String> {
        &self.punctuation
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, SettingsError> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(SettingsError::InvalidValue(format!(
                "Cannot convert '{}' to boolean",
                s
            ))),
        },
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to boolean",
            value
        ))),
    }
}

fn parse_mode(value: &str) -> Result<FloatingCandidatesMode, SettingsError> {
    FloatingCandidatesMode::from_str(value).map_err(|_| {
        let valid: Vec<String> = FloatingCandidatesMode::iter().map(|m| m.to_string()).collect();
        SettingsError::InvalidValue(format!(
            "Unknown candidates mode '{}' (expected one of: {})",
            value,
            valid.join(", ")
        ))
    })
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# fcitx-kbd Settings
# Place this file at: ~/.config/fcitx-kbd/settings.toml

[keyboard]
keep_letters_uppercase = false
show_lang_switch_key = true

[candidates]
# "SystemDefault", "InputDevice" or "Disabled"
mode = "SystemDefault"
floating_window = false
hide_candidates = false

[punctuation]
# Replacements applied to punctuation keys, e.g. for Chinese input:
# "," = "，"
# "." = "。"
"#
}
