// Fcitx-kbd CLI
// Replays engine events and key presses from a scenario file against the text keyboard

#![cfg_attr(not(feature = "cli"), allow(dead_code))]

use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use indexmap::IndexMap;
#[cfg(feature = "cli")]
use serde::Deserialize;

#[cfg(feature = "cli")]
use fcitx_kbd_core::event::{decode, route_event, InputMethodEntry, Param};
#[cfg(feature = "cli")]
use fcitx_kbd_core::keyboard::{
    ActionSink, CapsState, Gesture, KeyLabel, KeyPos, KeyRole, KeyboardEventBridge, TextKeyboard,
};
#[cfg(feature = "cli")]
use fcitx_kbd_core::settings::Settings;
#[cfg(feature = "cli")]
use fcitx_kbd_core::{KeyAction, Source};

/// On-screen keyboard dispatch simulator
#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "fcitx-kbd")]
#[command(author = "fcitx-kbd contributors")]
#[command(version = "0.3.0")]
#[command(about = "Replay engine events and key presses against the text keyboard", long_about = None)]
struct Args {
    /// Settings file (defaults to ~/.config/fcitx-kbd/settings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Scenario file to replay
    #[arg(short, long, value_name = "SCENARIO")]
    script: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate settings and exit
    #[arg(long)]
    check_config: bool,
}

/// Errors reading a scenario file
#[cfg(feature = "cli")]
#[derive(Debug, thiserror::Error)]
enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Parse(String),

    #[error("Step {step}: no key labelled '{label}'")]
    UnknownKey { step: usize, label: String },
}

#[cfg(feature = "cli")]
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default, rename = "step")]
    steps: Vec<Step>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Step {
    /// Raw engine callback
    Event {
        tag: i32,
        #[serde(default)]
        params: Vec<Param>,
    },
    /// Key of the text layout, addressed by label
    Key {
        label: String,
        #[serde(default = "default_gesture")]
        gesture: Gesture,
    },
    /// Character picked from a popup keyboard
    Popup { text: String },
    /// Switch to another input method
    Im {
        name: String,
        label: String,
        #[serde(default)]
        sub_mode: String,
    },
    Punctuation { mapping: IndexMap<String, String> },
}

#[cfg(feature = "cli")]
fn default_gesture() -> Gesture {
    Gesture::Press
}

#[cfg(feature = "cli")]
impl Scenario {
    fn from_toml(content: &str) -> Result<Self, ScenarioError> {
        toml::from_str(content).map_err(|e| ScenarioError::Parse(e.to_string()))
    }

    fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Prints what the engine would receive
#[cfg(feature = "cli")]
#[derive(Debug, Default)]
struct PrintSink {
    sent: usize,
}

#[cfg(feature = "cli")]
impl ActionSink for PrintSink {
    fn send(&mut self, action: &KeyAction, source: Source) {
        self.sent += 1;
        println!("  -> {} ({:?})", action, source);
    }

    fn on_caps_changed(&mut self, state: CapsState, letters: &[KeyLabel]) {
        let sample: String = letters.iter().take(3).map(|l| l.text.as_str()).collect();
        log::debug!("caps {} ({} letters, {}...)", state, letters.len(), sample);
    }
}

#[cfg(feature = "cli")]
fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load_default()?,
    };
    Ok(settings)
}

#[cfg(feature = "cli")]
fn build_keyboard(settings: &Settings) -> TextKeyboard<PrintSink> {
    let mut keyboard = TextKeyboard::new(PrintSink::default());
    keyboard.set_keep_letters_uppercase(settings.keep_letters_uppercase());
    keyboard.set_show_lang_switch_key(settings.show_lang_switch_key());
    keyboard.set_punctuation_mapping(settings.punctuation().clone());
    keyboard
}

/// Find a key by its label, or by role name for keys drawn as icons
#[cfg(feature = "cli")]
fn resolve_key(keyboard: &TextKeyboard<PrintSink>, label: &str) -> Option<KeyPos> {
    if let Some(pos) = keyboard.position_of(label) {
        return Some(pos);
    }
    let role = match label.to_lowercase().as_str() {
        "caps" | "shift" => KeyRole::Caps,
        "backspace" => KeyRole::Backspace,
        "return" | "enter" => KeyRole::Return,
        "space" => KeyRole::Space,
        "lang" | "language" => KeyRole::Language,
        "?123" | "esc" => KeyRole::LayoutSwitch,
        _ => return None,
    };
    keyboard.position_of_role(role)
}

#[cfg(feature = "cli")]
fn run_step(
    keyboard: &mut TextKeyboard<PrintSink>,
    index: usize,
    step: Step,
) -> Result<(), ScenarioError> {
    match step {
        Step::Event { tag, params } => {
            let event = decode(tag, params);
            println!("[{}] event {} -> {:?}", index, tag, event);
            route_event(&event, &mut KeyboardEventBridge::new(keyboard));
        }
        Step::Key { label, gesture } => {
            println!("[{}] key '{}' {:?}", index, label, gesture);
            let pos = resolve_key(keyboard, &label).ok_or_else(|| ScenarioError::UnknownKey {
                step: index,
                label: label.clone(),
            })?;
            if keyboard.press(pos, gesture).is_none() {
                println!("  (no action)");
            }
        }
        Step::Popup { text } => {
            println!("[{}] popup '{}'", index, text);
            keyboard.pick_popup(&text);
        }
        Step::Im {
            name,
            label,
            sub_mode,
        } => {
            let mut im = InputMethodEntry::new(name.to_lowercase(), name, label);
            im.sub_mode.name = sub_mode;
            let space = keyboard.on_input_method_update(&im);
            println!("[{}] input method -> space label '{}'", index, space);
        }
        Step::Punctuation { mapping } => {
            println!("[{}] punctuation mapping ({} entries)", index, mapping.len());
            keyboard.set_punctuation_mapping(mapping);
        }
    }
    println!("  caps: {}", keyboard.caps_state());
    Ok(())
}

#[cfg(feature = "cli")]
fn check_config(settings: &Settings) {
    match settings.source_path() {
        Some(path) => println!("Settings: {}", path.display()),
        None => println!("Settings: defaults"),
    }
    let candidates = settings.candidates();
    println!("  keep_letters_uppercase = {}", settings.keep_letters_uppercase());
    println!("  show_lang_switch_key = {}", settings.show_lang_switch_key());
    println!("  candidates.mode = {}", candidates.mode);
    println!("  candidates.floating_window = {}", candidates.floating_window);
    println!("  candidates.hide_candidates = {}", candidates.hide_candidates);
    for (from, to) in settings.punctuation() {
        println!("  punctuation '{}' -> '{}'", from, to);
    }
    println!("Configuration is valid");
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let settings = load_settings(args.config.as_deref())?;

    if args.check_config {
        check_config(&settings);
        return Ok(());
    }

    let script = args
        .script
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--script is required unless --check-config is given"))?;
    let scenario = Scenario::from_file(script)?;
    log::info!("replaying {} steps from {}", scenario.steps.len(), script.display());

    let mut keyboard = build_keyboard(&settings);
    for (index, step) in scenario.steps.into_iter().enumerate() {
        run_step(&mut keyboard, index, step)?;
    }
    log::info!("{} actions dispatched", keyboard.sink().sent);
    Ok(())
}

// Stub for when cli feature is not enabled
#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("Error: fcitx-kbd binary requires the 'cli' feature to be enabled.");
    eprintln!("Please build with: cargo build --release --features cli --bin fcitx-kbd");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "cli")]
    fn test_args_parsing() {
        let args = Args::parse_from(["fcitx-kbd", "--script", "/tmp/session.toml"]);

        assert_eq!(args.script, Some(PathBuf::from("/tmp/session.toml")));
        assert!(args.config.is_none());
        assert!(!args.verbose);
        assert!(!args.check_config);
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_args_check_config() {
        let args = Args::parse_from(["fcitx-kbd", "-c", "/tmp/settings.toml", "--check-config", "-v"]);

        assert!(args.check_config);
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/settings.toml")));
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_scenario_parsing() {
        let scenario = Scenario::from_toml(
            r#"
            [[step]]
            kind = "event"
            tag = 1
            params = [{ str = "hello" }, { int = 3 }]

            [[step]]
            kind = "key"
            label = "q"

            [[step]]
            kind = "key"
            label = "q"
            gesture = "DoubleTap"

            [[step]]
            kind = "punctuation"
            mapping = { "," = "，" }
            "#,
        )
        .unwrap();

        assert_eq!(scenario.steps.len(), 4);
        match &scenario.steps[0] {
            Step::Event { tag, params } => {
                assert_eq!(*tag, 1);
                assert_eq!(params, &vec![Param::Str("hello".into()), Param::Int(3)]);
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert!(matches!(&scenario.steps[1], Step::Key { gesture: Gesture::Press, .. }));
        assert!(matches!(&scenario.steps[2], Step::Key { gesture: Gesture::DoubleTap, .. }));
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_scenario_rejects_unknown_kind() {
        let err = Scenario::from_toml("[[step]]\nkind = \"teleport\"\n").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_run_steps() {
        let mut keyboard = build_keyboard(&Settings::new());
        let press = Step::Key {
            label: "q".to_string(),
            gesture: Gesture::Press,
        };
        run_step(&mut keyboard, 0, press).unwrap();
        assert_eq!(keyboard.sink().sent, 1);

        let missing = Step::Key {
            label: "ß".to_string(),
            gesture: Gesture::Press,
        };
        assert!(matches!(
            run_step(&mut keyboard, 1, missing),
            Err(ScenarioError::UnknownKey { step: 1, .. })
        ));

        let im = Step::Im {
            name: "Pinyin".to_string(),
            label: "拼".to_string(),
            sub_mode: String::new(),
        };
        run_step(&mut keyboard, 2, im).unwrap();
        assert_eq!(keyboard.space_label(), "拼");
        assert_eq!(keyboard.caps_state(), CapsState::None);
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_resolve_icon_keys_by_role() {
        let keyboard = build_keyboard(&Settings::new());
        assert_eq!(
            resolve_key(&keyboard, "caps"),
            keyboard.position_of_role(KeyRole::Caps)
        );
        assert_eq!(resolve_key(&keyboard, "Q"), keyboard.position_of("q"));
        assert!(resolve_key(&keyboard, "hyper").is_none());
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_demo_session_parses() {
        let content = include_str!("../../demos/session.toml");
        let scenario = Scenario::from_toml(content).unwrap();
        let mut keyboard = build_keyboard(&Settings::new());
        for (index, step) in scenario.steps.into_iter().enumerate() {
            run_step(&mut keyboard, index, step).unwrap();
        }
        assert_eq!(keyboard.space_label(), "拼");
        assert_eq!(keyboard.sink().sent, 7);
    }
}
