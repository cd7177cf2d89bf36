use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::action_id::parse_action_id;
use super::keymap::{KeyBinding, KeyPattern, Keymap};
use super::layer::Layer;
use super::KeyCode;

/// Raw TOML structure for the keybindings config file
#[derive(Deserialize)]
struct KeybindingConfig {
    #[allow(dead_code)]
    version: u32,
    layers: HashMap<String, LayerConfig>,
}

#[derive(Deserialize)]
struct LayerConfig {
    #[serde(default = "default_transparent")]
    transparent: bool,
    bindings: Vec<RawBinding>,
}

fn default_transparent() -> bool {
    true
}

/// A single binding entry from TOML
#[derive(Deserialize)]
struct RawBinding {
    key: String,
    action: String,
    description: String,
}

/// Intern a String into a &'static str.
/// These are loaded once at startup and never freed.
fn intern(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

/// Parse a key notation string into a KeyPattern.
///
/// Supported formats:
/// - `"q"` → Char('q')
/// - `"Space"` → Char(' ')
/// - `"Up"` → Key(KeyCode::Up)
/// - `"Ctrl+c"` → Ctrl('c')
/// - `"Alt+x"` → Alt('x')
/// - `"Shift+Tab"` → ShiftKey(KeyCode::Tab)
/// - `"F1"` → Key(KeyCode::F(1))
///
/// Returns `None` for unrecognised key names (e.g. from a malformed user config).
fn parse_key(s: &str) -> Option<KeyPattern> {
    if let Some(rest) = s.strip_prefix("Ctrl+") {
        single_char(rest)
            .map(KeyPattern::Ctrl)
            .or_else(|| parse_named_key(rest).map(KeyPattern::CtrlKey))
    } else if let Some(rest) = s.strip_prefix("Alt+") {
        single_char(rest).map(KeyPattern::Alt)
    } else if let Some(rest) = s.strip_prefix("Shift+") {
        parse_named_key(rest).map(KeyPattern::ShiftKey)
    } else if let Some(c) = single_char(s) {
        Some(KeyPattern::Char(c))
    } else if s == "Space" {
        Some(KeyPattern::Char(' '))
    } else {
        parse_named_key(s).map(KeyPattern::Key)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Parse a named key string (e.g., "Up", "Enter", "F1") into a KeyCode.
/// Returns `None` for unrecognised key names.
fn parse_named_key(s: &str) -> Option<KeyCode> {
    match s {
        "Up" => Some(KeyCode::Up),
        "Down" => Some(KeyCode::Down),
        "Left" => Some(KeyCode::Left),
        "Right" => Some(KeyCode::Right),
        "Enter" => Some(KeyCode::Enter),
        "Escape" | "Esc" => Some(KeyCode::Escape),
        "Backspace" => Some(KeyCode::Backspace),
        "Tab" => Some(KeyCode::Tab),
        "Home" => Some(KeyCode::Home),
        "End" => Some(KeyCode::End),
        "PageUp" => Some(KeyCode::PageUp),
        "PageDown" => Some(KeyCode::PageDown),
        "Insert" => Some(KeyCode::Insert),
        "Delete" => Some(KeyCode::Delete),
        _ if s.starts_with('F') => s[1..].parse::<u8>().ok().map(KeyCode::F),
        _ => None,
    }
}

/// Embedded default keybindings TOML
const DEFAULT_KEYBINDINGS: &str = include_str!("../../keybindings.toml");

/// Load keybindings: embedded default, optionally merged with
/// `~/.config/metrognome/keybindings.toml`.
pub fn load_keybindings() -> Vec<Layer> {
    load_keybindings_with_override(user_keybindings_path().as_deref())
}

/// Load keybindings with an explicit override file. Layers present in the
/// override fully replace the default layer of the same name.
pub fn load_keybindings_with_override(user_path: Option<&Path>) -> Vec<Layer> {
    let mut config: KeybindingConfig =
        toml::from_str(DEFAULT_KEYBINDINGS).expect("Failed to parse embedded keybindings.toml");

    if let Some(path) = user_path {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<KeybindingConfig>(&contents) {
                    Ok(user_config) => merge_config(&mut config, user_config),
                    Err(e) => {
                        log::warn!(target: "ui::keybindings", "ignoring malformed keybindings {}: {}", path.display(), e)
                    }
                },
                Err(e) => {
                    log::warn!(target: "ui::keybindings", "could not read keybindings {}: {}", path.display(), e)
                }
            }
        }
    }

    build_layers(&config.layers)
}

fn user_keybindings_path() -> Option<PathBuf> {
    metrognome_core::config::config_dir().map(|d| d.join("keybindings.toml"))
}

fn merge_config(base: &mut KeybindingConfig, user: KeybindingConfig) {
    for (layer_id, layer_config) in user.layers {
        base.layers.insert(layer_id, layer_config);
    }
}

fn build_bindings(layer_name: &str, raw: &[RawBinding]) -> Vec<KeyBinding> {
    raw.iter()
        .filter_map(|b| {
            let pattern = match parse_key(&b.key) {
                Some(p) => p,
                None => {
                    log::warn!(target: "ui::keybindings", "ignoring unknown key '{}' in keybindings", b.key);
                    return None;
                }
            };
            match parse_action_id(layer_name, &b.action) {
                Some(action_id) => Some(KeyBinding {
                    pattern,
                    action: action_id,
                    description: intern(b.description.clone()),
                }),
                None => {
                    log::warn!(target: "ui::keybindings", "ignoring unknown action '{}' in layer '{}'", b.action, layer_name);
                    None
                }
            }
        })
        .collect()
}

fn build_layers(layers: &HashMap<String, LayerConfig>) -> Vec<Layer> {
    layers
        .iter()
        .map(|(name, config)| Layer {
            name: intern(name.clone()),
            keymap: Keymap::from_bindings(build_bindings(name, &config.bindings)),
            transparent: config.transparent,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::action_id::{ActionId, GlobalActionId, PresetsActionId};
    use crate::ui::{InputEvent, LayerResult, LayerStack, Modifiers};
    use std::io::Write;

    #[test]
    fn test_parse_key_char() {
        assert_eq!(parse_key("q"), Some(KeyPattern::Char('q')));
        assert_eq!(parse_key("?"), Some(KeyPattern::Char('?')));
    }

    #[test]
    fn test_parse_key_named() {
        assert_eq!(parse_key("Up"), Some(KeyPattern::Key(KeyCode::Up)));
        assert_eq!(parse_key("Enter"), Some(KeyPattern::Key(KeyCode::Enter)));
        assert_eq!(parse_key("Escape"), Some(KeyPattern::Key(KeyCode::Escape)));
        assert_eq!(parse_key("Space"), Some(KeyPattern::Char(' ')));
        assert_eq!(parse_key("F12"), Some(KeyPattern::Key(KeyCode::F(12))));
    }

    #[test]
    fn test_parse_key_modifiers() {
        assert_eq!(parse_key("Ctrl+c"), Some(KeyPattern::Ctrl('c')));
        assert_eq!(parse_key("Alt+x"), Some(KeyPattern::Alt('x')));
        assert_eq!(
            parse_key("Shift+Tab"),
            Some(KeyPattern::ShiftKey(KeyCode::Tab))
        );
    }

    #[test]
    fn test_parse_key_unknown() {
        assert_eq!(parse_key("Bogus"), None);
        assert_eq!(parse_key("Ctrl+Bogus"), None);
        assert_eq!(parse_key("Shift+Bogus"), None);
        assert_eq!(parse_key("Alt+"), None);
    }

    fn default_stack() -> LayerStack {
        let mut stack = LayerStack::new(load_keybindings_with_override(None));
        stack.push("global");
        stack
    }

    #[test]
    fn test_load_embedded_keybindings() {
        let layers = load_keybindings_with_override(None);
        let mut names: Vec<&str> = layers.iter().map(|l| l.name).collect();
        names.sort();
        assert_eq!(names, vec!["global", "presets"]);
    }

    #[test]
    fn test_default_global_keys() {
        let stack = default_stack();
        let resolve = |key, modifiers| stack.resolve(&InputEvent::new(key, modifiers));
        assert_eq!(
            resolve(KeyCode::Char(' '), Modifiers::none()),
            LayerResult::Action(ActionId::Global(GlobalActionId::PlayStop))
        );
        assert_eq!(
            resolve(KeyCode::Char('c'), Modifiers::ctrl()),
            LayerResult::Action(ActionId::Global(GlobalActionId::Quit))
        );
        assert_eq!(
            resolve(KeyCode::Tab, Modifiers::shift()),
            LayerResult::Action(ActionId::Global(GlobalActionId::PrevSignature))
        );
        assert_eq!(
            resolve(KeyCode::Left, Modifiers::none()),
            LayerResult::Unresolved
        );
    }

    #[test]
    fn test_presets_layer_keys() {
        let mut stack = default_stack();
        stack.push("presets");
        assert_eq!(
            stack.resolve(&InputEvent::key(KeyCode::Enter)),
            LayerResult::Action(ActionId::Presets(PresetsActionId::Confirm))
        );
        assert_eq!(
            stack.resolve(&InputEvent::key(KeyCode::Char('l'))),
            LayerResult::Action(ActionId::Presets(PresetsActionId::Next))
        );
        // Global keys still reach through the transparent presets layer.
        assert_eq!(
            stack.resolve(&InputEvent::key(KeyCode::Char('p'))),
            LayerResult::Action(ActionId::Global(GlobalActionId::TogglePresets))
        );
    }

    #[test]
    fn test_user_layer_replaces_default_layer() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "version = 1\n[layers.global]\nbindings = [\n  {{ key = \"x\", action = \"quit\", description = \"Quit\" }},\n  {{ key = \"y\", action = \"nonsense\", description = \"?\" }},\n]\n"
        )
        .unwrap();
        let mut stack = LayerStack::new(load_keybindings_with_override(Some(file.path())));
        stack.push("global");
        assert_eq!(
            stack.resolve(&InputEvent::key(KeyCode::Char('x'))),
            LayerResult::Action(ActionId::Global(GlobalActionId::Quit))
        );
        assert_eq!(
            stack.resolve(&InputEvent::key(KeyCode::Char('q'))),
            LayerResult::Unresolved
        );
        // The presets layer was not overridden.
        stack.push("presets");
        assert_eq!(
            stack.resolve(&InputEvent::key(KeyCode::Enter)),
            LayerResult::Action(ActionId::Presets(PresetsActionId::Confirm))
        );
    }

    #[test]
    fn test_help_rows_cover_every_action() {
        let rows = default_stack().help_rows();
        assert_eq!(rows.len(), 13);
        assert_eq!(rows[0], ("Space".to_string(), "Start/stop the metronome".to_string()));
        assert!(rows.contains(&("Up/k".to_string(), "Increase tempo (+5 BPM)".to_string())));
        assert!(rows.contains(&("q/Ctrl+c".to_string(), "Quit".to_string())));
        assert!(rows.contains(&("Enter".to_string(), "Apply selected preset".to_string())));
    }
}
