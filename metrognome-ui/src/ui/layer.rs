use std::collections::HashMap;

use super::action_id::ActionId;
use super::keymap::Keymap;
use super::InputEvent;

/// Layers in the order they are listed in the help overlay.
pub const LAYER_ORDER: &[&str] = &["global", "presets"];

/// A named layer with a keymap and transparency setting.
pub struct Layer {
    pub name: &'static str,
    pub keymap: Keymap,
    pub transparent: bool,
}

/// Result of resolving an input event through the layer stack.
#[derive(Debug, PartialEq, Eq)]
pub enum LayerResult {
    /// A layer matched the event with this action ID.
    Action(ActionId),
    /// An opaque layer blocked the event without matching it.
    Blocked,
    /// No layer matched the event and all layers were transparent.
    Unresolved,
}

/// A stack of named layers that resolves input events top-to-bottom.
pub struct LayerStack {
    layers: HashMap<&'static str, Layer>,
    active: Vec<&'static str>, // bottom-to-top
}

impl LayerStack {
    pub fn new(layers: Vec<Layer>) -> Self {
        let map: HashMap<&'static str, Layer> = layers
            .into_iter()
            .map(|l| (l.name, l))
            .collect();
        Self {
            layers: map,
            active: Vec::new(),
        }
    }

    /// Resolve an input event through the active layer stack (top-to-bottom).
    pub fn resolve(&self, event: &InputEvent) -> LayerResult {
        for name in self.active.iter().rev() {
            if let Some(layer) = self.layers.get(name) {
                if let Some(action) = layer.keymap.lookup(event) {
                    return LayerResult::Action(action);
                }
                if !layer.transparent {
                    return LayerResult::Blocked;
                }
            }
        }
        LayerResult::Unresolved
    }

    /// Push a named layer onto the top of the stack.
    pub fn push(&mut self, name: &'static str) {
        if !self.active.contains(&name) {
            self.active.push(name);
        }
    }

    /// Remove a named layer from the stack (wherever it is).
    pub fn pop(&mut self, name: &'static str) {
        self.active.retain(|n| *n != name);
    }

    /// Push or pop `name` so that its presence matches `active`.
    pub fn set_layer(&mut self, name: &'static str, active: bool) {
        if active {
            self.push(name);
        } else {
            self.pop(name);
        }
    }

    /// Check if a layer is currently active.
    #[cfg(test)]
    pub fn has_layer(&self, name: &str) -> bool {
        self.active.iter().any(|n| *n == name)
    }

    /// (keys, description) rows for every loaded layer, whether active or
    /// not. Keys bound to the same action are joined with `/`.
    pub fn help_rows(&self) -> Vec<(String, String)> {
        let mut rows: Vec<(ActionId, String, String)> = Vec::new();
        for name in LAYER_ORDER {
            let Some(layer) = self.layers.get(name) else {
                continue;
            };
            for binding in layer.keymap.bindings() {
                let key = binding.pattern.display();
                match rows.iter_mut().find(|(action, _, _)| *action == binding.action) {
                    Some((_, keys, _)) => {
                        keys.push('/');
                        keys.push_str(&key);
                    }
                    None => rows.push((binding.action, key, binding.description.to_string())),
                }
            }
        }
        rows.into_iter().map(|(_, keys, desc)| (keys, desc)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::action_id::{GlobalActionId, PresetsActionId};
    use crate::ui::input::KeyCode;

    fn make_layer(name: &'static str, key: char, transparent: bool) -> Layer {
        let action = ActionId::Global(GlobalActionId::Quit);
        Layer {
            name,
            keymap: Keymap::new().bind(key, action, "test"),
            transparent,
        }
    }

    fn make_event(ch: char) -> InputEvent {
        InputEvent::key(KeyCode::Char(ch))
    }

    #[test]
    fn push_deduplicates() {
        let mut stack = LayerStack::new(vec![make_layer("test", 'q', true)]);
        stack.push("test");
        stack.push("test");
        assert_eq!(stack.active.len(), 1);
    }

    #[test]
    fn set_layer_pushes_and_pops() {
        let mut stack = LayerStack::new(vec![make_layer("presets", 'q', true)]);
        stack.set_layer("presets", true);
        assert!(stack.has_layer("presets"));
        stack.set_layer("presets", false);
        assert!(!stack.has_layer("presets"));
    }

    #[test]
    fn resolve_empty_unresolved() {
        let stack = LayerStack::new(vec![]);
        assert_eq!(stack.resolve(&make_event('q')), LayerResult::Unresolved);
    }

    #[test]
    fn resolve_opaque_blocks() {
        let mut stack = LayerStack::new(vec![make_layer("opaque", 'q', false)]);
        stack.push("opaque");
        assert_eq!(stack.resolve(&make_event('x')), LayerResult::Blocked);
    }

    #[test]
    fn top_layer_wins() {
        let confirm = ActionId::Presets(PresetsActionId::Confirm);
        let mut stack = LayerStack::new(vec![
            make_layer("global", 'x', true),
            Layer {
                name: "presets",
                keymap: Keymap::new().bind('x', confirm, "confirm"),
                transparent: true,
            },
        ]);
        stack.push("global");
        assert_eq!(
            stack.resolve(&make_event('x')),
            LayerResult::Action(ActionId::Global(GlobalActionId::Quit))
        );
        stack.push("presets");
        assert_eq!(stack.resolve(&make_event('x')), LayerResult::Action(confirm));
    }

    #[test]
    fn help_rows_merge_keys_per_action() {
        let quit = ActionId::Global(GlobalActionId::Quit);
        let stack = LayerStack::new(vec![Layer {
            name: "global",
            keymap: Keymap::new().bind('q', quit, "Quit").bind_key(KeyCode::Escape, quit, "Quit"),
            transparent: true,
        }]);
        assert_eq!(
            stack.help_rows(),
            vec![("q/Esc".to_string(), "Quit".to_string())]
        );
    }
}
