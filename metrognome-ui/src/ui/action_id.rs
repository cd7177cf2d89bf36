//! Typed action identifiers for the keybinding system.
//!
//! Each layer in `keybindings.toml` names its actions with the string ids
//! defined here; `parse_action_id` maps them back to typed commands.

/// Macro to generate action enums with string conversion methods
macro_rules! define_action_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $str:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )*
        }
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $str, )*
                }
            }
            pub fn from_str(s: &str) -> Option<Self> {
                match s {
                    $( $str => Some($name::$variant), )*
                    _ => None,
                }
            }
        }
    }
}

define_action_enum! {
    /// Global layer actions (available in all contexts)
    pub enum GlobalActionId {
        Quit => "quit",
        PlayStop => "play_stop",
        TempoUp => "tempo_up",
        TempoDown => "tempo_down",
        NextSignature => "next_signature",
        PrevSignature => "prev_signature",
        TogglePresets => "toggle_presets",
        ToggleSound => "toggle_sound",
        ToggleHelp => "toggle_help",
        CloseOverlay => "close_overlay",
    }
}

define_action_enum! {
    /// Preset picker actions (active while the presets overlay is open)
    pub enum PresetsActionId {
        Prev => "preset_prev",
        Next => "preset_next",
        Confirm => "preset_confirm",
    }
}

/// A logical command, independent of the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    Global(GlobalActionId),
    Presets(PresetsActionId),
}

impl ActionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::Global(a) => a.as_str(),
            ActionId::Presets(a) => a.as_str(),
        }
    }
}

/// Resolve an action string within the layer it was declared in.
pub fn parse_action_id(layer: &str, action: &str) -> Option<ActionId> {
    match layer {
        "global" => GlobalActionId::from_str(action).map(ActionId::Global),
        "presets" => PresetsActionId::from_str(action).map(ActionId::Presets),
        _ => None,
    }
}
