pub mod action_id;
pub mod input;
pub mod keybindings;
pub mod keymap;
pub mod layer;
pub mod layout_helpers;
pub mod ratatui_impl;
pub mod render;
pub mod style;

pub use input::{AppEvent, InputEvent, KeyCode, Modifiers};
pub use layer::{LayerResult, LayerStack};
pub use ratatui_impl::RatatuiBackend;
pub use render::{Rect, RenderBuf};
pub use style::{Color, Style};
