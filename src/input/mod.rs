//! Host key events and their mapping to game actions.

pub mod bindings;
pub mod events;

pub use bindings::{Action, KeyBindings};
pub use events::{InputEvent, KeyCode, KeyEvent};
