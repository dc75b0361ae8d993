//! Keyboard input mapped to scene actions.
//!
//! The desktop app translates platform key codes into [`Key`] and feeds them
//! through [`KeyBindings`]; the game only ever reacts to [`Action`]s.

pub mod action;
mod bindings;

pub use action::{Action, Key};
pub use bindings::{HeldActions, KeyBindings};

pub fn crate_info() -> &'static str {
    "homestead-input v0.1.0"
}
