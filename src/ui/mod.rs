//! UI module
//!
//! Pure projection of the chat state into egui.

pub mod components;
pub mod layout;

pub use components::*;
pub use layout::{render_chat_layout, ViewState, INPUT_HINT};
