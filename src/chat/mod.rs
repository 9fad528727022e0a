//! Chat module
//!
//! Message models, the renderer-independent chat state, the endpoint client
//! and the controller that ties them together.

pub mod client;
pub mod controller;
pub mod models;
pub mod state;

pub use client::{ChatBackend, ChatRequest, ChatResponse, HttpChatClient};
pub use controller::{ChatController, SettleNotifier, FETCH_ERROR_MESSAGE};
pub use models::{Conversation, Message, MessageRole};
pub use state::{ChatState, DisplayItem};
