//! Revolution Chat
//!
//! A small chat window that forwards each message, with a persistent
//! per-profile session id, to a remote `/chat` endpoint and shows the
//! replies. The binary is in `src/main.rs`.

pub mod app;
pub mod chat;
pub mod config;
pub mod error;
/// Session identity and the local store it is persisted in
pub mod session;
/// egui rendering of the chat state
pub mod ui;

pub use app::ChatApp;
pub use config::Config;
pub use error::{ChatError, StorageError};
