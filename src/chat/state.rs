//! Chat domain state
//!
//! Conversation plus pending flag, independent of any renderer.

use super::models::{Conversation, Message};

/// One row the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayItem<'a> {
    /// A real conversation message
    Message(&'a Message),
    /// Synthetic "is typing" row shown while a request is pending
    Typing,
}

/// Conversation and pending flag
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    conversation: Conversation,
    pending: bool,
}

impl ChatState {
    /// Empty conversation, not pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the tail of the conversation
    pub fn append(&mut self, message: Message) {
        self.conversation.push(message);
    }

    /// Set or clear the pending flag
    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Whether a request is awaiting its response
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The conversation so far
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Rows to render: every message, then a typing row while pending
    pub fn display_items(&self) -> Vec<DisplayItem<'_>> {
        let mut items: Vec<DisplayItem<'_>> = self
            .conversation
            .messages()
            .iter()
            .map(DisplayItem::Message)
            .collect();
        if self.pending {
            items.push(DisplayItem::Typing);
        }
        items
    }
}
