//! Chat data models
//!
//! Messages and the in-memory conversation they are appended to.

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// Message typed by the user
    User,
    /// Reply from the chat endpoint (or the fixed error reply)
    Bot,
}

impl MessageRole {
    /// Convert the role to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Bot => "bot",
        }
    }
}

/// A single message in the conversation
///
/// Fields are private so an appended message cannot be edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: MessageRole,
    content: String,
}

impl Message {
    /// Create a message with an explicit role
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Message typed by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Reply shown on the bot side
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Bot, content)
    }

    /// Sender role
    pub fn role(&self) -> MessageRole {
        self.role
    }

    /// Message text
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Append-only ordered sequence of messages; insertion order is display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the tail
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in display order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recently appended message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages with the given role, in display order
    pub fn by_role(&self, role: MessageRole) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.role == role)
    }
}
