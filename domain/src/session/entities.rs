//! Session domain entities

use super::title::SessionTitle;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new opaque identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a message, unique within its owning session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn in a session (Entity)
///
/// `id` and `role` are fixed at construction. Only the content can change,
/// and only through [`SessionStore::update_message_content`](super::store::SessionStore::update_message_content).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: MessageId,
        role: Role,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// A user message with its final content.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageId::generate(), Role::User, content, Utc::now())
    }

    /// An empty assistant message awaiting streamed content.
    pub fn assistant_placeholder() -> Self {
        Self::new(MessageId::generate(), Role::Assistant, "", Utc::now())
    }

    /// The user prompt and its assistant placeholder, in display order.
    ///
    /// The placeholder is stamped one millisecond after the prompt so the pair
    /// sorts stably by time as well as by position.
    pub fn exchange(prompt: impl Into<String>) -> (Self, Self) {
        let now = Utc::now();
        let user = Self::new(MessageId::generate(), Role::User, prompt, now);
        let placeholder = Self::new(
            MessageId::generate(),
            Role::Assistant,
            "",
            now + Duration::milliseconds(1),
        );
        (user, placeholder)
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// An assistant message with no content yet is still being generated.
    pub fn is_pending(&self) -> bool {
        self.role == Role::Assistant && self.content.is_empty()
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }
}

/// A named, ordered conversation thread (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    title: SessionTitle,
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(title: SessionTitle) -> Self {
        Self::with_id(SessionId::generate(), title)
    }

    pub fn with_id(id: SessionId, title: SessionTitle) -> Self {
        Self {
            id,
            title,
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn title(&self) -> &SessionTitle {
        &self.title
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id() == id)
    }

    /// Append a batch in order. On the first append, a placeholder title is
    /// replaced by one derived from the first user message in the batch.
    pub(crate) fn append(&mut self, batch: Vec<Message>) {
        if self.messages.is_empty() && !self.title.is_explicit() {
            if let Some(first_user) = batch.iter().find(|m| m.role() == Role::User) {
                self.title = SessionTitle::from_prompt(first_user.content());
            }
        }
        self.messages.extend(batch);
    }

    pub(crate) fn message_mut(&mut self, id: &MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id() == id)
    }
}
