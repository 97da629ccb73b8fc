//! Streaming events for text generation.
//!
//! [`StreamEvent`] is one item of the lazy, single-pass fragment sequence a
//! text-generation provider produces for one reply. A well-formed stream is
//! zero or more `Delta`s followed by exactly one terminal event.

/// An event in a streaming reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text fragment to append to the reply.
    Delta(String),
    /// The reply is complete.
    Completed,
    /// The provider failed partway through.
    Error(String),
}

impl StreamEvent {
    /// Returns the fragment text if this is a `Delta`.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed | StreamEvent::Error(_))
    }
}
