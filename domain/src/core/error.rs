//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("A generation is already in flight")]
    GenerationInFlight,

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Message {message_id} not found in session {session_id}")]
    MessageNotFound {
        session_id: String,
        message_id: String,
    },

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

impl DomainError {
    /// Check if this error addresses a session or message that no longer exists
    pub fn is_stale_reference(&self) -> bool {
        matches!(
            self,
            DomainError::SessionNotFound(_) | DomainError::MessageNotFound { .. }
        )
    }

    /// Check if this error is a rejected submission
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyPrompt | DomainError::GenerationInFlight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_error_display() {
        let error = DomainError::GenerationInFlight;
        assert_eq!(error.to_string(), "A generation is already in flight");
    }

    #[test]
    fn test_message_not_found_display() {
        let error = DomainError::MessageNotFound {
            session_id: "s1".to_string(),
            message_id: "m1".to_string(),
        };
        assert_eq!(error.to_string(), "Message m1 not found in session s1");
    }

    #[test]
    fn test_error_classification() {
        assert!(DomainError::SessionNotFound("x".to_string()).is_stale_reference());
        assert!(!DomainError::EmptyPrompt.is_stale_reference());
        assert!(DomainError::EmptyPrompt.is_rejection());
        assert!(DomainError::GenerationInFlight.is_rejection());
        assert!(!DomainError::InvalidProfile("x".to_string()).is_rejection());
    }
}
