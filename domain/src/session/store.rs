//! In-memory session store.
//!
//! [`SessionStore`] owns every [`Session`] for the lifetime of the process,
//! ordered most-recently-created first. It is a plain synchronous value:
//! sharing and locking are the application layer's concern, and the
//! "current session" pointer lives with the caller rather than in here.

use super::entities::{Message, MessageId, Session, SessionId};
use super::title::SessionTitle;
use crate::core::error::DomainError;

/// Ordered collection of chat sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session at the front of the collection.
    pub fn create_session(&mut self, title: SessionTitle) -> &Session {
        self.sessions.insert(0, Session::new(title));
        &self.sessions[0]
    }

    /// Sessions in display order (newest first).
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a session, reporting a stale identifier as an error.
    pub fn resolve(&self, id: &SessionId) -> Result<&Session, DomainError> {
        self.get(id)
            .ok_or_else(|| DomainError::SessionNotFound(id.to_string()))
    }

    /// Append `batch` to the session, preserving its order.
    ///
    /// The first append to a session with a placeholder title also sets the
    /// title from the first user message. A stale `session_id` mutates nothing.
    pub fn append_messages(
        &mut self,
        session_id: &SessionId,
        batch: Vec<Message>,
    ) -> Result<(), DomainError> {
        let session = self.get_mut(session_id)?;
        if batch.is_empty() {
            return Ok(());
        }
        session.append(batch);
        Ok(())
    }

    /// Replace the content of exactly one message.
    ///
    /// Calling this repeatedly with the same value leaves the session as it was.
    pub fn update_message_content(
        &mut self,
        session_id: &SessionId,
        message_id: &MessageId,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        let session = self.get_mut(session_id)?;
        let message =
            session
                .message_mut(message_id)
                .ok_or_else(|| DomainError::MessageNotFound {
                    session_id: session_id.to_string(),
                    message_id: message_id.to_string(),
                })?;
        message.set_content(content.into());
        Ok(())
    }

    /// Drop every session (sign-out).
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    fn get_mut(&mut self, id: &SessionId) -> Result<&mut Session, DomainError> {
        self.sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| DomainError::SessionNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Role;

    fn contents(store: &SessionStore, id: &SessionId) -> Vec<String> {
        store
            .get(id)
            .unwrap()
            .messages()
            .iter()
            .map(|m| m.content().to_string())
            .collect()
    }

    #[test]
    fn create_session_inserts_at_front() {
        let mut store = SessionStore::new();
        let first = store.create_session(SessionTitle::default()).id().clone();
        let second = store.create_session(SessionTitle::default()).id().clone();

        assert_eq!(store.len(), 2);
        assert_eq!(store.sessions()[0].id(), &second);
        assert_eq!(store.sessions()[1].id(), &first);
        assert!(store.get(&first).unwrap().is_empty());
    }

    #[test]
    fn appended_batches_concatenate_in_call_order() {
        let mut store = SessionStore::new();
        let id = store.create_session(SessionTitle::default()).id().clone();

        store
            .append_messages(&id, vec![Message::user("a"), Message::user("b")])
            .unwrap();
        store.append_messages(&id, vec![Message::user("c")]).unwrap();
        store
            .append_messages(&id, vec![Message::user("d"), Message::user("e")])
            .unwrap();

        assert_eq!(contents(&store, &id), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn first_append_derives_title_from_first_user_message() {
        let mut store = SessionStore::new();
        let id = store.create_session(SessionTitle::default()).id().clone();
        let (user, placeholder) = Message::exchange("design a fundraising plan for a seed round");

        store.append_messages(&id, vec![user, placeholder]).unwrap();

        assert_eq!(
            store.get(&id).unwrap().title().as_str(),
            "DESIGN A FUNDRAISING"
        );
    }

    #[test]
    fn append_to_stale_session_mutates_nothing() {
        let mut store = SessionStore::new();
        let id = store.create_session(SessionTitle::default()).id().clone();

        let err = store
            .append_messages(&SessionId::new("missing"), vec![Message::user("x")])
            .unwrap_err();

        assert!(err.is_stale_reference());
        assert!(store.get(&id).unwrap().is_empty());
    }

    #[test]
    fn empty_batch_keeps_placeholder_title() {
        let mut store = SessionStore::new();
        let id = store.create_session(SessionTitle::default()).id().clone();
        store.append_messages(&id, Vec::new()).unwrap();
        assert!(!store.get(&id).unwrap().title().is_explicit());
    }

    #[test]
    fn update_touches_only_the_target_message() {
        let mut store = SessionStore::new();
        let id = store.create_session(SessionTitle::default()).id().clone();
        let (user, placeholder) = Message::exchange("Hello");
        let placeholder_id = placeholder.id().clone();
        store.append_messages(&id, vec![user, placeholder]).unwrap();

        store
            .update_message_content(&id, &placeholder_id, "Hi")
            .unwrap();
        store
            .update_message_content(&id, &placeholder_id, "Hi there")
            .unwrap();

        let session = store.get(&id).unwrap();
        assert_eq!(session.messages()[0].content(), "Hello");
        assert_eq!(session.messages()[1].content(), "Hi there");
        assert_eq!(session.messages()[1].role(), Role::Assistant);
        assert_eq!(session.messages()[1].id(), &placeholder_id);
    }

    #[test]
    fn repeated_update_with_same_value_is_idempotent() {
        let mut store = SessionStore::new();
        let id = store.create_session(SessionTitle::default()).id().clone();
        let (user, placeholder) = Message::exchange("Hello");
        let placeholder_id = placeholder.id().clone();
        store.append_messages(&id, vec![user, placeholder]).unwrap();

        store
            .update_message_content(&id, &placeholder_id, "same")
            .unwrap();
        let before: Vec<Message> = store.get(&id).unwrap().messages().to_vec();
        store
            .update_message_content(&id, &placeholder_id, "same")
            .unwrap();
        let after = store.get(&id).unwrap().messages();

        assert_eq!(before.as_slice(), after);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn update_with_unknown_message_reports_stale_reference() {
        let mut store = SessionStore::new();
        let id = store.create_session(SessionTitle::default()).id().clone();
        store.append_messages(&id, vec![Message::user("x")]).unwrap();

        let err = store
            .update_message_content(&id, &MessageId::new("nope"), "y")
            .unwrap_err();

        assert!(matches!(err, DomainError::MessageNotFound { .. }));
        assert_eq!(contents(&store, &id), vec!["x"]);
    }

    #[test]
    fn resolve_and_clear() {
        let mut store = SessionStore::new();
        let id = store.create_session(SessionTitle::default()).id().clone();
        assert!(store.resolve(&id).is_ok());
        assert!(store.resolve(&SessionId::new("gone")).is_err());

        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains(&id));
    }
}
