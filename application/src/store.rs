//! Shared handle to the process-wide session store.
//!
//! The controller and the console both hold a [`SharedSessionStore`]. Every
//! method takes the lock for exactly one store operation and never across an
//! `.await`, so each update is atomic on its own and readers never observe a
//! half-applied value.

use allar_domain::{DomainError, Message, MessageId, Session, SessionId, SessionStore, SessionTitle};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct SharedSessionStore {
    inner: Arc<Mutex<SessionStore>>,
}

impl SharedSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: SessionStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionStore> {
        // A panic elsewhere cannot leave a single store call half-done
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the store under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&SessionStore) -> R) -> R {
        f(&self.lock())
    }

    /// Create a session and return its identifier.
    pub fn create_session(&self, title: SessionTitle) -> SessionId {
        self.lock().create_session(title).id().clone()
    }

    pub fn append_messages(
        &self,
        session_id: &SessionId,
        batch: Vec<Message>,
    ) -> Result<(), DomainError> {
        self.lock().append_messages(session_id, batch)
    }

    pub fn update_message_content(
        &self,
        session_id: &SessionId,
        message_id: &MessageId,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.lock()
            .update_message_content(session_id, message_id, content)
    }

    /// Copy of one session as it is right now.
    pub fn snapshot(&self, id: &SessionId) -> Option<Session> {
        self.lock().get(id).cloned()
    }

    /// Copy of every session in display order.
    pub fn sessions(&self) -> Vec<Session> {
        self.lock().sessions().to_vec()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_store() {
        let store = SharedSessionStore::new();
        let other = store.clone();

        let id = store.create_session(SessionTitle::default());
        other
            .append_messages(&id, vec![Message::user("from the other handle")])
            .unwrap();

        let session = store.snapshot(&id).unwrap();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_updates() {
        let store = SharedSessionStore::new();
        let id = store.create_session(SessionTitle::default());
        let (user, placeholder) = Message::exchange("Hello");
        let placeholder_id = placeholder.id().clone();
        store.append_messages(&id, vec![user, placeholder]).unwrap();

        let before = store.snapshot(&id).unwrap();
        store
            .update_message_content(&id, &placeholder_id, "Hi")
            .unwrap();

        assert_eq!(before.messages()[1].content(), "");
        assert_eq!(store.snapshot(&id).unwrap().messages()[1].content(), "Hi");
    }

    #[test]
    fn read_sees_current_state() {
        let store = SharedSessionStore::new();
        store.create_session(SessionTitle::default());
        store.create_session(SessionTitle::explicit("PINNED"));
        let first_title = store.read(|s| s.sessions()[0].title().as_str().to_string());
        assert_eq!(first_title, "PINNED");

        store.clear();
        assert!(store.is_empty());
    }
}
