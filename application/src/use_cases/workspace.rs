//! Chat workspace: the signed-in user, the current-session pointer and
//! navigation between sessions.
//!
//! The pointer lives here rather than in the store, so the store only ever
//! holds sessions and their messages. Prompts go through the shared
//! [`GenerationController`], which targets whatever session is current at the
//! moment of submission.

use super::submit_prompt::{GenerationController, GenerationReport, PendingGeneration};
use crate::ports::progress::GenerationProgress;
use allar_domain::{
    DomainError, ProfileUpdate, Session, SessionId, SessionTitle, UserProfile,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

/// Header text when no session is selected.
pub const DASHBOARD_TITLE: &str = "DASHBOARD";

/// Sidebar text when there are no sessions.
pub const EMPTY_SIDEBAR_TEXT: &str = "Awaiting Consultation";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("Name and email are both required")]
    IncompleteCredentials,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// One sidebar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: SessionId,
    pub title: String,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub is_current: bool,
}

pub struct ChatWorkspace {
    controller: GenerationController,
    user: Option<UserProfile>,
    current: Option<SessionId>,
}

impl ChatWorkspace {
    pub fn new(controller: GenerationController) -> Self {
        Self {
            controller,
            user: None,
            current: None,
        }
    }

    pub fn controller(&self) -> &GenerationController {
        &self.controller
    }

    // ==================== Identity ====================

    /// Mocked sign-in: any non-blank name and email are accepted.
    pub fn sign_in(&mut self, name: &str, email: &str) -> Result<&UserProfile, WorkspaceError> {
        let profile = UserProfile::new(name.trim(), email.trim())
            .map_err(|_| WorkspaceError::IncompleteCredentials)?;
        info!("Signed in as {}", profile.display_name());
        Ok(self.user.insert(profile))
    }

    pub fn sign_in_with_google(&mut self) -> &UserProfile {
        let profile = UserProfile::demo();
        info!("Signed in with demo identity {}", profile.display_name());
        self.user.insert(profile)
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&UserProfile, WorkspaceError> {
        let user = self.user.as_mut().ok_or(WorkspaceError::NotSignedIn)?;
        user.apply(update)?;
        Ok(user)
    }

    /// Forget the user, every session and the pointer.
    ///
    /// A generation still streaming keeps running; its updates find no target
    /// and are dropped.
    pub fn sign_out(&mut self) {
        self.controller.store().clear();
        self.current = None;
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.display_name());
        }
    }

    // ==================== Navigation ====================

    /// Start a fresh session and make it current.
    pub fn new_chat(&mut self) -> SessionId {
        let id = self.controller.store().create_session(SessionTitle::default());
        debug!(session_id = %id, "New chat");
        self.current = Some(id.clone());
        id
    }

    /// Make `id` current. An unknown id leaves the pointer where it was.
    pub fn select_session(&mut self, id: &SessionId) -> Result<(), WorkspaceError> {
        if !self.controller.store().contains(id) {
            return Err(WorkspaceError::SessionNotFound(id.clone()));
        }
        self.current = Some(id.clone());
        Ok(())
    }

    /// Select by 1-based sidebar position.
    pub fn select_position(&mut self, position: usize) -> Result<SessionId, WorkspaceError> {
        let id = position
            .checked_sub(1)
            .and_then(|i| self.controller.store().read(|s| s.sessions().get(i).map(|x| x.id().clone())))
            .ok_or_else(|| WorkspaceError::SessionNotFound(SessionId::new(position.to_string())))?;
        self.current = Some(id.clone());
        Ok(id)
    }

    pub fn current_session_id(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.current
            .as_ref()
            .and_then(|id| self.controller.store().snapshot(id))
    }

    pub fn header_title(&self) -> String {
        self.current_session()
            .map(|s| s.title().as_str().to_string())
            .unwrap_or_else(|| DASHBOARD_TITLE.to_string())
    }

    /// Sidebar rows, most recent first.
    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.controller.store().read(|store| {
            store
                .sessions()
                .iter()
                .map(|s| SessionSummary {
                    id: s.id().clone(),
                    title: s.title().as_str().to_string(),
                    message_count: s.messages().len(),
                    created_at: s.created_at(),
                    is_current: self.current.as_ref() == Some(s.id()),
                })
                .collect()
        })
    }

    // ==================== Submission ====================

    /// Commit a prompt against the current session and adopt its target.
    pub fn begin_submit(&mut self, prompt: &str) -> Result<PendingGeneration, WorkspaceError> {
        if self.user.is_none() {
            return Err(WorkspaceError::NotSignedIn);
        }
        let pending = self.controller.begin(prompt, self.current.as_ref())?;
        self.current = Some(pending.session_id().clone());
        Ok(pending)
    }

    pub async fn submit(
        &mut self,
        prompt: &str,
        progress: &dyn GenerationProgress,
    ) -> Result<GenerationReport, WorkspaceError> {
        let pending = self.begin_submit(prompt)?;
        Ok(self.controller.drive(pending, progress).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::{GatewayError, HistoryTurn, LlmGateway, StreamHandle};
    use crate::ports::progress::NoGenerationProgress;
    use crate::store::SharedSessionStore;
    use allar_domain::{DEFAULT_SESSION_TITLE, Model};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoGateway {
        model: Model,
    }

    #[async_trait]
    impl LlmGateway for EchoGateway {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn stream_chat(
            &self,
            _history: &[HistoryTurn],
            prompt: &str,
        ) -> Result<StreamHandle, GatewayError> {
            Ok(StreamHandle::from_fragments(["re: ", prompt]))
        }
    }

    fn workspace() -> ChatWorkspace {
        let gateway = Arc::new(EchoGateway {
            model: Model::default(),
        });
        ChatWorkspace::new(GenerationController::new(gateway, SharedSessionStore::new()))
    }

    fn signed_in() -> ChatWorkspace {
        let mut ws = workspace();
        ws.sign_in("Ada", "ada@example.com").unwrap();
        ws
    }

    #[test]
    fn sign_in_requires_both_fields() {
        let mut ws = workspace();
        assert_eq!(
            ws.sign_in("  ", "a@b.c").unwrap_err(),
            WorkspaceError::IncompleteCredentials
        );
        assert_eq!(
            ws.sign_in("Ada", "").unwrap_err(),
            WorkspaceError::IncompleteCredentials
        );
        assert!(!ws.is_signed_in());

        let user = ws.sign_in("ada", "ada@example.com").unwrap();
        assert_eq!(user.initial(), 'A');
        assert_eq!(user.avatar_size(), 40);
    }

    #[test]
    fn google_sign_in_uses_demo_identity() {
        let mut ws = workspace();
        let user = ws.sign_in_with_google();
        assert_eq!(user.display_name(), "Google User");
        assert_eq!(user.contact_address(), "user@google.com");
    }

    #[test]
    fn profile_update_requires_sign_in_and_clamps_avatar() {
        let mut ws = workspace();
        let update = ProfileUpdate {
            avatar_size: Some(100),
            ..Default::default()
        };
        assert_eq!(
            ws.update_profile(update.clone()).unwrap_err(),
            WorkspaceError::NotSignedIn
        );

        ws.sign_in_with_google();
        let user = ws.update_profile(update).unwrap();
        assert_eq!(user.avatar_size(), 64);
    }

    #[test]
    fn header_defaults_to_dashboard() {
        let mut ws = signed_in();
        assert_eq!(ws.header_title(), DASHBOARD_TITLE);

        ws.new_chat();
        assert_eq!(ws.header_title(), DEFAULT_SESSION_TITLE);
    }

    #[test]
    fn new_chat_is_current_and_listed_first() {
        let mut ws = signed_in();
        let first = ws.new_chat();
        let second = ws.new_chat();

        let rows = ws.sessions();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, second);
        assert!(rows[0].is_current);
        assert_eq!(rows[1].id, first);
        assert!(!rows[1].is_current);
    }

    #[test]
    fn selecting_unknown_session_keeps_pointer() {
        let mut ws = signed_in();
        let id = ws.new_chat();

        let err = ws.select_session(&SessionId::new("missing")).unwrap_err();
        assert!(matches!(err, WorkspaceError::SessionNotFound(_)));
        assert_eq!(ws.current_session_id(), Some(&id));

        assert!(ws.select_position(0).is_err());
        assert!(ws.select_position(2).is_err());
        assert_eq!(ws.current_session_id(), Some(&id));
    }

    #[test]
    fn select_by_position_follows_sidebar_order() {
        let mut ws = signed_in();
        let older = ws.new_chat();
        ws.new_chat();

        assert_eq!(ws.select_position(2).unwrap(), older);
        assert_eq!(ws.current_session_id(), Some(&older));
    }

    #[tokio::test]
    async fn submit_from_dashboard_adopts_new_session() {
        let mut ws = signed_in();

        let report = ws
            .submit("Structure a Series A pitch", &NoGenerationProgress)
            .await
            .unwrap();

        assert_eq!(ws.current_session_id(), Some(&report.session_id));
        assert_eq!(ws.header_title(), "STRUCTURE A SERIES A");
        assert_eq!(report.content, "re: Structure a Series A pitch");
    }

    #[tokio::test]
    async fn submit_goes_to_the_current_session() {
        let mut ws = signed_in();
        let target = ws.new_chat();
        ws.new_chat();
        ws.select_session(&target).unwrap();

        let report = ws.submit("hello", &NoGenerationProgress).await.unwrap();

        assert_eq!(report.session_id, target);
        assert_eq!(ws.sessions().len(), 2);
    }

    #[tokio::test]
    async fn submit_requires_sign_in() {
        let mut ws = workspace();
        let err = ws.submit("hello", &NoGenerationProgress).await.unwrap_err();
        assert_eq!(err, WorkspaceError::NotSignedIn);
        assert!(ws.sessions().is_empty());
    }

    #[tokio::test]
    async fn blank_prompt_surfaces_domain_rejection() {
        let mut ws = signed_in();
        let err = ws.submit("\n\t ", &NoGenerationProgress).await.unwrap_err();
        assert_eq!(err, WorkspaceError::Domain(DomainError::EmptyPrompt));
        assert!(ws.current_session_id().is_none());
    }

    #[tokio::test]
    async fn sign_out_clears_everything() {
        let mut ws = signed_in();
        ws.submit("hello", &NoGenerationProgress).await.unwrap();

        ws.sign_out();

        assert!(!ws.is_signed_in());
        assert!(ws.sessions().is_empty());
        assert!(ws.current_session_id().is_none());
        assert_eq!(ws.header_title(), DASHBOARD_TITLE);
    }
}
