//! Application shell wiring the three coordinators together.
//!
//! The coordinators never reach into each other's internals; they compose
//! through the explicit handoffs modeled here: the upload coordinator hands
//! new documents to the registry, and a change of the registry's active
//! selection re-scopes the conversation session.

use crate::backend::DocumentBackend;
use crate::conversation::ConversationSession;
use crate::document::DocumentRegistry;
use crate::error::Result;
use crate::upload::{SubmitOutcome, UploadCoordinator};
use std::sync::Arc;

/// Owns the registry, the upload coordinator and the conversation session
/// for one UI shell, all backed by the same injected backend client.
#[derive(Clone)]
pub struct Workbench {
    registry: DocumentRegistry,
    uploads: UploadCoordinator,
    session: ConversationSession,
}

impl Workbench {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        let registry = DocumentRegistry::new(backend.clone());
        let uploads = UploadCoordinator::new(backend.clone(), registry.clone());
        let session = ConversationSession::new(backend);
        Self {
            registry,
            uploads,
            session,
        }
    }

    /// Seeds the registry from the backend and, when a document became
    /// active, scopes the session to it.
    ///
    /// # Errors
    ///
    /// Returns the first failure (listing fetch or history fetch). The shell
    /// still renders after an error; state is whatever the failing step left
    /// behind, per the per-coordinator contracts.
    pub async fn startup(&self) -> Result<()> {
        self.registry.initialize().await?;
        if let Some(active) = self.registry.active().await {
            self.session.activate(&active.id).await?;
        }
        Ok(())
    }

    /// Selects a document (by value, id + title) and re-scopes the session.
    pub async fn open_document(
        &self,
        id: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<()> {
        let id = id.into();
        self.registry.select(id.clone(), title).await;
        self.session.activate(&id).await
    }

    /// Submits pending uploads and re-scopes the session when the active
    /// selection moved to a newly absorbed document.
    pub async fn submit_upload(&self) -> Result<SubmitOutcome> {
        let outcome = self.uploads.submit().await?;
        if outcome.absorbed_any()
            && let Some(active) = self.registry.active().await
        {
            // History for a brand-new document is empty, but the fetch also
            // flips the session out of any stale scope.
            if let Err(err) = self.session.activate(&active.id).await {
                tracing::warn!("History fetch after upload failed: {}", err);
            }
        }
        Ok(outcome)
    }

    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    pub fn uploads(&self) -> &UploadCoordinator {
        &self.uploads
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AskReply;
    use crate::conversation::{ConversationTurn, SessionPhase};
    use crate::document::Document;
    use crate::error::DocqueryError;
    use crate::upload::LocalFile;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockBackend {
        listing: Mutex<Option<Result<Vec<Document>>>>,
        histories: Mutex<HashMap<String, Vec<ConversationTurn>>>,
        upload_result: Mutex<Option<Result<Document>>>,
        ask_result: Mutex<Option<Result<AskReply>>>,
    }

    #[async_trait]
    impl DocumentBackend for MockBackend {
        async fn list_documents(&self) -> Result<Vec<Document>> {
            self.listing
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Ok(vec![]))
        }

        async fn upload_files(&self, _files: &[LocalFile]) -> Result<Document> {
            self.upload_result
                .lock()
                .unwrap()
                .clone()
                .expect("upload_result not configured")
        }

        async fn upload_drive_link(&self, _link: &str) -> Result<Document> {
            unimplemented!("not used by workbench tests")
        }

        async fn fetch_history(&self, document_id: &str) -> Result<Vec<ConversationTurn>> {
            Ok(self
                .histories
                .lock()
                .unwrap()
                .get(document_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn ask(&self, _document_id: &str, _question: &str) -> Result<AskReply> {
            self.ask_result
                .lock()
                .unwrap()
                .clone()
                .expect("ask_result not configured")
        }
    }

    #[tokio::test]
    async fn end_to_end_first_question() {
        let backend = Arc::new(MockBackend::default());
        *backend.listing.lock().unwrap() = Some(Ok(vec![Document::new("d1", "Spec.pdf")]));
        *backend.ask_result.lock().unwrap() = Some(Ok(AskReply {
            answer: "X is Y".into(),
            relevant_context: None,
        }));
        let workbench = Workbench::new(backend);

        workbench.startup().await.unwrap();

        let active = workbench.registry().active().await.unwrap();
        assert_eq!(active.id, "d1");
        assert_eq!(active.title, "Spec.pdf");
        assert_eq!(workbench.session().phase().await, SessionPhase::Ready);

        workbench.session().edit_draft("What is X?").await.unwrap();
        workbench.session().ask().await.unwrap();

        assert_eq!(
            workbench.session().turns().await,
            vec![ConversationTurn::new("What is X?", "X is Y", None)]
        );
    }

    #[tokio::test]
    async fn startup_failure_leaves_session_idle() {
        let backend = Arc::new(MockBackend::default());
        *backend.listing.lock().unwrap() =
            Some(Err(DocqueryError::transport("connection refused")));
        let workbench = Workbench::new(backend);

        let err = workbench.startup().await.unwrap_err();

        assert!(err.is_transport());
        assert!(workbench.registry().active().await.is_none());
        assert_eq!(workbench.session().phase().await, SessionPhase::Idle);
    }

    #[tokio::test]
    async fn open_document_rescopes_the_session() {
        let backend = Arc::new(MockBackend::default());
        backend.histories.lock().unwrap().insert(
            "d2".to_string(),
            vec![ConversationTurn::new("old?", "old.", None)],
        );
        let workbench = Workbench::new(backend);

        workbench.open_document("d2", "Notes.txt").await.unwrap();

        assert_eq!(workbench.registry().active().await.unwrap().id, "d2");
        assert_eq!(workbench.session().document_id().await.as_deref(), Some("d2"));
        assert_eq!(workbench.session().turns().await.len(), 1);
    }

    #[tokio::test]
    async fn successful_upload_rescopes_the_session() {
        let backend = Arc::new(MockBackend::default());
        *backend.upload_result.lock().unwrap() = Some(Ok(Document::new("d9", "Fresh.pdf")));
        let workbench = Workbench::new(backend);
        workbench
            .uploads()
            .set_files(vec![LocalFile::new("fresh.pdf", vec![1, 2, 3])])
            .await
            .unwrap();

        let outcome = workbench.submit_upload().await.unwrap();

        assert!(outcome.fully_succeeded());
        assert_eq!(workbench.registry().active().await.unwrap().id, "d9");
        assert_eq!(workbench.session().document_id().await.as_deref(), Some("d9"));
        assert_eq!(workbench.session().phase().await, SessionPhase::Ready);
        assert!(workbench.session().turns().await.is_empty());
    }
}
