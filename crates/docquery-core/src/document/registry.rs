//! Registry of known documents and the active selection.

use super::model::{ActiveDocument, Document};
use crate::backend::DocumentBackend;
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct RegistryState {
    /// Insertion order is arrival order: initial fetch order, then upload
    /// order. Duplicate ids are accepted (see `absorb`).
    documents: Vec<Document>,
    active: Option<ActiveDocument>,
}

/// Owns the set of known documents and which one is active.
///
/// Seeded once at startup via [`initialize`](Self::initialize); afterwards it
/// only grows through [`absorb`](Self::absorb). Cloning yields a handle to
/// the same underlying state.
#[derive(Clone)]
pub struct DocumentRegistry {
    backend: Arc<dyn DocumentBackend>,
    state: Arc<RwLock<RegistryState>>,
}

impl DocumentRegistry {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(RegistryState::default())),
        }
    }

    /// Fetches the full document collection from the backend.
    ///
    /// On success the sequence is replaced and, if non-empty, the first
    /// record becomes the active selection. On failure the previous state is
    /// left untouched and the error is returned; there is no automatic
    /// retry.
    pub async fn initialize(&self) -> Result<()> {
        let documents = match self.backend.list_documents().await {
            Ok(documents) => documents,
            Err(err) => {
                tracing::warn!("Failed to fetch document listing: {}", err);
                return Err(err);
            }
        };

        let mut state = self.state.write().await;
        state.active = documents.first().map(|first| ActiveDocument {
            id: first.id.clone(),
            title: first.title.clone(),
        });
        state.documents = documents;
        Ok(())
    }

    /// Sets the active selection unconditionally.
    ///
    /// The id is not validated against the current sequence: selection is by
    /// value so that a just-created document can become active before the
    /// listing reflects it.
    pub async fn select(&self, id: impl Into<String>, title: impl Into<String>) {
        let mut state = self.state.write().await;
        state.active = Some(ActiveDocument {
            id: id.into(),
            title: title.into(),
        });
    }

    /// Appends a newly created document and makes it active.
    ///
    /// No de-duplication by id: if the backend later lists a document that
    /// was already absorbed, both entries remain. That mirrors the backend's
    /// view and is accepted behavior.
    pub async fn absorb(&self, document: Document) {
        let mut state = self.state.write().await;
        state.active = Some(ActiveDocument {
            id: document.id.clone(),
            title: document.title.clone(),
        });
        state.documents.push(document);
    }

    /// Snapshot of the known documents, in arrival order.
    pub async fn documents(&self) -> Vec<Document> {
        self.state.read().await.documents.clone()
    }

    /// Snapshot of the active selection, if any.
    pub async fn active(&self) -> Option<ActiveDocument> {
        self.state.read().await.active.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AskReply, DocumentBackend};
    use crate::conversation::ConversationTurn;
    use crate::error::{DocqueryError, Result};
    use crate::upload::LocalFile;
    use async_trait::async_trait;

    struct MockBackend {
        listing: Result<Vec<Document>>,
    }

    #[async_trait]
    impl DocumentBackend for MockBackend {
        async fn list_documents(&self) -> Result<Vec<Document>> {
            self.listing.clone()
        }

        async fn upload_files(&self, _files: &[LocalFile]) -> Result<Document> {
            unimplemented!("not used by registry tests")
        }

        async fn upload_drive_link(&self, _link: &str) -> Result<Document> {
            unimplemented!("not used by registry tests")
        }

        async fn fetch_history(&self, _document_id: &str) -> Result<Vec<ConversationTurn>> {
            unimplemented!("not used by registry tests")
        }

        async fn ask(&self, _document_id: &str, _question: &str) -> Result<AskReply> {
            unimplemented!("not used by registry tests")
        }
    }

    fn registry_with_listing(listing: Result<Vec<Document>>) -> DocumentRegistry {
        DocumentRegistry::new(Arc::new(MockBackend { listing }))
    }

    #[tokio::test]
    async fn initialize_selects_first_document() {
        let registry = registry_with_listing(Ok(vec![
            Document::new("d1", "Spec.pdf"),
            Document::new("d2", "Notes.txt"),
        ]));

        registry.initialize().await.unwrap();

        let active = registry.active().await.unwrap();
        assert_eq!(active.id, "d1");
        assert_eq!(active.title, "Spec.pdf");
        assert_eq!(registry.documents().await.len(), 2);
    }

    #[tokio::test]
    async fn initialize_with_empty_listing_selects_nothing() {
        let registry = registry_with_listing(Ok(vec![]));

        registry.initialize().await.unwrap();

        assert!(registry.active().await.is_none());
        assert!(registry.documents().await.is_empty());
    }

    #[tokio::test]
    async fn initialize_failure_leaves_state_untouched() {
        let registry = registry_with_listing(Err(DocqueryError::transport("connection refused")));
        registry.select("d9", "Kept.pdf").await;

        let err = registry.initialize().await.unwrap_err();

        assert!(err.is_transport());
        let active = registry.active().await.unwrap();
        assert_eq!(active.id, "d9");
        assert!(registry.documents().await.is_empty());
    }

    #[tokio::test]
    async fn select_does_not_validate_against_sequence() {
        let registry = registry_with_listing(Ok(vec![]));

        // The id is not present in the (empty) sequence. Still accepted.
        registry.select("fresh", "Just Uploaded.pdf").await;

        let active = registry.active().await.unwrap();
        assert_eq!(active.id, "fresh");
        assert_eq!(active.title, "Just Uploaded.pdf");
    }

    #[tokio::test]
    async fn absorb_appends_and_selects_without_dedup() {
        let registry = registry_with_listing(Ok(vec![Document::new("d1", "Spec.pdf")]));
        registry.initialize().await.unwrap();

        registry.absorb(Document::new("d1", "Spec.pdf")).await;

        // Duplicate entry is kept, not collapsed.
        let documents = registry.documents().await;
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0], documents[1]);
        assert_eq!(registry.active().await.unwrap().id, "d1");
    }
}
