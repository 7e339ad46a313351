//! Backend abstraction consumed by the coordinators.
//!
//! The coordinators never talk HTTP directly; they depend on this trait and
//! receive an implementation at construction time. The production
//! implementation lives in the `docquery-api` crate; tests supply mocks.

use crate::conversation::ConversationTurn;
use crate::document::Document;
use crate::error::Result;
use crate::upload::LocalFile;
use async_trait::async_trait;

/// The answer produced by the backend for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskReply {
    pub answer: String,
    /// Supporting text excerpt the backend used to produce the answer.
    pub relevant_context: Option<String>,
}

/// The remote document service, one method per endpoint.
///
/// Implementations must classify HTTP 429 from [`ask`](Self::ask) as
/// [`DocqueryError::RateLimited`](crate::error::DocqueryError::RateLimited);
/// every other failure surfaces as a Transport error.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Fetches the full document collection, in backend listing order.
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Submits the pending files as a single multipart batch.
    ///
    /// The backend decides how many logical documents result; this client
    /// layer receives exactly one record per successful call.
    async fn upload_files(&self, files: &[LocalFile]) -> Result<Document>;

    /// Submits a drive link for server-side ingestion.
    async fn upload_drive_link(&self, link: &str) -> Result<Document>;

    /// Fetches the Q&A history for one document.
    async fn fetch_history(&self, document_id: &str) -> Result<Vec<ConversationTurn>>;

    /// Asks one question against one document.
    async fn ask(&self, document_id: &str, question: &str) -> Result<AskReply>;
}
