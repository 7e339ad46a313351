//! Per-document Q&A conversation session.

use super::model::ConversationTurn;
use crate::backend::DocumentBackend;
use crate::error::{DocqueryError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Where the session currently is in its lifecycle.
///
/// A single tagged value instead of independent loading/asking flags, so
/// impossible combinations cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No active document.
    Idle,
    /// History fetch in flight for the current document.
    Loading,
    /// History loaded (or given up on); the draft may be edited and asked.
    Ready,
    /// A question submission in flight.
    Asking,
}

#[derive(Debug)]
struct SessionState {
    document_id: Option<String>,
    phase: SessionPhase,
    /// Chronological, append-only. Always belongs to `document_id`.
    turns: Vec<ConversationTurn>,
    draft: String,
    /// Bumped on every re-scope; an in-flight fetch whose generation no
    /// longer matches is discarded instead of applied.
    generation: u64,
    scroll_requested: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            document_id: None,
            phase: SessionPhase::Idle,
            turns: Vec::new(),
            draft: String::new(),
            generation: 0,
            scroll_requested: false,
        }
    }
}

/// The Q&A conversation scoped to exactly one active document.
///
/// Changing the active document discards the in-memory turn sequence and
/// replaces it with the history fetched for the new id; there is no merge.
/// Cloning yields a handle to the same session state.
#[derive(Clone)]
pub struct ConversationSession {
    backend: Arc<dyn DocumentBackend>,
    state: Arc<RwLock<SessionState>>,
}

impl ConversationSession {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Re-scopes the session to `document_id` and loads its history.
    ///
    /// The draft and the previous turn sequence are discarded up front. On a
    /// fetch failure the session still enters `Ready` with an empty sequence
    /// and the error is returned: the user can ask new questions even when
    /// history could not be loaded.
    ///
    /// If a newer `activate` (or `deactivate`) supersedes this one while the
    /// fetch is in flight, the fetched result is discarded and `Ok(())` is
    /// returned; the newer scope owns the state.
    pub async fn activate(&self, document_id: &str) -> Result<()> {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.document_id = Some(document_id.to_string());
            state.turns.clear();
            state.draft.clear();
            state.scroll_requested = false;
            state.phase = SessionPhase::Loading;
            state.generation
        };

        let fetched = self.backend.fetch_history(document_id).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(
                "Discarding superseded history fetch for document {}",
                document_id
            );
            return Ok(());
        }
        state.phase = SessionPhase::Ready;
        match fetched {
            Ok(turns) => {
                state.turns = turns;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to fetch history for {}: {}", document_id, err);
                Err(err)
            }
        }
    }

    /// Drops back to `Idle` with no active document.
    pub async fn deactivate(&self) {
        let mut state = self.state.write().await;
        let generation = state.generation + 1;
        *state = SessionState {
            generation,
            ..SessionState::default()
        };
    }

    /// Updates the draft question.
    ///
    /// Only permitted in `Ready`; in any other phase the edit is rejected
    /// with a validation error rather than silently dropped.
    pub async fn edit_draft(&self, text: impl Into<String>) -> Result<()> {
        let mut state = self.state.write().await;
        if state.phase != SessionPhase::Ready {
            return Err(DocqueryError::validation(
                "The session is not ready for editing.",
            ));
        }
        state.draft = text.into();
        Ok(())
    }

    /// Submits the draft question against the active document.
    ///
    /// On success one turn is appended, the draft is cleared and the
    /// scroll-to-newest signal is raised. On failure the draft is cleared
    /// regardless (a failed question is retyped, not retried verbatim) and
    /// a 429 from the backend is reported as [`DocqueryError::RateLimited`]
    /// rather than a generic transport failure. Either way the session
    /// returns to `Ready`.
    ///
    /// While a submission is in flight, further `ask` calls are rejected,
    /// not queued.
    pub async fn ask(&self) -> Result<()> {
        let (document_id, question, generation) = {
            let mut state = self.state.write().await;
            match state.phase {
                SessionPhase::Asking => {
                    return Err(DocqueryError::validation(
                        "A question is already being answered.",
                    ));
                }
                SessionPhase::Idle | SessionPhase::Loading => {
                    return Err(DocqueryError::validation(
                        "No document is ready for questions.",
                    ));
                }
                SessionPhase::Ready => {}
            }
            if state.draft.is_empty() {
                return Err(DocqueryError::validation("Please enter a question!"));
            }
            let document_id = state
                .document_id
                .clone()
                .ok_or_else(|| DocqueryError::validation("No document is selected."))?;
            state.phase = SessionPhase::Asking;
            (document_id, state.draft.clone(), state.generation)
        };

        let reply = self.backend.ask(&document_id, &question).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!("Discarding answer for superseded document {}", document_id);
            return Ok(());
        }
        state.phase = SessionPhase::Ready;
        state.draft.clear();
        match reply {
            Ok(reply) => {
                state.turns.push(ConversationTurn::new(
                    question,
                    reply.answer,
                    reply.relevant_context,
                ));
                state.scroll_requested = true;
                Ok(())
            }
            Err(err) => {
                if err.is_rate_limited() {
                    tracing::warn!("Ask rate limited for document {}", document_id);
                } else {
                    tracing::warn!("Ask failed for document {}: {}", document_id, err);
                }
                Err(err)
            }
        }
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase
    }

    /// The document this session is scoped to, if any.
    pub async fn document_id(&self) -> Option<String> {
        self.state.read().await.document_id.clone()
    }

    /// Snapshot of the turn sequence, oldest first.
    pub async fn turns(&self) -> Vec<ConversationTurn> {
        self.state.read().await.turns.clone()
    }

    /// Current draft question text.
    pub async fn draft(&self) -> String {
        self.state.read().await.draft.clone()
    }

    /// Consumes the scroll-to-newest signal raised by a successful ask.
    ///
    /// Returns true at most once per appended turn; the rendering layer
    /// polls this after each ask to know it should scroll the view.
    pub async fn take_scroll_request(&self) -> bool {
        let mut state = self.state.write().await;
        std::mem::take(&mut state.scroll_requested)
    }
}
