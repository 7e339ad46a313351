//! Upload submission coordinator.

use super::model::{LocalFile, SubmitOutcome};
use crate::backend::DocumentBackend;
use crate::document::DocumentRegistry;
use crate::error::{DocqueryError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The upload endpoint accepts at most this many files per batch.
const MAX_FILES_PER_UPLOAD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadPhase {
    Idle,
    Submitting,
}

#[derive(Debug)]
struct UploadState {
    files: Vec<LocalFile>,
    drive_link: String,
    phase: UploadPhase,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            drive_link: String::new(),
            phase: UploadPhase::Idle,
        }
    }
}

/// Accepts a batch of local files and/or a drive link and submits them to
/// the backend, handing each resulting document to the [`DocumentRegistry`].
///
/// Pending inputs are transient: each is cleared when its own branch
/// succeeds and left intact on failure so the user can retry. Cloning yields
/// a handle to the same pending state.
#[derive(Clone)]
pub struct UploadCoordinator {
    backend: Arc<dyn DocumentBackend>,
    registry: DocumentRegistry,
    state: Arc<RwLock<UploadState>>,
}

impl UploadCoordinator {
    pub fn new(backend: Arc<dyn DocumentBackend>, registry: DocumentRegistry) -> Self {
        Self {
            backend,
            registry,
            state: Arc::new(RwLock::new(UploadState::default())),
        }
    }

    /// Replaces the pending file selection.
    ///
    /// A selection of more than five files is rejected whole (never
    /// truncated) and the prior selection is kept.
    pub async fn set_files(&self, selection: Vec<LocalFile>) -> Result<()> {
        if selection.len() > MAX_FILES_PER_UPLOAD {
            return Err(DocqueryError::validation(format!(
                "You can only upload up to {} files at a time.",
                MAX_FILES_PER_UPLOAD
            )));
        }
        self.state.write().await.files = selection;
        Ok(())
    }

    /// Overwrites the pending drive link verbatim. No URL validation is
    /// performed client-side; the backend decides whether it can ingest it.
    pub async fn set_drive_link(&self, value: impl Into<String>) {
        self.state.write().await.drive_link = value.into();
    }

    /// Snapshot of the pending file selection.
    pub async fn pending_files(&self) -> Vec<LocalFile> {
        self.state.read().await.files.clone()
    }

    /// Snapshot of the pending drive link.
    pub async fn pending_drive_link(&self) -> String {
        self.state.read().await.drive_link.clone()
    }

    /// Submits whatever is pending: the file batch, the drive link, or both.
    ///
    /// The two branches are independent; a failure in one never stops the
    /// other. Each successful branch hands its document to the registry and
    /// clears its own input. The busy phase is held for the whole submission
    /// and released on every exit path.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        let (files, drive_link) = {
            let mut state = self.state.write().await;
            if state.phase == UploadPhase::Submitting {
                return Err(DocqueryError::validation("An upload is already in progress."));
            }
            if state.files.is_empty() && state.drive_link.is_empty() {
                return Err(DocqueryError::validation(
                    "Please select files or provide a drive link.",
                ));
            }
            state.phase = UploadPhase::Submitting;
            (state.files.clone(), state.drive_link.clone())
        };

        let mut outcome = SubmitOutcome::default();

        if !files.is_empty() {
            match self.backend.upload_files(&files).await {
                Ok(document) => {
                    self.registry.absorb(document.clone()).await;
                    self.state.write().await.files.clear();
                    outcome.files = Some(Ok(document));
                }
                Err(err) => {
                    // Selection stays pending for a user-initiated retry.
                    tracing::warn!("File upload failed: {}", err);
                    outcome.files = Some(Err(err));
                }
            }
        }

        if !drive_link.is_empty() {
            match self.backend.upload_drive_link(&drive_link).await {
                Ok(document) => {
                    self.registry.absorb(document.clone()).await;
                    self.state.write().await.drive_link.clear();
                    outcome.drive_link = Some(Ok(document));
                }
                Err(err) => {
                    tracing::warn!("Drive link upload failed: {}", err);
                    outcome.drive_link = Some(Err(err));
                }
            }
        }

        self.state.write().await.phase = UploadPhase::Idle;
        Ok(outcome)
    }
}
