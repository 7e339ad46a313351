//! Upload domain model.

use crate::document::Document;
use crate::error::DocqueryError;

/// File types offered by the upload selector.
///
/// This is a client-side filter only; the submit path never enforces it and
/// the backend applies its own checks.
pub const ACCEPTED_UPLOAD_EXTENSIONS: &[&str] = &[
    "pdf", "txt", "docx", "xlsx", "csv", "json", "html", "xml", "jpg", "jpeg", "png",
];

/// Returns true if the file name carries an accepted upload extension.
pub fn is_accepted_upload(name: &str) -> bool {
    let Some((_, extension)) = name.rsplit_once('.') else {
        return false;
    };
    let extension = extension.to_ascii_lowercase();
    ACCEPTED_UPLOAD_EXTENSIONS.contains(&extension.as_str())
}

/// A local file staged for upload.
///
/// The client-side stand-in for a browser file handle: just the name the
/// backend will see and the bytes for the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Per-branch result of one upload submission.
///
/// The file and drive-link branches run independently, so a single submit
/// can succeed on one and fail on the other. `None` means the branch had
/// nothing pending and was skipped.
#[derive(Debug, Clone, Default)]
pub struct SubmitOutcome {
    pub files: Option<Result<Document, DocqueryError>>,
    pub drive_link: Option<Result<Document, DocqueryError>>,
}

impl SubmitOutcome {
    /// True if at least one branch produced a document.
    pub fn absorbed_any(&self) -> bool {
        matches!(self.files, Some(Ok(_))) || matches!(self.drive_link, Some(Ok(_)))
    }

    /// True if every attempted branch succeeded.
    pub fn fully_succeeded(&self) -> bool {
        !matches!(self.files, Some(Err(_))) && !matches!(self.drive_link, Some(Err(_)))
    }
}
