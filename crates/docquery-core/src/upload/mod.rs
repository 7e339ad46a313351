pub mod coordinator;
pub mod model;

pub use coordinator::UploadCoordinator;
pub use model::{LocalFile, SubmitOutcome, is_accepted_upload, ACCEPTED_UPLOAD_EXTENSIONS};
