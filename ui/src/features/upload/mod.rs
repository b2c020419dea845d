pub mod types;
pub mod workflow;

pub use types::{UploadAction, UploadFile, UploadFormState};
pub use workflow::{storage_paths, submit_upload, UploadError};
