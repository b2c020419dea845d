// Form state for the upload page - no dioxus imports needed here

/// A file picked in the browser, read fully into memory before upload
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug)]
pub enum UploadAction {
    SetTitle(String),
    SetDescription(String),
    SetVideo(Option<UploadFile>),
    SetThumbnail(Option<UploadFile>),
    SetUploading(bool),
    SetError(Option<String>),
}

#[derive(Clone, Default)]
pub struct UploadFormState {
    pub title: String,
    pub description: String,
    pub video: Option<UploadFile>,
    pub thumbnail: Option<UploadFile>,
    pub is_uploading: bool,
    pub error: Option<String>,
}

impl UploadFormState {
    pub fn reduce_in_place(&mut self, action: UploadAction) {
        match action {
            UploadAction::SetTitle(title) => {
                self.title = title;
            }
            UploadAction::SetDescription(description) => {
                self.description = description;
            }
            UploadAction::SetVideo(file) => {
                self.video = file;
            }
            UploadAction::SetThumbnail(file) => {
                self.thumbnail = file;
            }
            UploadAction::SetUploading(uploading) => {
                self.is_uploading = uploading;
            }
            UploadAction::SetError(error) => {
                self.error = error;
            }
        }
    }

    /// Title non-empty, video selected, thumbnail selected
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && self.video.is_some() && self.thumbnail.is_some()
    }
}
