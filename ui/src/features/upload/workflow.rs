//! Upload workflow: sequential blob uploads, public URL resolution, metadata
//! row insert. Side effects are strictly additive; a failure after the first
//! upload leaves the already-stored objects orphaned on purpose.

use thiserror::Error;
use tracing::{info, warn};

use crate::features::upload::types::UploadFormState;
use crate::services::backend::{current_time_millis, Backend, NewVideo};

const VIDEO_NAMESPACE: &str = "videos";
const THUMBNAIL_NAMESPACE: &str = "thumbnails";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UploadError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("You must be signed in to upload")]
    NotAuthenticated,

    #[error("Upload failed: {0}")]
    Storage(String),

    #[error("Failed to save video: {0}")]
    Database(String),
}

/// File extension from a picked file's name, `bin` when there is none
pub fn file_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
        _ => "bin",
    }
}

/// Storage paths for a video/thumbnail pair: `{id}/{ts}.{ext}` and
/// `{id}/{ts}_thumb.{ext}`. The shared millisecond timestamp keeps paths
/// unique per user.
pub fn storage_paths(
    identity_id: &str,
    video_name: &str,
    thumbnail_name: &str,
    timestamp_ms: u64,
) -> (String, String) {
    let video_path = format!(
        "{}/{}.{}",
        identity_id,
        timestamp_ms,
        file_extension(video_name)
    );
    let thumbnail_path = format!(
        "{}/{}_thumb.{}",
        identity_id,
        timestamp_ms,
        file_extension(thumbnail_name)
    );
    (video_path, thumbnail_path)
}

pub async fn submit_upload<B: Backend + ?Sized>(
    backend: &B,
    draft: &UploadFormState,
) -> Result<(), UploadError> {
    // Completeness gate before any network call
    if !draft.is_complete() {
        return Err(UploadError::MissingFields);
    }
    let video = draft.video.as_ref().ok_or(UploadError::MissingFields)?;
    let thumbnail = draft.thumbnail.as_ref().ok_or(UploadError::MissingFields)?;

    // Step 1: resolve the current identity
    let session = backend
        .get_session()
        .await
        .map_err(|_| UploadError::NotAuthenticated)?
        .ok_or(UploadError::NotAuthenticated)?;
    let author_id = session.identity.id;

    // Step 2: storage paths
    let (video_path, thumbnail_path) = storage_paths(
        &author_id,
        &video.name,
        &thumbnail.name,
        current_time_millis(),
    );

    // Step 3: video blob
    backend
        .upload_object(
            VIDEO_NAMESPACE,
            &video_path,
            video.bytes.clone(),
            &video.content_type,
        )
        .await
        .map_err(|e| UploadError::Storage(e.to_string()))?;

    // Step 4: thumbnail blob. On failure the video blob stays behind with no
    // referencing row.
    if let Err(e) = backend
        .upload_object(
            THUMBNAIL_NAMESPACE,
            &thumbnail_path,
            thumbnail.bytes.clone(),
            &thumbnail.content_type,
        )
        .await
    {
        warn!(
            "Thumbnail upload failed, video object {} is orphaned",
            video_path
        );
        return Err(UploadError::Storage(e.to_string()));
    }

    // Step 5: public URLs (non-failing lookups)
    let video_url = backend.public_url(VIDEO_NAMESPACE, &video_path);
    let thumbnail_url = backend.public_url(THUMBNAIL_NAMESPACE, &thumbnail_path);

    // Step 6: metadata row
    let row = NewVideo {
        author_id,
        title: draft.title.trim().to_string(),
        description: if draft.description.trim().is_empty() {
            None
        } else {
            Some(draft.description.clone())
        },
        video_url,
        thumbnail_url,
    };
    backend
        .insert_video(&row)
        .await
        .map_err(|e| UploadError::Database(e.to_string()))?;

    info!("Video '{}' uploaded", row.title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::upload::types::{UploadAction, UploadFile};
    use crate::services::backend::testing::MockBackend;

    fn file(name: &str, content_type: &str) -> UploadFile {
        UploadFile {
            name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn complete_draft() -> UploadFormState {
        let mut draft = UploadFormState::default();
        draft.reduce_in_place(UploadAction::SetTitle("My video".to_string()));
        draft.reduce_in_place(UploadAction::SetDescription("a description".to_string()));
        draft.reduce_in_place(UploadAction::SetVideo(Some(file("cat.mp4", "video/mp4"))));
        draft.reduce_in_place(UploadAction::SetThumbnail(Some(file(
            "cat.png",
            "image/png",
        ))));
        draft
    }

    #[test]
    fn extension_comes_from_the_file_name() {
        assert_eq!(file_extension("cat.mp4"), "mp4");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("noext"), "bin");
        assert_eq!(file_extension(".hidden"), "bin");
    }

    #[test]
    fn paths_share_the_timestamp_and_carry_the_thumb_suffix() {
        let (video, thumb) = storage_paths("user-1", "cat.mp4", "cat.png", 1700000000000);
        assert_eq!(video, "user-1/1700000000000.mp4");
        assert_eq!(thumb, "user-1/1700000000000_thumb.png");
    }

    #[tokio::test]
    async fn missing_thumbnail_aborts_before_any_network_call() {
        let backend = MockBackend::with_session("user-1");
        let mut draft = complete_draft();
        draft.reduce_in_place(UploadAction::SetThumbnail(None));

        let result = submit_upload(&backend, &draft).await;
        assert_eq!(result, Err(UploadError::MissingFields));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn upload_requires_an_authenticated_identity() {
        let backend = MockBackend::new();
        let result = submit_upload(&backend, &complete_draft()).await;
        assert_eq!(result, Err(UploadError::NotAuthenticated));
        assert!(backend.uploaded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn thumbnail_failure_leaves_video_orphaned_and_inserts_no_row() {
        let backend = MockBackend::with_session("user-1");
        *backend.fail_upload_namespace.lock().unwrap() = Some("thumbnails".to_string());

        let result = submit_upload(&backend, &complete_draft()).await;

        match result {
            Err(UploadError::Storage(message)) => {
                assert!(message.contains("thumbnails"));
            }
            other => panic!("expected a storage error, got {:?}", other),
        }
        // The video object was already stored and stays behind
        let uploaded = backend.uploaded.lock().unwrap().clone();
        assert_eq!(uploaded.len(), 1);
        assert_eq!(uploaded[0].0, "videos");
        assert!(!backend.called_insert_video());
    }

    #[tokio::test]
    async fn video_failure_aborts_before_the_thumbnail() {
        let backend = MockBackend::with_session("user-1");
        *backend.fail_upload_namespace.lock().unwrap() = Some("videos".to_string());

        let result = submit_upload(&backend, &complete_draft()).await;
        assert!(matches!(result, Err(UploadError::Storage(_))));
        assert!(backend.uploaded.lock().unwrap().is_empty());
        assert!(!backend.called_insert_video());
    }

    #[tokio::test]
    async fn metadata_insert_failure_leaves_both_blobs_orphaned() {
        let backend = MockBackend::with_session("user-1");
        *backend.insert_video_error.lock().unwrap() =
            Some(crate::services::backend::BackendError::Service {
                status: 500,
                message: "internal error".to_string(),
            });

        let result = submit_upload(&backend, &complete_draft()).await;
        assert!(matches!(result, Err(UploadError::Database(_))));
        assert_eq!(backend.uploaded.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn successful_upload_inserts_a_row_referencing_both_urls() {
        let backend = MockBackend::with_session("user-1");

        submit_upload(&backend, &complete_draft())
            .await
            .expect("upload succeeds");

        let rows = backend.inserted_videos.lock().unwrap().clone();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.author_id, "user-1");
        assert_eq!(row.title, "My video");
        assert_eq!(row.description.as_deref(), Some("a description"));
        assert!(row.video_url.contains("/videos/user-1/"));
        assert!(row.video_url.ends_with(".mp4"));
        assert!(row.thumbnail_url.contains("/thumbnails/user-1/"));
        assert!(row.thumbnail_url.ends_with("_thumb.png"));
    }
}
