use super::{upload_error, ApiError};
use crate::application::video_service::VideoService;
use crate::error::UploadError;
use crate::ports::process::ProcessRunner;
use axum::extract::{Multipart, State};
use std::sync::Arc;

/// Multipart form field carrying the video.
const FILE_FIELD: &str = "file";

// Streams the `file` field to storage, then transcodes before answering with the video id.
pub async fn handle<R>(
    State(service): State<Arc<VideoService<R>>>,
    mut multipart: Multipart,
) -> Result<String, ApiError>
where
    R: ProcessRunner + 'static,
{
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = if let Some(file_name) = field.file_name() {
            file_name.to_owned()
        } else {
            continue;
        };

        let video_id = service
            .upload(&file_name, field)
            .await
            .map_err(upload_error)?;
        tracing::info!(video_id = %video_id, file_name = %file_name, "upload transcoded");
        return Ok(video_id);
    }

    Err(upload_error(UploadError::MissingFile))
}
