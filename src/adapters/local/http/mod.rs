//! HTTP inbound adapter: upload and playback routes over [`VideoService`].

pub mod stream;
pub mod upload;

use crate::application::video_service::VideoService;
use crate::error::{ManifestError, PipelineError, StorageError, UploadError};
use crate::ports::process::ProcessRunner;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub type ApiError = (StatusCode, String);

pub fn router<R>(service: Arc<VideoService<R>>) -> Router
where
    R: ProcessRunner + 'static,
{
    Router::new()
        .route("/api/videos/upload", post(upload::handle::<R>))
        .route(
            "/api/videos/:video_id/stream/master.m3u8",
            get(stream::master::<R>),
        )
        .route(
            "/api/videos/:video_id/stream/:tier/:file_name",
            get(stream::variant::<R>),
        )
        .layer(DefaultBodyLimit::disable())
        .with_state(service)
}

pub fn pipeline_error(err: PipelineError) -> ApiError {
    let status = match &err {
        PipelineError::InvalidVideoId(_) => StatusCode::BAD_REQUEST,
        PipelineError::Probe(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::Encode(_) | PipelineError::Manifest(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

pub fn storage_error(err: StorageError) -> ApiError {
    let status = match &err {
        StorageError::InvalidName(_) => StatusCode::BAD_REQUEST,
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

pub fn manifest_error(err: ManifestError) -> ApiError {
    let status = match &err {
        ManifestError::NotFound { .. } => StatusCode::NOT_FOUND,
        ManifestError::Read { .. } | ManifestError::Write { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

pub fn upload_error(err: UploadError) -> ApiError {
    match err {
        UploadError::MissingFile => (StatusCode::BAD_REQUEST, err.to_string()),
        UploadError::Storage(e) => storage_error(e),
        UploadError::Pipeline(e) => pipeline_error(e),
    }
}
