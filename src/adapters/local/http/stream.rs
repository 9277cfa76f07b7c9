use super::{manifest_error, storage_error, ApiError};
use crate::application::video_service::VideoService;
use crate::domain::ladder::{QualityTier, UnknownTier};
use crate::ports::process::ProcessRunner;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

pub const PLAYLIST_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";
pub const SEGMENT_CONTENT_TYPE: &str = "video/mp2t";
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub fn content_type_for(file_name: &str) -> &'static str {
    if file_name.ends_with(".m3u8") {
        PLAYLIST_CONTENT_TYPE
    } else if file_name.ends_with(".ts") {
        SEGMENT_CONTENT_TYPE
    } else {
        DEFAULT_CONTENT_TYPE
    }
}

pub async fn master<R>(
    State(service): State<Arc<VideoService<R>>>,
    Path(video_id): Path<String>,
) -> Result<Response, ApiError>
where
    R: ProcessRunner + 'static,
{
    let text = service
        .master_playlist(&video_id)
        .await
        .map_err(manifest_error)?;
    Ok(([(header::CONTENT_TYPE, PLAYLIST_CONTENT_TYPE)], text).into_response())
}

pub async fn variant<R>(
    State(service): State<Arc<VideoService<R>>>,
    Path((video_id, tier, file_name)): Path<(String, String, String)>,
) -> Result<Response, ApiError>
where
    R: ProcessRunner + 'static,
{
    let tier: QualityTier = tier
        .parse()
        .map_err(|e: UnknownTier| (StatusCode::NOT_FOUND, e.to_string()))?;

    let path = service
        .variant_resource(&video_id, tier, &file_name)
        .await
        .map_err(storage_error)?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let body = Body::from_stream(ReaderStream::new(file));

    Ok(([(header::CONTENT_TYPE, content_type_for(&file_name))], body).into_response())
}
