use crate::adapters::local::fs::FsStore;
use crate::application::orchestrator::TranscodingOrchestrator;
use crate::config::PipelineConfig;
use crate::domain::ladder::QualityTier;
use crate::error::{ManifestError, StorageError, UploadError};
use crate::ports::process::ProcessRunner;
use bytes::Bytes;
use futures::Stream;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Upload, transcode and playback lookups for the HTTP layer.
pub struct VideoService<R> {
    store: FsStore,
    orchestrator: TranscodingOrchestrator<R>,
}

impl<R> VideoService<R>
where
    R: ProcessRunner,
{
    pub fn new(runner: Arc<R>, config: &PipelineConfig) -> Self {
        Self {
            store: FsStore::new(config.storage_root.clone()),
            orchestrator: TranscodingOrchestrator::new(runner, config),
        }
    }

    /// Store the upload under a fresh id and transcode it. Returns once the
    /// master manifest is readable.
    pub async fn upload<S, E>(&self, file_name: &str, stream: S) -> Result<String, UploadError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<BoxError>,
    {
        let video_id = Uuid::new_v4().to_string();
        let source = self.store.store(&video_id, file_name, stream).await?;
        self.orchestrator.run(&source, &video_id).await?;
        Ok(video_id)
    }

    pub async fn master_playlist(&self, video_id: &str) -> Result<String, ManifestError> {
        self.orchestrator.read_master(video_id).await
    }

    pub async fn variant_resource(
        &self,
        video_id: &str,
        tier: QualityTier,
        file_name: &str,
    ) -> Result<PathBuf, StorageError> {
        self.store.resolve_variant(video_id, tier, file_name).await
    }
}
