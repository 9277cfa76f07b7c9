use crate::application::encoder::VariantEncoder;
use crate::application::extractor::MetadataExtractor;
use crate::application::manifest::ManifestGenerator;
use crate::config::PipelineConfig;
use crate::domain::jobs::{is_single_component, JobStage};
use crate::domain::ladder::{self, QualityTier};
use crate::domain::metadata::VideoMetadata;
use crate::error::{ManifestError, PipelineError};
use crate::ports::process::ProcessRunner;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Instrument;

/// Result of a fully completed job.
#[derive(Debug, Clone)]
pub struct TranscodedVideo {
    pub metadata: VideoMetadata,
    pub tiers: Vec<QualityTier>,
    pub master_path: PathBuf,
}

/// Runs probe, plan, per-tier encode and master manifest, strictly in that order.
///
/// Tiers are encoded one after another. The first failure ends the job and the
/// master manifest is only written once every tier has succeeded. Tier directories
/// written before a failure are left in place.
pub struct TranscodingOrchestrator<R> {
    extractor: MetadataExtractor<R>,
    encoder: VariantEncoder<R>,
    manifests: ManifestGenerator,
}

impl<R> TranscodingOrchestrator<R>
where
    R: ProcessRunner,
{
    pub fn new(runner: Arc<R>, config: &PipelineConfig) -> Self {
        Self {
            extractor: MetadataExtractor::new(runner.clone(), config),
            encoder: VariantEncoder::new(runner, config),
            manifests: ManifestGenerator::new(config),
        }
    }

    pub async fn run(&self, source: &Path, video_id: &str) -> Result<TranscodedVideo, PipelineError> {
        let span = tracing::info_span!("transcode", video_id);
        async {
            let result = self.run_stages(source, video_id).await;
            if let Err(e) = &result {
                tracing::error!(stage = %e.stage(), error = %e, "job failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_stages(&self, source: &Path, video_id: &str) -> Result<TranscodedVideo, PipelineError> {
        validate_video_id(video_id)?;
        tracing::info!(stage = %JobStage::Received, ?source, "job received");

        let metadata = self.extractor.extract(video_id, source).await?;
        tracing::info!(
            stage = %JobStage::MetadataExtracted,
            width = metadata.width,
            height = metadata.height,
            codec = %metadata.codec,
            rotation = metadata.rotation_degrees,
            "metadata extracted"
        );

        let tiers = ladder::plan(&metadata);
        tracing::info!(stage = %JobStage::Planned, ?tiers, "ladder planned");

        for &tier in &tiers {
            tracing::info!(stage = %JobStage::Encoding(tier), "encoding");
            self.encoder.encode(source, video_id, tier).await?;
        }

        let master_path = self.manifests.generate_master(video_id, &tiers).await?;
        tracing::info!(stage = %JobStage::ManifestWritten, "job complete");

        Ok(TranscodedVideo {
            metadata,
            tiers,
            master_path,
        })
    }

    pub async fn read_master(&self, video_id: &str) -> Result<String, ManifestError> {
        self.manifests.read_master(video_id).await
    }
}

fn validate_video_id(video_id: &str) -> Result<(), PipelineError> {
    if is_single_component(video_id) {
        Ok(())
    } else {
        Err(PipelineError::InvalidVideoId(video_id.to_string()))
    }
}
