use crate::config::PipelineConfig;
use crate::domain::hls::PLAYLIST_FILE_NAME;
use crate::domain::ladder::QualityTier;
use crate::error::EncodeError;
use crate::ports::process::ProcessRunner;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Target segment length, in seconds.
pub const SEGMENT_SECONDS: u32 = 10;

/// Produces one tier's segments and playlist through the transcoding engine.
pub struct VariantEncoder<R> {
    runner: Arc<R>,
    ffmpeg_bin: String,
    storage_root: PathBuf,
}

impl<R> VariantEncoder<R>
where
    R: ProcessRunner,
{
    pub fn new(runner: Arc<R>, config: &PipelineConfig) -> Self {
        Self {
            runner,
            ffmpeg_bin: config.ffmpeg_bin.clone(),
            storage_root: config.storage_root.clone(),
        }
    }

    /// `{storage_root}/{video_id}/{tier}`
    pub fn output_dir(&self, video_id: &str, tier: QualityTier) -> PathBuf {
        self.storage_root.join(video_id).join(tier.name())
    }

    /// Encode `source` into `tier`, returning the tier playlist path.
    /// Not retried; the caller decides what a failure means for the job.
    pub async fn encode(
        &self,
        source: &Path,
        video_id: &str,
        tier: QualityTier,
    ) -> Result<PathBuf, EncodeError> {
        let dir = self.output_dir(video_id, tier);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| EncodeError::OutputDir {
                tier,
                path: dir.clone(),
                source,
            })?;

        let playlist = dir.join(PLAYLIST_FILE_NAME);
        let args = encode_args(source, tier, &dir, &playlist);

        tracing::info!(video_id, %tier, scale = %tier.scale_filter(), "encoding tier");
        let output = self
            .runner
            .run(&self.ffmpeg_bin, &args)
            .await
            .map_err(|source| EncodeError::Spawn { tier, source })?;

        tracing::debug!(video_id, %tier, output = %output.combined(), "encoder finished");

        if !output.success() {
            return Err(EncodeError::Failed {
                tier,
                code: output.exit_code(),
                output: output.combined(),
            });
        }

        Ok(playlist)
    }
}

fn encode_args(source: &Path, tier: QualityTier, dir: &Path, playlist: &Path) -> Vec<String> {
    vec![
        String::from("-y"),
        String::from("-i"),
        source.to_string_lossy().into_owned(),
        String::from("-vf"),
        format!("scale={}", tier.scale_filter()),
        String::from("-hls_time"),
        SEGMENT_SECONDS.to_string(),
        String::from("-hls_playlist_type"),
        String::from("vod"),
        String::from("-hls_segment_filename"),
        dir.join("segment_%03d.ts").to_string_lossy().into_owned(),
        playlist.to_string_lossy().into_owned(),
    ]
}
