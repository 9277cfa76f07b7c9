use crate::config::PipelineConfig;
use crate::domain::metadata::VideoMetadata;
use crate::domain::probe::ProbeOutput;
use crate::error::ProbeError;
use crate::ports::process::ProcessRunner;
use std::path::Path;
use std::sync::Arc;

/// Reads technical metadata of a source through the probing engine.
pub struct MetadataExtractor<R> {
    runner: Arc<R>,
    ffprobe_bin: String,
}

impl<R> MetadataExtractor<R>
where
    R: ProcessRunner,
{
    pub fn new(runner: Arc<R>, config: &PipelineConfig) -> Self {
        Self {
            runner,
            ffprobe_bin: config.ffprobe_bin.clone(),
        }
    }

    pub async fn extract(&self, video_id: &str, path: &Path) -> Result<VideoMetadata, ProbeError> {
        let args = probe_args(path);
        let output = self
            .runner
            .run(&self.ffprobe_bin, &args)
            .await
            .map_err(ProbeError::Spawn)?;

        if !output.success() {
            return Err(ProbeError::Failed {
                code: output.exit_code(),
                output: output.combined(),
            });
        }

        let metadata = ProbeOutput::from_json(&output.stdout)?.into_metadata(video_id)?;
        tracing::debug!(?metadata, "probed source");
        Ok(metadata)
    }
}

fn probe_args(path: &Path) -> Vec<String> {
    vec![
        String::from("-v"),
        String::from("quiet"),
        String::from("-print_format"),
        String::from("json"),
        String::from("-show_format"),
        String::from("-show_streams"),
        path.to_string_lossy().into_owned(),
    ]
}
