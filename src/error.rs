//! Error types for the transcoding pipeline and its collaborators.

use crate::domain::jobs::JobStage;
use crate::domain::ladder::QualityTier;
use std::path::PathBuf;

/// Failures while inspecting a source file.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to spawn probe: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("probe failed (code {code}): {output}")]
    Failed { code: i32, output: String },

    #[error("probe output is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("no video stream in source")]
    NoVideoStream,

    #[error("video stream is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Failures while producing one tier.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("cannot create output directory {path:?} for {tier}: {source}")]
    OutputDir {
        tier: QualityTier,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn encoder for {tier}: {source}")]
    Spawn {
        tier: QualityTier,
        #[source]
        source: std::io::Error,
    },

    #[error("encoder failed for {tier} (code {code}): {output}")]
    Failed {
        tier: QualityTier,
        code: i32,
        output: String,
    },
}

impl EncodeError {
    pub fn tier(&self) -> QualityTier {
        match self {
            EncodeError::OutputDir { tier, .. }
            | EncodeError::Spawn { tier, .. }
            | EncodeError::Failed { tier, .. } => *tier,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot write master manifest {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no master manifest for video {video_id}")]
    NotFound { video_id: String },

    #[error("cannot read master manifest {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// First failure of a transcoding job.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid video id {0:?}")]
    InvalidVideoId(String),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl PipelineError {
    /// Stage the job was attempting when it failed.
    pub fn stage(&self) -> JobStage {
        match self {
            PipelineError::InvalidVideoId(_) => JobStage::Received,
            PipelineError::Probe(_) => JobStage::MetadataExtracted,
            PipelineError::Encode(e) => JobStage::Encoding(e.tier()),
            PipelineError::Manifest(_) => JobStage::ManifestWritten,
        }
    }
}

/// Failures of the upload store and resource lookups.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid path component {0:?}")]
    InvalidName(String),

    #[error("not found: {0:?}")]
    NotFound(PathBuf),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("request has no file field")]
    MissingFile,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
