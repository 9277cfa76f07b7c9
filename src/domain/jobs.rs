use crate::domain::ladder::QualityTier;
use std::fmt;
use std::path::{Component, Path};

/// Progress of one transcoding job. Stages are only logged, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStage {
    Received,
    MetadataExtracted,
    Planned,
    Encoding(QualityTier),
    ManifestWritten,
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStage::Received => write!(f, "received"),
            JobStage::MetadataExtracted => write!(f, "metadata_extracted"),
            JobStage::Planned => write!(f, "planned"),
            JobStage::Encoding(tier) => write!(f, "encoding({})", tier),
            JobStage::ManifestWritten => write!(f, "manifest_written"),
        }
    }
}

/// Video ids and file names become path components, so each must be exactly one
/// normal component.
pub fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
