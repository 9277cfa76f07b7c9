//! hls_ladder - Adaptive-bitrate transcoding pipeline
//!
//! Hexagonal Architecture:
//! - domain/: Pure logic (probe decoding, quality ladder, playlist rendering)
//! - ports/: Trait definitions
//! - adapters/: Concrete implementations (child processes, filesystem, HTTP)
//! - application/: Services sequencing the pipeline
//! - config: Environment configuration
//! - error: Error taxonomy shared by every layer

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use application::orchestrator::{TranscodedVideo, TranscodingOrchestrator};
pub use application::video_service::VideoService;
pub use config::{LocalConfig, PipelineConfig};
pub use domain::ladder::QualityTier;
pub use domain::metadata::VideoMetadata;
pub use error::{EncodeError, ManifestError, PipelineError, ProbeError};
pub use ports::process::{ProcessOutput, ProcessRunner};
