//! Configuration for the pipeline and the local deployment.

use std::env;
use std::path::PathBuf;

/// Settings threaded into every pipeline component.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Root directory holding `{video_id}/...` trees
    pub storage_root: PathBuf,
    /// Probing engine binary
    pub ffprobe_bin: String,
    /// Transcoding engine binary
    pub ffmpeg_bin: String,
}

impl PipelineConfig {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            ffprobe_bin: String::from("ffprobe"),
            ffmpeg_bin: String::from("ffmpeg"),
        }
    }
}

/// Configuration for local/monolith deployment.
#[derive(Clone, Debug)]
pub struct LocalConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    pub pipeline: PipelineConfig,
}

impl LocalConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("127.0.0.1")),
            port: env::var("PORT").unwrap_or_else(|_| String::from("3000")),
            pipeline: PipelineConfig {
                storage_root: PathBuf::from(
                    env::var("VIDEOS_DIR").unwrap_or_else(|_| String::from("./videos")),
                ),
                ffprobe_bin: env::var("FFPROBE_BIN").unwrap_or_else(|_| String::from("ffprobe")),
                ffmpeg_bin: env::var("FFMPEG_BIN").unwrap_or_else(|_| String::from("ffmpeg")),
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}
