#![allow(dead_code)]

use async_trait::async_trait;
use hls_ladder::{ProcessOutput, ProcessRunner, QualityTier};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

pub const VARIANT_PLAYLIST: &str =
    "#EXTM3U\n#EXT-X-PLAYLIST-TYPE:VOD\n#EXT-X-TARGETDURATION:10\n#EXTINF:10.000000,\nsegment_000.ts\n#EXT-X-ENDLIST\n";

pub fn probe_json(width: u32, height: u32) -> String {
    format!(
        r#"{{
            "streams": [
                {{ "index": 0, "codec_type": "video", "codec_name": "h264",
                   "width": {width}, "height": {height}, "r_frame_rate": "30/1" }},
                {{ "index": 1, "codec_type": "audio", "codec_name": "aac" }}
            ],
            "format": {{ "duration": "21.500000", "bit_rate": "3000000" }}
        }}"#
    )
}

/// Stands in for ffprobe/ffmpeg. Encodes write a tier playlist and one segment,
/// like the real engine would.
pub struct ScriptedRunner {
    probe_exit: i32,
    probe_stdout: String,
    failing_tier: Option<QualityTier>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    pub fn new(probe_stdout: impl Into<String>) -> Self {
        Self {
            probe_exit: 0,
            probe_stdout: probe_stdout.into(),
            failing_tier: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_source(width: u32, height: u32) -> Self {
        Self::new(probe_json(width, height))
    }

    pub fn probe_exits_with(mut self, code: i32) -> Self {
        self.probe_exit = code;
        self
    }

    pub fn failing_on(mut self, tier: QualityTier) -> Self {
        self.failing_tier = Some(tier);
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Scale filters of every encode, in call order.
    pub fn encoded_scales(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(program, _)| program == "ffmpeg")
            .filter_map(|(_, args)| args.iter().find(|a| a.starts_with("scale=")).cloned())
            .collect()
    }
}

fn exited(code: i32, stdout: &str, stderr: &str) -> ProcessOutput {
    ProcessOutput {
        code: Some(code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        match program {
            "ffprobe" if self.probe_exit != 0 => {
                Ok(exited(self.probe_exit, "", "Invalid data found when processing input"))
            }
            "ffprobe" => Ok(exited(0, &self.probe_stdout, "")),
            "ffmpeg" => {
                if let Some(tier) = self.failing_tier {
                    let scale = format!("scale={}", tier.scale_filter());
                    if args.contains(&scale) {
                        return Ok(exited(1, "", "Conversion failed!"));
                    }
                }

                let playlist = PathBuf::from(args.last().expect("output playlist argument"));
                let dir = playlist.parent().expect("tier directory");
                tokio::fs::write(dir.join("segment_000.ts"), b"\x47segment").await?;
                tokio::fs::write(&playlist, VARIANT_PLAYLIST).await?;
                Ok(exited(0, "", "video:12kB audio:0kB"))
            }
            other => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not installed", other),
            )),
        }
    }
}
