/// Technical metadata of one source file. Built once per job, then read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub video_id: String,
    pub width: u32,
    pub height: u32,
    pub codec: String,
    pub duration_seconds: f64,
    /// 0 when the container does not report one
    pub bitrate_bps: u64,
    /// 0.0 when the stream rate is missing or malformed
    pub frame_rate: f64,
    pub rotation_degrees: i32,
}
