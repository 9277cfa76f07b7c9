//! Typed view of `ffprobe -print_format json -show_format -show_streams` output.
//!
//! Scalars the engine may print as either strings or numbers are kept as raw
//! [`Value`]s and converted by the `parse_*` helpers, which never fail: a missing
//! or malformed optional field degrades to its default. Only stream discovery and
//! the frame dimensions are required.

use crate::domain::metadata::VideoMetadata;
use crate::error::ProbeError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct ProbeOutput {
    #[serde(default)]
    pub format: Option<ProbeFormat>,
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProbeFormat {
    pub duration: Option<Value>,
    pub bit_rate: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ProbeStream {
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub r_frame_rate: Option<String>,
    #[serde(default)]
    pub tags: Option<HashMap<String, Value>>,
}

impl ProbeOutput {
    pub fn from_json(json: &str) -> Result<Self, ProbeError> {
        serde_json::from_str(json).map_err(ProbeError::Malformed)
    }

    /// First stream tagged `video`, in document order.
    pub fn video_stream(&self) -> Option<&ProbeStream> {
        self.streams
            .iter()
            .find(|stream| stream.codec_type.as_deref() == Some("video"))
    }

    pub fn into_metadata(self, video_id: &str) -> Result<VideoMetadata, ProbeError> {
        let stream = self.video_stream().ok_or(ProbeError::NoVideoStream)?;

        let width = stream
            .width
            .filter(|w| *w > 0)
            .ok_or(ProbeError::MissingField("width"))?;
        let height = stream
            .height
            .filter(|h| *h > 0)
            .ok_or(ProbeError::MissingField("height"))?;

        let format = self.format.as_ref();

        Ok(VideoMetadata {
            video_id: video_id.to_string(),
            width,
            height,
            codec: stream.codec_name.clone().unwrap_or_default(),
            duration_seconds: parse_duration(format.and_then(|f| f.duration.as_ref())),
            bitrate_bps: parse_bitrate(format.and_then(|f| f.bit_rate.as_ref())),
            frame_rate: stream
                .r_frame_rate
                .as_deref()
                .map(parse_frame_rate)
                .unwrap_or(0.0),
            rotation_degrees: parse_rotation(stream.tags.as_ref().and_then(|t| t.get("rotate"))),
        })
    }
}

/// `"N/D"` to frames per second. Anything but two numeric parts, or a zero
/// denominator, gives 0.0.
pub fn parse_frame_rate(rate: &str) -> f64 {
    let parts: Vec<&str> = rate.trim().split('/').collect();
    if parts.len() != 2 {
        return 0.0;
    }

    match (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
        (Ok(num), Ok(den)) if den != 0.0 => {
            let fps = num / den;
            if fps.is_finite() && fps >= 0.0 {
                fps
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

pub fn parse_bitrate(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

pub fn parse_rotation(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|r| i32::try_from(r).ok())
            .unwrap_or(0),
        _ => 0,
    }
}

pub fn parse_duration(value: Option<&Value>) -> f64 {
    let seconds = match value {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    };
    if seconds.is_finite() && seconds >= 0.0 {
        seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn probe(value: Value) -> ProbeOutput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_frame_rate() {
        assert!((parse_frame_rate("24000/1001") - 23.976).abs() < 0.001);
        assert_eq!(parse_frame_rate("30/1"), 30.0);
        assert_eq!(parse_frame_rate("30"), 0.0);
        assert_eq!(parse_frame_rate("0/0"), 0.0);
        assert_eq!(parse_frame_rate("30/0"), 0.0);
        assert_eq!(parse_frame_rate("a/b"), 0.0);
        assert_eq!(parse_frame_rate("1/2/3"), 0.0);
    }

    #[test]
    fn test_bitrate() {
        assert_eq!(parse_bitrate(None), 0);
        assert_eq!(parse_bitrate(Some(&Value::Null)), 0);
        assert_eq!(parse_bitrate(Some(&json!("N/A"))), 0);
        assert_eq!(parse_bitrate(Some(&json!("128000"))), 128_000);
        assert_eq!(parse_bitrate(Some(&json!(64000))), 64_000);
    }

    #[test]
    fn test_rotation() {
        assert_eq!(parse_rotation(None), 0);
        assert_eq!(parse_rotation(Some(&json!("90"))), 90);
        assert_eq!(parse_rotation(Some(&json!("-90"))), -90);
        assert_eq!(parse_rotation(Some(&json!("sideways"))), 0);
        assert_eq!(parse_rotation(Some(&json!(270))), 270);
    }

    #[test]
    fn test_full_probe_document() {
        let output = probe(json!({
            "streams": [
                { "codec_type": "audio", "codec_name": "aac" },
                {
                    "codec_type": "video",
                    "codec_name": "h264",
                    "width": 1920,
                    "height": 1080,
                    "r_frame_rate": "30000/1001",
                    "tags": { "rotate": "90" }
                },
                { "codec_type": "video", "codec_name": "mjpeg", "width": 320, "height": 240 }
            ],
            "format": { "duration": "12.480000", "bit_rate": "4500000" }
        }));

        let metadata = output.into_metadata("abc").unwrap();
        assert_eq!(metadata.video_id, "abc");
        assert_eq!(metadata.codec, "h264");
        assert_eq!((metadata.width, metadata.height), (1920, 1080));
        assert_eq!(metadata.duration_seconds, 12.48);
        assert_eq!(metadata.bitrate_bps, 4_500_000);
        assert!((metadata.frame_rate - 29.97).abs() < 0.01);
        assert_eq!(metadata.rotation_degrees, 90);
    }

    #[test]
    fn test_optional_fields_degrade_to_defaults() {
        let output = probe(json!({
            "streams": [{ "codec_type": "video", "width": 640, "height": 360, "r_frame_rate": "0/0" }],
            "format": { "bit_rate": "unknown" }
        }));

        let metadata = output.into_metadata("abc").unwrap();
        assert_eq!(metadata.codec, "");
        assert_eq!(metadata.duration_seconds, 0.0);
        assert_eq!(metadata.bitrate_bps, 0);
        assert_eq!(metadata.frame_rate, 0.0);
        assert_eq!(metadata.rotation_degrees, 0);
    }

    #[test]
    fn test_no_video_stream() {
        let output = probe(json!({
            "streams": [{ "codec_type": "audio", "codec_name": "aac" }],
            "format": { "duration": "3.0" }
        }));
        assert!(matches!(
            output.into_metadata("abc"),
            Err(ProbeError::NoVideoStream)
        ));
    }

    #[test]
    fn test_missing_dimensions_are_fatal() {
        let output = probe(json!({ "streams": [{ "codec_type": "video", "width": 640 }] }));
        assert!(matches!(
            output.into_metadata("abc"),
            Err(ProbeError::MissingField("height"))
        ));
    }

    #[test]
    fn test_unparsable_output() {
        assert!(matches!(
            ProbeOutput::from_json("Invalid data found when processing input"),
            Err(ProbeError::Malformed(_))
        ));
    }
}
