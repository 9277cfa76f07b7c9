use crate::domain::ladder::QualityTier;
use std::fmt::Write;

/// File name of every playlist the pipeline produces, master and per-tier alike.
pub const PLAYLIST_FILE_NAME: &str = "master.m3u8";

pub struct VariantStream {
    pub bandwidth: u64,
    /// `WxH`
    pub resolution: String,
    /// Relative to the master playlist
    pub uri: String,
}

pub struct MasterPlaylist {
    pub variants: Vec<VariantStream>,
}

impl MasterPlaylist {
    pub fn new() -> Self {
        Self {
            variants: Vec::new(),
        }
    }

    /// One variant per tier, in ladder order, pointing at `{tier}/master.m3u8`.
    pub fn for_tiers(tiers: &[QualityTier]) -> Self {
        let mut playlist = Self::new();
        for tier in tiers {
            playlist.add_variant(
                tier.bandwidth(),
                tier.resolution(),
                format!("{}/{}", tier.name(), PLAYLIST_FILE_NAME),
            );
        }
        playlist
    }

    pub fn add_variant(&mut self, bandwidth: u64, resolution: String, uri: String) {
        self.variants.push(VariantStream {
            bandwidth,
            resolution,
            uri,
        });
    }

    pub fn render(&self) -> String {
        let mut out = String::from("#EXTM3U\n");
        for variant in &self.variants {
            // Writing into a String cannot fail.
            let _ = writeln!(
                out,
                "#EXT-X-STREAM-INF:BANDWIDTH={},RESOLUTION={}",
                variant.bandwidth, variant.resolution
            );
            out.push_str(&variant.uri);
            out.push('\n');
        }
        out
    }
}

impl Default for MasterPlaylist {
    fn default() -> Self {
        Self::new()
    }
}
