//! Quality ladder: the closed set of output tiers and the planner choosing among them.

use crate::domain::metadata::VideoMetadata;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualityTier {
    P480,
    P720,
    P1080,
}

impl QualityTier {
    /// Every supported tier, ascending.
    pub const ALL: [QualityTier; 3] = [QualityTier::P480, QualityTier::P720, QualityTier::P1080];

    pub fn name(self) -> &'static str {
        match self {
            QualityTier::P480 => "480p",
            QualityTier::P720 => "720p",
            QualityTier::P1080 => "1080p",
        }
    }

    pub fn width(self) -> u32 {
        match self {
            QualityTier::P480 => 640,
            QualityTier::P720 => 1280,
            QualityTier::P1080 => 1920,
        }
    }

    pub fn height(self) -> u32 {
        match self {
            QualityTier::P480 => 480,
            QualityTier::P720 => 720,
            QualityTier::P1080 => 1080,
        }
    }

    /// Nominal bits/second announced in the master manifest. Not measured.
    pub fn bandwidth(self) -> u64 {
        match self {
            QualityTier::P480 => 800_000,
            QualityTier::P720 => 1_400_000,
            QualityTier::P1080 => 2_800_000,
        }
    }

    /// Source height from which this tier is produced. 480p is always produced.
    pub fn min_source_height(self) -> u32 {
        match self {
            QualityTier::P480 => 0,
            QualityTier::P720 => 720,
            QualityTier::P1080 => 1080,
        }
    }

    /// `W:H`, as taken by the scale filter.
    pub fn scale_filter(self) -> String {
        format!("{}:{}", self.width(), self.height())
    }

    /// `WxH`, as written in RESOLUTION attributes.
    pub fn resolution(self) -> String {
        format!("{}x{}", self.width(), self.height())
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quality tier {0:?}")]
pub struct UnknownTier(pub String);

impl FromStr for QualityTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QualityTier::ALL
            .into_iter()
            .find(|tier| tier.name() == s)
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}

/// Tiers to produce for a source, ascending. Thresholds are inclusive and evaluated
/// independently, so a 1080-line source yields all three tiers.
pub fn plan(metadata: &VideoMetadata) -> Vec<QualityTier> {
    QualityTier::ALL
        .into_iter()
        .filter(|tier| metadata.height >= tier.min_source_height())
        .collect()
}
