use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BRIGHT_CLIP_PCT_LIMIT, DARK_CLIP_PCT_LIMIT, GREEN_CAST_RATIO, LUMA_SPAN_LIMIT,
    SOFTNESS_LAP_VAR_LIMIT,
};
use crate::summary::SequenceSummary;

/// Diagnostic flag raised by the sequence classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationFlag {
    GreenCast,
    UnderexposureOrGainNoise,
    HighlightClip,
    AecStabilityRisk,
    Softness,
    NoStrongRedFlag,
}

impl ClassificationFlag {
    pub fn tag(self) -> &'static str {
        match self {
            Self::GreenCast => "GREEN_CAST_SUSPECTED",
            Self::UnderexposureOrGainNoise => "UNDEREXPOSURE_OR_GAIN_NOISE_SUSPECTED",
            Self::HighlightClip => "HIGHLIGHT_CLIP_SUSPECTED",
            Self::AecStabilityRisk => "AEC_STABILITY_RISK",
            Self::Softness => "SOFTNESS_SUSPECTED",
            Self::NoStrongRedFlag => "NO_STRONG_RED_FLAG_IN_SEQUENCE",
        }
    }

    pub fn rationale(self) -> Option<&'static str> {
        match self {
            Self::GreenCast => Some("G channel mean dominates R/B"),
            Self::UnderexposureOrGainNoise => Some("dark clipping > 3%"),
            Self::HighlightClip => Some("bright clipping > 1.5%"),
            Self::AecStabilityRisk => Some("luma mean span > 10"),
            Self::Softness => Some("median Laplacian variance < 40"),
            Self::NoStrongRedFlag => None,
        }
    }
}

impl fmt::Display for ClassificationFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rationale() {
            Some(why) => write!(f, "{} ({why})", self.tag()),
            None => f.write_str(self.tag()),
        }
    }
}

/// Evaluate the fixed threshold rules over sequence aggregates.
///
/// Rules fire independently and are reported in evaluation order. When none
/// fires the result is exactly `[NoStrongRedFlag]`.
pub fn classify(summary: &SequenceSummary) -> Vec<ClassificationFlag> {
    let mut flags = Vec::new();

    let r = summary.mean_r.mean;
    let g = summary.mean_g.mean;
    let b = summary.mean_b.mean;

    if g > r.max(b) * GREEN_CAST_RATIO {
        flags.push(ClassificationFlag::GreenCast);
    }
    if summary.dark_clip_pct.mean > DARK_CLIP_PCT_LIMIT {
        flags.push(ClassificationFlag::UnderexposureOrGainNoise);
    }
    if summary.bright_clip_pct.mean > BRIGHT_CLIP_PCT_LIMIT {
        flags.push(ClassificationFlag::HighlightClip);
    }
    if summary.luma_mean.span() > LUMA_SPAN_LIMIT {
        flags.push(ClassificationFlag::AecStabilityRisk);
    }
    if summary.lap_var.median < SOFTNESS_LAP_VAR_LIMIT {
        flags.push(ClassificationFlag::Softness);
    }

    if flags.is_empty() {
        flags.push(ClassificationFlag::NoStrongRedFlag);
    }
    flags
}
