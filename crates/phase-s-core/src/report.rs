use std::fmt;

use serde::Serialize;

use crate::classify::ClassificationFlag;
use crate::frame::{FrameMetrics, Resolution};
use crate::summary::SequenceSummary;

/// Everything a run produces, ready for rendering.
#[derive(Clone, Debug, Serialize)]
pub struct SequenceReport {
    pub label: String,
    /// Resolution of the first frame in input order.
    pub resolution: Resolution,
    pub summary: SequenceSummary,
    pub flags: Vec<ClassificationFlag>,
    /// Per-frame records in input order.
    pub frames: Vec<FrameMetrics>,
}

impl SequenceReport {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// One line per frame: path followed by its key metrics.
    pub fn frame_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.frames.iter().map(|m| {
            format!(
                "{}: lap_var={:.4} edge_density={:.4} hf_ratio={:.4} luma_mean={:.4} \
                 dark_clip_pct={:.4} bright_clip_pct={:.4}",
                m.path.display(),
                m.lap_var,
                m.edge_density,
                m.hf_ratio,
                m.luma_mean,
                m.dark_clip_pct,
                m.bright_clip_pct
            )
        })
    }
}

impl fmt::Display for SequenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Phase S PPM Quality Report ({}) ===", self.label)?;
        writeln!(
            f,
            "frames={} resolution={}",
            self.frame_count(),
            self.resolution
        )?;
        for line in self.summary.lines() {
            writeln!(f, "{line}")?;
        }
        for flag in &self.flags {
            writeln!(f, "classification={flag}")?;
        }
        Ok(())
    }
}
