use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PhaseSError, Result};
use crate::frame::FrameMetrics;

/// Numeric per-frame fields, in report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    LapVar,
    EdgeDensity,
    HfRatio,
    LumaMean,
    LumaStd,
    DarkClipPct,
    BrightClipPct,
    MeanR,
    MeanG,
    MeanB,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::LapVar,
        Metric::EdgeDensity,
        Metric::HfRatio,
        Metric::LumaMean,
        Metric::LumaStd,
        Metric::DarkClipPct,
        Metric::BrightClipPct,
        Metric::MeanR,
        Metric::MeanG,
        Metric::MeanB,
    ];

    /// Field name as printed in reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::LapVar => "lap_var",
            Self::EdgeDensity => "edge_density",
            Self::HfRatio => "hf_ratio",
            Self::LumaMean => "luma_mean",
            Self::LumaStd => "luma_std",
            Self::DarkClipPct => "dark_clip_pct",
            Self::BrightClipPct => "bright_clip_pct",
            Self::MeanR => "mean_r",
            Self::MeanG => "mean_g",
            Self::MeanB => "mean_b",
        }
    }

    pub fn value(self, m: &FrameMetrics) -> f64 {
        match self {
            Self::LapVar => m.lap_var,
            Self::EdgeDensity => m.edge_density,
            Self::HfRatio => m.hf_ratio,
            Self::LumaMean => m.luma_mean,
            Self::LumaStd => m.luma_std,
            Self::DarkClipPct => m.dark_clip_pct,
            Self::BrightClipPct => m.bright_clip_pct,
            Self::MeanR => m.mean_r,
            Self::MeanG => m.mean_g,
            Self::MeanB => m.mean_b,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Min / mean / median / max of one metric across a sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub count: usize,
    pub min: f64,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
}

impl MetricStats {
    /// Order-independent statistics. An empty slice gives the all-zero value
    /// with `count == 0`.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        Self {
            count: n,
            min: sorted[0],
            mean: sorted.iter().sum::<f64>() / n as f64,
            median,
            max: sorted[n - 1],
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Per-metric statistics over a non-empty frame sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceSummary {
    pub frame_count: usize,
    pub lap_var: MetricStats,
    pub edge_density: MetricStats,
    pub hf_ratio: MetricStats,
    pub luma_mean: MetricStats,
    pub luma_std: MetricStats,
    pub dark_clip_pct: MetricStats,
    pub bright_clip_pct: MetricStats,
    pub mean_r: MetricStats,
    pub mean_g: MetricStats,
    pub mean_b: MetricStats,
}

impl SequenceSummary {
    pub fn get(&self, metric: Metric) -> &MetricStats {
        match metric {
            Metric::LapVar => &self.lap_var,
            Metric::EdgeDensity => &self.edge_density,
            Metric::HfRatio => &self.hf_ratio,
            Metric::LumaMean => &self.luma_mean,
            Metric::LumaStd => &self.luma_std,
            Metric::DarkClipPct => &self.dark_clip_pct,
            Metric::BrightClipPct => &self.bright_clip_pct,
            Metric::MeanR => &self.mean_r,
            Metric::MeanG => &self.mean_g,
            Metric::MeanB => &self.mean_b,
        }
    }

    /// Report lines `name: min=.. avg=.. median=.. max=..` in metric order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        Metric::ALL
            .into_iter()
            .map(|m| format_stats_line(m.name(), self.get(m)))
    }
}

/// Render one summary line. Empty statistics print as `name: n=0`.
pub fn format_stats_line(name: &str, stats: &MetricStats) -> String {
    if stats.count == 0 {
        return format!("{name}: n=0");
    }
    format!(
        "{name}: min={:.4} avg={:.4} median={:.4} max={:.4}",
        stats.min, stats.mean, stats.median, stats.max
    )
}

/// Reduce per-frame records to per-metric statistics.
///
/// An empty sequence is an input error, not a zero-valued summary.
pub fn summarize(frames: &[FrameMetrics]) -> Result<SequenceSummary> {
    if frames.is_empty() {
        return Err(PhaseSError::EmptySequence);
    }

    let stats = |metric: Metric| {
        let values: Vec<f64> = frames.iter().map(|f| metric.value(f)).collect();
        MetricStats::from_values(&values)
    };

    Ok(SequenceSummary {
        frame_count: frames.len(),
        lap_var: stats(Metric::LapVar),
        edge_density: stats(Metric::EdgeDensity),
        hf_ratio: stats(Metric::HfRatio),
        luma_mean: stats(Metric::LumaMean),
        luma_std: stats(Metric::LumaStd),
        dark_clip_pct: stats(Metric::DarkClipPct),
        bright_clip_pct: stats(Metric::BrightClipPct),
        mean_r: stats(Metric::MeanR),
        mean_g: stats(Metric::MeanG),
        mean_b: stats(Metric::MeanB),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        let s = MetricStats::from_values(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.mean, 2.5);
    }

    #[test]
    fn empty_values_are_degenerate_not_fatal() {
        let s = MetricStats::from_values(&[]);
        assert_eq!(s, MetricStats::default());
        assert_eq!(format_stats_line("lap_var", &s), "lap_var: n=0");
    }

    #[test]
    fn line_format_uses_four_decimals() {
        let s = MetricStats::from_values(&[1.0, 2.0, 4.0]);
        assert_eq!(
            format_stats_line("x", &s),
            "x: min=1.0000 avg=2.3333 median=2.0000 max=4.0000"
        );
    }
}
