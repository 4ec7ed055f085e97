use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SAMPLE_STEP;
use crate::quality::spectrum::TransformCapability;

/// Settings for one analysis run.
///
/// Classifier thresholds are fixed constants and intentionally absent here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Grayscale sampling stride; values below 1 are treated as 1.
    pub sample_step: usize,
    /// Whether the exact FFT path may be used for `hf_ratio`.
    pub transform: TransformCapability,
    /// Measure frames on the Rayon pool when the sequence is long enough.
    pub parallel: bool,
    /// Reject sequences whose frames differ in resolution from the first.
    pub require_uniform_resolution: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_step: DEFAULT_SAMPLE_STEP,
            transform: TransformCapability::default(),
            parallel: true,
            require_uniform_resolution: false,
        }
    }
}

impl AnalysisConfig {
    pub fn effective_step(&self) -> usize {
        self.sample_step.max(1)
    }
}
