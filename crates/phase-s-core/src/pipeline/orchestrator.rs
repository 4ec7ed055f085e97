use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::{PhaseSError, Result};
use crate::frame::{FrameMetrics, RawFrame};
use crate::io::ppm::read_ppm;
use crate::quality::exposure::exposure_stats;
use crate::quality::laplacian::spatial_metrics;
use crate::quality::spectrum::{hf_ratio, select_method, HfMethod, TransformCapability};
use crate::report::SequenceReport;
use crate::sampling::{gray_sample, grid_dims};
use crate::summary::summarize;

use super::config::AnalysisConfig;
use super::types::{NoOpReporter, PipelineStage, ProgressReporter};

/// Derive all metrics for an already decoded frame.
pub fn measure_frame(frame: &RawFrame, config: &AnalysisConfig) -> FrameMetrics {
    let exposure = exposure_stats(frame);
    let grid = gray_sample(frame, config.effective_step());
    let spatial = spatial_metrics(&grid);
    let (hf, method) = hf_ratio(&grid, spatial.lap_var, config.transform);

    debug!(
        path = %frame.path().display(),
        grid = %format!("{}x{}", grid.width(), grid.height()),
        lap_var = spatial.lap_var,
        edge_density = spatial.edge_density,
        hf_ratio = hf,
        method = %method,
        "Frame measured"
    );

    FrameMetrics {
        path: frame.path().to_path_buf(),
        width: frame.width(),
        height: frame.height(),
        mean_r: exposure.mean_r,
        mean_g: exposure.mean_g,
        mean_b: exposure.mean_b,
        luma_mean: exposure.luma_mean,
        luma_std: exposure.luma_std,
        dark_clip_pct: exposure.dark_clip_pct,
        bright_clip_pct: exposure.bright_clip_pct,
        lap_var: spatial.lap_var,
        edge_density: spatial.edge_density,
        hf_ratio: hf,
    }
}

/// Decode one file and measure it. The decoded frame is dropped on return.
pub fn analyze_frame(path: &Path, config: &AnalysisConfig) -> Result<FrameMetrics> {
    let frame = read_ppm(path)?;
    Ok(measure_frame(&frame, config))
}

/// Measure every frame, fail-fast: the first decode error aborts the run.
///
/// The returned records follow input order even when frames are measured
/// in parallel.
pub fn analyze_frames(
    paths: &[PathBuf],
    config: &AnalysisConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<FrameMetrics>> {
    reporter.begin_stage(PipelineStage::Measuring, Some(paths.len()));
    let done = AtomicUsize::new(0);
    let measure = |path: &PathBuf| -> Result<FrameMetrics> {
        let metrics = analyze_frame(path, config)?;
        let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
        reporter.advance(completed);
        Ok(metrics)
    };

    let frames = if config.parallel && paths.len() >= PARALLEL_FRAME_THRESHOLD {
        paths.par_iter().map(measure).collect::<Result<Vec<_>>>()?
    } else {
        paths.iter().map(measure).collect::<Result<Vec<_>>>()?
    };
    reporter.finish_stage();

    if config.require_uniform_resolution {
        check_uniform_resolution(&frames)?;
    }
    Ok(frames)
}

/// Reject a sequence whose frames do not all share the first frame's size.
pub fn check_uniform_resolution(frames: &[FrameMetrics]) -> Result<()> {
    let Some(first) = frames.first() else {
        return Ok(());
    };
    let expected = first.resolution();
    match frames.iter().find(|m| m.resolution() != expected) {
        Some(m) => Err(PhaseSError::ResolutionMismatch {
            path: m.path.clone(),
            expected,
            found: m.resolution(),
        }),
        None => Ok(()),
    }
}

/// Run the full analysis with a thread-safe progress reporter.
pub fn run_analysis_reported(
    paths: &[PathBuf],
    label: &str,
    config: &AnalysisConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<SequenceReport> {
    if paths.is_empty() {
        return Err(PhaseSError::EmptySequence);
    }
    info!(
        frames = paths.len(),
        step = config.effective_step(),
        transform = %config.transform,
        "Analyzing frame sequence"
    );

    let frames = analyze_frames(paths, config, reporter.as_ref())?;

    let resolution = frames[0].resolution();
    if config.transform == TransformCapability::Available {
        let (gw, gh) = grid_dims(resolution.width, resolution.height, config.effective_step());
        if select_method(gw, gh, config.transform) == HfMethod::Fallback {
            warn!(
                grid = %format!("{gw}x{gh}"),
                "Grid too small for FFT, hf_ratio uses the Laplacian fallback"
            );
        }
    }

    reporter.begin_stage(PipelineStage::Summarizing, None);
    let summary = summarize(&frames)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Classifying, None);
    let flags = classify(&summary);
    reporter.finish_stage();
    info!(flags = flags.len(), "Classification complete");

    Ok(SequenceReport {
        label: label.to_string(),
        resolution,
        summary,
        flags,
        frames,
    })
}

/// Run the full analysis without progress reporting.
pub fn run_analysis(paths: &[PathBuf], label: &str, config: &AnalysisConfig) -> Result<SequenceReport> {
    run_analysis_reported(paths, label, config, Arc::new(NoOpReporter))
}
