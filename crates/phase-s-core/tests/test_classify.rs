use std::path::PathBuf;

use phase_s_core::classify::{classify, ClassificationFlag};
use phase_s_core::error::PhaseSError;
use phase_s_core::frame::FrameMetrics;
use phase_s_core::summary::{summarize, Metric, MetricStats};

/// A frame that trips no rule.
fn nominal(i: usize) -> FrameMetrics {
    FrameMetrics {
        path: PathBuf::from(format!("static_{i:03}.ppm")),
        width: 64,
        height: 64,
        mean_r: 100.0,
        mean_g: 100.0,
        mean_b: 100.0,
        luma_mean: 100.0,
        luma_std: 20.0,
        dark_clip_pct: 0.0,
        bright_clip_pct: 0.0,
        lap_var: 100.0,
        edge_density: 0.1,
        hf_ratio: 0.3,
    }
}

fn flags_for(frames: &[FrameMetrics]) -> Vec<ClassificationFlag> {
    classify(&summarize(frames).unwrap())
}

// ---------------------------------------------------------------------------
// Summarizer
// ---------------------------------------------------------------------------

#[test]
fn test_summarize_empty_is_input_error() {
    assert!(matches!(summarize(&[]), Err(PhaseSError::EmptySequence)));
}

#[test]
fn test_summarize_per_metric_stats() {
    let frames: Vec<_> = [10.0, 50.0, 30.0, 20.0]
        .into_iter()
        .enumerate()
        .map(|(i, lap)| FrameMetrics {
            lap_var: lap,
            ..nominal(i)
        })
        .collect();
    let s = summarize(&frames).unwrap();
    assert_eq!(s.frame_count, 4);
    assert_eq!(
        s.lap_var,
        MetricStats {
            count: 4,
            min: 10.0,
            mean: 27.5,
            median: 25.0,
            max: 50.0
        }
    );
    assert_eq!(s.get(Metric::LapVar), &s.lap_var);
    assert_eq!(s.mean_g.median, 100.0);
}

#[test]
fn test_summary_is_order_independent() {
    let values = [0.1, 0.7, 1e-3, 12.25, 3.0, 0.2, 9.9];
    let frames: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| FrameMetrics {
            hf_ratio: v,
            luma_mean: v * 10.0,
            ..nominal(i)
        })
        .collect();
    let mut reversed = frames.clone();
    reversed.reverse();
    let mut rotated = frames.clone();
    rotated.rotate_left(3);

    let a = summarize(&frames).unwrap();
    assert_eq!(a, summarize(&reversed).unwrap());
    assert_eq!(a, summarize(&rotated).unwrap());
}

#[test]
fn test_summary_lines_follow_report_order() {
    let s = summarize(&[nominal(0)]).unwrap();
    let names: Vec<String> = s
        .lines()
        .map(|l| l.split(':').next().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        [
            "lap_var",
            "edge_density",
            "hf_ratio",
            "luma_mean",
            "luma_std",
            "dark_clip_pct",
            "bright_clip_pct",
            "mean_r",
            "mean_g",
            "mean_b"
        ]
    );
    assert_eq!(
        s.lines().next().unwrap(),
        "lap_var: min=100.0000 avg=100.0000 median=100.0000 max=100.0000"
    );
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

#[test]
fn test_nominal_sequence_has_single_no_flag_marker() {
    let frames: Vec<_> = (0..3).map(nominal).collect();
    assert_eq!(flags_for(&frames), vec![ClassificationFlag::NoStrongRedFlag]);
}

#[test]
fn test_green_cast_fires_alone() {
    let frame = FrameMetrics {
        mean_r: 100.0,
        mean_g: 120.0,
        mean_b: 90.0,
        ..nominal(0)
    };
    assert_eq!(flags_for(&[frame]), vec![ClassificationFlag::GreenCast]);
}

#[test]
fn test_green_cast_needs_to_beat_the_larger_of_r_and_b() {
    let frame = FrameMetrics {
        mean_r: 90.0,
        mean_g: 110.0,
        mean_b: 100.0,
        ..nominal(0)
    };
    // 110 < 100 * 1.12
    assert_eq!(flags_for(&[frame]), vec![ClassificationFlag::NoStrongRedFlag]);
}

#[test]
fn test_thresholds_are_strict() {
    let frames = [
        FrameMetrics {
            dark_clip_pct: 3.0,
            bright_clip_pct: 1.5,
            luma_mean: 100.0,
            lap_var: 40.0,
            ..nominal(0)
        },
        FrameMetrics {
            dark_clip_pct: 3.0,
            bright_clip_pct: 1.5,
            luma_mean: 110.0,
            lap_var: 40.0,
            ..nominal(1)
        },
    ];
    assert_eq!(flags_for(&frames), vec![ClassificationFlag::NoStrongRedFlag]);
}

#[test]
fn test_rules_fire_independently_in_fixed_order() {
    let frames = [
        FrameMetrics {
            mean_g: 200.0,
            dark_clip_pct: 5.0,
            bright_clip_pct: 4.0,
            luma_mean: 60.0,
            lap_var: 5.0,
            ..nominal(0)
        },
        FrameMetrics {
            mean_g: 200.0,
            dark_clip_pct: 5.0,
            bright_clip_pct: 4.0,
            luma_mean: 90.0,
            lap_var: 10.0,
            ..nominal(1)
        },
    ];
    assert_eq!(
        flags_for(&frames),
        vec![
            ClassificationFlag::GreenCast,
            ClassificationFlag::UnderexposureOrGainNoise,
            ClassificationFlag::HighlightClip,
            ClassificationFlag::AecStabilityRisk,
            ClassificationFlag::Softness,
        ]
    );
}

#[test]
fn test_softness_uses_median_not_mean() {
    // Mean is well above 40 but the median is below.
    let frames: Vec<_> = [10.0, 20.0, 1000.0]
        .into_iter()
        .enumerate()
        .map(|(i, lap)| FrameMetrics {
            lap_var: lap,
            ..nominal(i)
        })
        .collect();
    assert_eq!(flags_for(&frames), vec![ClassificationFlag::Softness]);
}

#[test]
fn test_aec_span_uses_extremes() {
    let frames: Vec<_> = [100.0, 104.0, 111.0]
        .into_iter()
        .enumerate()
        .map(|(i, luma)| FrameMetrics {
            luma_mean: luma,
            ..nominal(i)
        })
        .collect();
    assert_eq!(flags_for(&frames), vec![ClassificationFlag::AecStabilityRisk]);
}

#[test]
fn test_flag_rendering() {
    assert_eq!(
        ClassificationFlag::GreenCast.to_string(),
        "GREEN_CAST_SUSPECTED (G channel mean dominates R/B)"
    );
    assert_eq!(
        ClassificationFlag::Softness.to_string(),
        "SOFTNESS_SUSPECTED (median Laplacian variance < 40)"
    );
    assert_eq!(
        ClassificationFlag::NoStrongRedFlag.to_string(),
        "NO_STRONG_RED_FLAG_IN_SEQUENCE"
    );
}
