use serde::{Deserialize, Serialize};

use crate::consts::{BRIGHT_CLIP_LUMA, DARK_CLIP_LUMA, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::RawFrame;

/// Exposure and white-balance statistics over every pixel of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureStats {
    pub mean_r: f64,
    pub mean_g: f64,
    pub mean_b: f64,
    pub luma_mean: f64,
    pub luma_std: f64,
    pub dark_clip_pct: f64,
    pub bright_clip_pct: f64,
}

/// BT.601 luma in floating point.
#[inline]
pub fn luma(rgb: [u8; 3]) -> f64 {
    LUMINANCE_R * rgb[0] as f64 + LUMINANCE_G * rgb[1] as f64 + LUMINANCE_B * rgb[2] as f64
}

/// Compute channel means, luma mean/std and clip percentages.
///
/// The standard deviation is the population one. An empty frame yields
/// all zeros.
pub fn exposure_stats(frame: &RawFrame) -> ExposureStats {
    let n = frame.pixel_count();
    if n == 0 {
        return ExposureStats::default();
    }

    let mut sum = [0u64; 3];
    let mut luma_sum = 0.0f64;
    let mut dark = 0usize;
    let mut bright = 0usize;

    for px in frame.pixels() {
        for (acc, v) in sum.iter_mut().zip(px) {
            *acc += v as u64;
        }
        let y = luma(px);
        if y <= DARK_CLIP_LUMA {
            dark += 1;
        }
        if y >= BRIGHT_CLIP_LUMA {
            bright += 1;
        }
        luma_sum += y;
    }

    let nf = n as f64;
    let luma_mean = luma_sum / nf;
    // Population std, second pass over the payload.
    let luma_std = if n > 1 {
        let sq_dev: f64 = frame.pixels().map(|px| (luma(px) - luma_mean).powi(2)).sum();
        (sq_dev / nf).sqrt()
    } else {
        0.0
    };

    ExposureStats {
        mean_r: sum[0] as f64 / nf,
        mean_g: sum[1] as f64 / nf,
        mean_b: sum[2] as f64 / nf,
        luma_mean,
        luma_std,
        dark_clip_pct: dark as f64 * 100.0 / nf,
        bright_clip_pct: bright as f64 * 100.0 / nf,
    }
}
