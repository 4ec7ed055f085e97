use std::fmt;

use ndarray::{s, Array2};
use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use crate::consts::{
    HF_FALLBACK_KNEE, HF_RADIUS_FRACTION, SPECTRUM_EPSILON, SPECTRUM_MAX_SIZE, SPECTRUM_MIN_SIZE,
};
use crate::frame::GrayscaleGrid;

/// Whether an FFT backend may be used for `hf_ratio`.
///
/// Resolved once when the configuration is built, never probed inside the
/// metric functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformCapability {
    #[default]
    Available,
    Unavailable,
}

impl fmt::Display for TransformCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Unavailable => write!(f, "Unavailable"),
        }
    }
}

/// How `hf_ratio` is computed for one grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HfMethod {
    /// Radial partition of the 2-D power spectrum.
    Exact,
    /// Saturating proxy derived from Laplacian variance.
    Fallback,
}

impl fmt::Display for HfMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "FFT"),
            Self::Fallback => write!(f, "Laplacian fallback"),
        }
    }
}

/// Pick the `hf_ratio` method from grid size and backend capability.
pub fn select_method(grid_width: usize, grid_height: usize, capability: TransformCapability) -> HfMethod {
    match capability {
        TransformCapability::Available
            if grid_width >= SPECTRUM_MIN_SIZE && grid_height >= SPECTRUM_MIN_SIZE =>
        {
            HfMethod::Exact
        }
        _ => HfMethod::Fallback,
    }
}

/// High-frequency energy ratio, dispatched on [`select_method`].
///
/// Result is always in `[0, 1]`.
pub fn hf_ratio(grid: &GrayscaleGrid, lap_var: f64, capability: TransformCapability) -> (f64, HfMethod) {
    let method = select_method(grid.width(), grid.height(), capability);
    let ratio = match method {
        HfMethod::Exact => hf_ratio_exact(grid),
        HfMethod::Fallback => hf_ratio_fallback(lap_var),
    };
    (ratio, method)
}

/// `min(1, lap_var / (lap_var + 4000))`; non-positive or non-finite input gives 0.
pub fn hf_ratio_fallback(lap_var: f64) -> f64 {
    if !lap_var.is_finite() || lap_var <= 0.0 {
        return 0.0;
    }
    (lap_var / (lap_var + HF_FALLBACK_KNEE)).min(1.0)
}

/// Fraction of spectral energy at radius `>= 0.35 * rmax` from the centred
/// zero frequency, where `rmax` is the centre-to-corner distance.
pub fn hf_ratio_exact(grid: &GrayscaleGrid) -> f64 {
    let data = limit_size(grid);
    let (h, w) = data.dim();
    if h == 0 || w == 0 {
        return 0.0;
    }

    let mean = data.sum() / (h * w) as f64;
    let spectrum = fft2d(&data.mapv(|v| v - mean));
    let power = fftshift(&spectrum.mapv(|c| c.norm_sqr()));

    let cy = (h as f64 - 1.0) * 0.5;
    let cx = (w as f64 - 1.0) * 0.5;
    let cutoff = HF_RADIUS_FRACTION * (cy * cy + cx * cx).sqrt();

    let mut total = 0.0f64;
    let mut high = 0.0f64;
    for ((row, col), &e) in power.indexed_iter() {
        total += e;
        let dy = row as f64 - cy;
        let dx = col as f64 - cx;
        if (dy * dy + dx * dx).sqrt() >= cutoff {
            high += e;
        }
    }

    (high / (total + SPECTRUM_EPSILON)).clamp(0.0, 1.0)
}

/// Stride the grid down with `max(1, n / SPECTRUM_MAX_SIZE)` per axis,
/// independently for rows and columns. Sides between `SPECTRUM_MAX_SIZE`
/// and twice that keep stride 1, so the result can exceed the maximum.
fn limit_size(grid: &GrayscaleGrid) -> Array2<f64> {
    let (h, w) = (grid.height(), grid.width());
    let cells = grid.cells.mapv(|v| v as f64);
    if h <= SPECTRUM_MAX_SIZE && w <= SPECTRUM_MAX_SIZE {
        return cells;
    }
    let sy = (h / SPECTRUM_MAX_SIZE).max(1) as isize;
    let sx = (w / SPECTRUM_MAX_SIZE).max(1) as isize;
    cells.slice(s![..;sy, ..;sx]).to_owned()
}

/// 2D FFT: row-wise FFT, then column-wise FFT.
fn fft2d(data: &Array2<f64>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = data.mapv(|v| Complex::new(v, 0.0));

    for mut row in result.rows_mut() {
        let mut buf: Vec<Complex<f64>> = row.to_vec();
        fft_row.process(&mut buf);
        for (dst, src) in row.iter_mut().zip(buf) {
            *dst = src;
        }
    }

    for mut col in result.columns_mut() {
        let mut buf: Vec<Complex<f64>> = col.to_vec();
        fft_col.process(&mut buf);
        for (dst, src) in col.iter_mut().zip(buf) {
            *dst = src;
        }
    }

    result
}

/// Move the zero-frequency bin to `(h / 2, w / 2)`.
fn fftshift(data: &Array2<f64>) -> Array2<f64> {
    let (h, w) = data.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        data[[(row + h - h / 2) % h, (col + w - w / 2) % w]]
    })
}
