use serde::{Deserialize, Serialize};

use crate::consts::EDGE_GRADIENT_THRESHOLD;
use crate::frame::GrayscaleGrid;

/// Spatial sharpness proxies computed over the interior of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialMetrics {
    /// Population variance of the 4-neighbour Laplacian.
    pub lap_var: f64,
    /// Fraction of interior cells whose `|gx| + |gy|` reaches the edge threshold.
    pub edge_density: f64,
}

/// Compute Laplacian variance and edge density. Higher means sharper (or noisier).
///
/// Uses the 3x3 Laplacian kernel with a positive centre:
///    0 -1  0
///   -1  4 -1
///    0 -1  0
/// and central differences `right - left`, `down - up` for edges. Grids
/// smaller than 3x3 have no interior and return zeros.
pub fn spatial_metrics(grid: &GrayscaleGrid) -> SpatialMetrics {
    let (h, w) = (grid.height(), grid.width());
    if h < 3 || w < 3 {
        return SpatialMetrics::default();
    }

    let count = (h - 2) * (w - 2);
    let mut laps = Vec::with_capacity(count);
    let mut edges = 0usize;

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let c = grid.at(row, col);
            let l = grid.at(row, col - 1);
            let r = grid.at(row, col + 1);
            let u = grid.at(row - 1, col);
            let d = grid.at(row + 1, col);

            laps.push((4 * c - l - r - u - d) as f64);

            let gx = r - l;
            let gy = d - u;
            if gx.abs() + gy.abs() >= EDGE_GRADIENT_THRESHOLD {
                edges += 1;
            }
        }
    }

    SpatialMetrics {
        lap_var: population_variance(&laps),
        edge_density: edges as f64 / count as f64,
    }
}

/// Two-pass population variance. Empty input yields 0.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}
