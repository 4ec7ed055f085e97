use std::fmt;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A decoded 8-bit RGB frame.
///
/// Pixels are interleaved `R, G, B` triplets, row-major.
#[derive(Clone, Debug)]
pub struct RawFrame {
    path: PathBuf,
    width: usize,
    height: usize,
    rgb: Vec<u8>,
}

impl RawFrame {
    /// Wrap a payload, returning `None` when its length is not `width * height * 3`.
    pub fn new(path: impl Into<PathBuf>, width: usize, height: usize, rgb: Vec<u8>) -> Option<Self> {
        let expected = width.checked_mul(height)?.checked_mul(3)?;
        if rgb.len() != expected {
            return None;
        }
        Some(Self {
            path: path.into(),
            width,
            height,
            rgb,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Iterate pixels as `[r, g, b]`.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.rgb.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]
    }
}

/// Subsampled 8-bit grayscale grid, shape = (grid_height, grid_width).
#[derive(Clone, Debug)]
pub struct GrayscaleGrid {
    pub cells: Array2<u8>,
}

impl GrayscaleGrid {
    pub fn new(cells: Array2<u8>) -> Self {
        Self { cells }
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Cell value widened for signed arithmetic.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> i32 {
        self.cells[[row, col]] as i32
    }
}

/// Per-frame quality record. A pure function of the decoded frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameMetrics {
    pub path: PathBuf,
    pub width: usize,
    pub height: usize,
    pub mean_r: f64,
    pub mean_g: f64,
    pub mean_b: f64,
    pub luma_mean: f64,
    pub luma_std: f64,
    pub dark_clip_pct: f64,
    pub bright_clip_pct: f64,
    pub lap_var: f64,
    pub edge_density: f64,
    pub hf_ratio: f64,
}

impl FrameMetrics {
    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }
}
