use ndarray::Array2;

use crate::consts::{GRAY_WEIGHT_B, GRAY_WEIGHT_G, GRAY_WEIGHT_R};
use crate::frame::{GrayscaleGrid, RawFrame};

/// Fixed-point luma approximation `(77R + 150G + 29B) >> 8`.
///
/// Only used for edge/variance proxies; exposure statistics use the
/// floating-point weights instead.
#[inline]
pub fn gray_value(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb;
    ((GRAY_WEIGHT_R * r as u32 + GRAY_WEIGHT_G * g as u32 + GRAY_WEIGHT_B * b as u32) >> 8) as u8
}

/// Grid dimensions `(width, height)` for a frame sampled at `step`.
pub fn grid_dims(width: usize, height: usize, step: usize) -> (usize, usize) {
    let step = step.max(1);
    ((width / step).max(1), (height / step).max(1))
}

/// Subsample a frame into a grayscale grid at an integer stride.
///
/// Cell `(gy, gx)` takes source pixel `(gy * step, gx * step)`. A `step`
/// below 1 is treated as 1.
pub fn gray_sample(frame: &RawFrame, step: usize) -> GrayscaleGrid {
    let step = step.max(1);
    let (gw, gh) = grid_dims(frame.width(), frame.height(), step);

    if frame.pixel_count() == 0 {
        return GrayscaleGrid::new(Array2::zeros((gh, gw)));
    }

    let cells = Array2::from_shape_fn((gh, gw), |(gy, gx)| {
        let y = (gy * step).min(frame.height() - 1);
        let x = (gx * step).min(frame.width() - 1);
        gray_value(frame.pixel(x, y))
    });
    GrayscaleGrid::new(cells)
}
