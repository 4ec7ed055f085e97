use std::path::{Path, PathBuf};

use phase_s_core::frame::RawFrame;

/// Build a P6 header for `width` x `height` 8-bit RGB.
pub fn build_ppm_header(width: usize, height: usize) -> Vec<u8> {
    format!("P6\n{width} {height}\n255\n").into_bytes()
}

/// Build a complete P6 buffer with pixels from `pixel(x, y)`.
pub fn build_ppm_with(
    width: usize,
    height: usize,
    pixel: impl Fn(usize, usize) -> [u8; 3],
) -> Vec<u8> {
    let mut buf = build_ppm_header(width, height);
    buf.extend(rgb_with(width, height, pixel));
    buf
}

/// Row-major RGB payload from `pixel(x, y)`.
pub fn rgb_with(width: usize, height: usize, pixel: impl Fn(usize, usize) -> [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            rgb.extend_from_slice(&pixel(x, y));
        }
    }
    rgb
}

/// Build a P6 buffer where every pixel is `rgb`.
pub fn build_uniform_ppm(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
    build_ppm_with(width, height, |_, _| rgb)
}

/// Gray checkerboard `128 +/- amplitude`, bright on even `x + y`.
pub fn checkerboard_frame(width: usize, height: usize, amplitude: u8) -> RawFrame {
    let hi = 128 + amplitude.min(127);
    let lo = 128 - amplitude.min(127);
    let rgb = rgb_with(width, height, |x, y| {
        let v = if (x + y) % 2 == 0 { hi } else { lo };
        [v, v, v]
    });
    RawFrame::new("checker.ppm", width, height, rgb).expect("payload matches dimensions")
}

/// Frame filled with a single colour.
pub fn uniform_frame(width: usize, height: usize, rgb: [u8; 3]) -> RawFrame {
    RawFrame::new("uniform.ppm", width, height, rgb_with(width, height, |_, _| rgb))
        .expect("payload matches dimensions")
}

/// Deterministic pseudo-random RGB noise (64-bit LCG).
pub fn noise_frame(width: usize, height: usize, seed: u64) -> RawFrame {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as u8
    };
    let mut rgb = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height * 3 {
        rgb.push(next());
    }
    RawFrame::new("noise.ppm", width, height, rgb).expect("payload matches dimensions")
}

/// Write `data` to `dir/name` and return the path.
pub fn write_ppm(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("write PPM data");
    path
}
