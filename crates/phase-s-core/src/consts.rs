/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Default grayscale sampling stride.
pub const DEFAULT_SAMPLE_STEP: usize = 2;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f64 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f64 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f64 = 0.114;

/// Fixed-point (1/256) grayscale weights used by the sampler.
pub const GRAY_WEIGHT_R: u32 = 77;
pub const GRAY_WEIGHT_G: u32 = 150;
pub const GRAY_WEIGHT_B: u32 = 29;

/// Luma at or below this value counts as dark-clipped.
pub const DARK_CLIP_LUMA: f64 = 5.0;

/// Luma at or above this value counts as bright-clipped.
pub const BRIGHT_CLIP_LUMA: f64 = 250.0;

/// `|gx| + |gy|` at or above this marks an edge cell (0-255 scale).
pub const EDGE_GRADIENT_THRESHOLD: i32 = 32;

/// Smallest grid side the exact spectrum path accepts.
pub const SPECTRUM_MIN_SIZE: usize = 16;

/// Largest grid side fed to the FFT; bigger grids are strided down.
pub const SPECTRUM_MAX_SIZE: usize = 256;

/// Fraction of the corner radius above which a bin is high-frequency.
pub const HF_RADIUS_FRACTION: f64 = 0.35;

/// Added to the total spectral energy before dividing.
pub const SPECTRUM_EPSILON: f64 = 1e-12;

/// Knee of the saturating `lap_var` fallback for `hf_ratio`.
pub const HF_FALLBACK_KNEE: f64 = 4000.0;

/// Green mean must exceed `max(R, B)` by this factor to flag a green cast.
pub const GREEN_CAST_RATIO: f64 = 1.12;

/// Mean dark-clip percentage above which underexposure is flagged.
pub const DARK_CLIP_PCT_LIMIT: f64 = 3.0;

/// Mean bright-clip percentage above which highlight clipping is flagged.
pub const BRIGHT_CLIP_PCT_LIMIT: f64 = 1.5;

/// Max-minus-min luma mean above which AEC instability is flagged.
pub const LUMA_SPAN_LIMIT: f64 = 10.0;

/// Median Laplacian variance below which softness is flagged.
pub const SOFTNESS_LAP_VAR_LIMIT: f64 = 40.0;
