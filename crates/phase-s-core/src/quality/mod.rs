pub mod exposure;
pub mod laplacian;
pub mod spectrum;

pub use exposure::{exposure_stats, ExposureStats};
pub use laplacian::{spatial_metrics, SpatialMetrics};
pub use spectrum::{hf_ratio, select_method, HfMethod, TransformCapability};
