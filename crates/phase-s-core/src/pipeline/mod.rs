pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{
    analyze_frame, analyze_frames, check_uniform_resolution, measure_frame, run_analysis,
    run_analysis_reported,
};
pub use types::{NoOpReporter, PipelineStage, ProgressReporter};
