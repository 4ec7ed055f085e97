use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use phase_s_core::pipeline::config::AnalysisConfig;
use phase_s_core::pipeline::{run_analysis_reported, PipelineStage, ProgressReporter};
use phase_s_core::quality::spectrum::TransformCapability;
use tracing::debug;

use crate::discover::resolve_pattern;
use crate::summary::print_run_summary;

/// Exit status when the pattern resolves to no files.
const EXIT_NO_FILES: u8 = 2;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Glob for PPM P6 files
    #[arg(long, default_value = "/tmp/fprobe/static_*.ppm")]
    pub pattern: String,

    /// Label for report heading
    #[arg(long, default_value = "phase_s")]
    pub label: String,

    /// Spatial downsample step for metrics (values below 1 act as 1)
    #[arg(long, allow_negative_numbers = true)]
    pub sample_step: Option<i64>,

    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use the Laplacian fallback for hf_ratio instead of the FFT
    #[arg(long)]
    pub no_fft: bool,

    /// Measure frames one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Fail when frames differ in resolution from the first frame
    #[arg(long)]
    pub strict_resolution: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print one line of metrics per frame
    #[arg(long)]
    pub per_frame: bool,
}

/// Drives an indicatif bar from pipeline progress callbacks.
struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.pb.set_message(stage.to_string());
        if let Some(total) = total_items {
            self.pb.set_length(total as u64);
            self.pb.set_position(0);
        }
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }
}

fn build_config(args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid analysis config")?
    } else {
        AnalysisConfig::default()
    };

    if let Some(step) = args.sample_step {
        config.sample_step = step.max(1) as usize;
    }
    if args.no_fft {
        config.transform = TransformCapability::Unavailable;
    }
    if args.sequential {
        config.parallel = false;
    }
    if args.strict_resolution {
        config.require_uniform_resolution = true;
    }
    Ok(config)
}

pub fn run(args: &AnalyzeArgs) -> Result<ExitCode> {
    let config = build_config(args)?;

    let files = resolve_pattern(&args.pattern)?;
    debug!(pattern = %args.pattern, count = files.len(), "Resolved frame files");
    if files.is_empty() {
        println!("ERR: no files matched pattern: {}", args.pattern);
        return Ok(ExitCode::from(EXIT_NO_FILES));
    }

    if !args.json {
        print_run_summary(&config, &args.pattern, files.len());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:18} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = Arc::new(BarReporter { pb: pb.clone() });

    let report = run_analysis_reported(&files, &args.label, &config, reporter)
        .with_context(|| format!("Analysis of {} aborted", args.pattern));
    pb.finish_and_clear();
    let report = report?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    print!("{report}");
    if args.per_frame {
        println!();
        for line in report.frame_lines() {
            println!("{line}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
