use console::{Style, Term};
use phase_s_core::pipeline::config::AnalysisConfig;
use phase_s_core::quality::spectrum::TransformCapability;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// Print the run settings to stderr when it is a terminal, so stdout
/// carries only the report.
pub fn print_run_summary(config: &AnalysisConfig, pattern: &str, frame_count: usize) {
    let term = Term::stderr();
    if !term.is_term() {
        return;
    }
    let s = Styles::new();

    let transform = match config.transform {
        TransformCapability::Available => s.method.apply_to("FFT"),
        TransformCapability::Unavailable => s.disabled.apply_to("Laplacian fallback"),
    };
    let mode = if config.parallel {
        s.method.apply_to("parallel")
    } else {
        s.disabled.apply_to("sequential")
    };

    let lines = [
        format!("  {}", s.title.apply_to("Phase S Analysis")),
        format!("  {}", s.title.apply_to("\u{2550}".repeat(16))),
        format!("  {:<14}{}", s.label.apply_to("Pattern"), s.path.apply_to(pattern)),
        format!("  {:<14}{}", s.label.apply_to("Frames"), s.value.apply_to(frame_count)),
        format!(
            "  {:<14}{}",
            s.label.apply_to("Step"),
            s.value.apply_to(config.effective_step())
        ),
        format!("  {:<14}{}", s.label.apply_to("hf_ratio"), transform),
        format!("  {:<14}{}", s.label.apply_to("Mode"), mode),
    ];
    for line in lines {
        let _ = term.write_line(&line);
    }
    let _ = term.write_line("");
}
