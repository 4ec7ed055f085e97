use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::Style;
use phase_s_core::consts::DEFAULT_SAMPLE_STEP;
use phase_s_core::io::read_ppm_header;
use phase_s_core::io::ppm::PPM_MAGIC;
use phase_s_core::quality::spectrum::{select_method, TransformCapability};
use phase_s_core::sampling::grid_dims;

#[derive(Args)]
pub struct InfoArgs {
    /// Input PPM file
    pub file: PathBuf,

    /// Sampling step used to report grid size
    #[arg(long, default_value_t = DEFAULT_SAMPLE_STEP)]
    pub sample_step: usize,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let header = read_ppm_header(&args.file)?;
    let label = Style::new().dim();
    let value = Style::new().bold();

    let (gw, gh) = grid_dims(header.width, header.height, args.sample_step);
    let method = select_method(gw, gh, TransformCapability::Available);

    println!("{:<13}{}", label.apply_to("File:"), args.file.display());
    println!("{:<13}{}", label.apply_to("Format:"), value.apply_to(PPM_MAGIC));
    println!(
        "{:<13}{}",
        label.apply_to("Dimensions:"),
        value.apply_to(format!("{}x{}", header.width, header.height))
    );
    println!("{:<13}{}", label.apply_to("Maxval:"), header.maxval);
    match header.payload_len() {
        Some(bytes) => {
            let mb = bytes as f64 / (1024.0 * 1024.0);
            println!("{:<13}{} bytes ({:.1} MB)", label.apply_to("Payload:"), bytes, mb);
        }
        None => println!("{:<13}overflow", label.apply_to("Payload:")),
    }
    println!(
        "{:<13}{}x{} at step {} ({})",
        label.apply_to("Grid:"),
        gw,
        gh,
        args.sample_step.max(1),
        method
    );

    Ok(())
}
