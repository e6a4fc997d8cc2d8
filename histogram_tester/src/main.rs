use anyhow::{Context, Result};
use clap::Parser;
use histogram_vision::OutputSize;
use histogram_vision::core_modules::utils::image_helper::image_helper::{save_gray, save_rgb};
use histogram_vision::pipeline::{HistogramPipeline, PipelineConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Draws the intensity histogram of an image file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Image to analyze
    input: PathBuf,

    /// Where to write the rendered histogram (PNG)
    output: PathBuf,

    /// Chart width in pixels
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 200)]
    height: u32,

    /// Draw a single luminance histogram instead of R, G and B
    #[arg(long, default_value_t = false)]
    gray: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    // --- 1. Argument Parsing & Setup ---
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // --- 2. Image Decoding ---
    let image = image::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    info!(width = image.width(), height = image.height(), "loaded {}", cli.input.display());

    // --- 3. Histogram Pipeline ---
    let pipeline = HistogramPipeline::new(PipelineConfig {
        output_size: OutputSize::new(cli.width, cli.height),
    });

    // --- 4. Render & Write ---
    if cli.gray {
        let report = pipeline.analyze_gray(&image.to_rgba8());
        info!(pixels = report.pixel_count, "computed luminance histogram");
        save_gray(&cli.output, &pipeline.chart_gray(&report))
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
    } else {
        let report = pipeline.analyze_rgb(&image.to_rgba8());
        info!(pixels = report.pixel_count, "computed rgb histograms");
        save_rgb(&cli.output, &pipeline.chart_rgb(&report))
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
    }

    println!("Histogram saved to {}", cli.output.display());
    Ok(())
}
