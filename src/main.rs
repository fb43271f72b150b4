//! drone-vibe - Drone vibration diagnostics
//!
//! Analyzes an accelerometer flight log and reports the likely mechanical
//! condition of the airframe.
//!
//! # Usage
//!
//! ```bash
//! # Human-readable summary
//! drone-vibe VIBRATE.CSV
//!
//! # Full report as JSON (logs stay on stderr)
//! drone-vibe VIBRATE.CSV --json > report.json
//!
//! # Recompute acceleration from raw counts with a custom policy
//! drone-vibe VIBRATE.CSV --recompute --config drone_vibe.toml
//!
//! # Dump the spectrum for plotting
//! drone-vibe VIBRATE.CSV --spectrum-out spectrum.csv
//! ```
//!
//! # Environment Variables
//!
//! - `DRONE_VIBE_CONFIG`: Path to a TOML analysis config
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use drone_vibe::config::{AnalysisConfig, ConversionStrategy};
use drone_vibe::pipeline::{AnalysisReport, VibrationPipeline};
use drone_vibe::types::ColumnLayout;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "drone-vibe")]
#[command(about = "Classify drone mechanical faults from an accelerometer flight log")]
#[command(version)]
struct CliArgs {
    /// CSV flight log (2, 3 or 4 numeric columns, optional header)
    input: PathBuf,

    /// Analysis config TOML (overrides DRONE_VIBE_CONFIG and ./drone_vibe.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Force the column layout instead of inferring it from the column count
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Recompute acceleration from raw counts using the configured calibration
    #[arg(long)]
    recompute: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Number of dominant frequencies to list
    #[arg(long, default_value = "3")]
    top: usize,

    /// Write the spectrum as frequency,magnitude CSV for plotting
    #[arg(long, value_name = "PATH")]
    spectrum_out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LayoutArg {
    /// raw, acceleration
    Two,
    /// time, raw, acceleration
    Three,
    /// index, time, raw, acceleration
    Four,
}

impl From<LayoutArg> for ColumnLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Two => Self::RawAccel,
            LayoutArg::Three => Self::TimeRawAccel,
            LayoutArg::Four => Self::IndexTimeRawAccel,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

fn print_summary(report: &AnalysisReport, pipeline: &VibrationPipeline, top: usize) {
    let wf = &report.waveform;
    let diagnosis = &report.diagnosis;

    println!("Flight log");
    println!("  Layout:        {}", wf.layout());
    println!("  Samples:       {}", wf.sample_count());
    println!(
        "  Interval:      {:.4} s ({:.1} Hz)",
        wf.sample_interval(),
        wf.sample_rate_hz()
    );
    println!("  Duration:      {:.2} s", wf.duration_s());
    println!("  Mean accel:    {:.3} g", wf.mean_acceleration());
    println!("  Vibration RMS: {:.3} g", wf.rms_acceleration());
    println!();
    println!("Spectrum");
    println!("  Resolution:    {:.4} Hz", report.spectrum.frequency_resolution());
    println!("  Spectrum RMS:  {:.4} g", report.spectrum.rms());
    println!("  Peak:          {}", diagnosis.peak);

    if top > 0 {
        let dominant = report.dominant_frequencies(top);
        if !dominant.is_empty() {
            println!("  Dominant:");
            for (rank, peak) in dominant.iter().enumerate() {
                println!("    {}. {peak}", rank + 1);
            }
        }
    }

    println!();
    println!("Diagnosis:       {}", diagnosis.category);
    println!("  {}", diagnosis.category.advice());
    println!();
    println!("Reference");
    for row in pipeline.classifier().reference_guide() {
        println!("  {:<12} {}", row.range, row.label);
    }
}

fn write_spectrum_csv(report: &AnalysisReport, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "frequency_hz,magnitude_g")?;
    for [frequency, magnitude] in report.spectrum.plot_points() {
        writeln!(out, "{frequency},{magnitude}")?;
    }
    out.flush()?;
    info!(file = %path.display(), bins = report.spectrum.len(), "Spectrum written");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Logs on stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::load(),
    };
    if args.recompute {
        config.loader.conversion = ConversionStrategy::Recompute;
    }

    let mut pipeline = VibrationPipeline::new(config);
    if let Some(layout) = args.layout {
        pipeline = pipeline.with_layout(layout.into());
    }

    info!(file = %args.input.display(), "Analyzing flight log");
    let report = pipeline
        .analyze_file(&args.input)
        .with_context(|| format!("Failed to analyze {}", args.input.display()))?;

    if let Some(path) = &args.spectrum_out {
        write_spectrum_csv(&report, path)?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print_summary(&report, &pipeline, args.top);
    }

    Ok(())
}
