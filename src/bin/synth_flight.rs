//! Synthetic flight-log generator
//!
//! Writes a CSV accelerometer log with one vibration tone on top of a
//! gravity bias and Gaussian sensor noise, in any layout the analyzer reads.
//!
//! # Usage
//!
//! ```bash
//! # Unbalanced propeller: 8 Hz, 0.5 g, 100 Hz sampling
//! synth-flight --freq 8 --amplitude 0.5 -o prop.csv
//!
//! # Bearing wear with noise, four-column layout, reproducible
//! synth-flight --freq 32 --amplitude 0.4 --noise 0.05 --layout four --seed 7
//!
//! # Pipe straight into the analyzer
//! synth-flight --freq 15 -o shaft.csv && drone-vibe shaft.csv
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use drone_vibe::config::defaults;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "synth-flight")]
#[command(about = "Generate a synthetic drone accelerometer flight log")]
struct Args {
    /// Vibration tone frequency (Hz)
    #[arg(long, default_value = "8.0")]
    freq: f64,

    /// Vibration tone amplitude (g)
    #[arg(long, default_value = "0.5")]
    amplitude: f64,

    /// Constant acceleration added to every sample (g), e.g. 1.0 for gravity
    #[arg(long, default_value = "0.0")]
    bias: f64,

    /// Standard deviation of Gaussian sensor noise (g)
    #[arg(long, default_value = "0.0")]
    noise: f64,

    /// Number of samples
    #[arg(short = 'n', long, default_value = "1024")]
    samples: usize,

    /// Sample rate (Hz)
    #[arg(long, default_value = "100.0")]
    rate: f64,

    /// Column layout to write
    #[arg(long, value_enum, default_value = "three")]
    layout: Layout,

    /// Write a header row
    #[arg(long)]
    header: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Layout {
    Two,
    Three,
    Four,
}

impl Layout {
    fn header(self) -> &'static str {
        match self {
            Self::Two => "raw,g_force",
            Self::Three => "time,raw,g_force",
            Self::Four => "index,time,raw,g_force",
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Raw ADC count for an acceleration, using the default calibration.
fn to_raw(g: f64) -> f64 {
    (defaults::DEFAULT_ZERO_OFFSET + g * defaults::DEFAULT_SENSITIVITY).round()
}

fn write_log(args: &Args, out: &mut impl Write) -> Result<()> {
    let mut rng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let noise = Normal::new(0.0, args.noise)
        .map_err(|e| anyhow::anyhow!("Invalid noise level {}: {e}", args.noise))?;

    let interval = 1.0 / args.rate;

    if args.header {
        writeln!(out, "{}", args.layout.header())?;
    }

    for i in 0..args.samples {
        let t = i as f64 * interval;
        let g = args.bias
            + args.amplitude * (2.0 * PI * args.freq * t).sin()
            + noise.sample(&mut rng);
        let raw = to_raw(g);

        match args.layout {
            Layout::Two => writeln!(out, "{raw},{g:.5}")?,
            Layout::Three => writeln!(out, "{t:.5},{raw},{g:.5}")?,
            Layout::Four => writeln!(out, "{i},{t:.5},{raw},{g:.5}")?,
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !(args.rate.is_finite() && args.rate > 0.0) {
        anyhow::bail!("Sample rate must be > 0 (got {})", args.rate);
    }
    if args.freq >= args.rate / 2.0 {
        tracing::warn!(
            freq_hz = args.freq,
            nyquist_hz = args.rate / 2.0,
            "Tone is at or above Nyquist and will alias"
        );
    }

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_log(&args, &mut BufWriter::new(file))?;
            info!(
                file = %path.display(),
                samples = args.samples,
                freq_hz = args.freq,
                amplitude_g = args.amplitude,
                "Flight log written"
            );
        }
        None => {
            let stdout = std::io::stdout();
            write_log(&args, &mut BufWriter::new(stdout.lock()))?;
        }
    }

    Ok(())
}
