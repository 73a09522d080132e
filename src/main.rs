//! tripole-datagen: CLI for generating and checking tri-pole calibration datasets

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tripole_field::{verify_run, write_bundle, GenerationOptions, Generator, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "tripole-datagen")]
#[command(about = "Generate magnetic field datasets for a tri-pole electromagnet")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the four datasets and a manifest
    Generate(GenerateArgs),
    /// Recompute persisted fields from their voltages and compare
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Output directory
    #[arg(short, long)]
    out: PathBuf,

    /// Seed for the random sampling blocks
    #[arg(long, default_value = "0")]
    seed: u64,

    /// JSON file with a (partial) simulation configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Voltage range half-width
    #[arg(long)]
    v_max: Option<f64>,

    /// Saturation voltage scale of the non-linear mapping
    #[arg(long)]
    nonlinearity: Option<f64>,

    /// Volts to moment scale
    #[arg(long)]
    scale: Option<f64>,

    /// Field constant of the dipole model
    #[arg(long)]
    mu0: Option<f64>,

    /// Sweep samples per pole
    #[arg(long)]
    per_pole: Option<usize>,

    /// Random samples appended to the full dataset
    #[arg(long)]
    random: Option<usize>,

    /// Validation samples
    #[arg(long)]
    validation: Option<usize>,

    /// Evaluate samples in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Directory written by `generate`
    #[arg(short, long)]
    dir: PathBuf,

    /// Maximum allowed per-component deviation
    #[arg(long, default_value = "1e-9")]
    tolerance: f64,
}

fn load_config(args: &GenerateArgs) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Invalid config file: {:?}", path))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(v) = args.v_max {
        config.v_max = v;
    }
    if let Some(v) = args.nonlinearity {
        config.nonlinearity_factor = v;
    }
    if let Some(v) = args.scale {
        config.moment_scale = v;
    }
    if let Some(v) = args.mu0 {
        config.mu0 = v;
    }
    if let Some(n) = args.per_pole {
        config.per_pole_samples = n;
    }
    if let Some(n) = args.random {
        config.random_samples = n;
    }
    if let Some(n) = args.validation {
        config.validation_samples = n;
    }

    Ok(config)
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(&args)?;
    let options = GenerationOptions { parallel: args.parallel };

    let generator = Generator::with_options(config, options).context("Invalid configuration")?;
    let bundle = generator.generate_all(args.seed).context("Generation failed")?;

    let manifest = write_bundle(&bundle, generator.config(), &args.out)
        .with_context(|| format!("Failed to write datasets to {:?}", args.out))?;

    for entry in &manifest.datasets {
        info!("{}: {} rows -> {}", entry.kind, entry.rows, entry.file);
    }
    eprintln!("Wrote {} datasets to {:?}", manifest.datasets.len(), args.out);
    Ok(())
}

fn verify(args: VerifyArgs) -> Result<()> {
    let reports = verify_run(&args.dir, args.tolerance)
        .with_context(|| format!("Failed to verify {:?}", args.dir))?;

    let mut failed = 0;
    for (kind, report) in &reports {
        let status = if report.passed() { "ok" } else { "FAILED" };
        println!(
            "{:<22} {:>6} rows  max error {:.3e}  {}",
            kind.to_string(),
            report.rows,
            report.max_abs_error,
            status
        );
        if !report.passed() {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} datasets failed verification", failed, reports.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    match Cli::parse().command {
        Command::Generate(args) => generate(args),
        Command::Verify(args) => verify(args),
    }
}
