//! # photon21
//!
//! Photonic component generator.
//!
//! Reads a component-parameter file naming its generator with a `cell:` tag,
//! builds it against a technology file (or the built-in technology),
//! and writes the resulting single-cell library as JSON, YAML, or TOML.

// Std-Lib
use std::error::Error;

// Crates.io
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// Local imports
use photon21pcells::{generate, CellParams, PCell, Technology};
use photon21raw::SerializationFormat;

#[derive(Parser)]
#[command(name = "photon21", version, about = "Parametric photonic component generator")]
struct ProgramOptions {
    /// Technology file. Defaults to the built-in technology.
    #[arg(short, long)]
    tech: Option<String>,
    /// Component-parameter file
    #[arg(short, long)]
    params: String,
    /// Output library file
    #[arg(short, long)]
    out: String,
    /// Output format, one of (json, yaml, toml). Inferred from `out` if not provided.
    #[arg(short, long)]
    format: Option<String>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();
    init_logging(options.verbose);
    _main(&options)
}

/// Install the `fmt` subscriber. `RUST_LOG` takes precedence over `verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn _main(options: &ProgramOptions) -> Result<(), Box<dyn Error>> {
    let tech = match &options.tech {
        Some(path) => Technology::load(path)?,
        None => Technology::builtin()?,
    };
    info!("read technology {}", tech.name);

    let fmt = match &options.format {
        Some(name) => SerializationFormat::from_name(name),
        None => SerializationFormat::from_path(&options.out),
    };
    let fmt = match fmt {
        Some(fmt) => fmt,
        None => return Err(format!("Cannot determine output format for {:?}", options.out).into()),
    };

    let generator = CellParams::load(&options.params)?.generator()?;
    info!("read parameters for {}", generator.name());

    let (library, component) = generate(&tech, &generator)?;
    if let Some(disc) = &component.discrepancy {
        warn!(
            "{}: requested length {} not reachable, drew {}",
            component.name, disc.requested, disc.achieved
        );
    }
    fmt.save(&library, &options.out)?;
    info!("wrote {:?}", &options.out);
    Ok(())
}
