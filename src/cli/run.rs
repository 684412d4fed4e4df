//! Run command implementation.
//!
//! Reads the input image, recolours it and writes the result.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{RecolourError, Result};
use crate::filters::FilterRegistry;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::recolour;

/// Recolour an image using the configured filter chain
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Config file (default: recolour.yaml in the working directory)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Image to recolour, overriding the config
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Where to write the result (default: overwrite the input)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Seed the random number generator for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: RunArgs, printer: &Printer) -> Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if args.input.is_some() {
        config.input = args.input;
    }
    if args.output.is_some() {
        config.output = args.output;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let input = config.input.clone().ok_or(RecolourError::NoInput)?;
    let output = config.output_path().unwrap_or(input.as_path()).to_path_buf();

    let data = fs::read(&input).map_err(|e| RecolourError::Io {
        path: input.clone(),
        message: format!("Failed to read image: {}", e),
    })?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    printer.status("Recolouring", &display_path(&input));
    let registry = FilterRegistry::builtin();
    let now = chrono::Local::now().naive_local();
    let result = recolour(&data, &config, &registry, &mut rng, now)?;

    fs::write(&output, &result.image).map_err(|e| RecolourError::Io {
        path: output.clone(),
        message: format!("Failed to write image: {}", e),
    })?;

    let summary = format!(
        "{} in {}",
        plural(result.palette.len(), "colour", "colours"),
        display_path(&output)
    );
    if result.changed() {
        printer.success("Finished", &summary);
    } else {
        printer.info("Unchanged", &summary);
    }

    Ok(())
}
