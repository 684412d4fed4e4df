pub mod completions;
pub mod filters;
pub mod palette;
pub mod run;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::Result;

/// recolour - run an image's palette through a chain of colour filters
#[derive(Parser, Debug)]
#[command(name = "recolour")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter decisions and palette sizes to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recolour an image using the configured filter chain
    Run(run::RunArgs),

    /// List the available filters
    Filters(filters::FiltersArgs),

    /// Print the colours of an image
    Palette(palette::PaletteArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load `path`, or recolour.yaml from the working directory when it exists.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                Config::load(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}
