//! Completions command implementation.

use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::error::{RecolourError, Result};
use crate::output::{display_path, Printer};

/// Generate shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script into this directory instead of stdout
    #[arg(long, short)]
    pub dir: Option<PathBuf>,
}

pub fn run(args: CompletionsArgs, printer: &Printer) -> Result<()> {
    let mut cmd = super::Cli::command();
    let bin = cmd.get_name().to_string();

    match args.dir {
        Some(dir) => {
            let path = clap_complete::generate_to(args.shell, &mut cmd, bin, &dir).map_err(|e| {
                RecolourError::Io {
                    path: dir.clone(),
                    message: format!("Failed to write completions: {}", e),
                }
            })?;
            printer.success("Generated", &display_path(&path));
        }
        None => clap_complete::generate(args.shell, &mut cmd, bin, &mut std::io::stdout()),
    }

    Ok(())
}
