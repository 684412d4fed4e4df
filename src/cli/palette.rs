use std::path::PathBuf;

use clap::Args;

use crate::error::{RecolourError, Result};
use crate::generate::sort_by_luminosity;
use crate::image::Image;
use crate::output::{display_path, plural, Printer};
use crate::types::ColourList;

/// Print the colours of an image
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Image to read (SVG or other text, or a raster image)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Maximum number of colours to output
    #[arg(long)]
    pub max: Option<usize>,

    /// Print a JSON array instead of one colour per line
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let path = &args.file;
    let data = std::fs::read(path).map_err(|e| RecolourError::Io {
        path: path.clone(),
        message: format!("Failed to read image: {}", e),
    })?;

    let image = Image::from_bytes(&data)?;
    let mut colours: ColourList = image.colours().into_iter().collect();
    sort_by_luminosity(&mut colours);

    if let Some(max) = args.max {
        colours.truncate(max);
    }

    printer.status(
        "Sampled",
        &format!(
            "{} from {}",
            plural(colours.len(), "colour", "colours"),
            display_path(path)
        ),
    );

    if args.json {
        let json = serde_json::to_string_pretty(&colours).map_err(|e| RecolourError::Parse {
            message: format!("Failed to serialize palette: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        for colour in &colours {
            println!("{}", colour);
        }
    }

    Ok(())
}
