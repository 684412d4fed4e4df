//! Filters that blend the input with colours from an auxiliary image.

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Filter, FilterConfig, FilterContext};
use crate::error::{RecolourError, Result};
use crate::generate::{generate_from, sort_by_luminosity};
use crate::image::Image;
use crate::types::{combine_colours, Colour, ColourList};

/// Used by `swap` when no source image is configured.
const SLATE: [Colour; 6] = [
    Colour::new(0, 0, 0),
    Colour::new(28, 52, 63),
    Colour::new(37, 67, 81),
    Colour::new(102, 102, 102),
    Colour::new(124, 142, 150),
    Colour::new(255, 255, 255),
];

/// Read an image file and return its distinct colours.
fn image_colours(path: &Path) -> Result<ColourList> {
    let data = std::fs::read(path).map_err(|e| RecolourError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read image: {}", e),
    })?;

    Ok(Image::from_bytes(&data)?.colours().into_iter().collect())
}

/// One auxiliary colour per input colour.
///
/// Colours come from the image named by `image`, or from the input itself,
/// optionally shuffled, and are cycled to the input's length.
fn auxiliary_colours(
    colours: &[Colour],
    config: &FilterConfig<'_>,
    cx: &mut FilterContext<'_>,
) -> Result<ColourList> {
    let mut palette = match config.str("image")? {
        Some(path) => image_colours(Path::new(&path))?,
        None => colours.to_vec(),
    };
    if palette.is_empty() {
        palette = colours.to_vec();
    }

    if config.bool("shuffle", false)? {
        palette.shuffle(cx.rng());
    }

    Ok(palette.iter().cycle().take(colours.len()).copied().collect())
}

/// Randomly composite auxiliary colours over the input.
pub struct Dissolve;

impl Filter for Dissolve {
    fn name(&self) -> &'static str {
        "dissolve"
    }

    fn description(&self) -> &'static str {
        "Dissolve the colours into those of another image"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let opacity = config.opacity()?;
        let amount = config.i64("amount", 50)?;
        if !(0..=100).contains(&amount) {
            return Err(config.error(format!(
                "'amount' must be in range [0..100]. Actual {}",
                amount
            )));
        }

        let auxiliary = auxiliary_colours(colours, config, cx)?;
        let weight = amount as f64 / 100.0;

        Ok(colours
            .iter()
            .zip(auxiliary)
            .map(|(&original, aux)| {
                let foreground = if cx.rng().gen_bool(weight) { aux } else { original };
                combine_colours(foreground, original, opacity)
            })
            .collect())
    }
}

/// Composite the darker of each (input, auxiliary) pair over the input.
pub struct Darken;

impl Filter for Darken {
    fn name(&self) -> &'static str {
        "darken"
    }

    fn description(&self) -> &'static str {
        "Darken colours with the darkest of two colours"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let opacity = config.opacity()?;
        let auxiliary = auxiliary_colours(colours, config, cx)?;

        Ok(colours
            .iter()
            .zip(auxiliary)
            .map(|(&original, aux)| {
                let darker = if aux.luminosity() < original.luminosity() { aux } else { original };
                combine_colours(darker, original, opacity)
            })
            .collect())
    }
}

/// Composite the lighter of each (input, auxiliary) pair over the input.
pub struct Lighten;

impl Filter for Lighten {
    fn name(&self) -> &'static str {
        "lighten"
    }

    fn description(&self) -> &'static str {
        "Lighten colours with the lightest of two colours"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let opacity = config.opacity()?;
        let auxiliary = auxiliary_colours(colours, config, cx)?;

        Ok(colours
            .iter()
            .zip(auxiliary)
            .map(|(&original, aux)| {
                let lighter = if aux.luminosity() > original.luminosity() { aux } else { original };
                combine_colours(lighter, original, opacity)
            })
            .collect())
    }
}

/// Replace the palette with one derived from a source image.
pub struct Swap;

impl Filter for Swap {
    fn name(&self) -> &'static str {
        "swap"
    }

    fn description(&self) -> &'static str {
        "Swap in the colours of another image"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let mut source = match config.str("source")? {
            Some(path) => image_colours(Path::new(&path))?,
            None => SLATE.to_vec(),
        };
        sort_by_luminosity(&mut source);

        Ok(generate_from(&source, colours.len(), false, cx.rng()))
    }
}
