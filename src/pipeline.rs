//! One complete recolouring pass over an image.
//!
//! Decode the image, list its colours darkest first, run them through the
//! filter chain (or take the configured override palette) and write the
//! replacements back.

use chrono::NaiveDateTime;
use rand::RngCore;

use crate::config::Config;
use crate::error::Result;
use crate::filters::{FilterContext, FilterRegistry};
use crate::generate::sort_by_luminosity;
use crate::image::Image;
use crate::types::ColourList;

/// The outcome of [`recolour`].
#[derive(Debug, Clone)]
pub struct Recoloured {
    /// The image's colours, by ascending luminosity.
    pub original: ColourList,

    /// The new colour for each entry of `original`, in the same order.
    pub palette: ColourList,

    /// The re-encoded image.
    pub image: Vec<u8>,
}

impl Recoloured {
    pub fn changed(&self) -> bool {
        self.original != self.palette
    }
}

/// Recolour the image in `data`.
pub fn recolour(
    data: &[u8],
    config: &Config,
    registry: &FilterRegistry,
    rng: &mut dyn RngCore,
    now: NaiveDateTime,
) -> Result<Recoloured> {
    let image = Image::from_bytes(data)?;

    let mut original: ColourList = image.colours().into_iter().collect();
    sort_by_luminosity(&mut original);

    let palette = match config.override_colours(rng)? {
        Some(colours) => {
            tracing::debug!(colours = colours.len(), "using override palette");
            colours
        }
        None => {
            let mut cx = FilterContext::new(registry, &config.filter, rng)
                .with_now(now)
                .with_cluster_timeout(config.cluster_timeout());
            cx.run_chain(config.filters.as_slice(), &original)?
        }
    };
    tracing::debug!(kind = image.kind(), colours = palette.len(), "final palette");

    let image = if palette == original {
        image.to_bytes()?
    } else {
        image.replace(&original, &palette).to_bytes()?
    };

    Ok(Recoloured {
        original,
        palette,
        image,
    })
}
