//! Gradient filters.

use rand::{Rng, RngCore};

use super::{Filter, FilterConfig, FilterContext};
use crate::error::Result;
use crate::generate::gradient;
use crate::types::{Colour, ColourList, Comparison};

/// A random colour with exactly the given luminosity.
fn random_at(rng: &mut dyn RngCore, luminosity: i64) -> Result<Colour> {
    Colour::random_with_luminosity(rng, luminosity.clamp(0, 255) as u8, Comparison::Equal)
}

/// A random integer in `-n..=n`.
fn random_offset(rng: &mut dyn RngCore, n: i64) -> i64 {
    let sign = if rng.gen_bool(0.5) { -1 } else { 1 };
    sign * rng.gen_range(0..=n.abs())
}

/// One gradient spanning the luminosity range of the input.
pub struct Gradient;

impl Filter for Gradient {
    fn name(&self) -> &'static str {
        "gradient"
    }

    fn description(&self) -> &'static str {
        "Gradient within the same luminosity range as the original"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let (Some(first), Some(last)) = (colours.first(), colours.last()) else {
            return Ok(Vec::new());
        };
        let fuzz = config.i64("fuzz", 0)?;

        let low = first.luminosity() as i64 + random_offset(cx.rng(), fuzz);
        let high = last.luminosity() as i64 + random_offset(cx.rng(), fuzz);

        let from = random_at(cx.rng(), low)?;
        let to = random_at(cx.rng(), high)?;

        Ok(gradient(from, to, colours.len()))
    }
}

/// Several gradients joined end to end, anchored at evenly spaced inputs.
pub struct ZipGradient;

impl Filter for ZipGradient {
    fn name(&self) -> &'static str {
        "zipgradient"
    }

    fn description(&self) -> &'static str {
        "Several gradients joined together"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let count = config.i64("colors", 2)?;
        if count < 1 {
            return Err(config.error(format!("'colors' must be at least 1. Actual {}", count)));
        }

        let len = colours.len();
        let steps = len / count as usize;
        if steps < 2 {
            return Ok(colours.to_vec());
        }

        let mut anchor = steps;
        let mut colour = random_at(cx.rng(), colours[0].luminosity() as i64)?;
        let mut result = Vec::with_capacity(len + steps);

        while result.len() < len {
            let next = random_at(cx.rng(), colours[anchor.min(len - 1)].luminosity() as i64)?;
            result.extend(gradient(colour, next, steps).into_iter().skip(1));
            anchor += steps;
            colour = next;
        }

        result.truncate(len);
        Ok(result)
    }
}

/// Replace runs of `size` colours with a gradient between each run's ends.
pub struct SubGradient;

impl Filter for SubGradient {
    fn name(&self) -> &'static str {
        "subgradient"
    }

    fn description(&self) -> &'static str {
        "Gradients over consecutive runs of the original colours"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let size = config.usize("size", colours.len() / 20)?;
        if size < 2 {
            return Ok(colours.to_vec());
        }

        Ok(colours
            .chunks(size)
            .flat_map(|chunk| gradient(chunk[0], chunk[chunk.len() - 1], chunk.len()))
            .collect())
    }
}
