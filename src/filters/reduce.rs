use super::{Filter, FilterConfig, FilterContext};
use crate::error::Result;
use crate::types::{Colour, ColourList};

/// Snap every colour to the nearest of `amount` dominant colours.
pub struct Reduce;

impl Filter for Reduce {
    fn name(&self) -> &'static str {
        "reduce"
    }

    fn description(&self) -> &'static str {
        "Reduce the number of distinct colours"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let amount = config.usize("amount", colours.len() / 20)?;
        if amount == 0 {
            return Ok(colours.to_vec());
        }

        let dominant = cx.dominant(colours, amount);
        tracing::debug!(amount, found = dominant.len(), "reducing to dominant colours");

        Ok(colours
            .iter()
            .map(|&c| {
                if dominant.contains(&c) {
                    c
                } else {
                    c.closest(&dominant).unwrap_or(c)
                }
            })
            .collect())
    }
}
