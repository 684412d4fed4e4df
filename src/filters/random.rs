use rand::seq::SliceRandom;
use rand::Rng;

use super::{Filter, FilterConfig, FilterContext};
use crate::error::Result;
use crate::types::{Colour, ColourList};

/// Run a random number of randomly picked filters.
///
/// Candidates come from `include` (every other registered filter by
/// default). Between 1 and `chains` filters are run, each picked
/// independently.
pub struct Random;

impl Filter for Random {
    fn name(&self) -> &'static str {
        "random"
    }

    fn description(&self) -> &'static str {
        "Yeah, how could we live without a random filter?"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let candidates: Vec<String> = match config.list("include")? {
            Some(names) => names.into_iter().filter(|name| name != self.name()).collect(),
            None => cx
                .registry()
                .names()
                .filter(|name| *name != self.name())
                .map(String::from)
                .collect(),
        };

        if candidates.is_empty() {
            return Ok(colours.to_vec());
        }

        let chains = config.usize("chains", 1)?;
        if chains == 0 {
            return Err(config.error("'chains' must be at least 1"));
        }

        let runs = cx.rng().gen_range(1..=chains);
        let mut current = colours.to_vec();

        for _ in 0..runs {
            let Some(name) = candidates.choose(cx.rng()) else {
                break;
            };
            tracing::debug!(filter = %name, "random filter picked");

            match cx.run_filter(name, &current)? {
                Some(next) => current = next,
                None => tracing::warn!(filter = %name, "filter not found, skipping"),
            }
        }

        Ok(current)
    }
}
