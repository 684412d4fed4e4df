use rand::seq::SliceRandom;
use rand::RngCore;

use super::gradient;
use crate::types::{Colour, ColourList};

/// Return exactly `needed` colours derived from `pool`.
///
/// - an empty pool yields random colours
/// - a pool of exactly `needed` colours is returned, shuffled when `randomize`
/// - a larger pool is sampled without replacement
/// - a pool of two becomes a dark-to-light gradient
/// - anything else is split in half and each half fills its share
pub fn generate_from(
    pool: &[Colour],
    needed: usize,
    randomize: bool,
    rng: &mut dyn RngCore,
) -> ColourList {
    if pool.is_empty() {
        return (0..needed).map(|_| Colour::random(rng)).collect();
    }

    if pool.len() == needed {
        let mut colours = pool.to_vec();
        if randomize {
            colours.shuffle(rng);
        }
        return colours;
    }

    if needed < pool.len() {
        return pool.choose_multiple(rng, needed).copied().collect();
    }

    if let [a, b] = pool {
        let (dark, light) = if b.luminosity() < a.luminosity() {
            (*b, *a)
        } else {
            (*a, *b)
        };
        return gradient(dark, light, needed);
    }

    let (left, right) = pool.split_at(pool.len() / 2);
    let share = needed / 2;

    let mut colours = generate_from(left, share, randomize, rng);
    colours.extend(generate_from(right, needed - share, randomize, rng));
    colours
}

/// Sort colours by ascending luminosity, keeping the order of ties.
pub fn sort_by_luminosity(colours: &mut [Colour]) {
    colours.sort_by_key(|c| c.luminosity());
}
