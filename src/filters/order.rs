//! Filters that rearrange or mix colours across the list.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Filter, FilterConfig, FilterContext};
use crate::error::Result;
use crate::types::{Colour, ColourList};

/// Move every channel halfway toward the list's mean.
pub struct ColorBalance;

impl Filter for ColorBalance {
    fn name(&self) -> &'static str {
        "colorbalance"
    }

    fn description(&self) -> &'static str {
        "Pull the colours toward a more harmonious average"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        if colours.is_empty() {
            return Ok(Vec::new());
        }

        let normalized: Vec<[f64; 3]> = colours
            .iter()
            .map(|c| c.to_rgb().map(|v| v as f64 / 255.0))
            .collect();

        let mut average = [0.0; 3];
        for channels in &normalized {
            for i in 0..3 {
                average[i] += channels[i];
            }
        }
        let average = average.map(|sum| sum / colours.len() as f64);

        Ok(normalized
            .iter()
            .map(|channels| {
                let mut adjusted = [0u8; 3];
                for i in 0..3 {
                    let value = channels[i] + (average[i] - channels[i]) * 0.5;
                    adjusted[i] = (value.clamp(0.0, 1.0) * 255.0) as u8;
                }
                Colour::from(adjusted)
            })
            .collect())
    }
}

/// Mirror the list around its middle.
///
/// The first half is built from every fourth `(front, back)` pair of the
/// input, cycled as needed; the second half is the first half reversed.
pub struct Kaleidoscope;

impl Filter for Kaleidoscope {
    fn name(&self) -> &'static str {
        "kaleidoscope"
    }

    fn description(&self) -> &'static str {
        "Every fourth colour pair, mirrored"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let len = colours.len();
        let pairs: ColourList = colours
            .iter()
            .zip(colours.iter().rev())
            .step_by(4)
            .flat_map(|(front, back)| [*front, *back])
            .collect();

        let half: ColourList = pairs.iter().cycle().take(len.div_ceil(2)).copied().collect();

        let mut result = half.clone();
        result.extend(half[..len / 2].iter().rev());
        Ok(result)
    }
}

/// Rotate the list by a random, non-zero number of places.
pub struct Shift;

impl Filter for Shift {
    fn name(&self) -> &'static str {
        "shift"
    }

    fn description(&self) -> &'static str {
        "Shift colours by a random amount"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let mut result = colours.to_vec();
        let max = colours.len().saturating_sub(1);
        if max == 0 {
            return Ok(result);
        }

        let places = match cx.rng().gen_range(0..=max) {
            0 => max,
            n => n,
        };
        if cx.rng().gen_bool(0.5) {
            result.rotate_right(places);
        } else {
            result.rotate_left(places);
        }

        Ok(result)
    }
}

/// Add or subtract one randomly chosen member from every colour.
pub struct Subtract;

impl Filter for Subtract {
    fn name(&self) -> &'static str {
        "subtract"
    }

    fn description(&self) -> &'static str {
        "Add or subtract a random member colour from all colours"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let Some(&member) = colours.choose(cx.rng()) else {
            return Ok(Vec::new());
        };

        if cx.rng().gen_bool(0.5) {
            Ok(colours.iter().map(|&c| c - member).collect())
        } else {
            Ok(colours.iter().map(|&c| c + member).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::filters::testing::*;
    use crate::types::Colour;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_colorbalance() {
        let output = run("colorbalance", &[Colour::BLACK, Colour::WHITE], "").unwrap();
        assert_eq!(output, vec![Colour::new(63, 63, 63), Colour::new(191, 191, 191)]);
    }

    #[test]
    fn test_kaleidoscope() {
        let input = colours(SAMPLE);
        let output = run("kaleidoscope", &input, "").unwrap();

        let (o0, o3, o4, o7) = (input[0], input[3], input[4], input[7]);
        assert_eq!(output, vec![o0, o7, o4, o3, o3, o4, o7, o0]);
    }

    #[test]
    fn test_kaleidoscope_odd_length() {
        let input = colours("#010101 #020202 #030303 #040404 #050505");
        let output = run("kaleidoscope", &input, "").unwrap();

        assert_eq!(output.len(), 5);
        let reversed: Vec<_> = output.iter().rev().copied().collect();
        assert_eq!(output, reversed);
    }

    #[test]
    fn test_shift_is_a_rotation() {
        let input = colours(SAMPLE);
        let output = run("shift", &input, "").unwrap();

        assert_ne!(output, input);
        let offset = output.iter().position(|c| *c == input[0]).unwrap();
        let mut rotated = input.clone();
        rotated.rotate_right(offset);
        assert_eq!(output, rotated);
    }

    #[test]
    fn test_subtract_uses_one_member() {
        let input = colours(SAMPLE);
        let output = run("subtract", &input, "").unwrap();

        let explained = input.iter().any(|&member| {
            let added: Vec<_> = input.iter().map(|&c| c + member).collect();
            let subtracted: Vec<_> = input.iter().map(|&c| c - member).collect();
            output == added || output == subtracted
        });
        assert!(explained);
    }
}
