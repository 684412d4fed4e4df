//! Filters that work on brightness and channel values.

use rand::Rng;

use super::{Filter, FilterConfig, FilterContext};
use crate::error::Result;
use crate::types::{Colour, ColourList, Comparison};

pub struct Identity;

impl Filter for Identity {
    fn name(&self) -> &'static str {
        "none"
    }

    fn description(&self) -> &'static str {
        "Leave the colours as they are"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        Ok(colours.to_vec())
    }
}

pub struct Inverse;

impl Filter for Inverse {
    fn name(&self) -> &'static str {
        "inverse"
    }

    fn description(&self) -> &'static str {
        "Invert every colour"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        Ok(colours.iter().map(|c| c.inverse()).collect())
    }
}

pub struct Luminosity;

impl Filter for Luminosity {
    fn name(&self) -> &'static str {
        "luminosity"
    }

    fn description(&self) -> &'static str {
        "Random colours with the same luminosity as the originals"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        colours
            .iter()
            .map(|c| Colour::random_with_luminosity(cx.rng(), c.luminosity(), Comparison::Equal))
            .collect()
    }
}

/// Raise or lower luminosity by a percentage.
pub struct Brighten;

impl Filter for Brighten {
    fn name(&self) -> &'static str {
        "brighten"
    }

    fn description(&self) -> &'static str {
        "Brighten (or darken) the colours"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let percent = config.f64("percent", -20.0)?;

        Ok(colours
            .iter()
            .map(|c| {
                let lum = c.luminosity() as f64;
                c.luminize(lum + 0.01 * percent * lum)
            })
            .collect())
    }
}

/// Spread luminosity evenly from black upward, in list order.
pub struct Contrast;

impl Filter for Contrast {
    fn name(&self) -> &'static str {
        "contrast"
    }

    fn description(&self) -> &'static str {
        "The darks are so dark and the brights are so bright"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let step = 255.0 / colours.len().max(1) as f64;

        Ok(colours
            .iter()
            .enumerate()
            .map(|(i, c)| c.luminize(i as f64 * step))
            .collect())
    }
}

pub struct Luminize;

impl Filter for Luminize {
    fn name(&self) -> &'static str {
        "luminize"
    }

    fn description(&self) -> &'static str {
        "Give all the colours the same luminosity"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let luminance = config.f64("luminance", 178.5)?;
        Ok(colours.iter().map(|c| c.luminize(luminance)).collect())
    }
}

pub struct RandBright;

impl Filter for RandBright {
    fn name(&self) -> &'static str {
        "randbright"
    }

    fn description(&self) -> &'static str {
        "Lighten or darken each colour by a random amount"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        Ok(colours
            .iter()
            .map(|c| c.luminize(cx.rng().gen_range(0..=255u8) as f64))
            .collect())
    }
}

/// Quantize each channel down to `bits` levels.
pub struct Vga;

impl Filter for Vga {
    fn name(&self) -> &'static str {
        "vga"
    }

    fn description(&self) -> &'static str {
        "A blast from the past"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let bits = config.i64("bits", 8)?;
        if bits < 1 {
            return Err(config.error(format!("'bits' must be at least 1. Actual {}", bits)));
        }

        let div = 256.0 / bits as f64;
        let quantize = |c: u8| ((c as f64 / div).floor() * div) as u8;

        Ok(colours
            .iter()
            .map(|c| Colour::new(quantize(c.r), quantize(c.g), quantize(c.b)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::filters::testing::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_none() {
        assert_eq!(run("none", &colours(SAMPLE), "").unwrap(), colours(SAMPLE));
    }

    #[test]
    fn test_inverse() {
        assert_eq!(
            hex(&run("inverse", &colours(SAMPLE), "").unwrap()),
            "#81ee70 #8ab038 #7ca28a #7f86cf #688d15 #606cb4 #c617dd #ca2016"
        );
    }

    #[test]
    fn test_vga() {
        assert_eq!(
            hex(&run("vga", &colours(SAMPLE), "").unwrap()),
            "#600080 #6040c0 #804060 #806020 #8060e0 #808040 #20e020 #20c0e0"
        );
        assert_eq!(
            hex(&run("vga", &colours(SAMPLE), "vga: { bits: 4 }").unwrap()),
            "#400080 #4040c0 #804040 #804000 #8040c0 #808040 #00c000 #00c0c0"
        );
        assert!(run("vga", &colours(SAMPLE), "vga: { bits: 0 }").is_err());
    }

    #[test]
    fn test_luminosity_keeps_luminosity() {
        let input = colours(SAMPLE);
        let output = run("luminosity", &input, "").unwrap();

        for (before, after) in input.iter().zip(&output) {
            assert_eq!(before.luminosity(), after.luminosity());
        }
    }

    #[test]
    fn test_brighten() {
        let output = run("brighten", &colours(SAMPLE), "").unwrap();
        assert_eq!(output[0].to_string(), "#650e72");

        let output = run("brighten", &colours(SAMPLE), "brighten: { percent: 0 }").unwrap();
        assert_eq!(output, colours(SAMPLE));
    }

    #[test]
    fn test_contrast() {
        let output = run("contrast", &colours(SAMPLE), "").unwrap();
        assert_eq!(output[0].to_string(), "#000000");

        let lums: Vec<u8> = output.iter().map(|c| c.luminosity()).collect();
        assert_eq!(lums, vec![0, 32, 64, 96, 128, 159, 191, 223]);
    }

    #[test]
    fn test_luminize() {
        let output = run("luminize", &colours(SAMPLE), "").unwrap();
        assert!(output.iter().all(|c| c.luminosity() == 178));

        let output = run("luminize", &colours(SAMPLE), "luminize: { luminance: 40 }").unwrap();
        assert!(output.iter().all(|c| c.luminosity() == 40));
    }

    #[test]
    fn test_randbright_is_seeded() {
        let first = run("randbright", &colours(SAMPLE), "").unwrap();
        let second = run("randbright", &colours(SAMPLE), "").unwrap();
        assert_eq!(first, second);
    }
}
