//! Filters that work in HSV space.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Filter, FilterConfig, FilterContext};
use crate::error::Result;
use crate::types::{
    Colour, ColourList, DEFAULT_SOFTNESS, PASTEL_BRIGHTNESS, PASTEL_SATURATION,
};

/// Replace each colour's saturation.
pub struct Grayscale;

impl Filter for Grayscale {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn description(&self) -> &'static str {
        "Convert colours to grayscale"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let saturation = config.f64("saturation", 0.0)?;

        Ok(colours
            .iter()
            .map(|c| {
                let (h, _, v) = c.to_hsv();
                Colour::from_hsv(h, saturation, v)
            })
            .collect())
    }
}

pub struct Neonize;

impl Filter for Neonize {
    fn name(&self) -> &'static str {
        "neonize"
    }

    fn description(&self) -> &'static str {
        "Fully saturated, fully bright versions of the colours"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let saturation = config.f64("saturation", 100.0)?;
        let brightness = config.f64("brightness", 100.0)?;

        Ok(colours
            .iter()
            .map(|c| Colour::from_hsv(c.to_hsv().0, saturation, brightness))
            .collect())
    }
}

pub struct Pastelize;

impl Filter for Pastelize {
    fn name(&self) -> &'static str {
        "pastelize"
    }

    fn description(&self) -> &'static str {
        "Pastelize all the colours"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let saturation = config.f64("saturation", PASTEL_SATURATION)?;
        let brightness = config.f64("brightness", PASTEL_BRIGHTNESS)?;

        Ok(colours
            .iter()
            .map(|c| c.pastelize(saturation, brightness))
            .collect())
    }
}

pub struct Soften;

impl Filter for Soften {
    fn name(&self) -> &'static str {
        "soften"
    }

    fn description(&self) -> &'static str {
        "Soften all the colours"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let softness = config.f64("softness", DEFAULT_SOFTNESS)?;
        Ok(colours.iter().map(|c| c.soften(softness)).collect())
    }
}

pub struct Intensify;

impl Filter for Intensify {
    fn name(&self) -> &'static str {
        "intensify"
    }

    fn description(&self) -> &'static str {
        "Intensify the colours (increase saturation)"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let amount = config.f64("percent", 50.0)? / 100.0;
        Ok(colours.iter().map(|c| c.intensify(amount)).collect())
    }
}

/// Raise saturation of the dullest colours toward a threshold.
///
/// The threshold defaults to the mean saturation of the input.
pub struct Vibrance;

impl Filter for Vibrance {
    fn name(&self) -> &'static str {
        "vibrance"
    }

    fn description(&self) -> &'static str {
        "Make dull colours more vibrant"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        if colours.is_empty() {
            return Ok(Vec::new());
        }

        let mean = colours.iter().map(|c| c.to_hsv().1).sum::<f64>() / colours.len() as f64;
        let threshold = config.f64("threshold", mean)?;
        let percentage = config.f64("percent", 20.0)? * 0.01;

        Ok(colours
            .iter()
            .map(|c| {
                let (h, s, v) = c.to_hsv();
                if s >= threshold {
                    *c
                } else {
                    Colour::from_hsv(h, s + percentage * (threshold - s), v)
                }
            })
            .collect())
    }
}

pub struct HueShift;

impl Filter for HueShift {
    fn name(&self) -> &'static str {
        "hueshift"
    }

    fn description(&self) -> &'static str {
        "Shift the hue of every colour by a fixed amount"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let amount = config.f64("amount", -90.0)?;

        Ok(colours
            .iter()
            .map(|c| {
                let (h, s, v) = c.to_hsv();
                Colour::from_hsv((h + amount).rem_euclid(360.0), s, v)
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy)]
enum Wave {
    Sine,
    Cosine,
    Either,
}

/// Scale each colour by one plus a trigonometric function of its hue.
pub struct Sine;

impl Filter for Sine {
    fn name(&self) -> &'static str {
        "sine"
    }

    fn description(&self) -> &'static str {
        "Scale colours by the sine (or cosine) of their hue"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let mode = config.str("mode")?.unwrap_or_else(|| "sine".to_string());
        let wave = match mode.as_str() {
            "sine" => Wave::Sine,
            "cosine" => Wave::Cosine,
            "random" => Wave::Either,
            other => {
                tracing::warn!(mode = other, "unknown sine mode, using sine");
                Wave::Sine
            }
        };

        Ok(colours
            .iter()
            .map(|c| {
                let hue = c.to_hsv().0.to_radians();
                let use_sine = match wave {
                    Wave::Sine => true,
                    Wave::Cosine => false,
                    Wave::Either => cx.rng().gen_bool(0.5),
                };
                let ratio = if use_sine { 1.0 + hue.sin() } else { 1.0 + hue.cos() };
                *c * ratio
            })
            .collect())
    }
}

/// Take the hue of a channel-shuffled colour, keeping saturation and value.
pub struct Shuffle;

impl Filter for Shuffle {
    fn name(&self) -> &'static str {
        "shuffle"
    }

    fn description(&self) -> &'static str {
        "Shuffle the RGB channels but keep saturation and brightness"
    }

    fn apply(
        &self,
        colours: &[Colour],
        _: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        Ok(colours
            .iter()
            .map(|c| {
                let mut channels = c.to_rgb();
                channels.shuffle(cx.rng());
                let (hue, _, _) = Colour::from(channels).to_hsv();
                let (_, s, v) = c.to_hsv();
                Colour::from_hsv(hue, s, v)
            })
            .collect())
    }
}

pub struct Colorify;

impl Filter for Colorify {
    fn name(&self) -> &'static str {
        "colorify"
    }

    fn description(&self) -> &'static str {
        "Tint every colour with the hue of one colour"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let spec = config.str("colour")?.or(config.str("color")?);
        let mut target = Colour::parse(spec.as_deref().unwrap_or("#ff0000"), cx.rng())?;

        if config.bool("pastelize", true)? {
            target = target.pastelize(PASTEL_SATURATION, PASTEL_BRIGHTNESS);
        }
        let fix_bw = config.bool("fix_bw", false)?;

        Ok(colours.iter().map(|c| c.colorify(target, fix_bw)).collect())
    }
}
