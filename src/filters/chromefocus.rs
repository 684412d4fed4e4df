use super::{Filter, FilterConfig, FilterContext};
use crate::error::Result;
use crate::types::{Colour, ColourList};

/// Keep the most common hue and desaturate everything else.
///
/// Hues are counted in buckets of `bucket` degrees (default: `range`). The
/// centre of the fullest bucket is the focus; colours whose hue lies more
/// than `range` degrees from it have their saturation scaled by `factor`.
pub struct ChromeFocus;

impl Filter for ChromeFocus {
    fn name(&self) -> &'static str {
        "chromefocus"
    }

    fn description(&self) -> &'static str {
        "Focus on the most common hue and fade out the others"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let range = config.f64("range", 5.0)?;
        if range == 0.0 || colours.is_empty() {
            return Ok(colours.to_vec());
        }
        if range < 0.0 {
            return Err(config.error(format!("'range' must not be negative. Actual {}", range)));
        }

        let factor = config.f64("factor", 0.0)?;
        let width = config.f64("bucket", range)?;
        if width <= 0.0 {
            return Err(config.error(format!("'bucket' must be positive. Actual {}", width)));
        }

        let hsv: Vec<(f64, f64, f64)> = colours.iter().map(|c| c.to_hsv()).collect();
        let focus = focus_hue(hsv.iter().map(|&(h, _, _)| h), width);

        Ok(colours
            .iter()
            .zip(&hsv)
            .map(|(&colour, &(h, s, v))| {
                if angular_distance(h, focus) <= range {
                    colour
                } else {
                    Colour::from_hsv(h, factor * s, v)
                }
            })
            .collect())
    }
}

/// Centre of the bucket holding the most hues. The first bucket to be
/// counted wins a tie.
fn focus_hue(hues: impl Iterator<Item = f64>, width: f64) -> f64 {
    // (start, end, count, first seen)
    let mut buckets: Vec<(f64, f64, usize, usize)> = Vec::new();

    for (seen, hue) in hues.enumerate() {
        let index = (hue / width).floor();
        let start = index * width;
        let end = (start + width).min(360.0);

        match buckets.iter_mut().find(|b| b.0 == start) {
            Some(bucket) => bucket.2 += 1,
            None => buckets.push((start, end, 1, seen)),
        }
    }

    buckets
        .iter()
        .max_by(|a, b| a.2.cmp(&b.2).then(b.3.cmp(&a.3)))
        .map(|&(start, end, _, _)| (start + end) / 2.0)
        .unwrap_or(0.0)
}

/// Shortest distance between two angles in degrees.
fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs().rem_euclid(360.0);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::testing::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chromefocus() {
        assert_eq!(
            hex(&run("chromefocus", &colours(SAMPLE), "").unwrap()),
            "#8f8f8f #754fc7 #838383 #808080 #9772ea #9f9f9f #e8e8e8 #e9e9e9"
        );
    }

    #[test]
    fn test_zero_range_is_identity() {
        let input = colours(SAMPLE);
        let output = run("chromefocus", &input, "chromefocus: { range: 0 }").unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_factor_one_keeps_saturation() {
        let input = colours(SAMPLE);
        let output = run("chromefocus", &input, "chromefocus: { factor: 1 }").unwrap();
        for (before, after) in input.iter().zip(&output) {
            assert!(before.distance(*after) <= 2.0, "{} {}", before, after);
        }
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert_eq!(angular_distance(350.0, 10.0), 20.0);
        assert_eq!(angular_distance(10.0, 350.0), 20.0);
        assert_eq!(angular_distance(90.0, 90.0), 0.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_focus_hue_ties_go_to_first_bucket() {
        assert_eq!(focus_hue([12.0, 200.0].into_iter(), 5.0), 12.5);
        assert_eq!(focus_hue([200.0, 12.0, 13.0].into_iter(), 5.0), 12.5);
        assert_eq!(focus_hue([358.0].into_iter(), 7.0), 358.5);
    }
}
