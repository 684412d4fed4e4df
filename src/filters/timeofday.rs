use chrono::Timelike;

use super::{Filter, FilterConfig, FilterContext};
use crate::error::Result;
use crate::types::{Colour, ColourList};

/// A part of the day: its settings key, default start hour and default
/// brightness factors at its start and end.
struct Segment {
    name: &'static str,
    start: i64,
    factors: (f64, f64),
}

const SEGMENTS: [Segment; 4] = [
    Segment { name: "morning", start: 6, factors: (0.8, 1.0) },
    Segment { name: "midday", start: 12, factors: (1.0, 1.0) },
    Segment { name: "evening", start: 18, factors: (1.0, 0.6) },
    Segment { name: "night", start: 21, factors: (0.5, 0.5) },
];

/// Scale brightness on a daily schedule.
///
/// Within each segment the factor moves linearly from the first value of
/// its range to the second. Night runs past midnight into the morning.
pub struct TimeOfDay;

impl Filter for TimeOfDay {
    fn name(&self) -> &'static str {
        "timeofday"
    }

    fn description(&self) -> &'static str {
        "Adjust brightness according to the time of day"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let hour = cx.now().hour() as i64;
        let factor = brightness_factor(config, hour)?;
        tracing::debug!(hour, factor, "time of day brightness");

        Ok(colours
            .iter()
            .map(|c| {
                let (h, s, v) = c.to_hsv();
                Colour::from_hsv(h, s, factor * v)
            })
            .collect())
    }
}

fn brightness_factor(config: &FilterConfig<'_>, hour: i64) -> Result<f64> {
    let mut starts = [0i64; 4];
    let mut ranges = [(0.0, 0.0); 4];

    for (i, segment) in SEGMENTS.iter().enumerate() {
        starts[i] = config.i64(segment.name, segment.start)?;
        if !(0..24).contains(&starts[i]) {
            return Err(config.error(format!(
                "'{}' must be an hour in range [0..23]. Actual {}",
                segment.name, starts[i]
            )));
        }
        ranges[i] = config
            .range(&format!("{}_factors", segment.name))?
            .unwrap_or(segment.factors);
    }

    if starts.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(config.error(format!(
            "segment start hours must increase through the day, got {:?}",
            starts
        )));
    }

    // before the first segment starts it is still night
    let current = starts.iter().rposition(|&start| start <= hour).unwrap_or(3);
    let next = (current + 1) % starts.len();

    let elapsed = (hour - starts[current]).rem_euclid(24) as f64;
    let length = (starts[next] - starts[current]).rem_euclid(24) as f64;
    let (low, high) = ranges[current];

    Ok(low + (elapsed / length) * (high - low))
}
