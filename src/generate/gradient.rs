use crate::types::{Colour, ColourList};

/// Linear gradient of `steps` colours from `from` to `to`, both inclusive.
///
/// Intermediate channels are truncated. Zero steps yield an empty list and a
/// single step yields just `from`.
pub fn gradient(from: Colour, to: Colour, steps: usize) -> ColourList {
    match steps {
        0 => Vec::new(),
        1 => vec![from],
        _ => (0..steps)
            .map(|i| {
                if i == steps - 1 {
                    return to;
                }
                let lerp = |a: u8, b: u8| {
                    (a as f64 + (b as f64 - a as f64) * i as f64 / steps as f64) as u8
                };
                Colour::new(lerp(from.r, to.r), lerp(from.g, to.g), lerp(from.b, to.b))
            })
            .collect(),
    }
}
