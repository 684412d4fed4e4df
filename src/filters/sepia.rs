use super::{Filter, FilterConfig, FilterContext};
use crate::error::Result;
use crate::types::{Colour, ColourList};

type Matrix = [[f64; 3]; 3];

/// Rows give the output red, green and blue as weights of the input channels.
const SEPIA: Matrix = [
    [0.393, 0.607, 0.189],
    [0.272, 0.769, 0.168],
    [0.131, 0.314, 0.189],
];

/// Mix channels through a sepia matrix, then blend with the original.
///
/// `amount` is the share of the sepia colour, from 0 (original) to 1.
/// `matrix` replaces the default mix with three rows of three weights.
pub struct Sepia;

impl Filter for Sepia {
    fn name(&self) -> &'static str {
        "sepia"
    }

    fn description(&self) -> &'static str {
        "Give the colours an old photograph tint"
    }

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        _: &mut FilterContext<'_>,
    ) -> Result<ColourList> {
        let amount = config.f64("amount", 1.0)?;
        if !(0.0..=1.0).contains(&amount) {
            return Err(config.error(format!(
                "'amount' must be in range [0..1]. Actual {}",
                amount
            )));
        }

        let matrix = match config.raw("matrix") {
            Some(value) => serde_yaml::from_value::<Matrix>(value.clone()).map_err(|e| {
                config.error(format!("'matrix' must be three rows of three numbers: {}", e))
            })?,
            None => SEPIA,
        };

        Ok(colours
            .iter()
            .map(|&c| blend(c, mix(c, &matrix), amount))
            .collect())
    }
}

fn mix(colour: Colour, matrix: &Matrix) -> Colour {
    let input = colour.to_rgb().map(f64::from);
    let channel = |row: &[f64; 3]| {
        let sum: f64 = row.iter().zip(input).map(|(w, c)| w * c).sum();
        sum.clamp(0.0, 255.0) as u8
    };

    Colour::new(channel(&matrix[0]), channel(&matrix[1]), channel(&matrix[2]))
}

fn blend(original: Colour, toned: Colour, amount: f64) -> Colour {
    if amount == 1.0 {
        return toned;
    }
    if amount == 0.0 {
        return original;
    }

    let channel = |o: u8, t: u8| {
        ((1.0 - amount) * o as f64 + amount * t as f64).clamp(0.0, 255.0) as u8
    };
    Colour::new(
        channel(original.r, toned.r),
        channel(original.g, toned.g),
        channel(original.b, toned.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::testing::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sepia() {
        assert_eq!(
            hex(&run("sepia", &colours(SAMPLE), "").unwrap()),
            "#564730 #837e4d #827e44 #84873f #aca863 #a5a851 #a9c756 #c8e179"
        );
    }

    #[test]
    fn test_sepia_amount() {
        let input = colours(SAMPLE);
        assert_eq!(run("sepia", &input, "sepia: { amount: 0 }").unwrap(), input);

        let half = run("sepia", &input, "sepia: { amount: 0.5 }").unwrap();
        assert_eq!(half[0], blend(input[0], mix(input[0], &SEPIA), 0.5));

        assert!(run("sepia", &input, "sepia: { amount: 1.5 }").is_err());
    }

    #[test]
    fn test_custom_matrix() {
        let input = colours(SAMPLE);
        let identity = "sepia: { matrix: [[1, 0, 0], [0, 1, 0], [0, 0, 1]] }";
        assert_eq!(run("sepia", &input, identity).unwrap(), input);

        assert!(run("sepia", &input, "sepia: { matrix: [[1, 0], [0, 1]] }").is_err());
    }

    #[test]
    fn test_white_saturates() {
        assert_eq!(mix(Colour::WHITE, &SEPIA), Colour::new(255, 255, 161));
    }
}
