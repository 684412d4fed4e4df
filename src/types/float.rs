//! Normalized float colours and alpha compositing.

use super::Colour;

/// Alpha below which a composite is treated as fully transparent.
const ALPHA_EPSILON: f64 = 1e-6;

/// A colour with unit-range float channels and an alpha component.
///
/// Only used transiently while compositing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourFloat {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ColourFloat {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Create a float colour, clamping every component to `0..=1`.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn from_colour(colour: Colour, opacity: f64) -> Self {
        Self::new(
            colour.r as f64 / 255.0,
            colour.g as f64 / 255.0,
            colour.b as f64 / 255.0,
            opacity,
        )
    }

    /// Drop alpha and scale back to 8-bit channels, truncating.
    pub fn to_colour(self) -> Colour {
        let channel = |v: f64| (v * 255.0).clamp(0.0, 255.0) as u8;
        Colour::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Composite `self` over `background` with the "over" operator.
    pub fn combine(self, background: ColourFloat) -> ColourFloat {
        let alpha = 1.0 - (1.0 - self.a) * (1.0 - background.a);
        if alpha < ALPHA_EPSILON {
            return Self::TRANSPARENT;
        }

        let channel = |fg: f64, bg: f64| {
            fg * self.a / alpha + bg * background.a * (1.0 - self.a) / alpha
        };

        Self::new(
            channel(self.r, background.r),
            channel(self.g, background.g),
            channel(self.b, background.b),
            alpha,
        )
    }
}

/// Composite `foreground` at `opacity` over an opaque `background`.
pub fn combine_colours(foreground: Colour, background: Colour, opacity: f64) -> Colour {
    ColourFloat::from_colour(foreground, opacity)
        .combine(ColourFloat::from_colour(background, 1.0))
        .to_colour()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_combine_partial_alphas() {
        let fg = ColourFloat::new(0.0, 0.0, 1.0, 0.6);
        let bg = ColourFloat::new(1.0, 0.0, 0.0, 0.4);
        let out = fg.combine(bg);

        assert!(approx(out.r, 0.2105263), "{:?}", out);
        assert!(approx(out.g, 0.0));
        assert!(approx(out.b, 0.7894737), "{:?}", out);
        assert!(approx(out.a, 0.76));
    }

    #[test]
    fn test_transparent_foreground_yields_background() {
        let fg = ColourFloat::new(0.3, 0.9, 0.1, 0.0);
        let bg = ColourFloat::new(0.25, 0.5, 0.75, 0.8);
        let out = fg.combine(bg);

        assert!(approx(out.r, bg.r));
        assert!(approx(out.g, bg.g));
        assert!(approx(out.b, bg.b));
        assert!(approx(out.a, bg.a));
    }

    #[test]
    fn test_both_transparent() {
        let fg = ColourFloat::new(1.0, 1.0, 1.0, 0.0);
        let bg = ColourFloat::new(1.0, 0.0, 1.0, 0.0);
        assert_eq!(fg.combine(bg), ColourFloat::TRANSPARENT);
    }

    #[test]
    fn test_new_clamps() {
        let c = ColourFloat::new(-1.0, 2.0, 0.5, 7.0);
        assert_eq!(c, ColourFloat::new(0.0, 1.0, 0.5, 1.0));
    }

    #[test]
    fn test_combine_colours() {
        let blue = Colour::new(0, 0, 255);
        let red = Colour::new(255, 0, 0);

        assert_eq!(combine_colours(blue, red, 0.6), Colour::new(0x66, 0x00, 0x99));
        assert_eq!(combine_colours(blue, red, 0.4), Colour::new(0x99, 0x00, 0x66));
        assert_eq!(combine_colours(blue, red, 1.0), blue);
        assert_eq!(combine_colours(blue, red, 0.0), red);
    }
}
