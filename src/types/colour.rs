//! Colour type, parsing, and colorimetric conversions.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use palette::{encoding, Hsv, IntoColor, Srgb};
use rand::{Rng, RngCore};
use serde::{Serialize, Serializer};

use crate::error::{RecolourError, Result};

/// An ordered list of colours. Order is significant and duplicates are allowed.
pub type ColourList = Vec<Colour>;

/// Default saturation used by [`Colour::pastelize`].
pub const PASTEL_SATURATION: f64 = 50.0;

/// Default brightness used by [`Colour::pastelize`].
pub const PASTEL_BRIGHTNESS: f64 = 100.0;

/// Default softness used by [`Colour::soften`].
pub const DEFAULT_SOFTNESS: f64 = 0.5;

/// Hue reported for greys, `-1` wrapped into `[0, 360)`.
const UNDEFINED_HUE: f64 = 359.0;

/// Channel indices ordered by ascending luminosity weight (blue, red, green).
const NUDGE_ORDER: [usize; 3] = [2, 0, 1];

/// An opaque RGB colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Comparator used by `random(<op><lum>)` specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Equal,
    Greater,
    GreaterOrEqual,
}

impl FromStr for Comparison {
    type Err = RecolourError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "<" => Ok(Self::Less),
            "<=" => Ok(Self::LessOrEqual),
            "=" => Ok(Self::Equal),
            ">" => Ok(Self::Greater),
            ">=" => Ok(Self::GreaterOrEqual),
            _ => Err(RecolourError::ColourSpec {
                spec: format!("random({})", s),
                help: Some("Comparators are <, <=, =, > and >=".to_string()),
            }),
        }
    }
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Parse a colour spec.
    ///
    /// Grammars are tried in this order and the first match wins:
    /// - `rgb(r, g, b)` (and `rgba(r, g, b, a)`, alpha dropped)
    /// - `r/g/b`
    /// - `{f, f, f}` with each float in `0..=1`
    /// - a named colour (case-insensitive)
    /// - `random`
    /// - `random(<op><lum>)` with `op` one of `<`, `<=`, `=`, `>`, `>=`
    /// - `randhue(saturation, brightness)`
    /// - `#RRGGBB`
    /// - `#RGB`
    pub fn parse(spec: &str, rng: &mut dyn RngCore) -> Result<Self> {
        let trimmed = spec.trim().trim_matches('"');
        let lowered = trimmed.to_ascii_lowercase();
        let s = lowered.as_str();

        if let Some(args) = strip_call(s, "rgb") {
            return parse_int_triplet(spec, args.split(','));
        }

        if let Some(args) = strip_call(s, "rgba") {
            let parts: Vec<&str> = args.split(',').collect();
            if parts.len() != 4 {
                return Err(RecolourError::colour_spec(spec));
            }
            return parse_int_triplet(spec, parts.into_iter().take(3));
        }

        if s.split('/').count() == 3 && s.chars().all(|c| c.is_ascii_digit() || c == '/') {
            return parse_int_triplet(spec, s.split('/'));
        }

        if let Some(inner) = s.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
            return parse_float_triplet(spec, inner);
        }

        if let Some(named) = palette::named::from_str(s) {
            return Ok(Self::new(named.red, named.green, named.blue));
        }

        if s == "random" {
            return Ok(Self::random(rng));
        }

        if let Some(bound) = strip_call(s, "random") {
            let bound = bound.trim();
            let split = bound
                .find(|c: char| !matches!(c, '<' | '>' | '='))
                .unwrap_or(bound.len());
            let (op, value) = bound.split_at(split);
            let comparison = if op.is_empty() {
                Comparison::Equal
            } else {
                op.parse()?
            };
            let luminosity: u8 = value
                .trim()
                .parse()
                .map_err(|_| RecolourError::ColourSpec {
                    spec: spec.to_string(),
                    help: Some("Luminosity must be an integer in 0..=255".to_string()),
                })?;
            return Self::random_with_luminosity(rng, luminosity, comparison);
        }

        if let Some(args) = strip_call(s, "randhue") {
            let (saturation, brightness) = args
                .split_once(',')
                .ok_or_else(|| RecolourError::colour_spec(spec))?;
            let saturation = parse_float(spec, saturation)?;
            let brightness = parse_float(spec, brightness)?;
            return Ok(Self::random_hue(rng, saturation, brightness));
        }

        if s.starts_with('#') {
            return Self::from_hex(s).map_err(|_| RecolourError::colour_spec(spec));
        }

        Err(RecolourError::ColourSpec {
            spec: spec.to_string(),
            help: Some(
                "Use rgb(r,g,b), r/g/b, {f,f,f}, a colour name, random, random(<op><lum>), \
                 randhue(s,v), #RRGGBB or #RGB"
                    .to_string(),
            ),
        })
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, each doubled)
    /// - `#RRGGBB` (6 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RecolourError::colour_spec(s));
        }

        match hex.len() {
            3 => {
                let digit = |i: usize| parse_hex_byte(&hex[i..i + 1]).map(|d| d << 4 | d);
                Ok(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => Ok(Self::new(
                parse_hex_byte(&hex[0..2])?,
                parse_hex_byte(&hex[2..4])?,
                parse_hex_byte(&hex[4..6])?,
            )),
            _ => Err(RecolourError::ColourSpec {
                spec: s.to_string(),
                help: Some("Use #RGB or #RRGGBB format".to_string()),
            }),
        }
    }

    /// Convert to an RGB array.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Unrounded luminosity, `0.30R + 0.59G + 0.11B`.
    pub fn luminance(self) -> f64 {
        0.30 * self.r as f64 + 0.59 * self.g as f64 + 0.11 * self.b as f64
    }

    /// Perceptual brightness rounded to an integer in `0..=255`.
    pub fn luminosity(self) -> u8 {
        // ties go to even, so half-way luminances do not all drift upward
        self.luminance().round_ties_even().clamp(0.0, 255.0) as u8
    }

    /// Return `(hue, saturation, value)`.
    ///
    /// Hue is in degrees `[0, 360)`, saturation and value are percentages.
    /// Achromatic colours have an undefined hue of `-1`, which normalizes to `359`.
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let rgb: Srgb<f64> = Srgb::new(
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        );
        let hsv: Hsv<encoding::Srgb, f64> = rgb.into_color();

        let hue = if hsv.saturation == 0.0 {
            UNDEFINED_HUE
        } else {
            hsv.hue.into_positive_degrees()
        };

        (hue, hsv.saturation * 100.0, hsv.value * 100.0)
    }

    /// Create a colour from `(hue, saturation, value)` as returned by [`Colour::to_hsv`].
    ///
    /// Channels are truncated, not rounded.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let hsv: Hsv<encoding::Srgb, f64> = Hsv::new(hue, saturation / 100.0, value / 100.0);
        let rgb: Srgb<f64> = hsv.into_color();

        Self::new(to_channel(rgb.red), to_channel(rgb.green), to_channel(rgb.blue))
    }

    /// Return a colour with the given luminosity.
    ///
    /// Channels are scaled by a common factor. When clamping or rounding keeps
    /// the result from reaching the target, it is lifted toward white and then
    /// nudged a channel step at a time until `luminosity()` rounds to the target.
    /// Black becomes the grey `(L, L, L)`.
    pub fn luminize(self, luminosity: f64) -> Self {
        let target = luminosity.clamp(0.0, 255.0).round_ties_even() as u8;
        let mine = self.luminosity();

        if mine == 0 {
            return Self::new(target, target, target);
        }

        let scale = (luminosity - mine as f64) / mine as f64;
        let channel = |c: u8| {
            let c = c as f64;
            (c + c * scale).clamp(0.0, 255.0).round_ties_even() as u8
        };
        let scaled = Self::new(channel(self.r), channel(self.g), channel(self.b));

        if scaled.luminosity() == target {
            scaled
        } else {
            scaled.settle_luminosity(target)
        }
    }

    fn settle_luminosity(self, target: u8) -> Self {
        let mut colour = self;
        let current = colour.luminance();

        if (target as f64) > current && current < 255.0 {
            let t = ((target as f64 - current) / (255.0 - current)).clamp(0.0, 1.0);
            let lift = |c: u8| {
                let c = c as f64;
                (c + t * (255.0 - c)).round_ties_even().clamp(0.0, 255.0) as u8
            };
            colour = Self::new(lift(colour.r), lift(colour.g), lift(colour.b));
        }

        // each step moves the luminance by at most 0.59, so it cannot skip the target
        let mut channels = colour.to_rgb();
        loop {
            let lum = Self::from(channels).luminosity();
            let step = match lum.cmp(&target) {
                std::cmp::Ordering::Equal => break,
                std::cmp::Ordering::Less => NUDGE_ORDER
                    .iter()
                    .find(|&&i| channels[i] < 255)
                    .map(|&i| (i, true)),
                std::cmp::Ordering::Greater => NUDGE_ORDER
                    .iter()
                    .find(|&&i| channels[i] > 0)
                    .map(|&i| (i, false)),
            };
            match step {
                Some((i, true)) => channels[i] += 1,
                Some((i, false)) => channels[i] -= 1,
                None => break,
            }
        }

        Self::from(channels)
    }

    /// Combine `target`'s hue with this colour's saturation and value.
    ///
    /// With `fix_bw`, pure black and white are first nudged to `(1, 1, 1)` and
    /// `(254, 254, 254)`, which have a usable hue.
    pub fn colorify(self, target: Colour, fix_bw: bool) -> Self {
        let base = match self {
            Self::WHITE if fix_bw => Self::new(254, 254, 254),
            Self::BLACK if fix_bw => Self::new(1, 1, 1),
            other => other,
        };

        let (_, saturation, value) = base.to_hsv();
        let (hue, _, _) = target.to_hsv();

        Self::from_hsv(hue, saturation, value)
    }

    /// Channel-wise inverse.
    pub fn inverse(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Keep the hue but force saturation and value.
    pub fn pastelize(self, saturation: f64, brightness: f64) -> Self {
        let (hue, _, _) = self.to_hsv();
        Self::from_hsv(hue, saturation, brightness)
    }

    /// Lower saturation and raise value by `softness` (`0..=1`).
    pub fn soften(self, softness: f64) -> Self {
        let (hue, mut saturation, mut value) = self.to_hsv();

        saturation *= 1.0 - softness;
        value = (value + softness * (100.0 - value)).min(100.0);

        Self::from_hsv(hue, saturation, value)
    }

    /// Scale saturation by `1 + amount`; negative amounts move toward grey.
    pub fn intensify(self, amount: f64) -> Self {
        if amount == 0.0 {
            return self;
        }

        let (hue, saturation, value) = self.to_hsv();
        Self::from_hsv(hue, ((1.0 + amount) * saturation).clamp(0.0, 100.0), value)
    }

    /// True if the channels differ by no more than `threshold`.
    pub fn is_grey(self, threshold: u8) -> bool {
        let diff = self
            .r
            .abs_diff(self.g)
            .max(self.g.abs_diff(self.b))
            .max(self.b.abs_diff(self.r));
        diff <= threshold
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Colour) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// The colour in `colours` nearest to this one, first wins on ties.
    pub fn closest(self, colours: &[Colour]) -> Option<Colour> {
        colours.iter().copied().reduce(|best, candidate| {
            if self.distance(candidate) < self.distance(best) {
                candidate
            } else {
                best
            }
        })
    }

    /// A uniformly random colour.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self::new(rng.gen(), rng.gen(), rng.gen())
    }

    /// A random colour whose luminosity satisfies `comparison` against `luminosity`.
    ///
    /// For anything but [`Comparison::Equal`] the target luminosity is drawn
    /// from the satisfying range first.
    pub fn random_with_luminosity(
        rng: &mut dyn RngCore,
        luminosity: u8,
        comparison: Comparison,
    ) -> Result<Self> {
        let colour = Self::random(rng);

        let target = match comparison {
            Comparison::Equal => luminosity,
            Comparison::Less if luminosity > 0 => rng.gen_range(0..luminosity),
            Comparison::LessOrEqual => rng.gen_range(0..=luminosity),
            Comparison::Greater if luminosity < 255 => rng.gen_range(luminosity + 1..=255),
            Comparison::GreaterOrEqual => rng.gen_range(luminosity..=255),
            _ => {
                return Err(RecolourError::ColourSpec {
                    spec: format!("random({:?} {})", comparison, luminosity),
                    help: Some("No luminosity in 0..=255 satisfies this bound".to_string()),
                })
            }
        };

        Ok(colour.luminize(target as f64))
    }

    /// A colour with a random hue and the given saturation and brightness.
    pub fn random_hue(rng: &mut dyn RngCore, saturation: f64, brightness: f64) -> Self {
        let hue = rng.gen_range(0.0..360.0);
        Self::from_hsv(hue, saturation, brightness)
    }
}

impl From<[u8; 3]> for Colour {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl FromStr for Colour {
    type Err = RecolourError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, &mut rand::thread_rng())
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add for Colour {
    type Output = Colour;

    fn add(self, other: Colour) -> Colour {
        Colour::new(
            self.r.saturating_add(other.r),
            self.g.saturating_add(other.g),
            self.b.saturating_add(other.b),
        )
    }
}

impl Sub for Colour {
    type Output = Colour;

    fn sub(self, other: Colour) -> Colour {
        Colour::new(
            self.r.saturating_sub(other.r),
            self.g.saturating_sub(other.g),
            self.b.saturating_sub(other.b),
        )
    }
}

impl Add<f64> for Colour {
    type Output = Colour;

    fn add(self, value: f64) -> Colour {
        let shift = |c: u8| (c as f64 + value).clamp(0.0, 255.0) as u8;
        Colour::new(shift(self.r), shift(self.g), shift(self.b))
    }
}

impl Sub<f64> for Colour {
    type Output = Colour;

    fn sub(self, value: f64) -> Colour {
        self + -value
    }
}

impl Mul<f64> for Colour {
    type Output = Colour;

    fn mul(self, factor: f64) -> Colour {
        let scale = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
        Colour::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Scale a unit float to a channel, truncating.
fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).clamp(0.0, 255.0) as u8
}

/// Strip `name(` and `)` from a call-shaped spec.
fn strip_call<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?.strip_prefix('(')?.strip_suffix(')')
}

fn parse_int_triplet<'a>(spec: &str, parts: impl Iterator<Item = &'a str>) -> Result<Colour> {
    let values = parts
        .map(|part| part.trim().parse::<u8>())
        .collect::<std::result::Result<Vec<u8>, _>>()
        .map_err(|_| RecolourError::ColourSpec {
            spec: spec.to_string(),
            help: Some("Channels must be integers in 0..=255".to_string()),
        })?;

    match values.as_slice() {
        [r, g, b] => Ok(Colour::new(*r, *g, *b)),
        _ => Err(RecolourError::colour_spec(spec)),
    }
}

fn parse_float_triplet(spec: &str, inner: &str) -> Result<Colour> {
    let values = inner
        .split(',')
        .map(|part| parse_float(spec, part))
        .collect::<Result<Vec<f64>>>()?;

    match values.as_slice() {
        [r, g, b] if values.iter().all(|v| (0.0..=1.0).contains(v)) => {
            Ok(Colour::new(to_channel(*r), to_channel(*g), to_channel(*b)))
        }
        _ => Err(RecolourError::ColourSpec {
            spec: spec.to_string(),
            help: Some("Use three floats in 0..=1, e.g. {0.5, 0.25, 1.0}".to_string()),
        }),
    }
}

fn parse_float(spec: &str, s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| RecolourError::colour_spec(spec))
}

/// Parse a one- or two-character hex string.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| RecolourError::ColourSpec {
        spec: s.to_string(),
        help: Some("Invalid hex byte".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn colours(specs: &str) -> ColourList {
        specs
            .split_whitespace()
            .map(|s| Colour::from_hex(s).unwrap())
            .collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::new(255, 0, 0));

        let c = Colour::from_hex("#1a1a2e").unwrap();
        assert_eq!(c, Colour::new(0x1a, 0x1a, 0x2e));
    }

    #[test]
    fn test_from_hex_3digit() {
        let c = Colour::from_hex("#ABC").unwrap();
        assert_eq!(c, Colour::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
    }

    #[test]
    fn test_every_grammar_matches_hex() {
        let mut rng = rng();
        let expected = Colour::from_hex("#3366cc").unwrap();

        for spec in [
            "rgb(51, 102, 204)",
            "RGB(51,102,204)",
            "rgba(51, 102, 204, 0.5)",
            "51/102/204",
            "{0.2, 0.4, 0.8}",
            "#3366cc",
            "#3366CC",
            "#36c",
            "\"#36c\"",
        ] {
            assert_eq!(Colour::parse(spec, &mut rng).unwrap(), expected, "{}", spec);
        }
    }

    #[test]
    fn test_named_colours() {
        let mut rng = rng();
        assert_eq!(
            Colour::parse("Red", &mut rng).unwrap(),
            Colour::new(255, 0, 0)
        );
        assert_eq!(
            Colour::parse("cornflowerblue", &mut rng).unwrap(),
            Colour::from_hex("#6495ed").unwrap()
        );
    }

    #[test]
    fn test_bad_specs() {
        let mut rng = rng();
        for spec in [
            "rgb(300, 0, 0)",
            "rgb(1, 2)",
            "1/2/x",
            "{1.5, 0, 0}",
            "#12345",
            "bogus",
            "random(!50)",
            "random(<0)",
            "random(>255)",
            "randhue(50)",
            "",
        ] {
            assert!(Colour::parse(spec, &mut rng).is_err(), "{}", spec);
        }
    }

    #[test]
    fn test_random_specs() {
        let mut rng = rng();

        for _ in 0..50 {
            let c = Colour::parse("random(<50)", &mut rng).unwrap();
            assert!(c.luminosity() < 50, "{}", c);

            let c = Colour::parse("random(>=200)", &mut rng).unwrap();
            assert!(c.luminosity() >= 200, "{}", c);

            let c = Colour::parse("random(120)", &mut rng).unwrap();
            assert_eq!(c.luminosity(), 120);
        }

        let c = Colour::parse("randhue(100, 100)", &mut rng).unwrap();
        assert_eq!(c.r.max(c.g).max(c.b), 255);
    }

    #[test]
    fn test_display() {
        assert_eq!(Colour::new(255, 0, 0).to_string(), "#ff0000");
        assert_eq!(Colour::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_luminosity() {
        assert_eq!(Colour::BLACK.luminosity(), 0);
        assert_eq!(Colour::WHITE.luminosity(), 255);
        assert_eq!(Colour::new(255, 0, 0).luminosity(), 77);
    }

    #[test]
    fn test_hsv_round_trip() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(51) {
                    let c = Colour::new(r, g, b);
                    let (h, s, v) = c.to_hsv();
                    let back = Colour::from_hsv(h, s, v);
                    assert!(back.r.abs_diff(c.r) <= 1, "{} -> {}", c, back);
                    assert!(back.g.abs_diff(c.g) <= 1, "{} -> {}", c, back);
                    assert!(back.b.abs_diff(c.b) <= 1, "{} -> {}", c, back);
                }
            }
        }
    }

    #[test]
    fn test_grey_hue() {
        let (h, s, v) = Colour::new(128, 128, 128).to_hsv();
        assert_eq!(h, 359.0);
        assert_eq!(s, 0.0);
        assert!((v - 50.196).abs() < 0.01);
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Colour::new(255, 0, 0).to_hsv(), (0.0, 100.0, 100.0));
        assert_eq!(Colour::new(0, 255, 0).to_hsv(), (120.0, 100.0, 100.0));
        assert_eq!(Colour::new(0, 0, 255).to_hsv(), (240.0, 100.0, 100.0));

        assert_eq!(Colour::from_hsv(300.0, 100.0, 100.0), Colour::new(255, 0, 255));
        assert_eq!(Colour::from_hsv(-60.0, 100.0, 100.0), Colour::new(255, 0, 255));
        assert_eq!(Colour::from_hsv(359.0, 0.0, 50.0), Colour::new(127, 127, 127));
    }

    #[test]
    fn test_luminize_hits_every_target() {
        let samples = [
            Colour::new(126, 17, 143),
            Colour::new(255, 0, 0),
            Colour::new(0, 0, 255),
            Colour::new(0, 255, 0),
            Colour::new(250, 250, 10),
            Colour::new(1, 1, 1),
        ];

        for colour in samples {
            for target in 0..=255u8 {
                let result = colour.luminize(target as f64);
                assert_eq!(result.luminosity(), target, "{} -> {}", colour, target);
            }
        }
    }

    #[test]
    fn test_luminize_black() {
        assert_eq!(Colour::BLACK.luminize(40.0), Colour::new(40, 40, 40));
    }

    #[test]
    fn test_luminize_scales_channels() {
        // 64 -> 51.2 is a plain 0.8 scale
        let c = Colour::new(126, 17, 143).luminize(51.2);
        assert_eq!(c, Colour::new(101, 14, 114));
    }

    #[test]
    fn test_colorify() {
        let red = Colour::new(255, 0, 0);
        let result: ColourList = colours("#00dd00 #ffde7f #0000ff #ffc0cb")
            .into_iter()
            .map(|c| c.colorify(red, false))
            .collect();

        assert_eq!(result, colours("#dd0000 #ff7f7f #ff0000 #ffc0c0"));
    }

    #[test]
    fn test_colorify_fix_bw() {
        let red = Colour::new(255, 0, 0);
        assert_eq!(Colour::WHITE.colorify(red, false), Colour::WHITE);
        assert_eq!(Colour::WHITE.colorify(red, true), Colour::new(254, 254, 254));
    }

    #[test]
    fn test_pastelize() {
        let result: ColourList =
            colours("#7e118f #754fc7 #835d75 #807930 #9772ea #9f934b #39e822 #35dfe9")
                .into_iter()
                .map(|c| c.pastelize(PASTEL_SATURATION, PASTEL_BRIGHTNESS))
                .collect();

        assert_eq!(
            result,
            colours("#ed7fff #a77fff #ff7fd0 #fff37f #a67fff #ffec7f #8eff7f #7ff7ff")
        );
    }

    #[test]
    fn test_soften() {
        let result: ColourList =
            colours("#7e118f #754fc7 #835d75 #807930 #9772ea #9f934b #39e822 #35dfe9")
                .into_iter()
                .map(|c| c.soften(DEFAULT_SOFTNESS))
                .collect();

        assert_eq!(
            result,
            colours("#bb6fc6 #b49ee3 #c1a5b6 #bfba83 #c9b5f4 #cfc798 #97f38b #95eef4")
        );
    }

    #[test]
    fn test_intensify_zero_is_identity() {
        let c = Colour::new(10, 200, 30);
        assert_eq!(c.intensify(0.0), c);
        assert!(c.intensify(-1.0).is_grey(1));
    }

    #[test]
    fn test_arithmetic_clamps() {
        let a = Colour::new(200, 10, 128);
        let b = Colour::new(100, 20, 128);

        assert_eq!(a + b, Colour::new(255, 30, 255));
        assert_eq!(a - b, Colour::new(100, 0, 0));
        assert_eq!(a * 2.0, Colour::new(255, 20, 255));
        assert_eq!(a * -1.0, Colour::BLACK);
        assert_eq!(a + 100.0, Colour::new(255, 110, 228));
        assert_eq!(a - 20.0, Colour::new(180, 0, 108));
    }

    #[test]
    fn test_inverse_and_distance() {
        let c = Colour::new(126, 17, 143);
        assert_eq!(c.inverse(), Colour::from_hex("#81ee70").unwrap());
        assert_eq!(Colour::BLACK.distance(Colour::new(3, 4, 0)), 5.0);

        let pool = [Colour::WHITE, Colour::new(120, 20, 140), Colour::BLACK];
        assert_eq!(c.closest(&pool), Some(Colour::new(120, 20, 140)));
        assert_eq!(c.closest(&[]), None);
    }
}
