//! Text images: colours are tokens inside a UTF-8 payload (SVG, CSS, ...).

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{RecolourError, Result};
use crate::types::Colour;

/// Matches hex, `rgb()` and `rgba()` colour tokens, case-insensitively.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)#[0-9a-f]{6}|#[0-9a-f]{3}|rgb\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*\)|rgba\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*,\s*[^\s)]+\s*\)",
        )
        .expect("colour token pattern is valid")
    })
}

/// A UTF-8 document whose colours are located by the token pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextImage {
    text: String,
}

impl TextImage {
    /// Accept any valid UTF-8 payload.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data).map_err(|e| RecolourError::ImageDecode {
            message: format!("not UTF-8 text: {}", e),
        })?;

        Ok(Self::from(text))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Distinct colours of every token that parses.
    pub fn colours(&self) -> BTreeSet<Colour> {
        token_pattern()
            .find_iter(&self.text)
            .filter_map(|m| parse_token(m.as_str()))
            .collect()
    }

    /// Rewrite every token whose colour is a key of `map`.
    ///
    /// Tokens mapped to their own colour are left byte-for-byte untouched.
    /// `rgb()` and `rgba()` tokens keep their functional form and `rgba()`
    /// keeps its alpha text. Hex tokens become lowercase `#rrggbb`.
    pub fn replace(&self, map: &HashMap<Colour, Colour>) -> Self {
        let text = token_pattern().replace_all(&self.text, |caps: &Captures<'_>| {
            let token = &caps[0];
            let Some((old, new)) = parse_token(token).and_then(|c| map.get(&c).map(|n| (c, *n)))
            else {
                return token.to_string();
            };
            if old == new {
                return token.to_string();
            }

            let lowered = token.to_ascii_lowercase();
            if lowered.starts_with("rgba(") {
                let alpha = token[5..token.len() - 1]
                    .rsplit(',')
                    .next()
                    .unwrap_or_default()
                    .trim();
                format!("rgba({}, {}, {}, {})", new.r, new.g, new.b, alpha)
            } else if lowered.starts_with("rgb(") {
                format!("rgb({}, {}, {})", new.r, new.g, new.b)
            } else {
                new.to_string()
            }
        });

        Self {
            text: text.into_owned(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.text.as_bytes().to_vec()
    }
}

impl From<&str> for TextImage {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

fn parse_token(token: &str) -> Option<Colour> {
    match token.parse::<Colour>() {
        Ok(colour) => Some(colour),
        Err(e) => {
            tracing::warn!(token, error = %e, "skipping unparsable colour token");
            None
        }
    }
}
