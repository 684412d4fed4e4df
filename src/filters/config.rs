//! Per-filter settings.
//!
//! Settings are a two-level table: filter name, then key. Values are kept as
//! raw YAML so each filter reads them with its own types and defaults.

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::error::{RecolourError, Result};

/// Settings for every filter, keyed by filter name.
pub type FilterSettings = BTreeMap<String, BTreeMap<String, Value>>;

/// One filter's view of [`FilterSettings`].
///
/// Missing keys fall back to the caller's default. Strings are accepted for
/// numbers and booleans (`"0.7"`, `"yes"`).
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig<'a> {
    filter: &'a str,
    values: Option<&'a BTreeMap<String, Value>>,
}

impl<'a> FilterConfig<'a> {
    pub fn new(filter: &'a str, settings: &'a FilterSettings) -> Self {
        Self {
            filter,
            values: settings.get(filter),
        }
    }

    /// The raw value, for settings with a shape the typed getters don't cover.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.get(key)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.values
            .and_then(|values| values.get(key))
            .filter(|value| !value.is_null())
    }

    /// An error naming this filter.
    pub fn error(&self, message: impl Into<String>) -> RecolourError {
        RecolourError::filter_config(self.filter, message)
    }

    fn mismatch(&self, key: &str, expected: &str, value: &Value) -> RecolourError {
        self.error(format!("'{}' must be {}, got {}", key, expected, describe(value)))
    }

    pub fn f64(&self, key: &str, default: f64) -> Result<f64> {
        match self.get(key) {
            None => Ok(default),
            Some(value @ Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| self.mismatch(key, "a number", value)),
            Some(value @ Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| self.mismatch(key, "a number", value)),
            Some(value) => Err(self.mismatch(key, "a number", value)),
        }
    }

    pub fn i64(&self, key: &str, default: i64) -> Result<i64> {
        match self.get(key) {
            None => Ok(default),
            Some(value @ Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| self.mismatch(key, "an integer", value)),
            Some(value @ Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| self.mismatch(key, "an integer", value)),
            Some(value) => Err(self.mismatch(key, "an integer", value)),
        }
    }

    /// A non-negative integer, for counts and sizes.
    pub fn usize(&self, key: &str, default: usize) -> Result<usize> {
        let value = self.i64(key, default as i64)?;
        usize::try_from(value).map_err(|_| {
            self.error(format!("'{}' must not be negative, got {}", key, value))
        })
    }

    pub fn bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(value @ Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "yes" | "true" | "on" => Ok(true),
                "0" | "no" | "false" | "off" => Ok(false),
                _ => Err(self.mismatch(key, "a boolean", value)),
            },
            Some(value) => Err(self.mismatch(key, "a boolean", value)),
        }
    }

    /// A string value; numbers and booleans are rendered as text.
    pub fn str(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(value) => Err(self.mismatch(key, "a string", value)),
        }
    }

    /// A list of words, from a YAML sequence or a whitespace-separated string.
    pub fn list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.split_whitespace().map(String::from).collect())),
            Some(value @ Value::Sequence(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    _ => Err(self.mismatch(key, "a list of strings", value)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(value) => Err(self.mismatch(key, "a list of strings", value)),
        }
    }

    /// A `(low, high)` pair from `"low - high"` or `[low, high]`.
    pub fn range(&self, key: &str) -> Result<Option<(f64, f64)>> {
        let bad = |value: &Value| self.mismatch(key, "a range like \"0.8 - 1.0\"", value);

        match self.get(key) {
            None => Ok(None),
            Some(value @ Value::String(s)) => {
                // the separator is the first '-' after the low bound's sign
                let text = s.trim();
                let split = text
                    .char_indices()
                    .skip(1)
                    .find(|&(_, c)| c == '-')
                    .map(|(i, _)| i)
                    .ok_or_else(|| bad(value))?;
                let low = text[..split].trim().parse().map_err(|_| bad(value))?;
                let high = text[split + 1..].trim().parse().map_err(|_| bad(value))?;
                Ok(Some((low, high)))
            }
            Some(value @ Value::Sequence(items)) => match items.as_slice() {
                [Value::Number(low), Value::Number(high)] => {
                    match (low.as_f64(), high.as_f64()) {
                        (Some(low), Some(high)) => Ok(Some((low, high))),
                        _ => Err(bad(value)),
                    }
                }
                _ => Err(bad(value)),
            },
            Some(value) => Err(bad(value)),
        }
    }

    /// `opacity` in `0..=1`, default 1.
    pub fn opacity(&self) -> Result<f64> {
        let opacity = self.f64("opacity", 1.0)?;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(self.error(format!(
                "'opacity' must be in range [0..1]. Actual {}",
                opacity
            )));
        }
        Ok(opacity)
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "nothing".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::Sequence(_) => "a list".to_string(),
        Value::Mapping(_) => "a table".to_string(),
        Value::Tagged(_) => "a tagged value".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(yaml: &str) -> FilterSettings {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults_when_missing() {
        let settings = settings("other: { amount: 3 }");
        let config = FilterConfig::new("dissolve", &settings);

        assert_eq!(config.f64("amount", 50.0).unwrap(), 50.0);
        assert_eq!(config.i64("amount", 50).unwrap(), 50);
        assert!(config.bool("shuffle", true).unwrap());
        assert_eq!(config.str("image").unwrap(), None);
        assert_eq!(config.opacity().unwrap(), 1.0);
    }

    #[test]
    fn test_typed_values() {
        let settings = settings(
            "dissolve: { amount: 70, opacity: 0.7, shuffle: yes, image: aux.png, include: [a, b] }",
        );
        let config = FilterConfig::new("dissolve", &settings);

        assert_eq!(config.i64("amount", 0).unwrap(), 70);
        assert_eq!(config.f64("amount", 0.0).unwrap(), 70.0);
        assert_eq!(config.opacity().unwrap(), 0.7);
        assert!(config.bool("shuffle", false).unwrap());
        assert_eq!(config.str("image").unwrap().as_deref(), Some("aux.png"));
        assert_eq!(
            config.list("include").unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_strings_accepted_for_numbers() {
        let settings = settings("f: { a: '0.25', b: ' 12 ', c: 'off', d: 'x y  z' }");
        let config = FilterConfig::new("f", &settings);

        assert_eq!(config.f64("a", 0.0).unwrap(), 0.25);
        assert_eq!(config.i64("b", 0).unwrap(), 12);
        assert!(!config.bool("c", true).unwrap());
        assert_eq!(config.list("d").unwrap().unwrap().len(), 3);
    }

    #[test]
    fn test_type_mismatch_is_filter_error() {
        let settings = settings("f: { a: [1, 2], b: 1.5, c: maybe, n: -1 }");
        let config = FilterConfig::new("f", &settings);

        assert!(matches!(
            config.f64("a", 0.0),
            Err(RecolourError::FilterConfig { .. })
        ));
        assert!(config.i64("b", 0).is_err());
        assert!(config.bool("c", false).is_err());
        assert!(config.usize("n", 0).is_err());
    }

    #[test]
    fn test_opacity_range() {
        let settings = settings("f: { opacity: 1.5 }");
        let err = FilterConfig::new("f", &settings).opacity().unwrap_err();
        assert!(err.to_string().contains("opacity"));
    }

    #[test]
    fn test_range_forms() {
        let settings = settings("f: { a: '0.8 - 1.0', b: [0.5, 0.25], c: 'nope' }");
        let config = FilterConfig::new("f", &settings);

        assert_eq!(config.range("a").unwrap(), Some((0.8, 1.0)));
        assert_eq!(config.range("b").unwrap(), Some((0.5, 0.25)));
        assert!(config.range("c").is_err());
        assert_eq!(config.range("d").unwrap(), None);
    }

    #[test]
    fn test_range_negative_bounds() {
        let settings = settings("f: { a: '-0.5 - 1.0', b: '0.2--0.4', c: ' -2-3 ', d: '-' }");
        let config = FilterConfig::new("f", &settings);

        assert_eq!(config.range("a").unwrap(), Some((-0.5, 1.0)));
        assert_eq!(config.range("b").unwrap(), Some((0.2, -0.4)));
        assert_eq!(config.range("c").unwrap(), Some((-2.0, 3.0)));
        assert!(config.range("d").is_err());
    }
}
