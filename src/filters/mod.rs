//! Colour filters and the chain that runs them.
//!
//! A filter maps one colour list to another. Filters are registered by name
//! in a [`FilterRegistry`]; a chain is an ordered list of names where each
//! filter's output feeds the next.

mod chromefocus;
mod composite;
mod config;
mod gradient;
mod hsv;
mod order;
mod random;
mod reduce;
mod sepia;
mod timeofday;
mod tone;

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDateTime;
use rand::RngCore;

use crate::error::Result;
use crate::generate::{self, DEFAULT_CLUSTER_TIMEOUT};
use crate::types::{Colour, ColourList};

pub use config::{FilterConfig, FilterSettings};

/// A named transform over colour lists.
///
/// Filters hold no state between calls. Randomness and the clock come from
/// the [`FilterContext`].
pub trait Filter: Send + Sync {
    fn name(&self) -> &'static str;

    /// One-line summary shown by `recolour filters`.
    fn description(&self) -> &'static str;

    fn apply(
        &self,
        colours: &[Colour],
        config: &FilterConfig<'_>,
        cx: &mut FilterContext<'_>,
    ) -> Result<ColourList>;
}

/// Filters available by name.
pub struct FilterRegistry {
    filters: BTreeMap<&'static str, Box<dyn Filter>>,
}

impl FilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            filters: BTreeMap::new(),
        }
    }

    /// A registry holding every builtin filter.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(Box::new(tone::Identity));
        registry.register(Box::new(tone::Inverse));
        registry.register(Box::new(tone::Luminosity));
        registry.register(Box::new(tone::Brighten));
        registry.register(Box::new(tone::Contrast));
        registry.register(Box::new(tone::Luminize));
        registry.register(Box::new(tone::RandBright));
        registry.register(Box::new(tone::Vga));

        registry.register(Box::new(gradient::Gradient));
        registry.register(Box::new(gradient::ZipGradient));
        registry.register(Box::new(gradient::SubGradient));

        registry.register(Box::new(hsv::Grayscale));
        registry.register(Box::new(hsv::Neonize));
        registry.register(Box::new(hsv::Pastelize));
        registry.register(Box::new(hsv::Soften));
        registry.register(Box::new(hsv::Intensify));
        registry.register(Box::new(hsv::Vibrance));
        registry.register(Box::new(hsv::HueShift));
        registry.register(Box::new(hsv::Sine));
        registry.register(Box::new(hsv::Shuffle));
        registry.register(Box::new(hsv::Colorify));

        registry.register(Box::new(order::ColorBalance));
        registry.register(Box::new(order::Kaleidoscope));
        registry.register(Box::new(order::Shift));
        registry.register(Box::new(order::Subtract));

        registry.register(Box::new(composite::Dissolve));
        registry.register(Box::new(composite::Darken));
        registry.register(Box::new(composite::Lighten));
        registry.register(Box::new(composite::Swap));

        registry.register(Box::new(chromefocus::ChromeFocus));
        registry.register(Box::new(sepia::Sepia));
        registry.register(Box::new(reduce::Reduce));
        registry.register(Box::new(timeofday::TimeOfDay));
        registry.register(Box::new(random::Random));

        registry
    }

    /// Add a filter, replacing any with the same name.
    pub fn register(&mut self, filter: Box<dyn Filter>) {
        self.filters.insert(filter.name(), filter);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        self.filters.get(name).map(|filter| filter.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Filter names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Filter> {
        self.filters.values().map(|filter| filter.as_ref())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Everything a filter may consult besides its input and settings.
pub struct FilterContext<'a> {
    registry: &'a FilterRegistry,
    settings: &'a FilterSettings,
    rng: &'a mut dyn RngCore,
    now: NaiveDateTime,
    cluster_timeout: Duration,
}

impl<'a> FilterContext<'a> {
    /// A context using the local clock and the default clustering deadline.
    pub fn new(
        registry: &'a FilterRegistry,
        settings: &'a FilterSettings,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            registry,
            settings,
            rng,
            now: chrono::Local::now().naive_local(),
            cluster_timeout: DEFAULT_CLUSTER_TIMEOUT,
        }
    }

    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn with_cluster_timeout(mut self, timeout: Duration) -> Self {
        self.cluster_timeout = timeout;
        self
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn registry(&self) -> &'a FilterRegistry {
        self.registry
    }

    /// Dominant colours, bounded by this context's clustering deadline.
    pub fn dominant(&mut self, colours: &[Colour], k: usize) -> ColourList {
        generate::dominant(colours, k, self.cluster_timeout, &mut *self.rng)
    }

    /// Run one filter by name. Returns `None` if no such filter is registered.
    pub fn run_filter(&mut self, name: &str, colours: &[Colour]) -> Result<Option<ColourList>> {
        let registry = self.registry;
        let settings = self.settings;

        let Some(filter) = registry.get(name) else {
            return Ok(None);
        };

        tracing::debug!(filter = %name, colours = colours.len(), "running filter");
        let config = FilterConfig::new(name, settings);
        filter.apply(colours, &config, self).map(Some)
    }

    /// Run `names` in order, feeding each output into the next filter.
    ///
    /// Unknown names are logged and skipped. The first filter error aborts
    /// the whole chain.
    pub fn run_chain<S: AsRef<str>>(
        &mut self,
        names: &[S],
        colours: &[Colour],
    ) -> Result<ColourList> {
        let mut current = colours.to_vec();

        for name in names {
            let name = name.as_ref();
            match self.run_filter(name, &current)? {
                Some(next) => current = next,
                None => tracing::warn!(filter = %name, "filter not found, skipping"),
            }
        }

        Ok(current)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::error::RecolourError;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_builtin_names() {
        let registry = FilterRegistry::builtin();
        let names: Vec<_> = registry.names().collect();

        assert_eq!(registry.len(), 34);
        for name in [
            "none", "inverse", "gradient", "zipgradient", "subgradient", "luminosity",
            "brighten", "contrast", "luminize", "randbright", "vga", "grayscale", "neonize",
            "pastelize", "soften", "intensify", "vibrance", "hueshift", "sine", "shuffle",
            "colorbalance", "colorify", "kaleidoscope", "shift", "subtract", "swap", "random",
            "dissolve", "darken", "lighten", "chromefocus", "sepia", "reduce", "timeofday",
        ] {
            assert!(names.contains(&name), "missing {}", name);
        }
        assert!(registry.iter().all(|f| !f.description().is_empty()));
        assert!(registry.contains("sepia"));
        assert!(!registry.contains("bogus"));
    }

    #[test]
    fn test_chain_skips_unknown_names() {
        let registry = FilterRegistry::builtin();
        let settings = FilterSettings::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut cx = FilterContext::new(&registry, &settings, &mut rng);

        let input = colours(SAMPLE);
        let output = cx
            .run_chain(&["inverse", "no-such-filter", "inverse"], &input)
            .unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_chain_feeds_outputs_forward() {
        let registry = FilterRegistry::builtin();
        let settings = FilterSettings::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut cx = FilterContext::new(&registry, &settings, &mut rng);

        let input = colours(SAMPLE);
        let output = cx.run_chain(&["inverse", "grayscale"], &input).unwrap();
        let expected = run("grayscale", &run("inverse", &input, "").unwrap(), "").unwrap();
        assert_eq!(output, expected);
    }

    #[test]
    fn test_chain_aborts_on_filter_error() {
        let registry = FilterRegistry::builtin();
        let settings = settings("dissolve: { opacity: 2 }");
        let mut rng = StdRng::seed_from_u64(1);
        let mut cx = FilterContext::new(&registry, &settings, &mut rng);

        let err = cx
            .run_chain(&["inverse", "dissolve", "inverse"], &colours(SAMPLE))
            .unwrap_err();
        assert!(matches!(err, RecolourError::FilterConfig { ref filter, .. } if filter == "dissolve"));
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let registry = FilterRegistry::new();
        let settings = FilterSettings::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut cx = FilterContext::new(&registry, &settings, &mut rng);

        let input = colours(SAMPLE);
        assert_eq!(cx.run_chain::<&str>(&[], &input).unwrap(), input);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_every_filter_handles_empty_input() {
        let registry = FilterRegistry::builtin();
        for name in registry.names() {
            let output = run(name, &[], "").unwrap();
            assert!(output.is_empty(), "{} produced {:?}", name, output);
        }
    }

    #[test]
    fn test_every_filter_preserves_length() {
        let registry = FilterRegistry::builtin();
        let input = colours(SAMPLE);
        for name in registry.names() {
            let output = run(name, &input, "").unwrap();
            assert_eq!(output.len(), input.len(), "{}", name);
        }
    }
}
