//! Filters command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::filters::FilterRegistry;

/// List the available filters
#[derive(Args, Debug)]
pub struct FiltersArgs {
    /// Config file whose chain marks filters as enabled
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

pub fn run(args: FiltersArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let registry = FilterRegistry::builtin();

    for line in listing(&registry, &config.filters) {
        println!("{}", line);
    }

    Ok(())
}

/// One `[X] name  description` line per filter; `X` marks filters in `chain`.
fn listing(registry: &FilterRegistry, chain: &[String]) -> Vec<String> {
    let width = registry.names().map(str::len).max().unwrap_or(0);

    registry
        .iter()
        .map(|filter| {
            let mark = if chain.iter().any(|name| name == filter.name()) {
                'X'
            } else {
                ' '
            };
            format!(
                "[{}] {:width$}  {}",
                mark,
                filter.name(),
                filter.description(),
                width = width
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_marks_enabled_filters() {
        let registry = FilterRegistry::builtin();
        let lines = listing(&registry, &["inverse".to_string(), "sepia".to_string()]);

        assert_eq!(lines.len(), registry.len());
        assert!(lines.iter().any(|l| l.starts_with("[X] inverse ")));
        assert!(lines.iter().any(|l| l.starts_with("[X] sepia ")));
        assert!(lines.iter().any(|l| l.starts_with("[ ] none ")));
        assert_eq!(lines.iter().filter(|l| l.starts_with("[X]")).count(), 2);
    }
}
