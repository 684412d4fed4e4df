//! Run configuration (recolour.yaml).
//!
//! Holds the image paths, the filter chain and each filter's settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{RecolourError, Result};
use crate::filters::FilterSettings;
use crate::types::{Colour, ColourList};

/// Looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "recolour.yaml";

/// Configuration for one recolouring run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Image to read.
    pub input: Option<PathBuf>,

    /// Where to write the recoloured image. Defaults to overwriting `input`.
    pub output: Option<PathBuf>,

    /// Filter chain, run in order. A single name is accepted as well as a list.
    #[serde(with = "one_or_many")]
    pub filters: Vec<String>,

    /// Literal palette that replaces the chain's output.
    pub colours: Vec<String>,

    /// Seed for reproducible runs.
    pub seed: Option<u64>,

    /// Deadline for dominant-colour clustering, in milliseconds.
    pub cluster_timeout_ms: u64,

    /// Per-filter settings, keyed by filter name.
    pub filter: FilterSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            filters: vec!["gradient".to_string()],
            colours: vec![],
            seed: None,
            cluster_timeout_ms: 5000,
            filter: FilterSettings::new(),
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RecolourError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string. An empty document gives the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| RecolourError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", DEFAULT_CONFIG_FILE)),
        })
    }

    /// The override palette, if one is configured.
    ///
    /// Entries may use any colour spec, including the random forms.
    pub fn override_colours(&self, rng: &mut dyn RngCore) -> Result<Option<ColourList>> {
        if self.colours.is_empty() {
            return Ok(None);
        }

        self.colours
            .iter()
            .map(|spec| Colour::parse(spec, rng))
            .collect::<Result<ColourList>>()
            .map(Some)
    }

    pub fn cluster_timeout(&self) -> Duration {
        Duration::from_millis(self.cluster_timeout_ms)
    }

    /// Where output goes: `output`, else `input`.
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref().or(self.input.as_deref())
    }
}

/// Accept either `filters: gradient` or `filters: [gradient, soften]`.
mod one_or_many {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub fn serialize<S: Serializer>(names: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        names.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(names) => names.split_whitespace().map(String::from).collect(),
            OneOrMany::Many(names) => names,
        })
    }
}
