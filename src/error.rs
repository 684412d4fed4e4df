use miette::Diagnostic;
use thiserror::Error;

/// Main error type for recolour operations
#[derive(Error, Diagnostic, Debug)]
pub enum RecolourError {
    #[error("IO error: {0}")]
    #[diagnostic(code(recolour::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(recolour::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid colour spec: {spec}")]
    #[diagnostic(code(recolour::colour))]
    ColourSpec {
        spec: String,
        #[help]
        help: Option<String>,
    },

    #[error("Filter '{filter}' is misconfigured: {message}")]
    #[diagnostic(code(recolour::filter))]
    FilterConfig { filter: String, message: String },

    #[error("Unrecognized image: {message}")]
    #[diagnostic(
        code(recolour::image::decode),
        help("Inputs must be UTF-8 text (SVG, CSS, ...) or a raster format the image decoder supports")
    )]
    ImageDecode { message: String },

    #[error("Failed to encode image: {message}")]
    #[diagnostic(code(recolour::image::encode))]
    ImageEncode { message: String },

    #[error("No input image")]
    #[diagnostic(
        code(recolour::input),
        help("Pass --input or set `input` in recolour.yaml")
    )]
    NoInput,

    #[error("Parse error: {message}")]
    #[diagnostic(code(recolour::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl RecolourError {
    /// Shorthand for a colour-spec error without help text.
    pub(crate) fn colour_spec(spec: impl Into<String>) -> Self {
        Self::ColourSpec {
            spec: spec.into(),
            help: None,
        }
    }

    /// Shorthand for a filter configuration error.
    pub(crate) fn filter_config(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FilterConfig {
            filter: filter.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecolourError>;
