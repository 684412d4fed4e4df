//! recolour - palette filters for images
//!
//! A library for pulling the colours out of an image (SVG and other text, or
//! raster formats), running them through a chain of colour filters and
//! writing the new colours back.

pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod generate;
pub mod image;
pub mod output;
pub mod pipeline;
pub mod types;

pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use error::{RecolourError, Result};
pub use filters::{Filter, FilterConfig, FilterContext, FilterRegistry, FilterSettings};
pub use generate::{dominant, generate_from, gradient, sort_by_luminosity};
pub use image::{Image, PixelImage, TextImage};
pub use pipeline::{recolour, Recoloured};
pub use types::{combine_colours, Colour, ColourFloat, ColourList, Comparison};
