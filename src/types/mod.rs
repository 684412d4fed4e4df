//! Core colour types.
//!
//! - `Colour` - immutable RGB values with HSV and luminosity helpers
//! - `ColourFloat` - unit-range RGBA used for alpha compositing

mod colour;
mod float;

pub use colour::{
    Colour, ColourList, Comparison, DEFAULT_SOFTNESS, PASTEL_BRIGHTNESS, PASTEL_SATURATION,
};
pub use float::{combine_colours, ColourFloat};
