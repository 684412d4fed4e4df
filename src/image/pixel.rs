//! Raster images decoded to an RGBA grid.

use std::collections::{BTreeSet, HashMap};
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{RecolourError, Result};
use crate::types::Colour;

/// A decoded raster image that remembers how to encode itself again.
#[derive(Debug, Clone)]
pub struct PixelImage {
    pixels: RgbaImage,
    format: ImageFormat,
    has_alpha: bool,
}

impl PixelImage {
    /// Decode any raster format the image decoder recognizes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let format = image::guess_format(data).map_err(|e| RecolourError::ImageDecode {
            message: e.to_string(),
        })?;
        let decoded = image::load_from_memory_with_format(data, format).map_err(|e| {
            RecolourError::ImageDecode {
                message: format!("{:?}: {}", format, e),
            }
        })?;

        Ok(Self {
            has_alpha: decoded.color().has_alpha(),
            pixels: decoded.to_rgba8(),
            format,
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Distinct RGB values; alpha is ignored.
    pub fn colours(&self) -> BTreeSet<Colour> {
        self.pixels
            .pixels()
            .map(|p| Colour::new(p[0], p[1], p[2]))
            .collect()
    }

    /// Map every pixel's RGB through `map`, keeping its alpha.
    pub fn replace(&self, map: &HashMap<Colour, Colour>) -> Self {
        let mut pixels = self.pixels.clone();

        for pixel in pixels.pixels_mut() {
            if let Some(new) = map.get(&Colour::new(pixel[0], pixel[1], pixel[2])) {
                pixel.0 = [new.r, new.g, new.b, pixel[3]];
            }
        }

        Self {
            pixels,
            format: self.format,
            has_alpha: self.has_alpha,
        }
    }

    /// Encode in the original format.
    ///
    /// Falls back to dropping alpha when the format cannot carry it.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.has_alpha {
            let rgba = DynamicImage::ImageRgba8(self.pixels.clone());
            match encode(&rgba, self.format) {
                Ok(bytes) => return Ok(bytes),
                Err(e) => {
                    tracing::debug!(format = ?self.format, error = %e, "re-encoding without alpha")
                }
            }
        }

        let rgb = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(self.pixels.clone()).to_rgb8());
        encode(&rgb, self.format)
    }
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|e| RecolourError::ImageEncode {
            message: format!("{:?}: {}", format, e),
        })?;
    Ok(bytes)
}
