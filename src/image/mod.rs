//! Images whose colours can be listed and replaced.
//!
//! Two variants share one contract:
//! - `TextImage` - colour tokens inside UTF-8 text
//! - `PixelImage` - an RGBA grid decoded from a raster format

mod pixel;
mod text;

use std::collections::{BTreeSet, HashMap};

use crate::error::{RecolourError, Result};
use crate::types::Colour;

pub use pixel::PixelImage;
pub use text::TextImage;

type Decoder = fn(&[u8]) -> Result<Image>;

/// Variant constructors, tried in order.
const DECODERS: [(&str, Decoder); 2] = [("text", decode_text), ("pixel", decode_pixel)];

fn decode_text(data: &[u8]) -> Result<Image> {
    TextImage::from_bytes(data).map(Image::Text)
}

fn decode_pixel(data: &[u8]) -> Result<Image> {
    PixelImage::from_bytes(data).map(Image::Pixel)
}

#[derive(Debug, Clone)]
pub enum Image {
    Text(TextImage),
    Pixel(PixelImage),
}

impl Image {
    /// Decode `data` with the first variant that accepts it.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut rejections = Vec::new();

        for (kind, decode) in DECODERS {
            match decode(data) {
                Ok(image) => {
                    tracing::debug!(kind, "decoded image");
                    return Ok(image);
                }
                Err(e) => rejections.push(format!("{}: {}", kind, e)),
            }
        }

        Err(RecolourError::ImageDecode {
            message: rejections.join("; "),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Pixel(_) => "pixel",
        }
    }

    /// The distinct colours present in the image.
    pub fn colours(&self) -> BTreeSet<Colour> {
        match self {
            Self::Text(image) => image.colours(),
            Self::Pixel(image) => image.colours(),
        }
    }

    /// Substitute `replacements[i]` for every occurrence of `originals[i]`.
    ///
    /// Colours without a counterpart are left alone.
    pub fn replace(&self, originals: &[Colour], replacements: &[Colour]) -> Self {
        let map = colour_map(originals, replacements);

        match self {
            Self::Text(image) => Self::Text(image.replace(&map)),
            Self::Pixel(image) => Self::Pixel(image.replace(&map)),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::Text(image) => Ok(image.to_bytes()),
            Self::Pixel(image) => image.to_bytes(),
        }
    }
}

/// Pair up originals and replacements; extras on either side are ignored.
fn colour_map(originals: &[Colour], replacements: &[Colour]) -> HashMap<Colour, Colour> {
    originals
        .iter()
        .copied()
        .zip(replacements.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_dispatch_text_first() {
        let image = Image::from_bytes(b"body { color: #123456 }").unwrap();
        assert_eq!(image.kind(), "text");
        assert!(image.colours().contains(&Colour::new(0x12, 0x34, 0x56)));
    }

    #[test]
    fn test_dispatch_pixel() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([1, 2, 3])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let image = Image::from_bytes(&bytes).unwrap();
        assert_eq!(image.kind(), "pixel");
        assert_eq!(image.colours().into_iter().collect::<Vec<_>>(), vec![Colour::new(1, 2, 3)]);
    }

    #[test]
    fn test_unrecognized_bytes() {
        let err = Image::from_bytes(&[0xff, 0xfe, 0x00, 0x81]).unwrap_err();
        assert!(matches!(err, RecolourError::ImageDecode { .. }));
    }

    #[test]
    fn test_replace_is_one_to_one() {
        let image = Image::from_bytes(b"#111111 #222222 #333333").unwrap();
        let replaced = image.replace(
            &[Colour::new(0x11, 0x11, 0x11), Colour::new(0x22, 0x22, 0x22)],
            &[Colour::new(0xaa, 0xaa, 0xaa)],
        );

        assert_eq!(replaced.to_bytes().unwrap(), b"#aaaaaa #222222 #333333");
    }
}
