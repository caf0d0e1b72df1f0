//! PNG encoding for decoded [`PixelMatrix`] textures.
//!
//! Encoding itself is delegated to the `image` crate; this module only
//! flattens the row-major [`PixelMatrix`] into the buffer shape it expects.

use std::io::Write;

use image::{DynamicImage, ImageBuffer, Rgb, Rgba};

use super::pvr::{ColorSpace, PixelMatrix};
use crate::error::{Error, Result};

/// Encode `matrix` as a PNG and write it to `sink`.
///
/// # Errors
/// Propagates any [`image::ImageError`] the encoder raises.
pub fn write_png<W: Write>(matrix: &PixelMatrix, sink: W) -> Result<()> {
    let flat: Vec<u8> = matrix.rows.iter().flatten().copied().collect();
    let width = u32::from(matrix.width);
    let height = u32::from(matrix.height);

    let image = match matrix.color_space {
        ColorSpace::Rgb => {
            let buf: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, flat)
                .ok_or_else(|| Error::InvalidDimensions { width: matrix.width, height: matrix.height })?;
            DynamicImage::ImageRgb8(buf)
        }
        ColorSpace::Rgba => {
            let buf: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, flat)
                .ok_or_else(|| Error::InvalidDimensions { width: matrix.width, height: matrix.height })?;
            DynamicImage::ImageRgba8(buf)
        }
    };

    let encoder = image::codecs::png::PngEncoder::new(sink);
    image.write_with_encoder(encoder)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_without_error() {
        let matrix = PixelMatrix {
            width: 2,
            height: 1,
            color_space: ColorSpace::Rgb,
            rows: vec![vec![1, 2, 3, 4, 5, 6]],
        };
        let mut out = Vec::new();
        write_png(&matrix, &mut out).unwrap();
        assert!(!out.is_empty());
        assert_eq!(&out[1..4], b"PNG");
    }
}
