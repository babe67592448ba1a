use std::io::Cursor;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;

use crate::assets::decode::to_rgba_image;
use crate::foundation::core::Bitmap;
use crate::foundation::error::{FilmError, FilmResult};

/// Lowest JPEG quality used for print artifacts.
pub const MIN_JPEG_QUALITY: u8 = 92;
/// Highest JPEG quality used for print artifacts.
pub const MAX_JPEG_QUALITY: u8 = 95;
/// Default JPEG quality for print artifacts.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Encode a bitmap as a baseline JPEG. Alpha is dropped; quality is clamped to 92–95.
pub fn encode_jpeg(bitmap: &Bitmap, quality: u8) -> FilmResult<Vec<u8>> {
    if bitmap.is_empty() {
        return Err(FilmError::encode("cannot encode an empty bitmap"));
    }
    let quality = quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY);
    let rgb = image::DynamicImage::ImageRgba8(to_rgba_image(bitmap)?).to_rgb8();

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(
            rgb.as_raw(),
            bitmap.width(),
            bitmap.height(),
            image::ExtendedColorType::Rgb8,
        )
        .context("encode jpeg")
        .map_err(|e| FilmError::encode(format!("{e:#}")))?;
    Ok(buf)
}

/// Encode a bitmap as an RGBA PNG.
pub fn encode_png(bitmap: &Bitmap) -> FilmResult<Vec<u8>> {
    if bitmap.is_empty() {
        return Err(FilmError::encode("cannot encode an empty bitmap"));
    }
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(to_rgba_image(bitmap)?)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")
        .map_err(|e| FilmError::encode(format!("{e:#}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
