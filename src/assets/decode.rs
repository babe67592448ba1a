use anyhow::Context;

use crate::foundation::core::Bitmap;
use crate::foundation::error::{FilmError, FilmResult};

/// Decode encoded image bytes (JPEG, PNG, ...) into a straight-alpha RGBA8 bitmap.
pub fn decode_image(bytes: &[u8]) -> FilmResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| FilmError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Bitmap::new(width, height, rgba.into_raw())
}

/// Crop the largest centered square out of the bitmap.
pub fn center_square(src: &Bitmap) -> Bitmap {
    let side = src.width().min(src.height());
    if src.width() == src.height() {
        return src.clone();
    }
    let x0 = (src.width() - side) / 2;
    let y0 = (src.height() - side) / 2;

    let row_bytes = side as usize * 4;
    let stride = src.width() as usize * 4;
    let mut data = Vec::with_capacity(row_bytes * side as usize);
    for y in y0..y0 + side {
        let start = y as usize * stride + x0 as usize * 4;
        data.extend_from_slice(&src.as_raw()[start..start + row_bytes]);
    }
    Bitmap::new(side, side, data).unwrap_or_else(|_| src.clone())
}

/// Resample to exactly `width` x `height` with a triangle filter.
///
/// Empty inputs or targets yield an empty bitmap of the requested size.
pub fn resize(src: &Bitmap, width: u32, height: u32) -> FilmResult<Bitmap> {
    if src.width() == width && src.height() == height {
        return Ok(src.clone());
    }
    if src.is_empty() || width == 0 || height == 0 {
        return Bitmap::new(width, height, vec![0; width as usize * height as usize * 4]);
    }
    let img = to_rgba_image(src)?;
    let out = image::imageops::resize(&img, width, height, image::imageops::FilterType::Triangle);
    Bitmap::new(width, height, out.into_raw())
}

pub(crate) fn to_rgba_image(src: &Bitmap) -> FilmResult<image::RgbaImage> {
    image::RgbaImage::from_raw(src.width(), src.height(), src.as_raw().to_vec())
        .ok_or_else(|| FilmError::validation("bitmap buffer does not match its dimensions"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
