//! Scalar adjustments and flat-color / bitmap blending on straight-alpha RGBA8.
//!
//! Blend formulas work on 0..255 channel values with `a` the base (existing) channel and `b`
//! the layer channel. The layer result is then interpolated with the base by opacity. Alpha is
//! never touched.

use crate::foundation::core::{Bitmap, Rgba8};
use crate::foundation::error::{FilmError, FilmResult};
use crate::foundation::math::{clamp_u8, luma601, mul_div255};
use crate::grading::catalog::{BaseAdjust, BlendMode};

/// Apply contrast, saturation, brightness and sepia mix, in that order, to every pixel.
///
/// Each stage clamps channels to `[0, 255]` before the next one runs.
pub fn adjust(bitmap: &mut Bitmap, adj: BaseAdjust) {
    if adj.is_identity() || bitmap.is_empty() {
        return;
    }
    let sepia = adj.sepia.clamp(0.0, 1.0);

    for px in bitmap.pixels_mut() {
        let mut c = [f32::from(px[0]), f32::from(px[1]), f32::from(px[2])];

        for v in &mut c {
            *v = ((*v - 128.0) * adj.contrast + 128.0).clamp(0.0, 255.0);
        }

        let l = luma601(c[0], c[1], c[2]);
        for v in &mut c {
            *v = (l + (*v - l) * adj.saturation).clamp(0.0, 255.0);
        }

        for v in &mut c {
            *v = (*v * adj.brightness).clamp(0.0, 255.0);
        }

        if sepia > 0.0 {
            let [r, g, b] = c;
            let sr = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0);
            let sg = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0);
            let sb = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0);
            c = [
                r + (sr - r) * sepia,
                g + (sg - g) * sepia,
                b + (sb - b) * sepia,
            ];
        }

        px[0] = clamp_u8(c[0]);
        px[1] = clamp_u8(c[1]);
        px[2] = clamp_u8(c[2]);
    }
}

/// Composite a flat color over the bitmap.
///
/// `opacity <= 0` leaves the bitmap byte-for-byte unchanged.
pub fn blend_layer(bitmap: &mut Bitmap, color: Rgba8, mode: BlendMode, opacity: f32) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || bitmap.is_empty() {
        return;
    }

    // The layer is flat, so each output channel depends on the base channel alone.
    let lut = [
        channel_lut(mode, color.r, opacity),
        channel_lut(mode, color.g, opacity),
        channel_lut(mode, color.b, opacity),
    ];
    for px in bitmap.pixels_mut() {
        px[0] = lut[0][usize::from(px[0])];
        px[1] = lut[1][usize::from(px[1])];
        px[2] = lut[2][usize::from(px[2])];
    }
}

/// Composite `src` over `dst` pixel by pixel. Both bitmaps must have the same size.
pub fn blend_bitmap(dst: &mut Bitmap, src: &Bitmap, mode: BlendMode, opacity: f32) -> FilmResult<()> {
    if !dst.same_size(src) {
        return Err(FilmError::validation(format!(
            "blend_bitmap expects equal sizes, got {}x{} and {}x{}",
            dst.width(),
            dst.height(),
            src.width(),
            src.height()
        )));
    }
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || dst.is_empty() {
        return Ok(());
    }

    // Mode dispatch happens once per call; each arm gets its own monomorphized kernel.
    match mode {
        BlendMode::Overlay => blend_bitmap_with(dst, src, opacity, overlay),
        BlendMode::Screen => blend_bitmap_with(dst, src, opacity, screen),
        BlendMode::Multiply => blend_bitmap_with(dst, src, opacity, multiply),
        BlendMode::ColorBurn => blend_bitmap_with(dst, src, opacity, color_burn),
        BlendMode::SoftLight => blend_bitmap_with(dst, src, opacity, soft_light),
    }
    Ok(())
}

/// Blend one base channel `a` with one layer channel `b` (no opacity applied).
pub fn blend_channel(mode: BlendMode, a: u8, b: u8) -> f32 {
    match mode {
        BlendMode::Overlay => overlay(a, b),
        BlendMode::Screen => screen(a, b),
        BlendMode::Multiply => multiply(a, b),
        BlendMode::ColorBurn => color_burn(a, b),
        BlendMode::SoftLight => soft_light(a, b),
    }
}

#[inline(always)]
fn blend_bitmap_with<F>(dst: &mut Bitmap, src: &Bitmap, opacity: f32, blend_fn: F)
where
    F: Fn(u8, u8) -> f32,
{
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        for c in 0..3 {
            d[c] = mix(d[c], blend_fn(d[c], s[c]), opacity);
        }
    }
}

fn channel_lut(mode: BlendMode, b: u8, opacity: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (a, slot) in lut.iter_mut().enumerate() {
        let a = a as u8;
        *slot = mix(a, blend_channel(mode, a, b), opacity);
    }
    lut
}

fn mix(base: u8, blended: f32, opacity: f32) -> u8 {
    let base = f32::from(base);
    clamp_u8(base + (blended - base) * opacity)
}

fn overlay(a: u8, b: u8) -> f32 {
    let (af, bf) = (f32::from(a), f32::from(b));
    if a < 128 {
        2.0 * af * bf / 255.0
    } else {
        255.0 - 2.0 * (255.0 - af) * (255.0 - bf) / 255.0
    }
}

fn screen(a: u8, b: u8) -> f32 {
    255.0 - f32::from(mul_div255(u16::from(255 - a), u16::from(255 - b)))
}

fn multiply(a: u8, b: u8) -> f32 {
    f32::from(mul_div255(u16::from(a), u16::from(b)))
}

fn color_burn(a: u8, b: u8) -> f32 {
    let burned = (255.0 - f32::from(a)) * 255.0 / f32::from(b.max(1));
    255.0 - burned.min(255.0)
}

fn soft_light(a: u8, b: u8) -> f32 {
    let d = f32::from(a) / 255.0;
    let s = f32::from(b) / 255.0;
    let out = if s <= 0.5 {
        d - (1.0 - 2.0 * s) * d * (1.0 - d)
    } else {
        let g = if d <= 0.25 {
            ((16.0 * d - 12.0) * d + 4.0) * d
        } else {
            d.sqrt()
        };
        d + (2.0 * s - 1.0) * (g - d)
    };
    out * 255.0
}

#[cfg(test)]
#[path = "../../tests/unit/grading/composite.rs"]
mod tests;
