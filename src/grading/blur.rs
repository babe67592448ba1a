use crate::foundation::core::Bitmap;

/// Separable Gaussian blur with a Q16 fixed-point kernel and clamp-to-edge sampling.
///
/// `sigma` is derived from the radius (`radius / 2`), so the output depends only on the input
/// and `radius_px`. Radius 0 returns an unmodified copy.
pub fn blur(src: &Bitmap, radius_px: u32) -> Bitmap {
    if radius_px == 0 || src.is_empty() {
        return src.clone();
    }

    let kernel = gaussian_kernel_q16(radius_px, sigma_for_radius(radius_px));
    let (w, h) = (src.width() as usize, src.height() as usize);
    let mut rows_blurred = vec![0u8; src.as_raw().len()];
    let mut out = src.clone();

    horizontal_pass(src.as_raw(), &mut rows_blurred, w, &kernel);
    vertical_pass(&rows_blurred, out.as_raw_mut(), w, h, &kernel);
    out
}

fn sigma_for_radius(radius: u32) -> f64 {
    (f64::from(radius) / 2.0).max(0.5)
}

fn gaussian_kernel_q16(radius: u32, sigma: f64) -> Vec<u32> {
    let r = i64::from(radius);
    let falloff = |i: i64| {
        let x = i as f64;
        (-x * x / (2.0 * sigma * sigma)).exp()
    };
    let total: f64 = (-r..=r).map(falloff).sum();

    let one = f64::from(Q16_ONE);
    let mut weights: Vec<u32> = (-r..=r)
        .map(|i| (falloff(i) / total * one).round().clamp(0.0, one) as u32)
        .collect();

    // Rounding drift goes to the center tap so the weights sum to exactly one.
    let sum: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let center = weights.len() / 2;
    let fixed = i64::from(weights[center]) + i64::from(Q16_ONE) - sum;
    weights[center] = fixed.clamp(0, i64::from(Q16_ONE)) as u32;
    weights
}

const Q16_ONE: u32 = 1 << 16;

/// Blur along rows: each output pixel reads its own row, clamped at both ends.
fn horizontal_pass(src: &[u8], dst: &mut [u8], width: usize, kernel: &[u32]) {
    let stride = width * 4;
    let radius = kernel.len() / 2;
    for (src_row, dst_row) in src.chunks_exact(stride).zip(dst.chunks_exact_mut(stride)) {
        for (x, out) in dst_row.chunks_exact_mut(4).enumerate() {
            let mut acc = [0u64; 4];
            for (tap, &weight) in kernel.iter().enumerate() {
                let sx = (x + tap).saturating_sub(radius).min(width - 1);
                let px = &src_row[sx * 4..sx * 4 + 4];
                for (a, &v) in acc.iter_mut().zip(px) {
                    *a += u64::from(weight) * u64::from(v);
                }
            }
            for (o, a) in out.iter_mut().zip(acc) {
                *o = round_q16(a);
            }
        }
    }
}

/// Blur along columns by accumulating whole weighted source rows per output row.
fn vertical_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, kernel: &[u32]) {
    let stride = width * 4;
    let radius = kernel.len() / 2;
    let mut acc = vec![0u64; stride];
    for (y, dst_row) in dst.chunks_exact_mut(stride).enumerate() {
        acc.fill(0);
        for (tap, &weight) in kernel.iter().enumerate() {
            let sy = (y + tap).saturating_sub(radius).min(height - 1);
            let src_row = &src[sy * stride..(sy + 1) * stride];
            for (a, &v) in acc.iter_mut().zip(src_row) {
                *a += u64::from(weight) * u64::from(v);
            }
        }
        for (o, &a) in dst_row.iter_mut().zip(&acc) {
            *o = round_q16(a);
        }
    }
}

fn round_q16(acc: u64) -> u8 {
    ((acc + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/grading/blur.rs"]
mod tests;
