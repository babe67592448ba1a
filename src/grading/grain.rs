use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::Bitmap;
use crate::foundation::math::{Fnv1a64, clamp_u8};

/// Source of uniformly distributed random bits for grain injection.
///
/// Production callers use [`SeededGrain::from_entropy`]; tests pin a seed.
pub trait GrainSource {
    /// Next 32 uniformly distributed bits.
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// SplitMix64 generator.
#[derive(Clone, Debug)]
pub struct SeededGrain {
    state: u64,
}

impl SeededGrain {
    /// Generator with a fixed seed; equal seeds yield equal sequences.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator seeded from the clock, the process id and a per-process counter.
    pub fn from_entropy() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let mut h = Fnv1a64::new_default();
        h.write_u64(nanos);
        h.write_u64(u64::from(std::process::id()));
        h.write_u64(COUNTER.fetch_add(1, Ordering::Relaxed));
        Self::new(h.finish())
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl GrainSource for SeededGrain {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

/// Add film grain: one uniform offset in `[-amplitude/2, amplitude/2)` per pixel, applied
/// equally to R, G and B. Alpha is untouched.
///
/// Amplitude 0 returns immediately without drawing from `rng`.
pub fn inject_grain<G: GrainSource + ?Sized>(bitmap: &mut Bitmap, amplitude: u8, rng: &mut G) {
    if amplitude == 0 || bitmap.is_empty() {
        return;
    }
    let amp = f32::from(amplitude);
    for px in bitmap.pixels_mut() {
        let noise = (rng.next_unit() - 0.5) * amp;
        for c in &mut px[..3] {
            *c = clamp_u8(f32::from(*c) + noise);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grading/grain.rs"]
mod tests;
