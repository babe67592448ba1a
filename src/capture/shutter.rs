use std::sync::atomic::{AtomicBool, Ordering};

use crate::assets::decode::{center_square, decode_image};
use crate::assets::encode::{DEFAULT_JPEG_QUALITY, encode_jpeg};
use crate::foundation::core::Bitmap;
use crate::foundation::error::{FilmError, FilmResult};
use crate::grading::grain::SeededGrain;
use crate::grading::pipeline::{GradingConfig, PipelineMode, grade};

/// An encoded print produced by the final-capture path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// JPEG bytes.
    pub jpeg: Vec<u8>,
    /// Print edge length in pixels (prints are square).
    pub size: u32,
    /// Config the print was graded with.
    pub config: GradingConfig,
}

/// What a shutter press produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The still was graded and encoded.
    Graded(Artifact),
    /// The still could not be processed and is returned unmodified.
    PassThrough(Vec<u8>),
}

impl CaptureOutcome {
    /// Return `true` when the pipeline ran.
    pub fn is_graded(&self) -> bool {
        matches!(self, CaptureOutcome::Graded(_))
    }

    /// Encoded bytes to persist, graded or not.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            CaptureOutcome::Graded(a) => a.jpeg,
            CaptureOutcome::PassThrough(bytes) => bytes,
        }
    }
}

/// One-shot final capture.
///
/// While a capture is in flight the shutter is "disabled": any other call returns
/// [`FilmError::Busy`] instead of starting a second, overlapping capture.
#[derive(Debug)]
pub struct Shutter {
    busy: AtomicBool,
    quality: u8,
    seed: Option<u64>,
}

impl Default for Shutter {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl Shutter {
    /// Shutter encoding prints at `quality` (clamped to the print range by the encoder).
    pub fn new(quality: u8) -> Self {
        Self {
            busy: AtomicBool::new(false),
            quality,
            seed: None,
        }
    }

    /// Pin the grain seed of every capture.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Return `true` while a capture is running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Decode, square-crop, grade and encode one still.
    ///
    /// Decode or encode failures degrade to [`CaptureOutcome::PassThrough`] with the input
    /// bytes; only a busy shutter is reported as an error.
    #[tracing::instrument(level = "debug", skip(self, encoded), fields(bytes = encoded.len()))]
    pub fn capture(&self, encoded: &[u8], config: GradingConfig) -> FilmResult<CaptureOutcome> {
        let _armed = self.arm()?;

        let raw = match decode_image(encoded) {
            Ok(b) => b,
            Err(err) => {
                tracing::warn!(%err, "capture decode failed, passing input through");
                return Ok(CaptureOutcome::PassThrough(encoded.to_vec()));
            }
        };
        match self.develop(raw, config) {
            Ok(artifact) => Ok(CaptureOutcome::Graded(artifact)),
            Err(err) => {
                tracing::warn!(%err, "capture encode failed, passing input through");
                Ok(CaptureOutcome::PassThrough(encoded.to_vec()))
            }
        }
    }

    /// Grade and encode a raw camera frame.
    pub fn capture_frame(&self, frame: Bitmap, config: GradingConfig) -> FilmResult<Artifact> {
        let _armed = self.arm()?;
        self.develop(frame, config)
    }

    fn develop(&self, raw: Bitmap, config: GradingConfig) -> FilmResult<Artifact> {
        let square = center_square(&raw);
        drop(raw);
        let size = square.width();

        let mut grain = match self.seed {
            Some(seed) => SeededGrain::new(seed),
            None => SeededGrain::from_entropy(),
        };
        let graded = grade(square, config, PipelineMode::Final, &mut grain);
        let jpeg = encode_jpeg(&graded, self.quality)?;
        tracing::info!(size, filter = %config.filter, bytes = jpeg.len(), "print developed");
        Ok(Artifact { jpeg, size, config })
    }

    fn arm(&self) -> FilmResult<ArmedGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FilmError::Busy)?;
        Ok(ArmedGuard { busy: &self.busy })
    }
}

/// Releases the shutter on drop, including on unwind.
struct ArmedGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for ArmedGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/shutter.rs"]
mod tests;
