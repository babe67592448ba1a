use crate::assets::decode::{center_square, resize};
use crate::foundation::core::Bitmap;
use crate::foundation::error::{FilmError, FilmResult};
use crate::grading::grain::SeededGrain;
use crate::grading::pipeline::{GradingConfig, PipelineMode, grade};

/// A continuously updating camera frame provider.
pub trait FrameSource {
    /// Return `true` once the source can deliver frames.
    fn is_ready(&self) -> bool;
    /// Most recent raw frame, if one is available.
    fn latest_frame(&mut self) -> Option<Bitmap>;
}

/// Display target of the live preview.
pub trait PreviewSurface {
    /// Show one graded frame.
    fn present(&mut self, frame: &Bitmap);
}

/// In-memory surface for tests and debugging. Keeps every presented frame.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    frames: Vec<Bitmap>,
}

impl InMemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames in presentation order.
    pub fn frames(&self) -> &[Bitmap] {
        &self.frames
    }

    /// Most recently presented frame.
    pub fn last(&self) -> Option<&Bitmap> {
        self.frames.last()
    }
}

impl PreviewSurface for InMemorySurface {
    fn present(&mut self, frame: &Bitmap) {
        self.frames.push(frame.clone());
    }
}

/// Why a preview tick produced nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The source has not become ready yet.
    SourceNotReady,
    /// The source is ready but had no frame to hand out.
    NoFrame,
    /// The frame could not be resampled to the preview surface.
    SurfaceUnavailable,
}

/// Result of one preview tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewTick {
    /// A graded frame was presented.
    Presented,
    /// Nothing was presented this tick.
    Skipped(SkipReason),
}

/// Counters over the lifetime of a [`PreviewLoop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewStats {
    /// Ticks that presented a frame.
    pub presented: u64,
    /// Ticks that were skipped.
    pub skipped: u64,
}

/// Live preview driver: one [`tick`](PreviewLoop::tick) per display refresh.
///
/// Each tick runs to completion before the next can start, so a slow frame delays the next
/// one instead of queueing work. Config changes apply from the next tick on.
#[derive(Debug)]
pub struct PreviewLoop {
    config: GradingConfig,
    size: u32,
    grain: SeededGrain,
    stats: PreviewStats,
}

impl PreviewLoop {
    /// Create a loop rendering `size` x `size` previews.
    pub fn new(config: GradingConfig, size: u32) -> FilmResult<Self> {
        if size == 0 {
            return Err(FilmError::validation("preview size must be > 0"));
        }
        Ok(Self {
            config,
            size,
            grain: SeededGrain::from_entropy(),
            stats: PreviewStats::default(),
        })
    }

    /// Pin the grain seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.grain = SeededGrain::new(seed);
        self
    }

    /// Current grading config.
    pub fn config(&self) -> GradingConfig {
        self.config
    }

    /// Replace the grading config for subsequent ticks.
    pub fn set_config(&mut self, config: GradingConfig) {
        self.config = config;
    }

    /// Edge length of the preview surface.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Tick counters.
    pub fn stats(&self) -> PreviewStats {
        self.stats
    }

    /// Grade and present the latest frame, or skip if none is usable.
    pub fn tick<S, P>(&mut self, source: &mut S, surface: &mut P) -> PreviewTick
    where
        S: FrameSource + ?Sized,
        P: PreviewSurface + ?Sized,
    {
        let result = self.render(source);
        match result {
            Ok(frame) => {
                surface.present(&frame);
                self.stats.presented += 1;
                PreviewTick::Presented
            }
            Err(reason) => {
                tracing::debug!(?reason, "preview tick skipped");
                self.stats.skipped += 1;
                PreviewTick::Skipped(reason)
            }
        }
    }

    fn render<S: FrameSource + ?Sized>(&mut self, source: &mut S) -> Result<Bitmap, SkipReason> {
        if !source.is_ready() {
            return Err(SkipReason::SourceNotReady);
        }
        let raw = source.latest_frame().ok_or(SkipReason::NoFrame)?;
        if raw.is_empty() {
            return Err(SkipReason::NoFrame);
        }

        let square = center_square(&raw);
        let small = resize(&square, self.size, self.size).map_err(|err| {
            tracing::warn!(%err, "preview resample failed");
            SkipReason::SurfaceUnavailable
        })?;

        let config = self.config;
        Ok(grade(small, config, PipelineMode::Live, &mut self.grain))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/preview.rs"]
mod tests;
