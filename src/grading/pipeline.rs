//! The grading pipeline: beautify, filter, grain.
//!
//! One stateless function serves both call sites. The only difference between live preview
//! and final capture is the [`BeautifyParams`] selected by [`PipelineMode`].

use crate::foundation::core::Bitmap;
use crate::grading::blur::blur;
use crate::grading::catalog::{BlendMode, FilterPreset, Recipe, grain_amplitude, recipe_for};
use crate::grading::composite::{adjust, blend_bitmap, blend_layer};
use crate::grading::grain::{GrainSource, SeededGrain, inject_grain};

/// Skin-smoothing strength, 0–100. Zero disables the beautify pass.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct BeautyLevel(u8);

impl BeautyLevel {
    /// Maximum level.
    pub const MAX: u8 = 100;

    /// Build a level, clamping values above 100.
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX))
    }

    /// Raw level in `0..=100`.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Level as a fraction in `[0, 1]`.
    pub fn strength(self) -> f32 {
        f32::from(self.0) / f32::from(Self::MAX)
    }
}

impl From<u8> for BeautyLevel {
    fn from(v: u8) -> Self {
        Self::new(v)
    }
}

impl From<BeautyLevel> for u8 {
    fn from(v: BeautyLevel) -> Self {
        v.0
    }
}

/// Everything the pipeline needs besides the bitmap. Read-only for one invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    /// Selected look.
    pub filter: FilterPreset,
    /// Skin-smoothing strength.
    pub beauty_level: BeautyLevel,
}

impl GradingConfig {
    /// Build a config from a preset and a raw beauty level.
    pub fn new(filter: FilterPreset, beauty_level: u8) -> Self {
        Self {
            filter,
            beauty_level: BeautyLevel::new(beauty_level),
        }
    }

    /// Return `true` when grading with this config cannot change any pixel.
    pub fn is_identity(&self) -> bool {
        self.filter == FilterPreset::Original && self.beauty_level.get() == 0
    }
}

/// Blur radius and screen opacity of the beautify pass as linear functions of strength `s`:
/// `radius = base_radius + s * radius_gain`, `opacity = s * opacity_gain`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeautifyParams {
    /// Radius at strength 0.
    pub base_radius: f32,
    /// Added radius at strength 1.
    pub radius_gain: f32,
    /// Screen opacity at strength 1.
    pub opacity_gain: f32,
}

impl BeautifyParams {
    /// Blur radius in whole pixels for a strength in `[0, 1]`.
    pub fn radius_px(&self, strength: f32) -> u32 {
        (self.base_radius + strength * self.radius_gain)
            .round()
            .max(0.0) as u32
    }

    /// Screen-composite opacity for a strength in `[0, 1]`.
    pub fn opacity(&self, strength: f32) -> f32 {
        (strength * self.opacity_gain).clamp(0.0, 1.0)
    }
}

/// Beautify tuning for the full-resolution capture.
pub const FINAL_BEAUTIFY: BeautifyParams = BeautifyParams {
    base_radius: 3.0,
    radius_gain: 8.0,
    opacity_gain: 0.5,
};

/// Beautify tuning for the small live preview: larger blur, stronger screen.
// TODO: confirm with product whether live and final beautify tuning should converge.
pub const LIVE_BEAUTIFY: BeautifyParams = BeautifyParams {
    base_radius: 5.0,
    radius_gain: 12.0,
    opacity_gain: 0.6,
};

/// Which call site is running the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipelineMode {
    /// Per-frame preview on a small surface.
    Live,
    /// One-shot full-resolution capture.
    Final,
}

impl PipelineMode {
    /// Beautify constants of this mode.
    pub fn beautify_params(self) -> BeautifyParams {
        match self {
            PipelineMode::Live => LIVE_BEAUTIFY,
            PipelineMode::Final => FINAL_BEAUTIFY,
        }
    }
}

/// Blur a copy of the bitmap and screen it back over the original.
///
/// Level 0 leaves the bitmap byte-for-byte unchanged.
pub fn beautify(bitmap: &mut Bitmap, level: BeautyLevel, params: BeautifyParams) {
    if level.get() == 0 || bitmap.is_empty() {
        return;
    }
    let s = level.strength();
    let soft = blur(bitmap, params.radius_px(s));
    // Same dimensions by construction.
    let _ = blend_bitmap(bitmap, &soft, BlendMode::Screen, params.opacity(s));
}

/// Apply a recipe: base adjustment, then every tint layer in order.
pub fn apply_recipe(bitmap: &mut Bitmap, recipe: &Recipe) {
    adjust(bitmap, recipe.base);
    for layer in recipe.tints {
        blend_layer(bitmap, layer.color, layer.mode, layer.opacity);
    }
}

/// Grade one bitmap. Never fails; `Original` with beauty 0 returns the input unchanged.
#[tracing::instrument(
    level = "debug",
    skip(bitmap, grain),
    fields(width = bitmap.width(), height = bitmap.height())
)]
pub fn grade<G: GrainSource + ?Sized>(
    mut bitmap: Bitmap,
    config: GradingConfig,
    mode: PipelineMode,
    grain: &mut G,
) -> Bitmap {
    if bitmap.is_empty() || config.is_identity() {
        return bitmap;
    }

    beautify(&mut bitmap, config.beauty_level, mode.beautify_params());
    apply_recipe(&mut bitmap, &recipe_for(config.filter));
    inject_grain(&mut bitmap, grain_amplitude(config.filter), grain);
    bitmap
}

/// [`grade`] with a fixed grain seed.
pub fn grade_seeded(bitmap: Bitmap, config: GradingConfig, mode: PipelineMode, seed: u64) -> Bitmap {
    grade(bitmap, config, mode, &mut SeededGrain::new(seed))
}

#[cfg(test)]
#[path = "../../tests/unit/grading/pipeline.rs"]
mod tests;
