//! Static filter recipes.
//!
//! Every [`FilterPreset`] maps to one immutable [`Recipe`]: a whole-image base adjustment
//! followed by an ordered list of flat-color tint layers. Layer order is significant; later
//! layers composite on top of earlier ones.

use std::str::FromStr;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{FilmError, FilmResult};

/// Selectable color-grading look.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterPreset {
    /// No grading at all.
    #[default]
    Original,
    /// Warm faded print with a touch of sepia.
    RetroClassic,
    /// High-contrast black and white.
    RetroNoir,
    /// Bright, slightly pastel instant print.
    RetroInstant,
    /// Orange highlights against teal shadows.
    CineTealOrange,
    /// Desaturated, dark and cool.
    CineMoody,
    /// Punchy saturation.
    CineVivid,
}

impl FilterPreset {
    /// All presets in display order.
    pub const ALL: [FilterPreset; 7] = [
        FilterPreset::Original,
        FilterPreset::RetroClassic,
        FilterPreset::RetroNoir,
        FilterPreset::RetroInstant,
        FilterPreset::CineTealOrange,
        FilterPreset::CineMoody,
        FilterPreset::CineVivid,
    ];

    /// Stable uppercase identifier (matches the serialized form).
    pub fn id(self) -> &'static str {
        match self {
            FilterPreset::Original => "ORIGINAL",
            FilterPreset::RetroClassic => "RETRO_CLASSIC",
            FilterPreset::RetroNoir => "RETRO_NOIR",
            FilterPreset::RetroInstant => "RETRO_INSTANT",
            FilterPreset::CineTealOrange => "CINE_TEAL_ORANGE",
            FilterPreset::CineMoody => "CINE_MOODY",
            FilterPreset::CineVivid => "CINE_VIVID",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            FilterPreset::Original => "Original",
            FilterPreset::RetroClassic => "Classic",
            FilterPreset::RetroNoir => "Noir",
            FilterPreset::RetroInstant => "Instant",
            FilterPreset::CineTealOrange => "Teal & Orange",
            FilterPreset::CineMoody => "Moody",
            FilterPreset::CineVivid => "Vivid",
        }
    }
}

impl std::fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FilterPreset {
    type Err = FilmError;

    /// Accepts `RETRO_NOIR`, `retro-noir` and `retro_noir`.
    fn from_str(s: &str) -> FilmResult<Self> {
        let norm = s.trim().replace('-', "_").to_ascii_uppercase();
        FilterPreset::ALL
            .into_iter()
            .find(|p| p.id() == norm)
            .ok_or_else(|| FilmError::validation(format!("unknown filter preset '{s}'")))
    }
}

/// Per-pixel compositing rule for a tint layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Multiply below mid-gray, screen above it (keyed on the base channel).
    Overlay,
    /// Inverse multiply; always lightens.
    Screen,
    /// Always darkens; white is identity.
    Multiply,
    /// Darkens the base by dividing its inverse by the layer color.
    ColorBurn,
    /// Gentle contrast toward the layer color, favoring midtones.
    SoftLight,
}

/// Whole-image scalar adjustment applied before tint layers.
///
/// Stages run in fixed order: contrast, saturation, brightness, sepia mix.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BaseAdjust {
    /// Contrast multiplier around mid-gray (1.0 = identity).
    pub contrast: f32,
    /// Saturation multiplier (0.0 = grayscale, 1.0 = identity).
    pub saturation: f32,
    /// Brightness multiplier (1.0 = identity).
    pub brightness: f32,
    /// Sepia mix amount in `[0, 1]` (0.0 = identity).
    pub sepia: f32,
}

impl BaseAdjust {
    /// The adjustment that leaves every pixel untouched.
    pub const IDENTITY: BaseAdjust = BaseAdjust {
        contrast: 1.0,
        saturation: 1.0,
        brightness: 1.0,
        sepia: 0.0,
    };

    /// Return `true` when applying this adjustment would not change any pixel.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for BaseAdjust {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One flat-color layer composited over the image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TintLayer {
    /// Layer color.
    pub color: Rgba8,
    /// Compositing rule.
    pub mode: BlendMode,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Fixed grading recipe of one preset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Recipe {
    /// Scalar adjustment applied first.
    pub base: BaseAdjust,
    /// Tint layers, bottom to top.
    pub tints: &'static [TintLayer],
}

const fn tint(r: u8, g: u8, b: u8, mode: BlendMode, opacity: f32) -> TintLayer {
    TintLayer {
        color: Rgba8::rgb(r, g, b),
        mode,
        opacity,
    }
}

const fn base(contrast: f32, saturation: f32, brightness: f32, sepia: f32) -> BaseAdjust {
    BaseAdjust {
        contrast,
        saturation,
        brightness,
        sepia,
    }
}

static RETRO_CLASSIC_TINTS: [TintLayer; 2] = [
    tint(255, 180, 100, BlendMode::Overlay, 0.15),
    tint(255, 240, 200, BlendMode::SoftLight, 0.10),
];

static RETRO_NOIR_TINTS: [TintLayer; 1] = [tint(230, 230, 230, BlendMode::Multiply, 0.10)];

static RETRO_INSTANT_TINTS: [TintLayer; 2] = [
    tint(255, 230, 240, BlendMode::Screen, 0.12),
    tint(120, 200, 220, BlendMode::Overlay, 0.08),
];

// Orange must land before teal: the burn layer then only bites into the shadows.
static CINE_TEAL_ORANGE_TINTS: [TintLayer; 2] = [
    tint(255, 150, 80, BlendMode::Overlay, 0.18),
    tint(200, 255, 255, BlendMode::ColorBurn, 0.35),
];

static CINE_MOODY_TINTS: [TintLayer; 2] = [
    tint(40, 60, 90, BlendMode::Multiply, 0.20),
    tint(90, 80, 120, BlendMode::SoftLight, 0.15),
];

static CINE_VIVID_TINTS: [TintLayer; 1] = [tint(255, 220, 180, BlendMode::SoftLight, 0.10)];

/// Look up the recipe of a preset. Total over all variants.
pub fn recipe_for(preset: FilterPreset) -> Recipe {
    match preset {
        FilterPreset::Original => Recipe {
            base: BaseAdjust::IDENTITY,
            tints: &[],
        },
        FilterPreset::RetroClassic => Recipe {
            base: base(1.1, 0.85, 1.05, 0.25),
            tints: &RETRO_CLASSIC_TINTS,
        },
        FilterPreset::RetroNoir => Recipe {
            base: base(1.3, 0.0, 1.0, 0.0),
            tints: &RETRO_NOIR_TINTS,
        },
        FilterPreset::RetroInstant => Recipe {
            base: base(0.95, 1.1, 1.08, 0.1),
            tints: &RETRO_INSTANT_TINTS,
        },
        FilterPreset::CineTealOrange => Recipe {
            base: base(1.15, 1.1, 1.0, 0.0),
            tints: &CINE_TEAL_ORANGE_TINTS,
        },
        FilterPreset::CineMoody => Recipe {
            base: base(1.2, 0.7, 0.9, 0.0),
            tints: &CINE_MOODY_TINTS,
        },
        FilterPreset::CineVivid => Recipe {
            base: base(1.15, 1.4, 1.05, 0.0),
            tints: &CINE_VIVID_TINTS,
        },
    }
}

/// Film-grain noise amplitude for a preset (0 disables the grain pass).
pub fn grain_amplitude(preset: FilterPreset) -> u8 {
    match preset {
        FilterPreset::Original => 0,
        FilterPreset::RetroNoir => 45,
        _ => 25,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grading/catalog.rs"]
mod tests;
