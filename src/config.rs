//! User settings: default grading, print quality, preview size and captioning.
//!
//! Settings are loaded once by the caller and handed to the pipeline as plain values; the
//! pipeline never reads ambient storage.

use std::path::Path;

use anyhow::Context;

use crate::assets::encode::{DEFAULT_JPEG_QUALITY, MAX_JPEG_QUALITY, MIN_JPEG_QUALITY};
use crate::capture::preview::PreviewLoop;
use crate::capture::shutter::Shutter;
use crate::caption::{Captioner, DEFAULT_PLACEHOLDER, resolve_caption};
use crate::card::CardTemplate;
use crate::foundation::error::{FilmError, FilmResult};
use crate::grading::pipeline::GradingConfig;

/// Persisted application settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Grading applied to new captures.
    pub grading: GradingConfig,
    /// JPEG quality of prints (92–95).
    pub jpeg_quality: u8,
    /// Edge length of the live preview surface.
    pub preview_size: u32,
    /// Whether prints are sent to the captioner.
    pub captions_enabled: bool,
    /// Caption used when captioning is off or fails.
    pub placeholder_caption: String,
    /// Card export layout.
    pub card: CardTemplate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grading: GradingConfig::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            preview_size: 320,
            captions_enabled: false,
            placeholder_caption: DEFAULT_PLACEHOLDER.to_string(),
            card: CardTemplate::default(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file.
    pub fn from_path(path: &Path) -> FilmResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Parse and validate settings from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> FilmResult<Self> {
        let settings: Settings =
            serde_json::from_str(text).map_err(|e| FilmError::serde(format!("settings: {e}")))?;
        settings.validated()
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> FilmResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FilmError::serde(e.to_string()))
    }

    /// Clamp the JPEG quality into the print range and check the remaining fields.
    pub fn validated(mut self) -> FilmResult<Self> {
        if self.preview_size == 0 {
            return Err(FilmError::validation("preview_size must be > 0"));
        }
        let quality = self.jpeg_quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY);
        if quality != self.jpeg_quality {
            tracing::warn!(
                requested = self.jpeg_quality,
                used = quality,
                "jpeg_quality clamped into print range"
            );
            self.jpeg_quality = quality;
        }
        self.card.validate()?;
        Ok(self)
    }

    /// Preview loop at the configured size, starting on the configured grading.
    pub fn preview_loop(&self) -> FilmResult<PreviewLoop> {
        PreviewLoop::new(self.grading, self.preview_size)
    }

    /// Shutter encoding prints at the configured quality.
    pub fn shutter(&self) -> Shutter {
        Shutter::new(self.jpeg_quality)
    }

    /// Caption for a developed print. With captioning off the captioner is never called.
    pub fn caption_for(&self, captioner: Option<&dyn Captioner>, jpeg: &[u8]) -> String {
        let captioner = captioner.filter(|_| self.captions_enabled);
        resolve_caption(captioner, jpeg, &self.placeholder_caption)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
