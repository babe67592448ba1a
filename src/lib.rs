//! Filmcam is the engine of an instant-film camera.
//!
//! The core is a deterministic color-grading pipeline over RGBA bitmaps. Around it:
//!
//! - Grade live preview frames with a [`PreviewLoop`]
//! - Develop a captured still into a JPEG print with a [`Shutter`]
//! - Caption prints, lay them out on a [`Gallery`] board and export polaroid cards
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Decoding and encoding at the image boundary.
pub mod assets;
/// Preview loop and shutter.
pub mod capture;
/// Caption collaborator and fallbacks.
pub mod caption;
/// Polaroid card rendering and export.
pub mod card;
/// Persisted application settings.
pub mod config;
/// Persisted board of developed prints.
pub mod gallery;
/// Color-grading pipeline.
pub mod grading;

pub use crate::foundation::core::{Bitmap, Point, Rgba8};
pub use crate::foundation::error::{FilmError, FilmResult};

pub use crate::capture::preview::{
    FrameSource, InMemorySurface, PreviewLoop, PreviewStats, PreviewSurface, PreviewTick, SkipReason,
};
pub use crate::capture::shutter::{Artifact, CaptureOutcome, Shutter};
pub use crate::caption::{Captioner, resolve_caption};
pub use crate::card::{CardLabel, CardTemplate, export_card, render_card};
pub use crate::config::Settings;
pub use crate::gallery::{Gallery, PhotoRecord};
pub use crate::grading::catalog::{BlendMode, FilterPreset};
pub use crate::grading::grain::{GrainSource, SeededGrain};
pub use crate::grading::pipeline::{
    BeautyLevel, GradingConfig, PipelineMode, grade, grade_seeded,
};
