//! The color-grading pipeline and its building blocks.
//!
//! Leaves first: [`catalog`] holds the static recipes, [`composite`], [`blur`] and [`grain`]
//! are the compositor primitives, and [`pipeline`] sequences them.

/// Separable Gaussian blur.
pub mod blur;
/// Filter presets and their recipes.
pub mod catalog;
/// Scalar adjustments and blend modes.
pub mod composite;
/// Film-grain noise and injectable random sources.
pub mod grain;
/// Beautify, filter and grain passes for one bitmap.
pub mod pipeline;
