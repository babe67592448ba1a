//! Shared primitives: bitmaps, colors, integer helpers and the error taxonomy.

/// Bitmap and color types.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
pub(crate) mod math;
