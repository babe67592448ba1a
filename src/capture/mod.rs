//! The two pipeline call sites.
//!
//! - [`preview`]: cooperative per-frame loop over a live [`FrameSource`](preview::FrameSource).
//! - [`shutter`]: one-shot final capture producing an encoded print artifact.

/// Live preview loop.
pub mod preview;
/// Final capture.
pub mod shutter;
