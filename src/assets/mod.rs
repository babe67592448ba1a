//! Boundary between encoded images and in-memory [`Bitmap`](crate::Bitmap)s.

/// Decoding, square cropping and resizing.
pub mod decode;
/// JPEG artifact and PNG export encoding.
pub mod encode;
