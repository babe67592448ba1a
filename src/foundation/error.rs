/// Convenience result type used across filmcam.
pub type FilmResult<T> = Result<T, FilmError>;

/// Top-level error taxonomy used by the boundary APIs.
///
/// Pixel operations on valid in-memory bitmaps never fail; only the IO-adjacent steps
/// (decode, encode, persistence, captioning) return these.
#[derive(thiserror::Error, Debug)]
pub enum FilmError {
    /// Invalid caller-provided data (buffer sizes, settings values).
    #[error("validation error: {0}")]
    Validation(String),

    /// An encoded still could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A bitmap could not be encoded into an artifact.
    #[error("encode error: {0}")]
    Encode(String),

    /// The captioning collaborator failed or returned nothing usable.
    #[error("caption error: {0}")]
    Caption(String),

    /// A final capture is already in flight for this shutter.
    #[error("shutter busy: a capture is already in progress")]
    Busy,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FilmError {
    /// Build a [`FilmError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FilmError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FilmError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FilmError::Caption`] value.
    pub fn caption(msg: impl Into<String>) -> Self {
        Self::Caption(msg.into())
    }

    /// Build a [`FilmError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
