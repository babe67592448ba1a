//! Captioning collaborator contract.
//!
//! Captioning is best effort: a failing, disabled or silent captioner never blocks or alters
//! the print, it only leaves the placeholder caption in place.

use crate::foundation::error::FilmResult;

/// Caption shown when captioning is disabled or fails.
pub const DEFAULT_PLACEHOLDER: &str = "A moment in time";

/// Longest caption kept, in characters.
pub const MAX_CAPTION_CHARS: usize = 60;

/// Produces a short caption for an encoded print.
pub trait Captioner {
    /// Caption the JPEG bytes of a print.
    fn caption(&self, jpeg: &[u8]) -> FilmResult<String>;
}

impl<F> Captioner for F
where
    F: Fn(&[u8]) -> FilmResult<String>,
{
    fn caption(&self, jpeg: &[u8]) -> FilmResult<String> {
        self(jpeg)
    }
}

/// Ask the captioner for a caption, falling back to `placeholder`.
///
/// Replies are trimmed, surrounding quotes removed and the result cut to
/// [`MAX_CAPTION_CHARS`].
pub fn resolve_caption(captioner: Option<&dyn Captioner>, jpeg: &[u8], placeholder: &str) -> String {
    let Some(captioner) = captioner else {
        return placeholder.to_string();
    };
    match captioner.caption(jpeg) {
        Ok(text) => {
            let cleaned = clean_caption(&text);
            if cleaned.is_empty() {
                tracing::warn!("captioner returned an empty caption");
                placeholder.to_string()
            } else {
                cleaned
            }
        }
        Err(err) => {
            tracing::warn!(%err, "captioning failed, keeping placeholder");
            placeholder.to_string()
        }
    }
}

fn clean_caption(raw: &str) -> String {
    let trimmed = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '\u{201C}' || c == '\u{201D}')
        .trim();
    trimmed.chars().take(MAX_CAPTION_CHARS).collect::<String>().trim_end().to_string()
}

#[cfg(test)]
#[path = "../tests/unit/caption/caption.rs"]
mod tests;
