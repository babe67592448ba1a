//! Persistent collection of developed prints laid out on a freeform board.
//!
//! Records are stored as one JSON document. The grading pipeline does not depend on this
//! format; it only supplies the encoded print.

use std::path::Path;

use anyhow::Context;
use base64::Engine as _;
use chrono::{DateTime, Local, TimeZone, Utc};
use uuid::Uuid;

use crate::foundation::core::Point;
use crate::foundation::error::{FilmError, FilmResult};
use crate::grading::grain::{GrainSource, SeededGrain};

/// Largest random tilt of a newly added print, in degrees either way.
pub const MAX_TILT_DEG: f64 = 6.0;

const FORMAT_VERSION: u32 = 1;

/// One print on the board.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhotoRecord {
    /// Stable identifier.
    pub id: Uuid,
    /// Base64 (standard alphabet) of the JPEG print.
    pub image_b64: String,
    /// Caption under the print.
    pub caption: String,
    /// Capture time.
    pub taken_at: DateTime<Utc>,
    /// Top-left position on the board.
    pub position: Point,
    /// Tilt in degrees.
    pub rotation_deg: f64,
    /// Z-order; higher is drawn on top.
    pub stack_order: u32,
}

impl PhotoRecord {
    /// Decode the stored print bytes.
    pub fn image_bytes(&self) -> FilmResult<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.image_b64)
            .map_err(|e| FilmError::serde(format!("photo {} image: {e}", self.id)))
    }

    /// Capture time in local time, e.g. `Jul 04, 2026 · 18:30`.
    pub fn display_timestamp(&self) -> String {
        format_timestamp(&self.taken_at.with_timezone(&Local))
    }
}

/// Format a capture time the way prints label it.
pub fn format_timestamp<Tz>(t: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    t.format("%b %d, %Y · %H:%M").to_string()
}

/// Random tilt in `[-MAX_TILT_DEG, MAX_TILT_DEG)`.
pub fn random_tilt<G: GrainSource + ?Sized>(rng: &mut G) -> f64 {
    (f64::from(rng.next_unit()) * 2.0 - 1.0) * MAX_TILT_DEG
}

#[derive(serde::Serialize, serde::Deserialize)]
struct GalleryFile {
    version: u32,
    photos: Vec<PhotoRecord>,
}

/// The board: every print with its layout state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gallery {
    records: Vec<PhotoRecord>,
}

impl Gallery {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a board from JSON. A missing file is an empty board.
    pub fn load(path: &Path) -> FilmResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read gallery '{}'", path.display()))
                    .into());
            }
        };
        Self::from_json(&text)
    }

    /// Parse a board from its JSON document.
    pub fn from_json(text: &str) -> FilmResult<Self> {
        let file: GalleryFile =
            serde_json::from_str(text).map_err(|e| FilmError::serde(format!("gallery: {e}")))?;
        if file.version != FORMAT_VERSION {
            return Err(FilmError::validation(format!(
                "unsupported gallery version {} (expected {FORMAT_VERSION})",
                file.version
            )));
        }
        Ok(Self {
            records: file.photos,
        })
    }

    /// Serialize the board as pretty JSON.
    pub fn to_json_pretty(&self) -> FilmResult<String> {
        let file = GalleryFile {
            version: FORMAT_VERSION,
            photos: self.records.clone(),
        };
        serde_json::to_string_pretty(&file).map_err(|e| FilmError::serde(e.to_string()))
    }

    /// Write the board to `path` through a temporary sibling file and a rename.
    pub fn save(&self, path: &Path) -> FilmResult<()> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create gallery dir '{}'", parent.display()))?;
        }
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).with_context(|| format!("write '{}'", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("replace gallery '{}'", path.display()))?;
        tracing::debug!(photos = self.records.len(), path = %path.display(), "gallery saved");
        Ok(())
    }

    /// Add a print on top of the stack with the current time and a random tilt.
    pub fn add(&mut self, jpeg: &[u8], caption: impl Into<String>, position: Point) -> Uuid {
        let rotation = random_tilt(&mut SeededGrain::from_entropy());
        self.insert(PhotoRecord {
            id: Uuid::new_v4(),
            image_b64: base64::engine::general_purpose::STANDARD.encode(jpeg),
            caption: caption.into(),
            taken_at: Utc::now(),
            position,
            rotation_deg: rotation,
            stack_order: 0,
        })
    }

    /// Insert a prepared record on top of the stack. Its `stack_order` is reassigned.
    pub fn insert(&mut self, mut record: PhotoRecord) -> Uuid {
        record.stack_order = self.next_order();
        let id = record.id;
        self.records.push(record);
        id
    }

    /// Look up a print.
    pub fn get(&self, id: Uuid) -> Option<&PhotoRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Remove a print and return it.
    pub fn remove(&mut self, id: Uuid) -> Option<PhotoRecord> {
        let idx = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(idx))
    }

    /// Raise a print above every other one. Already-top prints keep their order.
    pub fn bring_to_front(&mut self, id: Uuid) -> FilmResult<()> {
        let top = self.top_order().unwrap_or(0);
        let others_at_top = self
            .records
            .iter()
            .any(|r| r.id != id && r.stack_order == top);
        let current = self.get_mut(id)?.stack_order;
        if current < top || others_at_top {
            let next = self.next_order();
            self.get_mut(id)?.stack_order = next;
        }
        Ok(())
    }

    /// Move a print to a new board position.
    pub fn move_to(&mut self, id: Uuid, position: Point) -> FilmResult<()> {
        self.get_mut(id)?.position = position;
        Ok(())
    }

    /// Replace a print's caption.
    pub fn set_caption(&mut self, id: Uuid, caption: impl Into<String>) -> FilmResult<()> {
        self.get_mut(id)?.caption = caption.into();
        Ok(())
    }

    /// Number of prints.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` when the board is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prints bottom to top.
    pub fn stacked(&self) -> Vec<&PhotoRecord> {
        let mut out: Vec<&PhotoRecord> = self.records.iter().collect();
        out.sort_by_key(|r| r.stack_order);
        out
    }

    fn top_order(&self) -> Option<u32> {
        self.records.iter().map(|r| r.stack_order).max()
    }

    /// Order one above the current top. Compacts the stack to `0..n` when the top is `u32::MAX`.
    fn next_order(&mut self) -> u32 {
        let Some(top) = self.top_order() else {
            return 0;
        };
        if let Some(next) = top.checked_add(1) {
            return next;
        }
        self.compact_orders();
        u32::try_from(self.records.len()).unwrap_or(u32::MAX)
    }

    fn compact_orders(&mut self) {
        let mut by_order: Vec<usize> = (0..self.records.len()).collect();
        by_order.sort_by_key(|&i| self.records[i].stack_order);
        for (order, i) in by_order.into_iter().enumerate() {
            self.records[i].stack_order = u32::try_from(order).unwrap_or(u32::MAX);
        }
        tracing::debug!(photos = self.records.len(), "gallery stack orders compacted");
    }

    fn get_mut(&mut self, id: Uuid) -> FilmResult<&mut PhotoRecord> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| FilmError::validation(format!("no photo with id {id}")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/gallery/gallery.rs"]
mod tests;
