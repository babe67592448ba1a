//! Export of a print onto a fixed instant-film card.
//!
//! The card is a paper-colored canvas with a square photo window near the top and a wider
//! caption band below it. Caption text goes through `usvg`/`resvg` with the system fonts.

use std::sync::{Arc, OnceLock};

use anyhow::Context;

use crate::assets::decode::{center_square, decode_image, resize};
use crate::assets::encode::encode_png;
use crate::foundation::core::{Bitmap, Rgba8};
use crate::foundation::error::{FilmError, FilmResult};

/// Layout and colors of an exported card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardTemplate {
    /// Card width in pixels.
    pub width: u32,
    /// Card height in pixels.
    pub height: u32,
    /// Paper margin left, right and above the photo.
    pub border: u32,
    /// Edge length of the square photo window.
    pub image_size: u32,
    /// Paper color.
    pub paper: Rgba8,
    /// Caption text color.
    pub ink: Rgba8,
    /// Caption font size in pixels.
    pub font_size: f32,
    /// CSS font family list for the caption.
    pub font_family: String,
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self {
            width: 600,
            height: 720,
            border: 40,
            image_size: 520,
            paper: Rgba8::rgb(250, 248, 240),
            ink: Rgba8::rgb(45, 45, 45),
            font_size: 28.0,
            font_family: "Caveat, 'Permanent Marker', cursive, sans-serif".to_string(),
        }
    }
}

impl CardTemplate {
    /// Check that the photo window fits inside the card.
    pub fn validate(&self) -> FilmResult<()> {
        if self.width == 0 || self.height == 0 || self.image_size == 0 {
            return Err(FilmError::validation("card dimensions must be > 0"));
        }
        let right = self.border.checked_add(self.image_size);
        if right.is_none_or(|r| r > self.width || r > self.height) {
            return Err(FilmError::validation(format!(
                "photo window {}+{} does not fit a {}x{} card",
                self.border, self.image_size, self.width, self.height
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(FilmError::validation("card font size must be > 0"));
        }
        Ok(())
    }

    /// Top edge and height of the caption band.
    pub fn caption_band(&self) -> (u32, u32) {
        let top = self.border + self.image_size;
        (top, self.height.saturating_sub(top))
    }
}

/// Text printed in the caption band.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardLabel {
    /// Main caption line.
    pub caption: String,
    /// Optional smaller line under the caption (usually the capture date).
    pub footer: Option<String>,
}

/// Compose a print onto the card template.
pub fn render_card(photo: &Bitmap, label: &CardLabel, template: &CardTemplate) -> FilmResult<Bitmap> {
    template.validate()?;

    let mut card = Bitmap::filled(template.width, template.height, template.paper)?;
    if !photo.is_empty() {
        let window = resize(&center_square(photo), template.image_size, template.image_size)?;
        blit(&mut card, &window, template.border, template.border);
    }

    let (band_top, band_h) = template.caption_band();
    if band_h > 0 && (!label.caption.trim().is_empty() || label.footer.is_some()) {
        let svg = caption_svg(label, template, band_top, band_h);
        let text = rasterize_svg(&svg, template.width, template.height)?;
        over_premul(&mut card, &text);
    }
    Ok(card)
}

/// Decode a print, compose it onto a card and encode the card as PNG.
#[tracing::instrument(level = "debug", skip(jpeg, template), fields(bytes = jpeg.len()))]
pub fn export_card(jpeg: &[u8], label: &CardLabel, template: &CardTemplate) -> FilmResult<Vec<u8>> {
    let photo = decode_image(jpeg)?;
    let card = render_card(&photo, label, template)?;
    encode_png(&card)
}

fn blit(dst: &mut Bitmap, src: &Bitmap, x0: u32, y0: u32) {
    let dst_stride = dst.width() as usize * 4;
    let src_stride = src.width() as usize * 4;
    let cols = src.width().min(dst.width().saturating_sub(x0)) as usize * 4;
    let rows = src.height().min(dst.height().saturating_sub(y0));
    for y in 0..rows as usize {
        let d = (y0 as usize + y) * dst_stride + x0 as usize * 4;
        let s = y * src_stride;
        dst.as_raw_mut()[d..d + cols].copy_from_slice(&src.as_raw()[s..s + cols]);
    }
}

/// Source-over of a premultiplied RGBA8 layer onto a straight-alpha bitmap of equal size.
fn over_premul(dst: &mut Bitmap, src_premul: &[u8]) {
    for (d, s) in dst.pixels_mut().zip(src_premul.chunks_exact(4)) {
        let sa = u32::from(s[3]);
        if sa == 0 {
            continue;
        }
        let inv = 255 - sa;
        for c in 0..3 {
            d[c] = ((u32::from(s[c]) * 255 + u32::from(d[c]) * inv + 127) / 255).min(255) as u8;
        }
        d[3] = (sa + (u32::from(d[3]) * inv + 127) / 255).min(255) as u8;
    }
}

fn caption_svg(label: &CardLabel, t: &CardTemplate, band_top: u32, band_h: u32) -> String {
    let cx = f64::from(t.width) / 2.0;
    let fs = f64::from(t.font_size);
    let ink = format!("#{:02x}{:02x}{:02x}", t.ink.r, t.ink.g, t.ink.b);
    let family = xml_escape(&t.font_family);

    let mut body = String::new();
    let caption_y = f64::from(band_top) + f64::from(band_h) * 0.45;
    body.push_str(&format!(
        r#"<text x="{cx}" y="{caption_y}" font-family="{family}" font-size="{fs}" fill="{ink}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
        xml_escape(label.caption.trim())
    ));
    if let Some(footer) = &label.footer {
        let footer_y = f64::from(band_top) + f64::from(band_h) * 0.75;
        let footer_fs = (fs * 0.5).max(8.0);
        body.push_str(&format!(
            r#"<text x="{cx}" y="{footer_y}" font-family="{family}" font-size="{footer_fs}" fill="{ink}" fill-opacity="0.6" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            xml_escape(footer)
        ));
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
        w = t.width,
        h = t.height,
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.faces().count(), "loaded system fonts for card captions");
            Arc::new(db)
        })
        .clone()
}

fn rasterize_svg(svg: &str, width: u32, height: u32) -> FilmResult<Vec<u8>> {
    let opts = usvg::Options {
        fontdb: system_fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse caption svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FilmError::validation("failed to allocate caption pixmap"))?;
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../tests/unit/card/card.rs"]
mod tests;
