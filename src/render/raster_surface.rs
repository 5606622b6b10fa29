use std::path::Path;
use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont};
use anyhow::Context;
use fontdb::{Database, Family, Query};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size, Blend,
};
use imageproc::rect::Rect;
use crate::common::ScaledRect;
use crate::render::OverlaySurface;

/// Average advance of a proportional glyph relative to the font size, used when no font is loaded.
const FALLBACK_ADVANCE: f32 = 0.6;

/// Tried in order after the generic sans-serif family.
const SANS_SERIF_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Arial",
];

/// Transparent RGBA canvas drawn with imageproc.
///
/// Without a font, label text is measured with a fixed advance and not rasterised.
/// [`RasterSurface::system_sans_serif`] finds one among the installed fonts.
#[derive(Clone)]
pub struct RasterSurface {
    canvas: RgbaImage,
    font: Option<FontArc>,
    font_px: f32,
}

impl RasterSurface {
    pub fn new(font_px: f32) -> Self {
        Self {
            canvas: RgbaImage::new(0, 0),
            font: None,
            font_px,
        }
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn load_font(path: &Path) -> anyhow::Result<FontArc> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read font {}", path.display()))?;
        FontArc::try_from_vec(bytes)
            .with_context(|| format!("failed to parse font {}", path.display()))
    }

    /// Picks a sans-serif face from the installed system fonts, or any face at all.
    pub fn system_sans_serif() -> Option<FontArc> {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Found {} system font faces", db.len());

        let mut families = vec![Family::SansSerif];
        families.extend(SANS_SERIF_FAMILIES.iter().map(|name| Family::Name(*name)));
        let query = Query {
            families: families.as_slice(),
            ..Query::default()
        };
        let id = db.query(&query).or_else(|| db.faces().next().map(|face| face.id))?;

        let font = db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
            })
            .flatten()?;
        if let Some(face) = db.face(id) {
            log::info!("Overlay labels use system font {}", face.post_script_name);
        }
        Some(FontArc::new(font))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Stacks the overlay on top of `base`. The overlay is anchored at the top-left corner.
    pub fn composite_over(&self, base: &RgbaImage) -> RgbaImage {
        let mut out = base.clone();
        imageops::overlay(&mut out, &self.canvas, 0, 0);
        out
    }

    fn scale(&self) -> PxScale {
        PxScale::from(self.font_px)
    }
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("dimensions", &self.canvas.dimensions())
            .field("font", &self.font.is_some())
            .field("font_px", &self.font_px)
            .finish()
    }
}

fn to_pixel_rect(rect: ScaledRect) -> Option<Rect> {
    let rect = rect.normalized();
    let w = rect.w.round();
    let h = rect.h.round();
    if w < 1. || h < 1. {
        return None;
    }
    Some(Rect::at(rect.x.round() as i32, rect.y.round() as i32).of_size(w as u32, h as u32))
}

impl OverlaySurface for RasterSurface {
    fn reset(&mut self, width: u32, height: u32) {
        self.canvas = RgbaImage::new(width, height);
    }

    fn stroke_rect(&mut self, rect: ScaledRect, line_width: f32, color: Rgba<u8>) {
        // One-pixel rings from the outer edge inwards, so the line straddles the box edge.
        let outer = rect.normalized().outset(line_width / 2.);
        let rings = line_width.round().max(1.) as u32;
        for i in 0..rings {
            if let Some(ring) = to_pixel_rect(outer.outset(-(i as f32))) {
                draw_hollow_rect_mut(&mut self.canvas, ring, color);
            }
        }
    }

    fn fill_rect(&mut self, rect: ScaledRect, color: Rgba<u8>) {
        let Some(rect) = to_pixel_rect(rect) else {
            return;
        };
        let mut blend = Blend(std::mem::replace(&mut self.canvas, RgbaImage::new(0, 0)));
        draw_filled_rect_mut(&mut blend, rect, color);
        self.canvas = blend.0;
    }

    fn measure_text(&self, text: &str) -> f32 {
        match &self.font {
            Some(font) => text_size(self.scale(), font, text).0 as f32,
            None => text.chars().count() as f32 * self.font_px * FALLBACK_ADVANCE,
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgba<u8>) {
        let Some(font) = &self.font else {
            return;
        };
        let scale = self.scale();
        let ascent = font.as_scaled(scale).ascent();
        let top = (y - ascent).round() as i32;
        draw_text_mut(&mut self.canvas, color, x.round() as i32, top, scale, font, text);
    }
}
