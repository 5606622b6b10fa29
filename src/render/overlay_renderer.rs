use crate::common::{Detection, DisplayedImage, ScaledRect};
use crate::render::{OverlayStyle, OverlaySurface};

/// Draws detections, given in natural image pixels, over a responsively scaled image.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    style: OverlayStyle,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Full redraw of every detection, with `highlight` emphasised.
    ///
    /// Without a displayed image or with no detections the surface is left untouched,
    /// not even cleared. Returns whether anything was drawn.
    pub fn draw<S: OverlaySurface + ?Sized>(
        &self,
        surface: &mut S,
        image: Option<&DisplayedImage>,
        detections: Option<&[Detection]>,
        highlight: Option<usize>,
    ) -> bool {
        let (Some(image), Some(detections)) = (image, detections) else {
            return false;
        };
        if detections.is_empty() {
            return false;
        }
        let Some(scale) = image.scale() else {
            log::warn!("Skipping overlay: image has no natural size");
            return false;
        };

        let (width, height) = image.client_dimensions();
        surface.reset(width, height);

        for (i, det) in detections.iter().enumerate() {
            let active = highlight == Some(i);
            let rect = scale.apply(&det.bbox);
            self.draw_box(surface, rect, active);
            self.draw_label(surface, rect, &det.get_label(), active);
        }

        log::trace!(
            "Overlay redrawn: {} detections at {}x{}, highlight {:?}",
            detections.len(),
            width,
            height,
            highlight
        );
        true
    }

    fn draw_box<S>(&self, surface: &mut S, rect: ScaledRect, active: bool)
    where
        S: OverlaySurface + ?Sized,
    {
        let (line_width, color) = self.style.stroke_for(active);
        surface.stroke_rect(rect, line_width, color);
    }

    fn draw_label<S>(&self, surface: &mut S, rect: ScaledRect, label: &str, active: bool)
    where
        S: OverlaySurface + ?Sized,
    {
        let style = &self.style;
        let text_width = surface.measure_text(label);

        let label_x = rect.x;
        let baseline = style.label_baseline(rect.y);

        let background = ScaledRect::new(
            label_x,
            baseline - style.label_ascent,
            text_width + style.label_padding * 2.,
            style.label_height,
        );
        surface.fill_rect(background, style.label_fill_for(active));
        surface.fill_text(label, label_x + style.label_padding, baseline, style.text);
    }
}
