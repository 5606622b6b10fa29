use image::Rgba;

/// Stroke, label and text styling for default and highlighted detections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub line_width: f32,
    pub active_line_width: f32,
    pub stroke: Rgba<u8>,
    pub active_stroke: Rgba<u8>,
    pub label_fill: Rgba<u8>,
    pub active_label_fill: Rgba<u8>,
    pub text: Rgba<u8>,
    pub font_px: f32,
    /// Horizontal padding on each side of the label text.
    pub label_padding: f32,
    pub label_height: f32,
    /// Distance from the box top edge to the label baseline.
    pub label_offset: f32,
    /// Space needed above the box before the label flips below it.
    pub label_clearance: f32,
    /// Distance from the label top edge to the text baseline.
    pub label_ascent: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_width: 2.,
            active_line_width: 4.,
            stroke: Rgba([34, 197, 94, 255]),        // #22c55e
            active_stroke: Rgba([250, 204, 21, 255]), // #facc15
            label_fill: Rgba([34, 197, 94, 230]),
            active_label_fill: Rgba([250, 204, 21, 242]),
            text: Rgba([15, 23, 42, 255]),           // #0f172a
            font_px: 12.,
            label_padding: 6.,
            label_height: 20.,
            label_offset: 18.,
            label_clearance: 24.,
            label_ascent: 14.,
        }
    }
}

impl OverlayStyle {
    pub fn stroke_for(&self, active: bool) -> (f32, Rgba<u8>) {
        if active {
            (self.active_line_width, self.active_stroke)
        } else {
            (self.line_width, self.stroke)
        }
    }

    pub fn label_fill_for(&self, active: bool) -> Rgba<u8> {
        if active {
            self.active_label_fill
        } else {
            self.label_fill
        }
    }

    /// Baseline y for a label anchored at a box whose top edge is `box_top`.
    ///
    /// The label sits above the box unless that would leave the top of the surface;
    /// the bottom edge is not checked.
    pub fn label_baseline(&self, box_top: f32) -> f32 {
        if box_top - self.label_clearance < 0. {
            box_top + self.label_offset
        } else {
            box_top - self.label_offset
        }
    }
}
