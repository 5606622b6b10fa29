use image::Rgba;
use crate::common::ScaledRect;

/// 2D drawing target stacked over the displayed image.
///
/// Coordinates are displayed-space pixels and may lie outside the surface.
/// Implementations clip rather than clamp.
pub trait OverlaySurface {
    /// Resizes the backing store to `width` x `height`, discarding everything drawn so far.
    fn reset(&mut self, width: u32, height: u32);

    /// Strokes the outline of `rect` with a line of `line_width` centred on the edge.
    fn stroke_rect(&mut self, rect: ScaledRect, line_width: f32, color: Rgba<u8>);

    /// Fills `rect`, blending with what is already there.
    fn fill_rect(&mut self, rect: ScaledRect, color: Rgba<u8>);

    /// Advance width of `text` in pixels at the surface font size.
    fn measure_text(&self, text: &str) -> f32;

    /// Draws `text` with its left edge at `x` and its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgba<u8>);
}
