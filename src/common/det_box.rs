use serde::{Deserialize, Serialize};

/// Axis-aligned box in natural (unscaled) image pixels, as returned by the detection backend.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, PartialOrd)]
pub struct DetBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Rectangle in displayed (scaled) pixel space, stored as origin plus size.
#[derive(Default, Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaledRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl DetBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Maps the box into displayed space with independent horizontal and vertical factors.
    ///
    /// No clamping is applied: boxes outside the image keep their (possibly negative or
    /// overflowing) coordinates.
    pub fn scaled(&self, sx: f32, sy: f32) -> ScaledRect {
        ScaledRect {
            x: self.x1 * sx,
            y: self.y1 * sy,
            w: self.width() * sx,
            h: self.height() * sy,
        }
    }
}

impl ScaledRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Same rectangle with non-negative width and height.
    pub fn normalized(&self) -> Self {
        let (x, w) = if self.w < 0. { (self.x + self.w, -self.w) } else { (self.x, self.w) };
        let (y, h) = if self.h < 0. { (self.y + self.h, -self.h) } else { (self.y, self.h) };
        Self { x, y, w, h }
    }

    /// Grows the rectangle by `d` on every side; negative `d` shrinks it.
    pub fn outset(&self, d: f32) -> Self {
        Self {
            x: self.x - d,
            y: self.y - d,
            w: self.w + 2. * d,
            h: self.h + 2. * d,
        }
    }
}
