use crate::common::{DetBox, ScaledRect};

/// Natural pixel size of an image together with the size it is currently displayed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayedImage {
    pub natural_width: u32,
    pub natural_height: u32,
    pub client_width: u32,
    pub client_height: u32,
}

/// Independent horizontal and vertical factors from natural to displayed space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScaleFactors {
    pub sx: f32,
    pub sy: f32,
}

impl ScaleFactors {
    pub fn apply(&self, bbox: &DetBox) -> ScaledRect {
        bbox.scaled(self.sx, self.sy)
    }
}

impl DisplayedImage {
    pub fn new(
        natural_width: u32,
        natural_height: u32,
        client_width: u32,
        client_height: u32,
    ) -> Self {
        Self {
            natural_width,
            natural_height,
            client_width,
            client_height,
        }
    }

    /// Aspect-preserving fit of the natural size into `max_width` x `max_height`.
    pub fn fit(natural_width: u32, natural_height: u32, max_width: u32, max_height: u32) -> Self {
        let mut displayed = Self::new(natural_width, natural_height, 0, 0);
        if natural_width == 0 || natural_height == 0 {
            return displayed;
        }
        let ratio = (max_width as f32 / natural_width as f32)
            .min(max_height as f32 / natural_height as f32);
        displayed.client_width = (natural_width as f32 * ratio).round() as u32;
        displayed.client_height = (natural_height as f32 * ratio).round() as u32;
        displayed
    }

    /// Same image shown at a new display size (the container was resized).
    pub fn with_client_size(mut self, client_width: u32, client_height: u32) -> Self {
        self.client_width = client_width;
        self.client_height = client_height;
        self
    }

    /// `None` when the natural size is degenerate and no transform exists.
    pub fn scale(&self) -> Option<ScaleFactors> {
        if self.natural_width == 0 || self.natural_height == 0 {
            return None;
        }
        Some(ScaleFactors {
            sx: self.client_width as f32 / self.natural_width as f32,
            sy: self.client_height as f32 / self.natural_height as f32,
        })
    }

    pub fn client_dimensions(&self) -> (u32, u32) {
        (self.client_width, self.client_height)
    }

    pub fn natural_dimensions(&self) -> (u32, u32) {
        (self.natural_width, self.natural_height)
    }
}
