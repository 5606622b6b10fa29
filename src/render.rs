mod overlay_renderer;
mod overlay_style;
mod raster_surface;
mod surface;

pub use overlay_renderer::OverlayRenderer;
pub use overlay_style::OverlayStyle;
pub use raster_surface::RasterSurface;
pub use surface::OverlaySurface;
