mod utils;
pub mod app;
pub mod clients;
pub mod common;
pub mod coordinator;
pub mod data;
pub mod notify;
pub mod render;
pub mod state;
pub mod view;

use std::sync::Arc;
use crate::app::App;
use crate::clients::{HttpDetectionApi, HttpMediaHost};
use crate::coordinator::UploadCoordinator;
use crate::data::AppConfig;
use crate::notify::LogNotifier;
use crate::render::{OverlayRenderer, OverlayStyle, RasterSurface};

/// Builds the application shell against the configured HTTP endpoints and a raster overlay.
pub fn init_app(config: &AppConfig) -> anyhow::Result<App<RasterSurface>> {
    log::info!("Initializing vision_sense\n{}", config);

    let style = OverlayStyle::default();
    let mut surface = RasterSurface::new(style.font_px);
    let font = match &config.font_path {
        Some(path) => Some(RasterSurface::load_font(path)?),
        None => RasterSurface::system_sans_serif(),
    };
    match font {
        Some(font) => surface = surface.with_font(font),
        None => log::warn!("No usable font found; overlay labels are drawn without text"),
    }

    let coordinator = UploadCoordinator::new(
        Arc::new(HttpMediaHost::from_config(config)),
        Arc::new(HttpDetectionApi::new(config)),
    );

    Ok(App::new(coordinator, OverlayRenderer::new(style), surface, Box::new(LogNotifier)))
}
