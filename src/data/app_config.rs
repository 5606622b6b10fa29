//! Deployment options for the client: where to upload, where to detect, how to draw.

use std::fmt;
use std::path::PathBuf;
use anyhow::{anyhow, Context, Result};
use url::Url;

pub const DEFAULT_UPLOAD_URL: &str = "https://api.cloudinary.com/v1_1/dtbytfxzs/image/upload";
pub const DEFAULT_UPLOAD_PRESET: &str = "object";
pub const DEFAULT_DISPLAY_MAX_WIDTH: u32 = 640;
pub const DEFAULT_DISPLAY_MAX_HEIGHT: u32 = 420;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub upload_url: String,
    pub upload_preset: String,
    pub font_path: Option<PathBuf>,
    pub display_max_width: u32,
    pub display_max_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            font_path: None,
            display_max_width: DEFAULT_DISPLAY_MAX_WIDTH,
            display_max_height: DEFAULT_DISPLAY_MAX_HEIGHT,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_backend_url(mut self, backend_url: &str) -> Self {
        self.backend_url = backend_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_upload_url(mut self, upload_url: &str) -> Self {
        self.upload_url = upload_url.to_string();
        self
    }

    pub fn with_upload_preset(mut self, upload_preset: &str) -> Self {
        self.upload_preset = upload_preset.to_string();
        self
    }

    pub fn with_font_path(mut self, font_path: Option<PathBuf>) -> Self {
        self.font_path = font_path;
        self
    }

    pub fn with_display_bounds(mut self, max_width: u32, max_height: u32) -> Self {
        self.display_max_width = max_width;
        self.display_max_height = max_height;
        self
    }

    /// Checks that both endpoints are absolute http(s) URLs and the display bounds are usable.
    pub fn validate(self) -> Result<Self> {
        if self.backend_url.is_empty() {
            return Err(anyhow!("backend url is not configured"));
        }
        check_http_url(&self.backend_url).context("invalid backend url")?;
        check_http_url(&self.upload_url).context("invalid upload url")?;
        if self.upload_preset.is_empty() {
            return Err(anyhow!("upload preset must not be empty"));
        }
        if self.display_max_width == 0 || self.display_max_height == 0 {
            return Err(anyhow!(
                "display bounds must be non-zero, got {}x{}",
                self.display_max_width,
                self.display_max_height
            ));
        }
        Ok(self)
    }

    pub fn detect_url(&self) -> String {
        format!("{}/detect", self.backend_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/", self.backend_url)
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Backend URL: {}\n\
        Upload URL: {}\n\
        Upload Preset: {}\n\
        Font Path: {}\n\
        Display Bounds: {}x{}",
               self.backend_url, self.upload_url, self.upload_preset,
               self.font_path
                   .as_ref()
                   .map(|p| p.display().to_string())
                   .unwrap_or_else(|| "none".to_string()),
               self.display_max_width, self.display_max_height)
    }
}

fn check_http_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw).with_context(|| format!("parse url '{}'", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow!("unsupported scheme '{}'; expected http(s)", other)),
    }
}
