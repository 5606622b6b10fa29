use std::time::Instant;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use crate::clients::MultipartForm;
use crate::common::SelectedFile;
use crate::data::AppConfig;

/// Stores an image somewhere publicly reachable and returns its URL.
pub trait MediaHost: Send + Sync {
    fn upload(&self, file: &SelectedFile) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Unsigned preset upload to an HTTP media API that answers with `{ "secure_url": ... }`.
#[derive(Debug, Clone)]
pub struct HttpMediaHost {
    agent: ureq::Agent,
    upload_url: String,
    upload_preset: String,
}

impl HttpMediaHost {
    pub fn new(upload_url: &str, upload_preset: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            upload_url: upload_url.to_string(),
            upload_preset: upload_preset.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.upload_url, &config.upload_preset)
    }
}

impl MediaHost for HttpMediaHost {
    fn upload(&self, file: &SelectedFile) -> Result<String> {
        let start = Instant::now();
        let (content_type, body) = MultipartForm::new()
            .file("file", &file.name, &file.content_type, &file.bytes)
            .text("upload_preset", &self.upload_preset)
            .finish();

        log::info!("Uploading {} ({} bytes) to {}", file.name, file.len(), self.upload_url);
        let response = match self
            .agent
            .post(&self.upload_url)
            .set("Content-Type", &content_type)
            .send_bytes(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(anyhow!("Failed to upload image to media host (HTTP {})", code));
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context("Failed to upload image to media host"))
            }
        };

        let uploaded: UploadResponse = response
            .into_json()
            .context("Malformed media host response")?;
        log::debug!("Upload finished in {:.2?}: {}", start.elapsed(), uploaded.secure_url);
        Ok(uploaded.secure_url)
    }
}
