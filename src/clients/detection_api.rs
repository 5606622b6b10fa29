use std::time::Instant;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use crate::common::DetectionResult;
use crate::data::AppConfig;

/// Remote object detection over a hosted image URL.
pub trait DetectionApi: Send + Sync {
    fn detect(&self, image_url: &str) -> Result<DetectionResult>;
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    image_url: &'a str,
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Deserialize)]
struct BackendError {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

/// Answer of the backend root route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// JSON client for a detection backend exposing `POST /detect` and `GET /`.
#[derive(Debug, Clone)]
pub struct HttpDetectionApi {
    agent: ureq::Agent,
    detect_url: String,
    health_url: String,
}

impl HttpDetectionApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            detect_url: config.detect_url(),
            health_url: config.health_url(),
        }
    }

    pub fn detect_url(&self) -> &str {
        &self.detect_url
    }

    pub fn health(&self) -> Result<BackendHealth> {
        let response = self
            .agent
            .get(&self.health_url)
            .call()
            .with_context(|| format!("Backend health check failed for {}", self.health_url))?;
        response.into_json().context("Malformed backend health response")
    }
}

impl DetectionApi for HttpDetectionApi {
    fn detect(&self, image_url: &str) -> Result<DetectionResult> {
        let start = Instant::now();
        log::info!("Requesting detections for {}", image_url);

        let response = match self
            .agent
            .post(&self.detect_url)
            .send_json(DetectRequest { image_url })
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                if let Ok(body) = response.into_json::<BackendError>() {
                    let details = body.details.unwrap_or_default();
                    log::warn!("Detection backend error: {} ({})", body.error, details);
                }
                return Err(anyhow!("Detection API request failed (HTTP {})", code));
            }
            Err(err) => return Err(anyhow::Error::new(err).context("Detection API request failed")),
        };

        let result: DetectionResult = response
            .into_json()
            .context("Malformed detection response")?;
        log::debug!("Received {} detections in {:.2?}", result.len(), start.elapsed());
        Ok(result)
    }
}
