use std::sync::Arc;
use std::time::Instant;
use anyhow::Context;
use crate::clients::{DetectionApi, MediaHost};
use crate::common::{DetectionResult, SelectedFile};
use crate::state::AppState;
use crate::utils;

/// Runs the upload → detect sequence, one attempt at a time.
///
/// `begin` is the guard: it hands out at most one [`UploadJob`] until `finish` is called.
#[derive(Clone)]
pub struct UploadCoordinator {
    media_host: Arc<dyn MediaHost>,
    detection_api: Arc<dyn DetectionApi>,
}

/// A single in-flight attempt. It owns everything it needs, so it can run off the UI timeline.
pub struct UploadJob {
    file: SelectedFile,
    media_host: Arc<dyn MediaHost>,
    detection_api: Arc<dyn DetectionApi>,
}

impl UploadCoordinator {
    pub fn new(media_host: Arc<dyn MediaHost>, detection_api: Arc<dyn DetectionApi>) -> Self {
        Self {
            media_host,
            detection_api,
        }
    }

    /// Starts an attempt, or returns `None` when no file is selected or one is already running.
    ///
    /// On start the previous result, highlight and displayed image are cleared.
    pub fn begin(&self, state: &mut AppState) -> Option<UploadJob> {
        if state.busy {
            log::debug!("Upload already in progress; ignoring trigger");
            return None;
        }
        let file = state.selected_file.clone()?;

        state.busy = true;
        state.clear_result();

        Some(UploadJob {
            file,
            media_host: Arc::clone(&self.media_host),
            detection_api: Arc::clone(&self.detection_api),
        })
    }

    /// Applies the outcome of the attempt and clears the busy flag either way.
    ///
    /// On failure the result stays unset and the error is handed back for reporting.
    pub fn finish(
        state: &mut AppState,
        outcome: anyhow::Result<DetectionResult>,
    ) -> anyhow::Result<()> {
        state.busy = false;
        match outcome {
            Ok(result) => {
                log::info!("Detection finished: {}", result.summary());
                state.set_result(result);
                Ok(())
            }
            Err(err) => {
                state.clear_result();
                Err(err)
            }
        }
    }
}

impl UploadJob {
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    /// Uploads the file, then asks for detections on the hosted URL. Blocks on both calls.
    pub fn run_blocking(&self) -> anyhow::Result<DetectionResult> {
        let start = Instant::now();
        let mut elapsed = start.elapsed();

        let image_url = self.media_host.upload(&self.file)?;
        elapsed = utils::trace("TIME", "Upload", start, elapsed);

        let result = self.detection_api.detect(&image_url)?;
        utils::trace("TIME", "Detection", start, elapsed);

        Ok(result)
    }

    /// Runs the attempt on tokio's blocking pool.
    pub async fn run(self) -> anyhow::Result<DetectionResult> {
        tokio::task::spawn_blocking(move || self.run_blocking())
            .await
            .context("upload task panicked")?
    }
}
