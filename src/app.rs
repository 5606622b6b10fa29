use crate::common::{DetectionResult, DisplayedImage, SelectedFile};
use crate::coordinator::{UploadCoordinator, UploadJob};
use crate::notify::{self, Notifier};
use crate::render::{OverlayRenderer, OverlaySurface};
use crate::state::AppState;
use crate::view::PanelView;

/// Discrete inputs on the page's single timeline.
#[derive(Debug)]
pub enum AppEvent {
    FileSelected(Option<SelectedFile>),
    DetectRequested,
    UploadFinished(anyhow::Result<DetectionResult>),
    ImageLoaded {
        natural_width: u32,
        natural_height: u32,
        client_width: u32,
        client_height: u32,
    },
    Resized {
        client_width: u32,
        client_height: u32,
    },
    PointerEntered(usize),
    PointerLeft,
}

/// Application shell: owns the state and redraws the overlay after every change to it.
pub struct App<S: OverlaySurface> {
    state: AppState,
    coordinator: UploadCoordinator,
    renderer: OverlayRenderer,
    surface: S,
    notifier: Box<dyn Notifier>,
    overlay_drawn: bool,
}

impl<S: OverlaySurface> App<S> {
    pub fn new(
        coordinator: UploadCoordinator,
        renderer: OverlayRenderer,
        surface: S,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            state: AppState::new(),
            coordinator,
            renderer,
            surface,
            notifier,
            overlay_drawn: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    pub fn view(&self) -> PanelView {
        PanelView::from_state(&self.state)
    }

    /// Applies one event. A started upload is returned for the caller to run; its
    /// outcome must come back as [`AppEvent::UploadFinished`].
    pub fn handle(&mut self, event: AppEvent) -> Option<UploadJob> {
        match event {
            AppEvent::FileSelected(file) => {
                if let Some(file) = &file {
                    log::info!("Selected {} ({} bytes)", file.name, file.len());
                }
                self.state.selected_file = file;
            }
            AppEvent::DetectRequested => return self.begin_upload(),
            AppEvent::UploadFinished(outcome) => self.finish_upload(outcome),
            AppEvent::ImageLoaded {
                natural_width,
                natural_height,
                client_width,
                client_height,
            } => {
                if self.state.result.is_none() {
                    log::debug!("Image loaded without a result; ignoring");
                    return None;
                }
                self.state.displayed = Some(DisplayedImage::new(
                    natural_width,
                    natural_height,
                    client_width,
                    client_height,
                ));
                self.redraw();
            }
            AppEvent::Resized { client_width, client_height } => {
                if let Some(displayed) = self.state.displayed {
                    let resized = displayed.with_client_size(client_width, client_height);
                    self.state.displayed = Some(resized);
                    self.redraw();
                }
            }
            AppEvent::PointerEntered(index) => {
                if self.state.hover(index) {
                    self.redraw();
                }
            }
            AppEvent::PointerLeft => {
                self.state.unhover();
                self.redraw();
            }
        }
        None
    }

    pub fn begin_upload(&mut self) -> Option<UploadJob> {
        let job = self.coordinator.begin(&mut self.state)?;
        self.clear_stale_overlay();
        Some(job)
    }

    pub fn finish_upload(&mut self, outcome: anyhow::Result<DetectionResult>) {
        if let Err(err) = UploadCoordinator::finish(&mut self.state, outcome) {
            log::error!("{:?}", err);
            self.notifier.alert(&notify::failure_message(&err));
        }
        self.clear_stale_overlay();
        self.redraw();
    }

    /// Full upload → detect cycle on the current timeline.
    /// Dropped when busy or no file is selected.
    pub async fn detect_objects(&mut self) {
        let Some(job) = self.begin_upload() else {
            return;
        };
        let outcome = job.run().await;
        self.finish_upload(outcome);
    }

    /// Re-renders the overlay from the current result, highlight and displayed size.
    pub fn redraw(&mut self) -> bool {
        let drawn = self.renderer.draw(
            &mut self.surface,
            self.state.displayed.as_ref(),
            self.state.detections(),
            self.state.highlight.index(),
        );
        self.overlay_drawn |= drawn;
        drawn
    }

    /// Blanks the surface once its displayed image is gone, so no boxes outlive their result.
    fn clear_stale_overlay(&mut self) {
        if self.state.displayed.is_none() && self.overlay_drawn {
            log::debug!("Clearing overlay of the previous result");
            self.surface.reset(0, 0);
            self.overlay_drawn = false;
        }
    }
}
