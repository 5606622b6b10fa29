use crate::common::{Detection, DetectionResult, DisplayedImage, SelectedFile};

/// Hover selection over the detection list. At most one entry is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight(Option<usize>);

impl Highlight {
    pub fn enter(&mut self, index: usize) {
        self.0 = Some(index);
    }

    pub fn leave(&mut self) {
        self.0 = None;
    }

    pub fn index(&self) -> Option<usize> {
        self.0
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.0 == Some(index)
    }
}

/// Everything the page shows, owned by the application shell.
///
/// The overlay is a function of `result`, `highlight` and `displayed` only.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub selected_file: Option<SelectedFile>,
    pub result: Option<DetectionResult>,
    pub highlight: Highlight,
    pub busy: bool,
    pub displayed: Option<DisplayedImage>,
}

impl AppState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn detections(&self) -> Option<&[Detection]> {
        self.result.as_ref().map(|r| r.detections.as_slice())
    }

    pub fn detection_count(&self) -> usize {
        self.result.as_ref().map_or(0, |r| r.len())
    }

    /// Hover over list entry `index`; ignored when no such entry exists.
    pub fn hover(&mut self, index: usize) -> bool {
        if index >= self.detection_count() {
            log::debug!("Ignoring hover on missing entry {}", index);
            return false;
        }
        self.highlight.enter(index);
        true
    }

    pub fn unhover(&mut self) {
        self.highlight.leave();
    }

    /// Drops the previous result and everything derived from it.
    pub fn clear_result(&mut self) {
        self.result = None;
        self.highlight.leave();
        self.displayed = None;
    }

    /// Installs a fresh result. The highlight always starts empty.
    pub fn set_result(&mut self, result: DetectionResult) {
        self.result = Some(result);
        self.highlight.leave();
        self.displayed = None;
    }

    pub fn can_detect(&self) -> bool {
        !self.busy && self.selected_file.is_some()
    }
}
