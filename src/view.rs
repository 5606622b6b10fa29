//! Text view model of the page: preview badge, upload card and detection list.

use std::fmt;
use crate::state::AppState;

pub const NO_IMAGE_PLACEHOLDER: &str = "No image selected";
pub const NO_RESULT_MESSAGE: &str = "Results will appear here after running detection on an image.";
pub const NO_DETECTIONS_MESSAGE: &str =
    "No objects detected. Try a different image or adjust backend thresholds.";
pub const DETECT_LABEL: &str = "Detect Objects";
pub const DETECTING_LABEL: &str = "Detecting…";

#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub object: String,
    pub percent: String,
    pub description: Option<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    /// "N objects detected", present whenever a result is shown.
    pub badge: Option<String>,
    pub preview_placeholder: Option<&'static str>,
    pub image_url: Option<String>,
    pub selected_file: Option<String>,
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub highest: Option<String>,
    pub list_message: Option<&'static str>,
    pub entries: Vec<EntryView>,
}

impl PanelView {
    pub fn from_state(state: &AppState) -> Self {
        let result = state.result.as_ref();

        let entries = result
            .map(|r| {
                r.detections
                    .iter()
                    .enumerate()
                    .map(|(i, det)| EntryView {
                        object: det.object.clone(),
                        percent: format!("{}%", det.confidence_percent()),
                        description: det.description.clone(),
                        highlighted: state.highlight.is_active(i),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let list_message = match result {
            None => Some(NO_RESULT_MESSAGE),
            Some(r) if r.is_empty() => Some(NO_DETECTIONS_MESSAGE),
            Some(_) => None,
        };

        Self {
            badge: result.map(|r| r.summary()),
            preview_placeholder: result.is_none().then_some(NO_IMAGE_PLACEHOLDER),
            image_url: result.map(|r| r.image_url.clone()),
            selected_file: state.selected_file.as_ref().map(|f| format!("Selected: {}", f.name)),
            button_label: if state.busy { DETECTING_LABEL } else { DETECT_LABEL },
            button_enabled: state.can_detect(),
            highest: result
                .and_then(|r| r.highest_confidence())
                .map(|c| format!("{}%", (c * 100.).round() as i64)),
            list_message,
            entries,
        }
    }

    pub fn highlighted_entry(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.highlighted)
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Preview ==")?;
        if let Some(placeholder) = self.preview_placeholder {
            writeln!(f, "  {}", placeholder)?;
        }
        if let Some(url) = &self.image_url {
            writeln!(f, "  {}", url)?;
        }
        if let Some(badge) = &self.badge {
            writeln!(f, "  [{}]", badge)?;
        }

        writeln!(f, "== Upload image ==")?;
        if let Some(selected) = &self.selected_file {
            writeln!(f, "  {}", selected)?;
        }
        let state = if self.button_enabled { "" } else { " (disabled)" };
        writeln!(f, "  [{}]{}", self.button_label, state)?;

        match &self.highest {
            Some(highest) => writeln!(f, "== Detected objects == Highest: {}", highest)?,
            None => writeln!(f, "== Detected objects ==")?,
        }
        if let Some(message) = self.list_message {
            writeln!(f, "  {}", message)?;
        }
        for entry in &self.entries {
            let marker = if entry.highlighted { '>' } else { '-' };
            writeln!(f, "  {} {} {}", marker, entry.object, entry.percent)?;
            if let Some(description) = &entry.description {
                writeln!(f, "      {}", description)?;
            }
        }
        Ok(())
    }
}
