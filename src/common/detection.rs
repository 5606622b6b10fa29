use serde::{Deserialize, Serialize};
use crate::common::DetBox;

/// One recognised object instance, immutable once received from the backend.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub object: String,
    pub confidence: f32,
    #[serde(rename = "box")]
    pub bbox: DetBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Detection {
    pub fn new(object: &str, confidence: f32, bbox: DetBox) -> Self {
        Self {
            object: object.to_string(),
            confidence,
            bbox,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Confidence as a whole percentage. Values outside `[0, 1]` are passed through.
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence * 100.).round() as i64
    }

    /// Overlay and list label, e.g. `"cat 93%"`.
    pub fn get_label(&self) -> String {
        format!("{} {}%", self.object, self.confidence_percent())
    }
}
