use serde::{Deserialize, Serialize};
use crate::common::Detection;

/// Response of the detection endpoint: the hosted image URL and its detections in
/// backend order.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub image_url: String,
    #[serde(default)]
    pub detections: Vec<Detection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_detections: Option<usize>,
}

impl DetectionResult {
    pub fn new(image_url: &str, detections: Vec<Detection>) -> Self {
        Self {
            image_url: image_url.to_string(),
            detections,
            total_detections: None,
        }
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Detection> {
        self.detections.get(index)
    }

    /// Highest confidence among the detections, `None` when there are none.
    pub fn highest_confidence(&self) -> Option<f32> {
        self.detections
            .iter()
            .map(|d| d.confidence)
            .fold(None, |acc, c| match acc {
                Some(best) if best >= c => Some(best),
                _ => Some(c),
            })
    }

    pub fn summary(&self) -> String {
        format!("{} objects detected", self.len())
    }
}
