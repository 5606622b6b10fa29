use crossbeam_channel::{Receiver, Sender};
use crate::app::AppEvent;

/// Carries events from worker completions back onto the single UI timeline.
#[derive(Debug, Clone)]
pub struct EventChannels {
    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,
}

impl EventChannels {
    pub fn new() -> Self {
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        Self { event_tx, event_rx }
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }
}

impl Default for EventChannels {
    fn default() -> Self {
        Self::new()
    }
}
