//! TracingObserver - 通知を tracing のイベントとして出力する

use tracing::info;

use crate::domain::ParticipantId;
use crate::ports::{EndObserver, ProgressObserver, StartObserver};

/// Logs each notification at info level under a fixed label.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    label: String,
}

impl TracingObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new("observer")
    }
}

impl StartObserver for TracingObserver {
    fn on_start(&self) {
        info!(observer = %self.label, "on_start");
    }
}

impl ProgressObserver for TracingObserver {
    fn on_progress(&self, step: u64, leader: &ParticipantId) {
        info!(observer = %self.label, step, %leader, "on_progress");
    }
}

impl EndObserver for TracingObserver {
    fn on_end(&self, winner: &ParticipantId) {
        info!(observer = %self.label, %winner, "on_end");
    }
}
