//! RecordingObserver - 受け取った通知を順番に記録する（テスト・検証用）

use std::cell::RefCell;

use crate::domain::{Notification, ParticipantId};
use crate::ports::{EndObserver, ProgressObserver, StartObserver};

/// Appends every notification it receives to an ordered log.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    log: RefCell<Vec<Notification>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the log in delivery order.
    pub fn log(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, notification: Notification) {
        self.log.borrow_mut().push(notification);
    }
}

impl StartObserver for RecordingObserver {
    fn on_start(&self) {
        self.record(Notification::Started);
    }
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, step: u64, leader: &ParticipantId) {
        self.record(Notification::Progress {
            step,
            leader: leader.clone(),
        });
    }
}

impl EndObserver for RecordingObserver {
    fn on_end(&self, winner: &ParticipantId) {
        self.record(Notification::Ended {
            winner: winner.clone(),
        });
    }
}
