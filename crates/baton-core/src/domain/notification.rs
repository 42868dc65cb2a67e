//! Notification - Observer が受け取った通知の記録形式

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ParticipantId;

/// One notification delivered to an observer: kind + payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    Started,
    Progress { step: u64, leader: ParticipantId },
    Ended { winner: ParticipantId },
}

impl Notification {
    pub fn progress(step: u64, leader: impl Into<ParticipantId>) -> Self {
        Notification::Progress {
            step,
            leader: leader.into(),
        }
    }

    pub fn ended(winner: impl Into<ParticipantId>) -> Self {
        Notification::Ended {
            winner: winner.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Started => f.write_str("on_start"),
            Notification::Progress { step, leader } => write!(f, "on_progress({step}, {leader})"),
            Notification::Ended { winner } => write!(f, "on_end({winner})"),
        }
    }
}
