//! Lifecycle state machine for a Subject.

use serde::{Deserialize, Serialize};

/// Subject lifecycle state.
///
/// State transitions:
/// - Idle -> Running -> Ended
///
/// Each transition happens exactly once; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Created, not started. Participants and observer may still change.
    Idle,

    /// Started; `advance` moves progress forward.
    Running,

    /// Finished. No further transitions.
    Ended,
}

impl LifecycleState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Ended)
    }

    /// Can the observer slot or participant sequence be changed?
    pub fn accepts_wiring(self) -> bool {
        matches!(self, LifecycleState::Idle)
    }
}

/// Serializable view of LifecycleState.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStateView {
    Idle,
    Running,
    Ended,
}

impl From<LifecycleState> for LifecycleStateView {
    fn from(state: LifecycleState) -> Self {
        match state {
            LifecycleState::Idle => LifecycleStateView::Idle,
            LifecycleState::Running => LifecycleStateView::Running,
            LifecycleState::Ended => LifecycleStateView::Ended,
        }
    }
}
