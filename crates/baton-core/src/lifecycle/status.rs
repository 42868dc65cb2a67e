use serde::{Deserialize, Serialize};

use crate::domain::{LifecycleStateView, ParticipantId, SubjectId};

/// Subject status for reporting.
///
/// This is a serializable snapshot of a Subject's current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStatus {
    pub subject_id: SubjectId,
    pub state: LifecycleStateView,
    pub participants: Vec<ParticipantId>,
    pub progress: u64,
    pub leader: Option<ParticipantId>,
    pub has_observer: bool,
    /// Milliseconds since the Unix epoch (negative before 1970).
    pub created_at_ms: i64,
    pub started_at_ms: Option<i64>,
    pub ended_at_ms: Option<i64>,
}
