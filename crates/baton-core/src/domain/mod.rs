//! Domain model (ids, lifecycle state, notifications, errors).

pub mod ids;
pub mod state;
pub mod notification;
pub mod errors;

pub use self::ids::{Id, IdMarker, ParticipantId, SubjectId};
pub use self::state::{LifecycleState, LifecycleStateView};
pub use self::notification::Notification;
pub use self::errors::{LifecycleError, Operation};
