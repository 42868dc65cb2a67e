//! Lifecycle module: the Subject state machine and its status view.

pub mod status;
pub mod subject;

pub use status::SubjectStatus;
pub use subject::Subject;
