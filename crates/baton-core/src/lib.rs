//! baton-core
//!
//! Observer/delegate notifications for a small Idle → Running → Ended lifecycle.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, state, notification, errors）
//! - **ports**: 抽象化レイヤー（LifecycleObserver, Clock, IdGenerator）
//! - **lifecycle**: Subject（状態遷移と通知）と SubjectStatus
//! - **impls**: Observer 実装（RecordingObserver, TracingObserver, ClosureObserver）
//! - **app**: SubjectBuilder（ワイヤリングと起動時検証）

pub mod domain;
pub mod ports;
pub mod lifecycle;
pub mod impls;
pub mod app;

pub use app::{BuildError, SubjectBuilder};
pub use domain::{LifecycleError, LifecycleState, Notification, Operation, ParticipantId, SubjectId};
pub use lifecycle::{Subject, SubjectStatus};
pub use ports::LifecycleObserver;
