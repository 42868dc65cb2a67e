//! Observer port - ライフサイクル通知の受け手（delegate）
//!
//! # 学習ポイント
//! - 能力ごとの小さな trait（StartObserver, ProgressObserver, EndObserver）
//! - supertrait による合成（LifecycleObserver = 3 つの能力すべて）
//! - blanket impl: 3 つを実装した型は自動的に LifecycleObserver になる
//!
//! 継承階層は不要です。3 つの能力を持つ型なら何でも Observer になれます。

use crate::domain::ParticipantId;

/// Receives the Idle -> Running transition.
pub trait StartObserver {
    fn on_start(&self);
}

/// Receives each successful `advance`.
pub trait ProgressObserver {
    /// `step` is the progress counter after the increment (1-based).
    fn on_progress(&self, step: u64, leader: &ParticipantId);
}

/// Receives the Running -> Ended transition.
pub trait EndObserver {
    fn on_end(&self, winner: &ParticipantId);
}

/// The full capability contract a Subject notifies.
///
/// Methods take `&self`: one observer may be shared by many Subjects,
/// so bookkeeping goes through interior mutability.
///
/// # 使用例
/// ```ignore
/// struct Printer;
///
/// impl StartObserver for Printer {
///     fn on_start(&self) { println!("started"); }
/// }
/// impl ProgressObserver for Printer {
///     fn on_progress(&self, step: u64, leader: &ParticipantId) { println!("{step}: {leader}"); }
/// }
/// impl EndObserver for Printer {
///     fn on_end(&self, winner: &ParticipantId) { println!("winner: {winner}"); }
/// }
///
/// // Printer は LifecycleObserver として Subject に attach できる
/// ```
pub trait LifecycleObserver: StartObserver + ProgressObserver + EndObserver {}

impl<T> LifecycleObserver for T where T: StartObserver + ProgressObserver + EndObserver + ?Sized {}
