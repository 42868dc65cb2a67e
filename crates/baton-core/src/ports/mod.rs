//! Ports - 抽象化レイヤー
//!
//! Subject が依存する外側の能力を trait として定義します。
//! - LifecycleObserver: 通知の受け手（delegate）
//! - Clock: 遷移時刻
//! - IdGenerator: SubjectId の生成

pub mod observer;
pub mod clock;
pub mod id_generator;

pub use self::observer::{EndObserver, LifecycleObserver, ProgressObserver, StartObserver};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
