//! Impls - Observer の実装
//!
//! - RecordingObserver: 通知を順番に記録（検証用）
//! - TracingObserver: 通知を tracing に出力
//! - ClosureObserver: クロージャで組み立てる

pub mod recording;
pub mod tracing_observer;
pub mod closure;

pub use self::recording::RecordingObserver;
pub use self::tracing_observer::TracingObserver;
pub use self::closure::ClosureObserver;
