//! ClosureObserver - クロージャで組み立てる Observer
//!
//! # 学習ポイント
//! - `Box<dyn Fn(..)>` でクロージャを保持する
//! - 設定されていないコールバックは何もしない（no-op）
//! - 小さな用途では trait 実装の代わりにクロージャを渡すだけで済む
//!
//! # 使用例
//! ```ignore
//! let observer = Rc::new(
//!     ClosureObserver::new()
//!         .when_started(|| println!("started"))
//!         .when_ended(|winner| println!("winner: {winner}")),
//! );
//! subject.attach(&observer)?;
//! ```

use crate::domain::ParticipantId;
use crate::ports::{EndObserver, ProgressObserver, StartObserver};

type StartFn = Box<dyn Fn()>;
type ProgressFn = Box<dyn Fn(u64, &ParticipantId)>;
type EndFn = Box<dyn Fn(&ParticipantId)>;

#[derive(Default)]
pub struct ClosureObserver {
    start: Option<StartFn>,
    progress: Option<ProgressFn>,
    end: Option<EndFn>,
}

impl ClosureObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when_started(mut self, f: impl Fn() + 'static) -> Self {
        self.start = Some(Box::new(f));
        self
    }

    pub fn when_progressed(mut self, f: impl Fn(u64, &ParticipantId) + 'static) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn when_ended(mut self, f: impl Fn(&ParticipantId) + 'static) -> Self {
        self.end = Some(Box::new(f));
        self
    }
}

impl StartObserver for ClosureObserver {
    fn on_start(&self) {
        if let Some(f) = &self.start {
            f();
        }
    }
}

impl ProgressObserver for ClosureObserver {
    fn on_progress(&self, step: u64, leader: &ParticipantId) {
        if let Some(f) = &self.progress {
            f(step, leader);
        }
    }
}

impl EndObserver for ClosureObserver {
    fn on_end(&self, winner: &ParticipantId) {
        if let Some(f) = &self.end {
            f(winner);
        }
    }
}
