//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース。Clock を差し替えると timestamp 部分が決定的になる

use crate::domain::SubjectId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は Subject の ID を生成
pub trait IdGenerator {
    fn generate_subject_id(&self) -> SubjectId;
}

/// UlidGenerator は ULID ベースの ID 生成器
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_subject_id(&self) -> SubjectId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        SubjectId::from(ulid)
    }
}
