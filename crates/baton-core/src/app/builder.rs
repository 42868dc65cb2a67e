//! SubjectBuilder - Subject の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装（所有権を受け取って Self を返す）
//! - 型パラメータを差し替える builder メソッド（clock）
//! - 起動時検証（Fail-fast 設計）

use std::collections::HashSet;
use std::rc::{Rc, Weak};

use crate::domain::{LifecycleError, ParticipantId, SubjectId};
use crate::lifecycle::Subject;
use crate::ports::{Clock, IdGenerator, LifecycleObserver, SystemClock, UlidGenerator};

/// SubjectBuilder は Subject を構築
///
/// # 使用例
/// ```ignore
/// let logger = Rc::new(RecordingObserver::new());
/// let subject = SubjectBuilder::new()
///     .participants(["A", "B", "C"])
///     .observer(&logger)
///     .require_participants()
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - 同じ participant の二重登録は build() 時に BuildError になる
/// - require_participants() を指定した場合、空の participant 列は BuildError になる
pub struct SubjectBuilder<C = SystemClock> {
    participants: Vec<ParticipantId>,
    observer: Option<Weak<dyn LifecycleObserver>>,
    clock: C,
    id: Option<SubjectId>,
    require_participants: bool,
}

/// BuildError は Subject 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("participant '{0}' was registered more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("no participants were registered, but require_participants() was set")]
    NoParticipants,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl SubjectBuilder {
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            observer: None,
            clock: SystemClock,
            id: None,
            require_participants: false,
        }
    }
}

impl Default for SubjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SubjectBuilder<C> {
    pub fn participant(mut self, participant: impl Into<ParticipantId>) -> Self {
        self.participants.push(participant.into());
        self
    }

    pub fn participants<I, P>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        self.participants
            .extend(participants.into_iter().map(Into::into));
        self
    }

    /// Observer を設定（Subject は弱参照のみ保持する）
    pub fn observer<O>(mut self, observer: &Rc<O>) -> Self
    where
        O: LifecycleObserver + 'static,
    {
        let weak = Rc::downgrade(observer);
        let weak: Weak<dyn LifecycleObserver> = weak;
        self.observer = Some(weak);
        self
    }

    /// Clock を差し替える（テストでは FixedClock）
    pub fn clock<C2: Clock>(self, clock: C2) -> SubjectBuilder<C2> {
        SubjectBuilder {
            participants: self.participants,
            observer: self.observer,
            clock,
            id: self.id,
            require_participants: self.require_participants,
        }
    }

    /// 指定しなければ clock の時刻から ULID を生成する
    pub fn id(mut self, id: SubjectId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn require_participants(mut self) -> Self {
        self.require_participants = true;
        self
    }

    pub fn build(self) -> Result<Subject<C>, BuildError> {
        if self.require_participants && self.participants.is_empty() {
            return Err(BuildError::NoParticipants);
        }

        let mut seen = HashSet::new();
        for participant in &self.participants {
            if !seen.insert(participant) {
                return Err(BuildError::DuplicateParticipant(participant.clone()));
            }
        }

        let id = match self.id {
            Some(id) => id,
            None => UlidGenerator::new(&self.clock).generate_subject_id(),
        };

        let mut subject = Subject::with_clock(id, self.clock);
        for participant in self.participants {
            subject.join(participant)?;
        }
        if let Some(observer) = self.observer {
            subject.attach_weak(observer)?;
        }
        Ok(subject)
    }
}
