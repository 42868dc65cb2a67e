//! Subject: drives the lifecycle and notifies its observer.

use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use super::status::SubjectStatus;
use crate::domain::{LifecycleError, LifecycleState, Operation, ParticipantId, SubjectId};
use crate::ports::{Clock, IdGenerator, LifecycleObserver, SystemClock, UlidGenerator};

/// A lifecycle run with an optional delegate.
///
/// Design:
/// - State transitions happen only through `start` / `advance` / `end`.
/// - The observer slot is a `Weak`: the Subject never keeps its observer alive.
/// - A rejected call leaves every field untouched.
pub struct Subject<C = SystemClock> {
    id: SubjectId,
    state: LifecycleState,

    /// Ordered participant sequence. The first one leads.
    participants: Vec<ParticipantId>,

    /// Number of successful `advance` calls.
    progress: u64,

    /// Leader as of the last `advance` (or `end`).
    leader: Option<ParticipantId>,

    observer: Option<Weak<dyn LifecycleObserver>>,

    clock: C,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Subject {
    /// Idle Subject with no participants and no observer.
    pub fn new() -> Self {
        let id = UlidGenerator::new(SystemClock).generate_subject_id();
        Self::with_clock(id, SystemClock)
    }

    pub fn with_participants<I, P>(participants: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        let mut subject = Self::new();
        subject.participants = participants.into_iter().map(Into::into).collect();
        subject
    }
}

impl Default for Subject {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Subject<C> {
    pub fn with_clock(id: SubjectId, clock: C) -> Self {
        let created_at = clock.now();
        Self {
            id,
            state: LifecycleState::Idle,
            participants: Vec::new(),
            progress: 0,
            leader: None,
            observer: None,
            clock,
            created_at,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn id(&self) -> SubjectId {
        self.id
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn progress(&self) -> u64 {
        self.progress
    }

    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn leader(&self) -> Option<&ParticipantId> {
        self.leader.as_ref()
    }

    /// Is an observer attached and still alive?
    pub fn has_observer(&self) -> bool {
        self.observer
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Append a participant to the sequence (Idle only).
    pub fn join(&mut self, participant: impl Into<ParticipantId>) -> Result<(), LifecycleError> {
        self.require_wiring(Operation::Join)?;
        let participant = participant.into();
        debug!(subject = %self.id, %participant, "participant joined");
        self.participants.push(participant);
        Ok(())
    }

    /// Replace the observer (Idle only).
    ///
    /// The Subject keeps only a weak reference; the caller owns the observer.
    /// Outside Idle the call is rejected and the current observer stays.
    pub fn attach<O>(&mut self, observer: &Rc<O>) -> Result<(), LifecycleError>
    where
        O: LifecycleObserver + 'static,
    {
        let weak = Rc::downgrade(observer);
        let weak: Weak<dyn LifecycleObserver> = weak;
        self.attach_weak(weak)
    }

    /// Same as `attach`, for an already type-erased observer.
    pub fn attach_weak(&mut self, observer: Weak<dyn LifecycleObserver>) -> Result<(), LifecycleError> {
        self.require_wiring(Operation::Attach)?;
        debug!(subject = %self.id, replaced = self.observer.is_some(), "observer attached");
        self.observer = Some(observer);
        Ok(())
    }

    /// Clear the observer slot (Idle only).
    pub fn detach(&mut self) -> Result<(), LifecycleError> {
        self.require_wiring(Operation::Detach)?;
        self.observer = None;
        Ok(())
    }

    /// Idle -> Running.
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        self.require(Operation::Start, LifecycleState::Idle)?;
        if self.participants.is_empty() {
            return Err(LifecycleError::NoParticipants);
        }

        self.transition(LifecycleState::Running);
        self.started_at = Some(self.clock.now());

        if let Some(observer) = self.live_observer() {
            trace!(subject = %self.id, "notify on_start");
            observer.on_start();
        }
        Ok(())
    }

    /// Increment progress, recompute the leader, notify.
    pub fn advance(&mut self) -> Result<u64, LifecycleError> {
        self.require(Operation::Advance, LifecycleState::Running)?;
        let leader = self.compute_leader()?;

        self.progress += 1;
        self.leader = Some(leader.clone());
        debug!(subject = %self.id, step = self.progress, %leader, "advanced");

        if let Some(observer) = self.live_observer() {
            trace!(subject = %self.id, step = self.progress, "notify on_progress");
            observer.on_progress(self.progress, &leader);
        }
        Ok(self.progress)
    }

    /// Running -> Ended. Notifies with the last-computed leader.
    pub fn end(&mut self) -> Result<ParticipantId, LifecycleError> {
        self.require(Operation::End, LifecycleState::Running)?;
        let winner = match &self.leader {
            Some(leader) => leader.clone(),
            None => self.compute_leader()?,
        };

        self.leader = Some(winner.clone());
        self.transition(LifecycleState::Ended);
        self.ended_at = Some(self.clock.now());

        if let Some(observer) = self.live_observer() {
            trace!(subject = %self.id, %winner, "notify on_end");
            observer.on_end(&winner);
        }
        Ok(winner)
    }

    pub fn status(&self) -> SubjectStatus {
        SubjectStatus {
            subject_id: self.id,
            state: self.state.into(),
            participants: self.participants.clone(),
            progress: self.progress,
            leader: self.leader.clone(),
            has_observer: self.has_observer(),
            created_at_ms: self.created_at.timestamp_millis(),
            started_at_ms: self.started_at.map(|t| t.timestamp_millis()),
            ended_at_ms: self.ended_at.map(|t| t.timestamp_millis()),
        }
    }

    fn require(&self, operation: Operation, expected: LifecycleState) -> Result<(), LifecycleError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.reject(operation, expected))
        }
    }

    /// Participants and observer may only change before the run starts.
    fn require_wiring(&self, operation: Operation) -> Result<(), LifecycleError> {
        if self.state.accepts_wiring() {
            Ok(())
        } else {
            Err(self.reject(operation, LifecycleState::Idle))
        }
    }

    fn reject(&self, operation: Operation, expected: LifecycleState) -> LifecycleError {
        debug!(subject = %self.id, %operation, actual = ?self.state, "operation rejected");
        LifecycleError::invalid_state(operation, expected, self.state)
    }

    fn transition(&mut self, to: LifecycleState) {
        debug!(subject = %self.id, from = ?self.state, to = ?to, "transition");
        self.state = to;
    }

    /// Fixed policy: the first participant leads.
    fn compute_leader(&self) -> Result<ParticipantId, LifecycleError> {
        self.participants
            .first()
            .cloned()
            .ok_or(LifecycleError::NoParticipants)
    }

    fn live_observer(&self) -> Option<Rc<dyn LifecycleObserver>> {
        let weak = self.observer.as_ref()?;
        let observer = weak.upgrade();
        if observer.is_none() {
            debug!(subject = %self.id, "observer dropped, skipping notification");
        }
        observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Notification;
    use crate::impls::RecordingObserver;
    use crate::ports::FixedClock;
    use chrono::TimeZone;
    use rstest::rstest;

    fn abc() -> Subject {
        Subject::with_participants(["A", "B", "C"])
    }

    #[test]
    fn new_subject_is_idle_and_empty() {
        let subject = Subject::new();
        assert_eq!(subject.state(), LifecycleState::Idle);
        assert_eq!(subject.progress(), 0);
        assert!(subject.participants().is_empty());
        assert!(subject.leader().is_none());
        assert!(!subject.has_observer());
    }

    #[test]
    fn full_scenario_is_recorded_in_order() {
        let logger = Rc::new(RecordingObserver::new());
        let mut subject = abc();
        subject.attach(&logger).unwrap();

        subject.start().unwrap();
        assert_eq!(logger.log(), vec![Notification::Started]);

        subject.advance().unwrap();
        assert_eq!(logger.log().last(), Some(&Notification::progress(1, "A")));

        let winner = subject.end().unwrap();
        assert_eq!(winner, ParticipantId::from("A"));

        assert_eq!(
            logger.log(),
            vec![
                Notification::Started,
                Notification::progress(1, "A"),
                Notification::ended("A"),
            ]
        );
        assert_eq!(subject.state(), LifecycleState::Ended);
    }

    #[rstest]
    #[case::advance(Operation::Advance)]
    #[case::end(Operation::End)]
    fn running_operations_fail_before_start(#[case] operation: Operation) {
        let mut subject = abc();

        let err = match operation {
            Operation::Advance => subject.advance().unwrap_err(),
            Operation::End => subject.end().unwrap_err(),
            _ => unreachable!(),
        };

        assert_eq!(
            err,
            LifecycleError::invalid_state(operation, LifecycleState::Running, LifecycleState::Idle)
        );
        assert_eq!(subject.state(), LifecycleState::Idle);
        assert_eq!(subject.progress(), 0);
    }

    #[test]
    fn advance_on_fresh_subject_leaves_it_untouched() {
        let logger = Rc::new(RecordingObserver::new());
        let mut subject = abc();
        subject.attach(&logger).unwrap();

        assert!(subject.advance().unwrap_err().is_invalid_state());
        assert_eq!(subject.state(), LifecycleState::Idle);
        assert_eq!(subject.progress(), 0);
        assert!(logger.is_empty());
    }

    #[test]
    fn end_is_callable_once() {
        let mut subject = abc();
        subject.start().unwrap();
        subject.end().unwrap();

        let err = subject.end().unwrap_err();
        assert_eq!(
            err,
            LifecycleError::invalid_state(Operation::End, LifecycleState::Running, LifecycleState::Ended)
        );
    }

    #[test]
    fn start_is_callable_once() {
        let mut subject = abc();
        subject.start().unwrap();
        assert!(subject.start().unwrap_err().is_invalid_state());

        subject.end().unwrap();
        assert!(subject.start().unwrap_err().is_invalid_state());
        assert!(subject.advance().unwrap_err().is_invalid_state());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    fn progress_counts_successful_advances(#[case] n: u64) {
        let mut subject = abc();
        subject.start().unwrap();
        for expected in 1..=n {
            assert_eq!(subject.advance().unwrap(), expected);
        }
        assert_eq!(subject.progress(), n);
    }

    #[test]
    fn transitions_succeed_without_observer() {
        let mut subject = abc();
        subject.start().unwrap();
        subject.advance().unwrap();
        subject.advance().unwrap();
        assert_eq!(subject.end().unwrap(), ParticipantId::from("A"));
        assert_eq!(subject.progress(), 2);
    }

    #[test]
    fn end_without_advance_uses_first_participant() {
        let logger = Rc::new(RecordingObserver::new());
        let mut subject = Subject::with_participants(["B", "A"]);
        subject.attach(&logger).unwrap();

        subject.start().unwrap();
        subject.end().unwrap();

        assert_eq!(logger.log(), vec![Notification::Started, Notification::ended("B")]);
    }

    #[test]
    fn start_without_participants_is_rejected() {
        let mut subject = Subject::new();
        assert_eq!(subject.start().unwrap_err(), LifecycleError::NoParticipants);
        assert_eq!(subject.state(), LifecycleState::Idle);

        subject.join("solo").unwrap();
        subject.start().unwrap();
        assert_eq!(subject.advance().unwrap(), 1);
        assert_eq!(subject.leader(), Some(&ParticipantId::from("solo")));
    }

    #[test]
    fn join_and_attach_are_idle_only() {
        let first = Rc::new(RecordingObserver::new());
        let second = Rc::new(RecordingObserver::new());
        let mut subject = abc();
        subject.attach(&first).unwrap();
        subject.start().unwrap();

        assert_eq!(
            subject.attach(&second).unwrap_err(),
            LifecycleError::invalid_state(Operation::Attach, LifecycleState::Idle, LifecycleState::Running)
        );
        assert!(subject.join("D").unwrap_err().is_invalid_state());
        assert!(subject.detach().unwrap_err().is_invalid_state());

        // 拒否された attach は既存の observer を置き換えない
        subject.advance().unwrap();
        assert_eq!(first.len(), 2);
        assert!(second.is_empty());
        assert_eq!(subject.participants().len(), 3);
    }

    #[test]
    fn attach_replaces_previous_observer_while_idle() {
        let first = Rc::new(RecordingObserver::new());
        let second = Rc::new(RecordingObserver::new());
        let mut subject = abc();

        subject.attach(&first).unwrap();
        subject.attach(&second).unwrap();
        subject.start().unwrap();

        assert!(first.is_empty());
        assert_eq!(second.log(), vec![Notification::Started]);
    }

    #[test]
    fn detach_stops_notifications() {
        let logger = Rc::new(RecordingObserver::new());
        let mut subject = abc();
        subject.attach(&logger).unwrap();
        subject.detach().unwrap();

        subject.start().unwrap();
        assert!(logger.is_empty());
        assert!(!subject.has_observer());
    }

    #[test]
    fn dropped_observer_does_not_block_transitions() {
        let mut subject = abc();
        {
            let logger = Rc::new(RecordingObserver::new());
            subject.attach(&logger).unwrap();
            assert!(subject.has_observer());
        }

        assert!(!subject.has_observer());
        subject.start().unwrap();
        subject.advance().unwrap();
        subject.end().unwrap();
        assert_eq!(subject.state(), LifecycleState::Ended);
    }

    #[test]
    fn subject_does_not_keep_observer_alive() {
        let logger = Rc::new(RecordingObserver::new());
        let mut subject = abc();
        subject.attach(&logger).unwrap();

        assert_eq!(Rc::strong_count(&logger), 1);
    }

    #[test]
    fn shared_observer_sees_both_subjects_in_call_order() {
        let logger = Rc::new(RecordingObserver::new());
        let mut first = Subject::with_participants(["A"]);
        let mut second = Subject::with_participants(["X", "Y"]);
        first.attach(&logger).unwrap();
        second.attach(&logger).unwrap();

        first.start().unwrap();
        second.start().unwrap();
        second.advance().unwrap();
        first.end().unwrap();
        second.end().unwrap();

        assert_eq!(
            logger.log(),
            vec![
                Notification::Started,
                Notification::Started,
                Notification::progress(1, "X"),
                Notification::ended("A"),
                Notification::ended("X"),
            ]
        );
    }

    #[test]
    fn status_tracks_transition_times() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id = UlidGenerator::new(FixedClock::new(at)).generate_subject_id();
        let mut subject = Subject::with_clock(id, FixedClock::new(at));
        subject.join("A").unwrap();

        let idle = subject.status();
        assert_eq!(idle.subject_id, id);
        assert_eq!(idle.created_at_ms, at.timestamp_millis());
        assert_eq!(idle.started_at_ms, None);

        subject.start().unwrap();
        subject.advance().unwrap();
        subject.end().unwrap();

        let ended = subject.status();
        assert_eq!(ended.progress, 1);
        assert_eq!(ended.leader, Some(ParticipantId::from("A")));
        assert_eq!(ended.started_at_ms, Some(at.timestamp_millis()));
        assert_eq!(ended.ended_at_ms, Some(at.timestamp_millis()));
    }

    #[test]
    fn status_keeps_pre_epoch_times_negative() {
        let at = Utc.with_ymd_and_hms(1969, 12, 31, 0, 0, 0).unwrap();
        let id = UlidGenerator::new(SystemClock).generate_subject_id();
        let mut subject = Subject::with_clock(id, FixedClock::new(at));
        subject.join("A").unwrap();
        subject.start().unwrap();

        let status = subject.status();
        assert_eq!(status.created_at_ms, -86_400_000);
        assert_eq!(status.started_at_ms, Some(-86_400_000));
    }

    #[rstest]
    #[case::join(Operation::Join)]
    #[case::attach(Operation::Attach)]
    #[case::detach(Operation::Detach)]
    fn wiring_is_rejected_after_end(#[case] operation: Operation) {
        let logger = Rc::new(RecordingObserver::new());
        let mut subject = abc();
        subject.start().unwrap();
        subject.end().unwrap();

        let err = match operation {
            Operation::Join => subject.join("D").unwrap_err(),
            Operation::Attach => subject.attach(&logger).unwrap_err(),
            Operation::Detach => subject.detach().unwrap_err(),
            _ => unreachable!(),
        };

        assert_eq!(
            err,
            LifecycleError::invalid_state(operation, LifecycleState::Idle, LifecycleState::Ended)
        );
        assert_eq!(subject.participants().len(), 3);
        assert!(!subject.has_observer());
    }
}
