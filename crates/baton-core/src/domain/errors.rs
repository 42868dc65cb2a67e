//! Errors - Subject 操作のエラー型

use std::fmt;

use super::state::LifecycleState;

/// The Subject operation that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Attach,
    Detach,
    Join,
    Start,
    Advance,
    End,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Attach => "attach",
            Operation::Detach => "detach",
            Operation::Join => "join",
            Operation::Start => "start",
            Operation::Advance => "advance",
            Operation::End => "end",
        };
        f.write_str(name)
    }
}

/// LifecycleError は呼び出し側のプログラミングミスを表す
///
/// リトライや回復の対象ではありません。状態機械の順序を守っていれば発生しません。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("cannot {operation} while {actual:?} (requires {expected:?})")]
    InvalidState {
        operation: Operation,
        expected: LifecycleState,
        actual: LifecycleState,
    },

    #[error("cannot start without participants")]
    NoParticipants,
}

impl LifecycleError {
    pub fn invalid_state(
        operation: Operation,
        expected: LifecycleState,
        actual: LifecycleState,
    ) -> Self {
        LifecycleError::InvalidState {
            operation,
            expected,
            actual,
        }
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, LifecycleError::InvalidState { .. })
    }
}
