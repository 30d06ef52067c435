//! Shared encounter-attempt state.

use std::fmt;

/// Tri-state lifecycle flag for one encounter attempt, stored in the host's
/// shared instance-state store under a [`GateKey`](crate::GateKey).
///
/// `Done` is terminal: a finished encounter never re-arms.  `InProgress`
/// implies exactly one live primary actor owns the attempt.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateState {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateState::NotStarted => "not-started",
            GateState::InProgress => "in-progress",
            GateState::Done       => "done",
        };
        f.write_str(s)
    }
}
