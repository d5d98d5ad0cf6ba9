//! VFD engagement states and the pure transition table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vocab::ActivityKind;

/// Engagement state of one participant within a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VfdState {
    /// Baseline: the participant is viewing or following the case without
    /// active engagement.
    Vfd,
    /// The participant is actively engaged.
    Engaged,
    /// The participant has deferred its engagement without leaving.
    Deferred,
    /// The participant has left the case. Terminal.
    Closed,
}

impl VfdState {
    /// Initial state of a newly added participant.
    pub const INITIAL: Self = Self::Vfd;

    /// Returns `true` if no further transitions are defined from this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns the state name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vfd => "vfd",
            Self::Engaged => "engaged",
            Self::Deferred => "deferred",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for VfdState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up the VFD transition for (current state, activity kind).
///
/// Returns `None` when no transition is defined. `Undo` is absent here on
/// purpose: re-engagement requires matching the wrapped deferral against the
/// issuing actor, which the validator checks before applying
/// `Deferred → Engaged`.
#[must_use]
pub const fn next(current: VfdState, kind: ActivityKind) -> Option<VfdState> {
    match (current, kind) {
        (VfdState::Vfd | VfdState::Deferred, ActivityKind::Join) => Some(VfdState::Engaged),
        (VfdState::Engaged, ActivityKind::Ignore) => Some(VfdState::Deferred),
        (VfdState::Vfd | VfdState::Engaged | VfdState::Deferred, ActivityKind::Leave) => {
            Some(VfdState::Closed)
        },
        _ => None,
    }
}
