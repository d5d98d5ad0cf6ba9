//! RM states and the pure transition table.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vocab::{ActivityKind, ParticipantRole};

/// Report Management lifecycle state of a vulnerability report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RmState {
    /// The report has been received and awaits a validity decision.
    Received,
    /// The vendor judged the report valid.
    Valid,
    /// The vendor judged the report invalid.
    Invalid,
    /// The vendor accepted the valid report for further work.
    Accepted,
    /// The report is closed. Terminal.
    Closed,
}

impl RmState {
    /// Initial state of a newly created report.
    pub const INITIAL: Self = Self::Received;

    /// Returns `true` if no further transitions are defined from this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns the state name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Accepted => "accepted",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for RmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a report's append-only transition log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RmLogEntry {
    /// The state the report entered.
    pub state: RmState,
    /// When the transition was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Looks up the RM transition for (current state, activity kind).
///
/// Returns `None` when no transition is defined for the pair. A returned
/// state equal to `current` means the activity is recorded without a state
/// change (`Read`, `Offer`).
#[must_use]
pub const fn next(current: RmState, kind: ActivityKind) -> Option<RmState> {
    match (current, kind) {
        (RmState::Received, ActivityKind::Read | ActivityKind::Offer) => Some(RmState::Received),
        (RmState::Received, ActivityKind::Accept) => Some(RmState::Valid),
        (RmState::Received, ActivityKind::Reject) => Some(RmState::Invalid),
        (RmState::Valid, ActivityKind::Accept) => Some(RmState::Accepted),
        (RmState::Valid | RmState::Invalid | RmState::Accepted, ActivityKind::Leave) => {
            Some(RmState::Closed)
        },
        _ => None,
    }
}

/// Returns the role authorized to drive reports with this activity kind.
///
/// `None` means the kind has no report-directed meaning at all; the
/// validator reports such activities as illegal transitions rather than
/// authorization failures.
#[must_use]
pub const fn required_role(kind: ActivityKind) -> Option<ParticipantRole> {
    match kind {
        ActivityKind::Create | ActivityKind::Offer => Some(ParticipantRole::FinderReporter),
        ActivityKind::Read
        | ActivityKind::Accept
        | ActivityKind::Reject
        | ActivityKind::Leave
        | ActivityKind::Undo => Some(ParticipantRole::Vendor),
        _ => None,
    }
}
