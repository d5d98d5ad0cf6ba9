//! Derived case-level status.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::VfdState;
use crate::vocab::VulnerabilityCase;

/// Case-level status derived from the participants' latest VFD states.
///
/// This is a computed value, recomputed on every read. It is deliberately
/// never stored on the case so it cannot diverge from the authoritative
/// per-participant snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateStatus {
    /// No participant has engaged yet (participants still at baseline, or
    /// the case has no participants).
    Pending,
    /// At least one participant is actively engaged.
    Active,
    /// No participant is engaged and every participant still in the case
    /// has deferred.
    Deferred,
    /// Every participant has left the case.
    Closed,
}

impl fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Deferred => "deferred",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Computes the aggregate status of a case from its participants.
///
/// A participant with no recorded status yet counts as baseline (`Vfd`).
#[must_use]
pub fn aggregate_status(case: &VulnerabilityCase) -> AggregateStatus {
    let states: Vec<VfdState> = case
        .case_participants
        .iter()
        .map(|participant| participant.latest_vfd())
        .collect();

    if states.is_empty() {
        return AggregateStatus::Pending;
    }
    if states.iter().any(|s| *s == VfdState::Engaged) {
        return AggregateStatus::Active;
    }
    if states.iter().all(|s| *s == VfdState::Closed) {
        return AggregateStatus::Closed;
    }
    if states
        .iter()
        .filter(|s| **s != VfdState::Closed)
        .all(|s| *s == VfdState::Deferred)
    {
        return AggregateStatus::Deferred;
    }
    AggregateStatus::Pending
}
