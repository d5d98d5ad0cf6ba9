//! Transition results: the mutations a host applies on acceptance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::case_status::{AggregateStatus, VfdState};
use crate::rm::RmState;
use crate::vocab::{
    CaseParticipant, Note, ParticipantStatus, VulnerabilityCase, VulnerabilityReport,
};

/// A read snapshot of the entity an activity is addressed to.
///
/// The validator never touches shared state: the host loads the snapshot,
/// the validator decides, and the host applies the returned mutations.
#[derive(Debug, Clone, Copy)]
pub enum EntitySnapshot<'a> {
    /// The entity does not exist yet; only legal for `Create`.
    Absent,
    /// The activity is addressed to this report.
    Report(&'a VulnerabilityReport),
    /// The activity is addressed to this case.
    Case(&'a VulnerabilityCase),
}

/// The kinds of protocol entity whose state the core tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A vulnerability report.
    Report,
    /// A vulnerability case.
    Case,
    /// A participant within a case.
    Participant,
}

/// The initial state of a freshly created entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// Reports start in the initial RM state.
    Report(RmState),
    /// Cases start with the pending aggregate status (no participants).
    Case(AggregateStatus),
    /// Participants start at the baseline of both axes.
    Participant {
        /// The RM axis.
        rm: RmState,
        /// The VFD axis.
        vfd: VfdState,
    },
}

/// One state mutation the host must apply to its authoritative store.
///
/// Mutations only ever create entities or append to them; nothing is
/// rewritten or removed. Mutations carrying an optional timestamp are
/// stamped by the host at apply time when the activity did not supply one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    /// Create a report in the initial RM state.
    CreateReport {
        /// The report to create.
        report: VulnerabilityReport,
        /// When the creation was published.
        timestamp: Option<DateTime<Utc>>,
    },
    /// Create a case.
    CreateCase {
        /// The case to create.
        case: VulnerabilityCase,
    },
    /// Record an RM transition on a report.
    SetReportState {
        /// The report to transition.
        report_id: String,
        /// The state the validator observed.
        from: RmState,
        /// The state to record.
        to: RmState,
        /// When the transition was published.
        timestamp: Option<DateTime<Utc>>,
    },
    /// Append a report identifier to a case.
    AddReportToCase {
        /// The owning case.
        case_id: String,
        /// The report to append.
        report_id: String,
    },
    /// Append a participant to a case.
    AddParticipantToCase {
        /// The owning case.
        case_id: String,
        /// The participant to append.
        participant: CaseParticipant,
    },
    /// Append a note to a case.
    AddNoteToCase {
        /// The owning case.
        case_id: String,
        /// The note to append.
        note: Note,
    },
    /// Append a status snapshot to a participant's history.
    AppendParticipantStatus {
        /// The owning case.
        case_id: String,
        /// The participant whose history grows.
        participant_id: String,
        /// The snapshot to append.
        status: ParticipantStatus,
    },
}

/// Outcome of a successfully validated activity.
///
/// Acknowledgment-only activities (`Read`, `Offer`, proposal traffic)
/// validate to an empty mutation list: the activity is protocol-legal and
/// may be relayed, but no entity state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionResult {
    /// The entity the mutations apply to.
    pub entity_id: String,
    /// The mutations to apply, in order. All-or-nothing: the host must not
    /// apply a prefix.
    pub mutations: Vec<Mutation>,
}

impl TransitionResult {
    /// A result that records acceptance without mutating any entity.
    #[must_use]
    pub fn acknowledgment(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            mutations: Vec::new(),
        }
    }

    /// A result carrying a single mutation.
    #[must_use]
    pub fn mutation(entity_id: impl Into<String>, mutation: Mutation) -> Self {
        Self {
            entity_id: entity_id.into(),
            mutations: vec![mutation],
        }
    }
}
