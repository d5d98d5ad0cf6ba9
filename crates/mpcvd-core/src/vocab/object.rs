//! Protocol objects: reports, cases, participants, statuses, and notes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::VocabError;
use crate::case_status::VfdState;
use crate::rm::{RmLogEntry, RmState};

/// The role an actor plays within a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    /// The party that discovered and reported the vulnerability.
    FinderReporter,
    /// The party that owns the affected product and ships the fix.
    Vendor,
    /// A third party coordinating the disclosure.
    Coordinator,
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FinderReporter => "finder/reporter",
            Self::Vendor => "vendor",
            Self::Coordinator => "coordinator",
        };
        f.write_str(name)
    }
}

/// A single vulnerability report.
///
/// Reports are append-only records: the current RM state is always the last
/// entry of [`rm_log`](Self::rm_log) once the host has recorded creation,
/// and log entries are never rewritten or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityReport {
    /// Stable unique identifier.
    pub id: String,
    /// Human-readable report name.
    pub name: String,
    /// Free-text description of the vulnerability.
    pub content: String,
    /// Identifiers of the actors the report is attributed to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributed_to: Vec<String>,
    /// Current Report Management state.
    pub rm_state: RmState,
    /// Append-only log of every RM transition the report has taken.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rm_log: Vec<RmLogEntry>,
}

impl VulnerabilityReport {
    /// Creates a report in the initial RM state.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::EmptyName`] if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        id: impl Into<String>,
    ) -> Result<Self, VocabError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(VocabError::EmptyName {
                kind: "vulnerability report",
            });
        }
        Ok(Self {
            id: id.into(),
            name,
            content: content.into(),
            attributed_to: Vec::new(),
            rm_state: RmState::INITIAL,
            rm_log: Vec::new(),
        })
    }

    /// Attributes the report to an actor.
    #[must_use]
    pub fn attributed_to(mut self, actor_id: impl Into<String>) -> Self {
        self.attributed_to.push(actor_id.into());
        self
    }

    /// Records a transition into `state`, updating the current state and
    /// appending to the transition log.
    pub fn record_state(&mut self, state: RmState, timestamp: DateTime<Utc>) {
        self.rm_state = state;
        self.rm_log.push(RmLogEntry { state, timestamp });
    }

    /// The last state the report held before it was closed, resolved from
    /// the transition log. `None` if the report was never closed or the log
    /// holds no earlier state.
    #[must_use]
    pub fn last_open_state(&self) -> Option<RmState> {
        self.rm_log
            .iter()
            .rev()
            .map(|entry| entry.state)
            .find(|state| !state.is_terminal())
    }
}

/// A timestamped snapshot of one participant's RM and VFD state.
///
/// Snapshots are appended to the participant's status history and never
/// mutated or removed afterwards. A snapshot without a timestamp is stamped
/// by the host when the mutation is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatus {
    /// The owning case identifier.
    pub context: String,
    /// The participant's actor identifier.
    pub actor: String,
    /// The participant's RM-axis state.
    pub rm_state: RmState,
    /// The participant's VFD-axis state.
    pub vfd_state: VfdState,
    /// When the snapshot was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// One actor's membership record within one case.
///
/// The `(actor, context)` pair is unique within a case; the status history
/// is chronological and append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseParticipant {
    /// Stable unique identifier of the membership record.
    pub id: String,
    /// The role this actor plays in the case.
    pub role: ParticipantRole,
    /// The participating actor's identifier.
    pub actor: String,
    /// The participant's display name.
    pub name: String,
    /// The owning case identifier.
    pub context: String,
    /// Chronological list of status snapshots.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participant_status: Vec<ParticipantStatus>,
}

impl CaseParticipant {
    /// Creates a participant with an empty status history.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::EmptyName`] if `name` is empty.
    pub fn new(
        role: ParticipantRole,
        actor: impl Into<String>,
        name: impl Into<String>,
        context: impl Into<String>,
        id: impl Into<String>,
    ) -> Result<Self, VocabError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(VocabError::EmptyName {
                kind: "case participant",
            });
        }
        Ok(Self {
            id: id.into(),
            role,
            actor: actor.into(),
            name,
            context: context.into(),
            participant_status: Vec::new(),
        })
    }

    /// The most recent status snapshot, if any has been recorded.
    #[must_use]
    pub fn latest_status(&self) -> Option<&ParticipantStatus> {
        self.participant_status.last()
    }

    /// The participant's current VFD state; baseline if no status has been
    /// recorded yet.
    #[must_use]
    pub fn latest_vfd(&self) -> VfdState {
        self.latest_status()
            .map_or(VfdState::INITIAL, |status| status.vfd_state)
    }

    /// The participant's current RM-axis state; the initial report state if
    /// no status has been recorded yet.
    #[must_use]
    pub fn latest_rm(&self) -> RmState {
        self.latest_status()
            .map_or(RmState::INITIAL, |status| status.rm_state)
    }

    /// Appends a status snapshot. History only ever grows.
    pub fn push_status(&mut self, status: ParticipantStatus) {
        self.participant_status.push(status);
    }
}

/// A free-text note attached to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable unique identifier.
    pub id: String,
    /// Human-readable note name.
    pub name: String,
    /// The note's text.
    pub content: String,
    /// The owning case identifier, once attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Note {
    /// Creates a detached note.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::EmptyName`] if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        id: impl Into<String>,
    ) -> Result<Self, VocabError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(VocabError::EmptyName { kind: "note" });
        }
        Ok(Self {
            id: id.into(),
            name,
            content: content.into(),
            context: None,
        })
    }

    /// Sets the owning case.
    #[must_use]
    pub fn in_context(mut self, case_id: impl Into<String>) -> Self {
        self.context = Some(case_id.into());
        self
    }
}

/// A vulnerability case aggregating reports and participants.
///
/// Cases are created once and only accumulate: the report list, participant
/// list, and note list are append-only, and report insertion order is
/// preserved for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityCase {
    /// Stable unique identifier.
    pub id: String,
    /// Human-readable case name.
    pub name: String,
    /// Identifiers of the reports aggregated by this case, in insertion
    /// order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vulnerability_reports: Vec<String>,
    /// The case's participants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub case_participants: Vec<CaseParticipant>,
    /// Notes attached to the case.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

impl VulnerabilityCase {
    /// Creates an empty case.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::EmptyName`] if `name` is empty.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Result<Self, VocabError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(VocabError::EmptyName {
                kind: "vulnerability case",
            });
        }
        Ok(Self {
            id: id.into(),
            name,
            vulnerability_reports: Vec::new(),
            case_participants: Vec::new(),
            notes: Vec::new(),
        })
    }

    /// Returns `true` if the case already aggregates the report.
    #[must_use]
    pub fn contains_report(&self, report_id: &str) -> bool {
        self.vulnerability_reports
            .iter()
            .any(|id| id == report_id)
    }

    /// Returns `true` if the case already holds a note with this id.
    #[must_use]
    pub fn contains_note(&self, note_id: &str) -> bool {
        self.notes.iter().any(|note| note.id == note_id)
    }

    /// Looks up the membership record of an actor.
    #[must_use]
    pub fn participant_of(&self, actor_id: &str) -> Option<&CaseParticipant> {
        self.case_participants
            .iter()
            .find(|participant| participant.actor == actor_id)
    }

    /// Mutable variant of [`participant_of`](Self::participant_of).
    pub fn participant_of_mut(&mut self, actor_id: &str) -> Option<&mut CaseParticipant> {
        self.case_participants
            .iter_mut()
            .find(|participant| participant.actor == actor_id)
    }

    /// Appends a report identifier. The list only ever grows.
    pub fn add_report(&mut self, report_id: impl Into<String>) {
        self.vulnerability_reports.push(report_id.into());
    }

    /// Appends a participant. The list only ever grows.
    pub fn add_participant(&mut self, participant: CaseParticipant) {
        self.case_participants.push(participant);
    }

    /// Appends a note. The list only ever grows.
    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }
}
