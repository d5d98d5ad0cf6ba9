//! In-memory reference store.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;

use super::{Entity, EntityStore, RoleAuthority, StoreError};
use crate::validator::{self, EntitySnapshot, Mutation, TransitionResult, ValidationError};
use crate::vocab::{
    Activity, ParticipantRole, ParticipantStatus, VulnerabilityCase, VulnerabilityReport,
};

/// Errors raised while admitting an activity end to end.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdmitError {
    /// The validator rejected the activity.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store could not apply an accepted activity's mutations.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The activity does not address any entity.
    #[error("activity addresses no entity")]
    Unaddressed,
}

/// An in-memory entity store and role authority.
///
/// Reports and cases live in hash maps keyed by identifier; actor roles are
/// registered explicitly. Statuses without a timestamp are stamped with the
/// wall clock at apply time, so persisted histories are always timestamped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reports: HashMap<String, VulnerabilityReport>,
    cases: HashMap<String, VulnerabilityCase>,
    roles: HashMap<(String, String), ParticipantRole>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the role an actor holds with respect to an entity.
    pub fn register_role(
        &mut self,
        actor_id: impl Into<String>,
        entity_id: impl Into<String>,
        role: ParticipantRole,
    ) {
        self.roles.insert((actor_id.into(), entity_id.into()), role);
    }

    /// The report recorded under `id`, if any.
    #[must_use]
    pub fn report(&self, id: &str) -> Option<&VulnerabilityReport> {
        self.reports.get(id)
    }

    /// The case recorded under `id`, if any.
    #[must_use]
    pub fn case(&self, id: &str) -> Option<&VulnerabilityCase> {
        self.cases.get(id)
    }

    /// Validates an activity against the store's current state and, on
    /// acceptance, applies its mutations.
    ///
    /// This is the host loop in miniature: resolve the target entity, load
    /// a snapshot, validate, persist. Callers needing finer control drive
    /// [`validator::validate`] and [`EntityStore::persist`] themselves.
    ///
    /// # Errors
    ///
    /// Returns [`AdmitError::Validation`] when the validator rejects the
    /// activity and [`AdmitError::Store`] when a mutation does not apply.
    pub fn admit(&mut self, activity: &Activity) -> Result<TransitionResult, AdmitError> {
        let entity_id = activity.target_entity_id().ok_or(AdmitError::Unaddressed)?;

        let result = if let Some(report) = self.reports.get(entity_id) {
            validator::validate(activity, &EntitySnapshot::Report(report), self)?
        } else if let Some(case) = self.cases.get(entity_id) {
            validator::validate(activity, &EntitySnapshot::Case(case), self)?
        } else {
            validator::validate(activity, &EntitySnapshot::Absent, self)?
        };

        for mutation in result.mutations.clone() {
            self.persist(mutation)?;
        }
        Ok(result)
    }

    fn case_mut(&mut self, id: &str) -> Result<&mut VulnerabilityCase, StoreError> {
        if self.reports.contains_key(id) {
            return Err(StoreError::WrongEntityKind { id: id.to_string() });
        }
        self.cases
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownEntity { id: id.to_string() })
    }
}

impl EntityStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Entity, StoreError> {
        if let Some(report) = self.reports.get(id) {
            return Ok(Entity::Report(report.clone()));
        }
        if let Some(case) = self.cases.get(id) {
            return Ok(Entity::Case(case.clone()));
        }
        Err(StoreError::UnknownEntity { id: id.to_string() })
    }

    fn persist(&mut self, mutation: Mutation) -> Result<(), StoreError> {
        match mutation {
            Mutation::CreateReport { report, timestamp } => {
                if self.reports.contains_key(&report.id) || self.cases.contains_key(&report.id) {
                    return Err(StoreError::AlreadyExists { id: report.id });
                }
                let mut report = report;
                let stamped = timestamp.unwrap_or_else(Utc::now);
                report.record_state(report.rm_state, stamped);
                self.reports.insert(report.id.clone(), report);
                Ok(())
            },
            Mutation::CreateCase { case } => {
                if self.cases.contains_key(&case.id) || self.reports.contains_key(&case.id) {
                    return Err(StoreError::AlreadyExists { id: case.id });
                }
                self.cases.insert(case.id.clone(), case);
                Ok(())
            },
            Mutation::SetReportState {
                report_id,
                from,
                to,
                timestamp,
            } => {
                if self.cases.contains_key(&report_id) {
                    return Err(StoreError::WrongEntityKind { id: report_id });
                }
                let report = self
                    .reports
                    .get_mut(&report_id)
                    .ok_or_else(|| StoreError::UnknownEntity {
                        id: report_id.clone(),
                    })?;
                if report.rm_state != from {
                    return Err(StoreError::StaleMutation {
                        id: report_id,
                        expected: from.to_string(),
                        found: report.rm_state.to_string(),
                    });
                }
                report.record_state(to, timestamp.unwrap_or_else(Utc::now));
                Ok(())
            },
            Mutation::AddReportToCase { case_id, report_id } => {
                let case = self.case_mut(&case_id)?;
                if case.contains_report(&report_id) {
                    return Err(StoreError::StaleMutation {
                        id: case_id,
                        expected: "report absent".to_string(),
                        found: "report present".to_string(),
                    });
                }
                case.add_report(report_id);
                Ok(())
            },
            Mutation::AddParticipantToCase {
                case_id,
                participant,
            } => {
                let case = self.case_mut(&case_id)?;
                if case.participant_of(&participant.actor).is_some() {
                    return Err(StoreError::StaleMutation {
                        id: case_id,
                        expected: "participant absent".to_string(),
                        found: "participant present".to_string(),
                    });
                }
                let mut participant = participant;
                if participant.participant_status.is_empty() {
                    // New members start at the baseline of both axes.
                    participant.push_status(ParticipantStatus {
                        context: participant.context.clone(),
                        actor: participant.actor.clone(),
                        rm_state: crate::rm::RmState::INITIAL,
                        vfd_state: crate::case_status::VfdState::INITIAL,
                        timestamp: Some(Utc::now()),
                    });
                }
                case.add_participant(participant);
                Ok(())
            },
            Mutation::AddNoteToCase { case_id, note } => {
                let case = self.case_mut(&case_id)?;
                if case.contains_note(&note.id) {
                    return Err(StoreError::StaleMutation {
                        id: case_id,
                        expected: "note absent".to_string(),
                        found: "note present".to_string(),
                    });
                }
                case.add_note(note);
                Ok(())
            },
            Mutation::AppendParticipantStatus {
                case_id,
                participant_id,
                status,
            } => {
                let case = self.case_mut(&case_id)?;
                let participant = case
                    .case_participants
                    .iter_mut()
                    .find(|participant| participant.id == participant_id)
                    .ok_or(StoreError::UnknownEntity { id: participant_id })?;
                let mut status = status;
                if status.timestamp.is_none() {
                    status.timestamp = Some(Utc::now());
                }
                participant.push_status(status);
                Ok(())
            },
        }
    }
}

impl RoleAuthority for MemoryStore {
    fn role_of(&self, actor_id: &str, entity_id: &str) -> Option<ParticipantRole> {
        self.roles
            .get(&(actor_id.to_string(), entity_id.to_string()))
            .copied()
    }
}
