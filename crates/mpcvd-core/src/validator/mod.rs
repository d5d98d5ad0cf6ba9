//! The activity validator: one entry point, all-or-nothing.
//!
//! Given an activity and a read snapshot of the entity it is addressed to,
//! [`validate`] performs, in order:
//!
//! 1. the structural contract check of the activity's kind
//!    ([`crate::vocab::Activity::check_contract`]);
//! 2. the actor-authorization check — for reports against the fixed
//!    finder/vendor roles supplied by the host's [`RoleAuthority`], for
//!    cases against the actor's entry in the participant list;
//! 3. the state-machine transition lookup ([`crate::rm`],
//!    [`crate::case_status`]) keyed by the current recorded state and the
//!    activity kind;
//! 4. on success, construction of a [`TransitionResult`] describing the
//!    mutations the host applies to its store.
//!
//! No partial mutation is ever produced: either every check passes and the
//! full mutation list is returned, or the activity is rejected with a typed
//! [`ValidationError`] and nothing changes.
//!
//! The validator is a pure function over its inputs. It never touches
//! shared state, performs no I/O, and defines no concurrency of its own;
//! hosts must serialize application of activities per entity identifier,
//! since two activities admitted against the same snapshot can otherwise
//! produce divergent results.

mod error;
mod result;

#[cfg(test)]
mod tests;

pub use error::ValidationError;
pub use result::{EntityKind, EntitySnapshot, EntityState, Mutation, TransitionResult};

use crate::case_status::{self, AggregateStatus, VfdState, aggregate_status};
use crate::rm::{self, RmState};
use crate::store::RoleAuthority;
use crate::vocab::{
    Activity, ActivityKind, CaseParticipant, ParticipantRole, ParticipantStatus, ProtocolObject,
    VocabError, VulnerabilityCase, VulnerabilityReport,
};

/// The initial state of a freshly created entity of the given kind.
#[must_use]
pub fn initial_state(kind: EntityKind) -> EntityState {
    match kind {
        EntityKind::Report => EntityState::Report(RmState::INITIAL),
        EntityKind::Case => EntityState::Case(AggregateStatus::Pending),
        EntityKind::Participant => EntityState::Participant {
            rm: RmState::INITIAL,
            vfd: VfdState::INITIAL,
        },
    }
}

/// Validates one activity against the current state of its target entity.
///
/// # Errors
///
/// Returns a [`ValidationError`] describing the first failed check; see the
/// module documentation for the check order.
pub fn validate(
    activity: &Activity,
    snapshot: &EntitySnapshot<'_>,
    roles: &dyn RoleAuthority,
) -> Result<TransitionResult, ValidationError> {
    activity.check_contract()?;

    let outcome = match snapshot {
        EntitySnapshot::Absent => validate_create(activity, roles),
        EntitySnapshot::Report(report) => validate_report(activity, report, roles),
        EntitySnapshot::Case(case) => validate_case(activity, case, roles),
    };

    match &outcome {
        Ok(result) => tracing::debug!(
            kind = %activity.kind,
            actor = %activity.actor,
            entity = %result.entity_id,
            mutations = result.mutations.len(),
            "activity accepted"
        ),
        Err(error) => tracing::warn!(
            kind = %activity.kind,
            actor = %activity.actor,
            %error,
            "activity rejected"
        ),
    }
    outcome
}

/// Handles activities addressed to an entity that does not exist yet.
fn validate_create(
    activity: &Activity,
    roles: &dyn RoleAuthority,
) -> Result<TransitionResult, ValidationError> {
    if activity.kind != ActivityKind::Create {
        return Err(ValidationError::UnknownTarget {
            target: activity
                .target_entity_id()
                .unwrap_or("(unaddressed)")
                .to_string(),
        });
    }

    let Some(object) = activity.embedded_object() else {
        // The contract admits embedded objects only; anything else was
        // already rejected.
        return Err(VocabError::InvalidObjectForm {
            kind: ActivityKind::Create,
            expected: "an embedded object",
        }
        .into());
    };

    match object {
        ProtocolObject::VulnerabilityReport(report) => {
            check_role(
                roles,
                &activity.actor,
                &report.id,
                ParticipantRole::FinderReporter,
                activity.kind,
            )?;
            if report.rm_state != RmState::INITIAL || !report.rm_log.is_empty() {
                return Err(ValidationError::IllegalTransition {
                    entity: report.id.clone(),
                    current: "(none)".to_string(),
                    kind: activity.kind,
                });
            }
            Ok(TransitionResult::mutation(
                report.id.clone(),
                Mutation::CreateReport {
                    report: report.clone(),
                    timestamp: activity.published,
                },
            ))
        },
        ProtocolObject::VulnerabilityCase(case) => {
            let actual = roles.role_of(&activity.actor, &case.id);
            if !matches!(
                actual,
                Some(ParticipantRole::Vendor | ParticipantRole::Coordinator)
            ) {
                return Err(ValidationError::UnauthorizedTransition {
                    kind: activity.kind,
                    actor: activity.actor.clone(),
                    required: "vendor or coordinator".to_string(),
                    actual: role_name(actual),
                });
            }
            check_embedded_case(case)?;
            Ok(TransitionResult::mutation(
                case.id.clone(),
                Mutation::CreateCase { case: case.clone() },
            ))
        },
        other => Err(VocabError::UnsupportedObject {
            kind: activity.kind,
            object: other.kind_name(),
        }
        .into()),
    }
}

/// Structural checks on a case embedded in a `Create`.
fn check_embedded_case(case: &VulnerabilityCase) -> Result<(), ValidationError> {
    for (index, participant) in case.case_participants.iter().enumerate() {
        if participant.context != case.id {
            return Err(VocabError::ContextMismatch {
                expected: case.id.clone(),
                found: participant.context.clone(),
            }
            .into());
        }
        let duplicate = case.case_participants[..index]
            .iter()
            .any(|earlier| earlier.actor == participant.actor);
        if duplicate {
            return Err(ValidationError::DuplicateMember {
                container: "the case's participants",
                member: participant.actor.clone(),
            });
        }
    }
    for (index, report_id) in case.vulnerability_reports.iter().enumerate() {
        if case.vulnerability_reports[..index].contains(report_id) {
            return Err(ValidationError::DuplicateMember {
                container: "the case's report list",
                member: report_id.clone(),
            });
        }
    }
    Ok(())
}

/// Handles activities addressed to an existing report.
fn validate_report(
    activity: &Activity,
    report: &VulnerabilityReport,
    roles: &dyn RoleAuthority,
) -> Result<TransitionResult, ValidationError> {
    match activity.kind {
        ActivityKind::Create => Err(ValidationError::DuplicateMember {
            container: "the report store",
            member: report.id.clone(),
        }),
        ActivityKind::Undo => validate_report_undo(activity, report, roles),
        kind => {
            if let Some(object_id) = activity.object_id() {
                if object_id != report.id {
                    return Err(ValidationError::UnknownTarget {
                        target: object_id.to_string(),
                    });
                }
            }

            let Some(required) = rm::required_role(kind) else {
                return Err(illegal_report_transition(report, kind));
            };
            check_role(roles, &activity.actor, &report.id, required, kind)?;

            let Some(next) = rm::next(report.rm_state, kind) else {
                return Err(illegal_report_transition(report, kind));
            };
            if next == report.rm_state {
                Ok(TransitionResult::acknowledgment(report.id.clone()))
            } else {
                Ok(TransitionResult::mutation(
                    report.id.clone(),
                    Mutation::SetReportState {
                        report_id: report.id.clone(),
                        from: report.rm_state,
                        to: next,
                        timestamp: activity.published,
                    },
                ))
            }
        },
    }
}

/// `Undo` wrapping the closing `Leave`: the one path out of `Closed`.
fn validate_report_undo(
    activity: &Activity,
    report: &VulnerabilityReport,
    roles: &dyn RoleAuthority,
) -> Result<TransitionResult, ValidationError> {
    let wrapped = expect_wrapped(activity)?;

    check_undo_target(activity, wrapped, &report.id)?;

    if wrapped.kind != ActivityKind::Leave {
        return Err(illegal_report_transition(report, activity.kind));
    }
    check_role(
        roles,
        &activity.actor,
        &report.id,
        ParticipantRole::Vendor,
        activity.kind,
    )?;
    if report.rm_state != RmState::Closed {
        return Err(illegal_report_transition(report, activity.kind));
    }
    let Some(restored) = report.last_open_state() else {
        return Err(illegal_report_transition(report, activity.kind));
    };
    Ok(TransitionResult::mutation(
        report.id.clone(),
        Mutation::SetReportState {
            report_id: report.id.clone(),
            from: RmState::Closed,
            to: restored,
            timestamp: activity.published,
        },
    ))
}

/// Handles activities addressed to an existing case.
// Case-directed authorization is decided by the case's own participant
// list, so the role authority is not consulted here.
fn validate_case(
    activity: &Activity,
    case: &VulnerabilityCase,
    _roles: &dyn RoleAuthority,
) -> Result<TransitionResult, ValidationError> {
    match activity.kind {
        ActivityKind::Create => Err(ValidationError::DuplicateMember {
            container: "the case store",
            member: case.id.clone(),
        }),
        ActivityKind::Add => validate_case_add(activity, case),
        ActivityKind::Join | ActivityKind::Ignore | ActivityKind::Leave => {
            validate_engagement(activity, case)
        },
        ActivityKind::Undo => validate_case_undo(activity, case),
        ActivityKind::Offer | ActivityKind::Update => {
            member_standing(case, &activity.actor, activity.kind)?;
            if let Some(object_id) = activity.object_id() {
                if object_id != case.id {
                    return Err(ValidationError::UnknownTarget {
                        target: object_id.to_string(),
                    });
                }
            }
            Ok(TransitionResult::acknowledgment(case.id.clone()))
        },
        ActivityKind::Accept | ActivityKind::Reject => validate_case_response(activity, case),
        ActivityKind::Invite | ActivityKind::Recommend => validate_proposal(activity, case),
        ActivityKind::Read => Err(illegal_case_transition(case, activity.kind)),
    }
}

/// `Add` of a report, participant, or note to a case.
fn validate_case_add(
    activity: &Activity,
    case: &VulnerabilityCase,
) -> Result<TransitionResult, ValidationError> {
    let target = activity.target.as_deref().unwrap_or_default();
    if target != case.id {
        return Err(ValidationError::UnknownTarget {
            target: target.to_string(),
        });
    }
    member_standing(case, &activity.actor, activity.kind)?;

    match activity.embedded_object() {
        // A bare reference attaches a report by identifier.
        None => {
            let report_id = activity.object_ref().unwrap_or_default();
            add_report(case, report_id)
        },
        Some(ProtocolObject::VulnerabilityReport(report)) => add_report(case, &report.id),
        Some(ProtocolObject::CaseParticipant(participant)) => {
            if participant.context != case.id {
                return Err(VocabError::ContextMismatch {
                    expected: case.id.clone(),
                    found: participant.context.clone(),
                }
                .into());
            }
            if case.participant_of(&participant.actor).is_some() {
                return Err(ValidationError::DuplicateMember {
                    container: "the case's participants",
                    member: participant.actor.clone(),
                });
            }
            Ok(TransitionResult::mutation(
                case.id.clone(),
                Mutation::AddParticipantToCase {
                    case_id: case.id.clone(),
                    participant: participant.clone(),
                },
            ))
        },
        Some(ProtocolObject::Note(note)) => {
            let found = note.context.clone().unwrap_or_else(|| "(unset)".to_string());
            if found != case.id {
                return Err(VocabError::ContextMismatch {
                    expected: case.id.clone(),
                    found,
                }
                .into());
            }
            if case.contains_note(&note.id) {
                return Err(ValidationError::DuplicateMember {
                    container: "the case's notes",
                    member: note.id.clone(),
                });
            }
            Ok(TransitionResult::mutation(
                case.id.clone(),
                Mutation::AddNoteToCase {
                    case_id: case.id.clone(),
                    note: note.clone(),
                },
            ))
        },
        Some(other) => Err(VocabError::UnsupportedObject {
            kind: activity.kind,
            object: other.kind_name(),
        }
        .into()),
    }
}

fn add_report(
    case: &VulnerabilityCase,
    report_id: &str,
) -> Result<TransitionResult, ValidationError> {
    if case.contains_report(report_id) {
        return Err(ValidationError::DuplicateMember {
            container: "the case's report list",
            member: report_id.to_string(),
        });
    }
    Ok(TransitionResult::mutation(
        case.id.clone(),
        Mutation::AddReportToCase {
            case_id: case.id.clone(),
            report_id: report_id.to_string(),
        },
    ))
}

/// `Join`, `Ignore`, `Leave`: the actor moves its own engagement.
fn validate_engagement(
    activity: &Activity,
    case: &VulnerabilityCase,
) -> Result<TransitionResult, ValidationError> {
    let object_id = activity.object_ref().unwrap_or_default();
    if object_id != case.id {
        return Err(ValidationError::UnknownTarget {
            target: object_id.to_string(),
        });
    }
    let participant = own_participant(case, &activity.actor)?;

    let current = participant.latest_vfd();
    let Some(next) = case_status::next(current, activity.kind) else {
        return Err(ValidationError::IllegalTransition {
            entity: participant.id.clone(),
            current: current.to_string(),
            kind: activity.kind,
        });
    };
    Ok(engagement_result(activity, case, participant, next))
}

/// `Undo` wrapping an `Ignore`: re-engagement of a deferred participant.
fn validate_case_undo(
    activity: &Activity,
    case: &VulnerabilityCase,
) -> Result<TransitionResult, ValidationError> {
    let wrapped = expect_wrapped(activity)?;

    check_undo_target(activity, wrapped, &case.id)?;

    if wrapped.kind != ActivityKind::Ignore {
        return Err(illegal_case_transition(case, activity.kind));
    }
    let participant = own_participant(case, &activity.actor)?;
    let current = participant.latest_vfd();
    if current != VfdState::Deferred {
        return Err(ValidationError::IllegalTransition {
            entity: participant.id.clone(),
            current: current.to_string(),
            kind: activity.kind,
        });
    }
    Ok(engagement_result(activity, case, participant, VfdState::Engaged))
}

fn engagement_result(
    activity: &Activity,
    case: &VulnerabilityCase,
    participant: &CaseParticipant,
    next: VfdState,
) -> TransitionResult {
    let status = ParticipantStatus {
        context: case.id.clone(),
        actor: activity.actor.clone(),
        rm_state: participant.latest_rm(),
        vfd_state: next,
        timestamp: activity.published,
    };
    TransitionResult::mutation(
        case.id.clone(),
        Mutation::AppendParticipantStatus {
            case_id: case.id.clone(),
            participant_id: participant.id.clone(),
            status,
        },
    )
}

/// `Accept`/`Reject` addressed to a case: invitation responses (carrying
/// `inReplyTo`), ownership-transfer responses (carrying `origin`), and
/// recommendation responses (neither).
fn validate_case_response(
    activity: &Activity,
    case: &VulnerabilityCase,
) -> Result<TransitionResult, ValidationError> {
    if activity.in_reply_to.is_some() || activity.origin.is_some() {
        // Invitation and transfer responses are issued by parties that are
        // not (yet) case participants; only the addressing is checked.
        if let Some(object_id) = activity.object_id() {
            if object_id != case.id {
                return Err(ValidationError::UnknownTarget {
                    target: object_id.to_string(),
                });
            }
        }
    } else {
        // Recommendation responses come from a standing participant and
        // reference the proposed actor as the object.
        member_standing(case, &activity.actor, activity.kind)?;
        if let Some(target) = activity.target.as_deref() {
            if target != case.id {
                return Err(ValidationError::UnknownTarget {
                    target: target.to_string(),
                });
            }
        }
    }
    Ok(TransitionResult::acknowledgment(case.id.clone()))
}

/// `Invite`/`Recommend`: proposing an actor for participation.
fn validate_proposal(
    activity: &Activity,
    case: &VulnerabilityCase,
) -> Result<TransitionResult, ValidationError> {
    let target = activity.target.as_deref().unwrap_or_default();
    if target != case.id {
        return Err(ValidationError::UnknownTarget {
            target: target.to_string(),
        });
    }
    member_standing(case, &activity.actor, activity.kind)?;

    let proposed = activity.object_ref().unwrap_or_default();
    if case.participant_of(proposed).is_some() {
        return Err(ValidationError::DuplicateMember {
            container: "the case's participants",
            member: proposed.to_string(),
        });
    }
    Ok(TransitionResult::acknowledgment(case.id.clone()))
}

// ============================================================================
// Shared checks
// ============================================================================

fn check_role(
    roles: &dyn RoleAuthority,
    actor: &str,
    entity_id: &str,
    required: ParticipantRole,
    kind: ActivityKind,
) -> Result<(), ValidationError> {
    let actual = roles.role_of(actor, entity_id);
    if actual == Some(required) {
        Ok(())
    } else {
        Err(ValidationError::UnauthorizedTransition {
            kind,
            actor: actor.to_string(),
            required: required.to_string(),
            actual: role_name(actual),
        })
    }
}

fn role_name(role: Option<ParticipantRole>) -> String {
    role.map_or_else(|| "unknown".to_string(), |role| role.to_string())
}

/// Resolves the actor's own membership record; the record is the target of
/// an engagement transition, so a missing record is an unknown target.
fn own_participant<'case>(
    case: &'case VulnerabilityCase,
    actor: &str,
) -> Result<&'case CaseParticipant, ValidationError> {
    case.participant_of(actor)
        .ok_or_else(|| ValidationError::UnknownTarget {
            target: format!("participant '{actor}' in case '{}'", case.id),
        })
}

/// Requires the actor to hold a membership record in the case.
fn member_standing(
    case: &VulnerabilityCase,
    actor: &str,
    kind: ActivityKind,
) -> Result<(), ValidationError> {
    if case.participant_of(actor).is_some() {
        Ok(())
    } else {
        Err(ValidationError::UnauthorizedTransition {
            kind,
            actor: actor.to_string(),
            required: "case participant".to_string(),
            actual: "not a participant".to_string(),
        })
    }
}

fn expect_wrapped(activity: &Activity) -> Result<&Activity, ValidationError> {
    activity.wrapped_activity().ok_or_else(|| {
        VocabError::InvalidObjectForm {
            kind: ActivityKind::Undo,
            expected: "an embedded activity",
        }
        .into()
    })
}

/// The wrapped activity's actor and object must match the outer `Undo`'s
/// actor and the entity it is addressed to.
fn check_undo_target(
    activity: &Activity,
    wrapped: &Activity,
    entity_id: &str,
) -> Result<(), ValidationError> {
    let wrapped_object = wrapped.object_id().unwrap_or("(activity)");
    let context_matches = activity
        .context
        .as_deref()
        .map_or(true, |context| context == entity_id);
    if wrapped.actor != activity.actor || wrapped_object != entity_id || !context_matches {
        return Err(ValidationError::MismatchedUndoTarget {
            expected_actor: activity.actor.clone(),
            found_actor: wrapped.actor.clone(),
            expected_object: entity_id.to_string(),
            found_object: wrapped_object.to_string(),
        });
    }
    Ok(())
}

fn illegal_report_transition(report: &VulnerabilityReport, kind: ActivityKind) -> ValidationError {
    ValidationError::IllegalTransition {
        entity: report.id.clone(),
        current: report.rm_state.to_string(),
        kind,
    }
}

fn illegal_case_transition(case: &VulnerabilityCase, kind: ActivityKind) -> ValidationError {
    ValidationError::IllegalTransition {
        entity: case.id.clone(),
        current: aggregate_status(case).to_string(),
        kind,
    }
}
