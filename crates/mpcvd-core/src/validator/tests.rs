//! Scenario and property tests for the validator.
//!
//! Most tests drive the full admit path of [`MemoryStore`]: resolve the
//! target entity, validate against a snapshot, apply the mutations. This
//! exercises the validator, the transition tables, and the store's
//! append-only bookkeeping together.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use super::{EntityKind, EntitySnapshot, EntityState, Mutation, ValidationError, initial_state, validate};
use crate::case_status::{AggregateStatus, VfdState, aggregate_status};
use crate::rm::RmState;
use crate::store::{AdmitError, MemoryStore};
use crate::vocab::{
    Activity, ActivityKind, CaseParticipant, Note, ParticipantRole, ProtocolObject, VocabError,
    VulnerabilityCase, VulnerabilityReport,
};

const FINDER: &str = "https://mpcvd.example/users/finn";
const VENDOR: &str = "https://mpcvd.example/organizations/vendor";
const COORDINATOR: &str = "https://mpcvd.example/organizations/coordinator";
const OUTSIDER: &str = "https://mpcvd.example/users/rando";
const REPORT_ID: &str = "https://mpcvd.example/reports/FDR-8675309";
const CASE_ID: &str = "https://mpcvd.example/cases/VDR-20991514";

fn ts(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
}

fn report() -> VulnerabilityReport {
    VulnerabilityReport::new("FDR-8675309", "I found a vulnerability!", REPORT_ID)
        .unwrap()
        .attributed_to(FINDER)
}

fn participant(role: ParticipantRole, actor: &str, shortname: &str) -> CaseParticipant {
    CaseParticipant::new(
        role,
        actor,
        shortname,
        CASE_ID,
        format!("{CASE_ID}/participants/{shortname}"),
    )
    .unwrap()
}

/// A store with the fixed report roles registered and the case created by
/// the vendor (who is its first participant).
fn store_with_case() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.register_role(FINDER, REPORT_ID, ParticipantRole::FinderReporter);
    store.register_role(VENDOR, REPORT_ID, ParticipantRole::Vendor);
    store.register_role(VENDOR, CASE_ID, ParticipantRole::Vendor);
    store.register_role(COORDINATOR, CASE_ID, ParticipantRole::Coordinator);

    let mut case = VulnerabilityCase::new("VENDOR Case #20991514", CASE_ID).unwrap();
    case.add_participant(participant(ParticipantRole::Vendor, VENDOR, "vendor"));
    let create = Activity::new(ActivityKind::Create, VENDOR, ProtocolObject::from(case))
        .with_published(ts(8));
    store.admit(&create).unwrap();
    store
}

fn create_report() -> Activity {
    Activity::new(ActivityKind::Create, FINDER, ProtocolObject::from(report()))
        .with_published(ts(9))
}

fn report_activity(kind: ActivityKind, actor: &str, hour: u32) -> Activity {
    Activity::new(kind, actor, REPORT_ID).with_published(ts(hour))
}

fn engagement(kind: ActivityKind, actor: &str, hour: u32) -> Activity {
    Activity::new(kind, actor, CASE_ID).with_published(ts(hour))
}

fn undo_of(wrapped: Activity, actor: &str, hour: u32) -> Activity {
    Activity::new(ActivityKind::Undo, actor, wrapped)
        .with_context(CASE_ID)
        .with_published(ts(hour))
}

fn validation_err(result: Result<super::TransitionResult, AdmitError>) -> ValidationError {
    match result {
        Err(AdmitError::Validation(error)) => error,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

// ============================================================================
// Report lifecycle
// ============================================================================

#[test]
fn test_report_validate_close_then_replay_is_rejected() {
    let mut store = store_with_case();
    store.admit(&create_report()).unwrap();
    assert_eq!(store.report(REPORT_ID).unwrap().rm_state, RmState::Received);

    store
        .admit(&report_activity(ActivityKind::Accept, VENDOR, 10))
        .unwrap();
    assert_eq!(store.report(REPORT_ID).unwrap().rm_state, RmState::Valid);

    store
        .admit(&report_activity(ActivityKind::Leave, VENDOR, 11))
        .unwrap();
    assert_eq!(store.report(REPORT_ID).unwrap().rm_state, RmState::Closed);

    // Replaying the Accept against the closed report must fail.
    let error = validation_err(store.admit(&report_activity(ActivityKind::Accept, VENDOR, 12)));
    assert!(matches!(error, ValidationError::IllegalTransition { .. }));
    assert_eq!(store.report(REPORT_ID).unwrap().rm_state, RmState::Closed);

    // The transition log recorded every state in order.
    let log: Vec<RmState> = store
        .report(REPORT_ID)
        .unwrap()
        .rm_log
        .iter()
        .map(|entry| entry.state)
        .collect();
    assert_eq!(log, vec![RmState::Received, RmState::Valid, RmState::Closed]);
}

#[test]
fn test_report_invalidate_branch() {
    let mut store = store_with_case();
    store.admit(&create_report()).unwrap();

    // Submission and acknowledgment leave the state untouched.
    let submit = Activity::new(ActivityKind::Offer, FINDER, REPORT_ID)
        .with_to(VENDOR)
        .with_published(ts(9));
    let result = store.admit(&submit).unwrap();
    assert!(result.mutations.is_empty());

    let read = report_activity(ActivityKind::Read, VENDOR, 10)
        .with_content("We've read the report. We'll get back to you soon.");
    let result = store.admit(&read).unwrap();
    assert!(result.mutations.is_empty());
    assert_eq!(store.report(REPORT_ID).unwrap().rm_state, RmState::Received);

    store
        .admit(&report_activity(ActivityKind::Reject, VENDOR, 11))
        .unwrap();
    assert_eq!(store.report(REPORT_ID).unwrap().rm_state, RmState::Invalid);

    // An invalid report cannot be revalidated, only closed.
    let error = validation_err(store.admit(&report_activity(ActivityKind::Accept, VENDOR, 12)));
    assert!(matches!(error, ValidationError::IllegalTransition { .. }));

    store
        .admit(&report_activity(ActivityKind::Leave, VENDOR, 13))
        .unwrap();
    assert_eq!(store.report(REPORT_ID).unwrap().rm_state, RmState::Closed);
}

#[test]
fn test_report_prioritization() {
    let mut store = store_with_case();
    store.admit(&create_report()).unwrap();
    store
        .admit(&report_activity(ActivityKind::Accept, VENDOR, 10))
        .unwrap();
    store
        .admit(&report_activity(ActivityKind::Accept, VENDOR, 11))
        .unwrap();
    assert_eq!(store.report(REPORT_ID).unwrap().rm_state, RmState::Accepted);

    // A third Accept has nowhere to go.
    let error = validation_err(store.admit(&report_activity(ActivityKind::Accept, VENDOR, 12)));
    assert!(matches!(error, ValidationError::IllegalTransition { .. }));
}

#[test]
fn test_finder_cannot_decide_validity() {
    let mut store = store_with_case();
    store.admit(&create_report()).unwrap();

    let error = validation_err(store.admit(&report_activity(ActivityKind::Accept, FINDER, 10)));
    let ValidationError::UnauthorizedTransition { required, actual, .. } = error else {
        panic!("expected an authorization failure");
    };
    assert_eq!(required, "vendor");
    assert_eq!(actual, "finder/reporter");
}

#[test]
fn test_unknown_actor_has_no_standing() {
    let mut store = store_with_case();
    store.admit(&create_report()).unwrap();

    let error = validation_err(store.admit(&report_activity(ActivityKind::Accept, OUTSIDER, 10)));
    let ValidationError::UnauthorizedTransition { actual, .. } = error else {
        panic!("expected an authorization failure");
    };
    assert_eq!(actual, "unknown");
}

#[test]
fn test_create_twice_is_duplicate() {
    let mut store = store_with_case();
    store.admit(&create_report()).unwrap();
    let error = validation_err(store.admit(&create_report()));
    assert!(matches!(error, ValidationError::DuplicateMember { .. }));
}

#[test]
fn test_activity_to_missing_entity() {
    let mut store = store_with_case();
    let error = validation_err(store.admit(&report_activity(ActivityKind::Read, VENDOR, 9)));
    assert!(matches!(error, ValidationError::UnknownTarget { .. }));
}

#[test]
fn test_undo_reopens_closed_report_for_closing_actor_only() {
    let mut store = store_with_case();
    store.admit(&create_report()).unwrap();
    store
        .admit(&report_activity(ActivityKind::Accept, VENDOR, 10))
        .unwrap();
    let close = report_activity(ActivityKind::Leave, VENDOR, 11);
    store.admit(&close).unwrap();

    // Undo by someone other than the closing actor is a target mismatch.
    let mut store2 = store_with_case();
    store2.admit(&create_report()).unwrap();
    store2
        .admit(&report_activity(ActivityKind::Accept, VENDOR, 10))
        .unwrap();
    store2.admit(&close).unwrap();
    store2.register_role(COORDINATOR, REPORT_ID, ParticipantRole::Vendor);
    let foreign_undo = Activity::new(ActivityKind::Undo, COORDINATOR, close.clone())
        .with_context(REPORT_ID)
        .with_published(ts(12));
    let error = validation_err(store2.admit(&foreign_undo));
    assert!(matches!(error, ValidationError::MismatchedUndoTarget { .. }));

    // Undo by the closing actor restores the pre-closure state.
    let undo = Activity::new(ActivityKind::Undo, VENDOR, close.clone())
        .with_context(REPORT_ID)
        .with_published(ts(12));
    store.admit(&undo).unwrap();
    assert_eq!(store.report(REPORT_ID).unwrap().rm_state, RmState::Valid);

    // With the report open again there is no closure left to undo.
    let again = Activity::new(ActivityKind::Undo, VENDOR, close)
        .with_context(REPORT_ID)
        .with_published(ts(13));
    let error = validation_err(store.admit(&again));
    assert!(matches!(error, ValidationError::IllegalTransition { .. }));
}

// ============================================================================
// Case lifecycle
// ============================================================================

#[test]
fn test_case_creation_requires_vendor_or_coordinator() {
    let mut store = MemoryStore::new();
    store.register_role(FINDER, CASE_ID, ParticipantRole::FinderReporter);
    let case = VulnerabilityCase::new("VENDOR Case #20991514", CASE_ID).unwrap();
    let create = Activity::new(ActivityKind::Create, FINDER, ProtocolObject::from(case));
    let error = validation_err(store.admit(&create));
    assert!(matches!(error, ValidationError::UnauthorizedTransition { .. }));
}

#[test]
fn test_embedded_participant_context_must_match() {
    let mut store = MemoryStore::new();
    store.register_role(VENDOR, CASE_ID, ParticipantRole::Vendor);
    let mut case = VulnerabilityCase::new("VENDOR Case #20991514", CASE_ID).unwrap();
    let mut vendor = participant(ParticipantRole::Vendor, VENDOR, "vendor");
    vendor.context = "https://mpcvd.example/cases/other".to_string();
    case.add_participant(vendor);

    let create = Activity::new(ActivityKind::Create, VENDOR, ProtocolObject::from(case));
    let error = validation_err(store.admit(&create));
    assert!(matches!(
        error,
        ValidationError::MalformedActivity(VocabError::ContextMismatch { .. })
    ));
}

#[test]
fn test_add_report_is_idempotent_rejecting() {
    let mut store = store_with_case();
    store.admit(&create_report()).unwrap();

    let add = Activity::new(ActivityKind::Add, VENDOR, REPORT_ID)
        .with_target(CASE_ID)
        .with_published(ts(10));
    store.admit(&add).unwrap();
    assert_eq!(store.case(CASE_ID).unwrap().vulnerability_reports.len(), 1);

    let error = validation_err(store.admit(&add));
    assert!(matches!(
        error,
        ValidationError::DuplicateMember {
            container: "the case's report list",
            ..
        }
    ));
    // The list is unchanged by the rejected duplicate.
    assert_eq!(store.case(CASE_ID).unwrap().vulnerability_reports.len(), 1);
}

#[test]
fn test_add_requires_membership() {
    let mut store = store_with_case();
    store.admit(&create_report()).unwrap();
    let add = Activity::new(ActivityKind::Add, FINDER, REPORT_ID).with_target(CASE_ID);
    let error = validation_err(store.admit(&add));
    assert!(matches!(error, ValidationError::UnauthorizedTransition { .. }));
}

#[test]
fn test_add_participant_seeds_initial_status() {
    let mut store = store_with_case();
    let add = Activity::new(
        ActivityKind::Add,
        VENDOR,
        ProtocolObject::from(participant(ParticipantRole::FinderReporter, FINDER, "finn")),
    )
    .with_target(CASE_ID)
    .with_published(ts(10));
    store.admit(&add).unwrap();

    let case = store.case(CASE_ID).unwrap();
    let finder = case.participant_of(FINDER).unwrap();
    assert_eq!(finder.participant_status.len(), 1);
    assert_eq!(finder.latest_rm(), RmState::Received);
    assert_eq!(finder.latest_vfd(), VfdState::Vfd);

    // The same actor cannot be added twice.
    let error = validation_err(store.admit(&add));
    assert!(matches!(error, ValidationError::DuplicateMember { .. }));
}

#[test]
fn test_engagement_cycle_with_single_use_undo() {
    let mut store = store_with_case();

    store.admit(&engagement(ActivityKind::Join, VENDOR, 10)).unwrap();
    let vfd = store
        .case(CASE_ID)
        .unwrap()
        .participant_of(VENDOR)
        .unwrap()
        .latest_vfd();
    assert_eq!(vfd, VfdState::Engaged);

    let deferral = engagement(ActivityKind::Ignore, VENDOR, 11);
    store.admit(&deferral).unwrap();
    assert_eq!(
        store
            .case(CASE_ID)
            .unwrap()
            .participant_of(VENDOR)
            .unwrap()
            .latest_vfd(),
        VfdState::Deferred
    );

    // Undo of the deferral restores exactly the engaged state.
    store
        .admit(&undo_of(deferral.clone(), VENDOR, 12))
        .unwrap();
    assert_eq!(
        store
            .case(CASE_ID)
            .unwrap()
            .participant_of(VENDOR)
            .unwrap()
            .latest_vfd(),
        VfdState::Engaged
    );

    // A second Undo of the same deferral finds nothing to reverse.
    let error = validation_err(store.admit(&undo_of(deferral, VENDOR, 13)));
    assert!(matches!(error, ValidationError::IllegalTransition { .. }));
}

#[test]
fn test_undo_by_other_actor_is_mismatched() {
    let mut store = store_with_case();
    let add = Activity::new(
        ActivityKind::Add,
        VENDOR,
        ProtocolObject::from(participant(
            ParticipantRole::Coordinator,
            COORDINATOR,
            "coordinator",
        )),
    )
    .with_target(CASE_ID);
    store.admit(&add).unwrap();

    store.admit(&engagement(ActivityKind::Join, VENDOR, 10)).unwrap();
    let deferral = engagement(ActivityKind::Ignore, VENDOR, 11);
    store.admit(&deferral).unwrap();

    let error = validation_err(store.admit(&undo_of(deferral, COORDINATOR, 12)));
    assert!(matches!(error, ValidationError::MismatchedUndoTarget { .. }));
}

#[test]
fn test_participant_closure_is_terminal() {
    let mut store = store_with_case();
    store.admit(&engagement(ActivityKind::Leave, VENDOR, 10)).unwrap();
    assert_eq!(
        store
            .case(CASE_ID)
            .unwrap()
            .participant_of(VENDOR)
            .unwrap()
            .latest_vfd(),
        VfdState::Closed
    );

    let error = validation_err(store.admit(&engagement(ActivityKind::Join, VENDOR, 11)));
    assert!(matches!(error, ValidationError::IllegalTransition { .. }));
}

#[test]
fn test_engagement_requires_membership_record() {
    let mut store = store_with_case();
    let error = validation_err(store.admit(&engagement(ActivityKind::Join, COORDINATOR, 10)));
    assert!(matches!(error, ValidationError::UnknownTarget { .. }));
}

#[test]
fn test_aggregate_follows_participants() {
    let mut store = store_with_case();
    for (role, actor, shortname) in [
        (ParticipantRole::FinderReporter, FINDER, "finn"),
        (ParticipantRole::Coordinator, COORDINATOR, "coordinator"),
    ] {
        let add = Activity::new(
            ActivityKind::Add,
            VENDOR,
            ProtocolObject::from(participant(role, actor, shortname)),
        )
        .with_target(CASE_ID);
        store.admit(&add).unwrap();
    }

    // Two participants close out; one engages: still active.
    store.admit(&engagement(ActivityKind::Leave, VENDOR, 10)).unwrap();
    store.admit(&engagement(ActivityKind::Leave, FINDER, 11)).unwrap();
    store
        .admit(&engagement(ActivityKind::Join, COORDINATOR, 12))
        .unwrap();
    assert_eq!(
        aggregate_status(store.case(CASE_ID).unwrap()),
        AggregateStatus::Active
    );

    // The last participant closing closes the case.
    store
        .admit(&engagement(ActivityKind::Leave, COORDINATOR, 13))
        .unwrap();
    assert_eq!(
        aggregate_status(store.case(CASE_ID).unwrap()),
        AggregateStatus::Closed
    );
}

// ============================================================================
// Proposals, invitations, transfers, notes
// ============================================================================

#[test]
fn test_invitation_flow() {
    let mut store = store_with_case();
    let invite = Activity::new(ActivityKind::Invite, VENDOR, COORDINATOR)
        .with_id(format!("{CASE_ID}/invitation/1"))
        .with_target(CASE_ID)
        .with_to(COORDINATOR)
        .with_content("We're inviting you to participate.");
    let result = store.admit(&invite).unwrap();
    assert!(result.mutations.is_empty());

    // The invitee responds without being a participant yet.
    let accept = Activity::new(ActivityKind::Accept, COORDINATOR, CASE_ID)
        .with_to(VENDOR)
        .with_in_reply_to(format!("{CASE_ID}/invitation/1"));
    assert!(store.admit(&accept).unwrap().mutations.is_empty());

    // Inviting an existing participant is a duplicate.
    let self_invite = Activity::new(ActivityKind::Invite, VENDOR, VENDOR)
        .with_target(CASE_ID)
        .with_to(VENDOR);
    let error = validation_err(store.admit(&self_invite));
    assert!(matches!(error, ValidationError::DuplicateMember { .. }));
}

#[test]
fn test_recommendation_flow() {
    let mut store = store_with_case();
    let add = Activity::new(
        ActivityKind::Add,
        VENDOR,
        ProtocolObject::from(participant(ParticipantRole::FinderReporter, FINDER, "finn")),
    )
    .with_target(CASE_ID);
    store.admit(&add).unwrap();

    let recommend = Activity::new(ActivityKind::Recommend, FINDER, COORDINATOR)
        .with_target(CASE_ID)
        .with_context(CASE_ID)
        .with_to(VENDOR)
        .with_content("I'm recommending we add Coordinator LLC to the case.");
    assert!(store.admit(&recommend).unwrap().mutations.is_empty());

    let accept = Activity::new(ActivityKind::Accept, VENDOR, COORDINATOR)
        .with_target(CASE_ID)
        .with_context(CASE_ID)
        .with_to(FINDER);
    assert!(store.admit(&accept).unwrap().mutations.is_empty());

    // A recommendation response from a non-participant has no standing.
    let reject = Activity::new(ActivityKind::Reject, OUTSIDER, COORDINATOR)
        .with_target(CASE_ID)
        .with_context(CASE_ID);
    let error = validation_err(store.admit(&reject));
    assert!(matches!(error, ValidationError::UnauthorizedTransition { .. }));
}

#[test]
fn test_ownership_transfer_flow() {
    let mut store = store_with_case();
    let offer = Activity::new(ActivityKind::Offer, VENDOR, CASE_ID)
        .with_to(COORDINATOR)
        .with_content("We're offering to transfer ownership of this case to you.");
    assert!(store.admit(&offer).unwrap().mutations.is_empty());

    let accept = Activity::new(ActivityKind::Accept, COORDINATOR, CASE_ID)
        .with_origin(VENDOR)
        .with_content("We're accepting your offer.");
    assert!(store.admit(&accept).unwrap().mutations.is_empty());

    let update = Activity::new(ActivityKind::Update, VENDOR, CASE_ID)
        .with_content("We're updating the case to reflect a transfer of ownership.");
    assert!(store.admit(&update).unwrap().mutations.is_empty());

    let foreign_update = Activity::new(ActivityKind::Update, OUTSIDER, CASE_ID);
    let error = validation_err(store.admit(&foreign_update));
    assert!(matches!(error, ValidationError::UnauthorizedTransition { .. }));
}

#[test]
fn test_note_attachment() {
    let mut store = store_with_case();
    let note = Note::new("Note", "This is a note.", format!("{CASE_ID}/notes/1"))
        .unwrap()
        .in_context(CASE_ID);
    let add = Activity::new(ActivityKind::Add, VENDOR, ProtocolObject::from(note.clone()))
        .with_target(CASE_ID);
    store.admit(&add).unwrap();
    assert_eq!(store.case(CASE_ID).unwrap().notes.len(), 1);

    let error = validation_err(store.admit(&add));
    assert!(matches!(error, ValidationError::DuplicateMember { .. }));
    assert_eq!(store.case(CASE_ID).unwrap().notes.len(), 1);

    // A note pointing at a different case cannot be attached here.
    let stray = Note::new("Note", "Stray.", format!("{CASE_ID}/notes/2"))
        .unwrap()
        .in_context("https://mpcvd.example/cases/other");
    let add_stray = Activity::new(ActivityKind::Add, VENDOR, ProtocolObject::from(stray))
        .with_target(CASE_ID);
    let error = validation_err(store.admit(&add_stray));
    assert!(matches!(
        error,
        ValidationError::MalformedActivity(VocabError::ContextMismatch { .. })
    ));
}

// ============================================================================
// Entry-point plumbing
// ============================================================================

#[test]
fn test_initial_states() {
    assert_eq!(
        initial_state(EntityKind::Report),
        EntityState::Report(RmState::Received)
    );
    assert_eq!(
        initial_state(EntityKind::Case),
        EntityState::Case(AggregateStatus::Pending)
    );
    assert_eq!(
        initial_state(EntityKind::Participant),
        EntityState::Participant {
            rm: RmState::Received,
            vfd: VfdState::Vfd,
        }
    );
}

#[test]
fn test_malformed_activity_is_rejected_before_state_checks() {
    let store = store_with_case();
    // Content on a Join violates the contract even though the transition
    // itself would be legal.
    let chatty_join = Activity::new(ActivityKind::Join, VENDOR, CASE_ID)
        .with_content("We're engaging this case.");
    let case = store.case(CASE_ID).unwrap();
    let error = validate(&chatty_join, &EntitySnapshot::Case(case), &store).unwrap_err();
    assert!(matches!(error, ValidationError::MalformedActivity(_)));
}

#[test]
fn test_validation_never_mutates_the_snapshot() {
    let store = store_with_case();
    let case_before = store.case(CASE_ID).unwrap().clone();

    let join = engagement(ActivityKind::Join, VENDOR, 10);
    let result = validate(&join, &EntitySnapshot::Case(&case_before), &store).unwrap();
    assert!(matches!(
        result.mutations.as_slice(),
        [Mutation::AppendParticipantStatus { .. }]
    ));
    // The decision is a description of intent; the snapshot is untouched.
    assert_eq!(store.case(CASE_ID).unwrap(), &case_before);
}

// ============================================================================
// Properties
// ============================================================================

fn arb_engagement_kind() -> impl Strategy<Value = ActivityKind> {
    prop::sample::select(
        &[
            ActivityKind::Join,
            ActivityKind::Ignore,
            ActivityKind::Leave,
        ][..],
    )
}

proptest! {
    /// Status history length is monotonically non-decreasing, grows by
    /// exactly one per accepted engagement activity, and never rewrites
    /// recorded entries.
    #[test]
    fn prop_status_history_is_append_only(
        kinds in prop::collection::vec(arb_engagement_kind(), 1..24)
    ) {
        let mut store = store_with_case();
        let mut previous = store
            .case(CASE_ID)
            .unwrap()
            .participant_of(VENDOR)
            .unwrap()
            .participant_status
            .clone();

        for (step, kind) in kinds.into_iter().enumerate() {
            let hour = u32::try_from(step % 14).unwrap();
            let accepted = store.admit(&engagement(kind, VENDOR, 9 + hour)).is_ok();
            let history = store
                .case(CASE_ID)
                .unwrap()
                .participant_of(VENDOR)
                .unwrap()
                .participant_status
                .clone();

            if accepted {
                prop_assert_eq!(history.len(), previous.len() + 1);
            } else {
                prop_assert_eq!(history.len(), previous.len());
            }
            // Every previously recorded snapshot is still there, unchanged.
            prop_assert_eq!(&history[..previous.len()], previous.as_slice());
            previous = history;
        }
    }
}
