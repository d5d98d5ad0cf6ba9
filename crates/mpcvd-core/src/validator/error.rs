//! The validation error taxonomy.
//!
//! Every rejection is explicit and synchronous, and carries enough data for
//! the caller to relay a protocol-level diagnostic to the offending party.
//! Nothing here is retried internally: each variant indicates a protocol
//! violation, not a transient failure.

use thiserror::Error;

use crate::vocab::{ActivityKind, VocabError};

/// Rejection of an activity by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The activity violates its kind's structural contract.
    #[error("malformed activity: {0}")]
    MalformedActivity(#[from] VocabError),

    /// The actor lacks the role required for this transition.
    #[error(
        "{kind} by '{actor}' requires role {required}, but the actor is {actual}"
    )]
    UnauthorizedTransition {
        /// The attempted activity kind.
        kind: ActivityKind,
        /// The acting party.
        actor: String,
        /// The role the transition requires.
        required: String,
        /// The role actually held by the actor.
        actual: String,
    },

    /// No transition is defined for the current state and activity kind.
    #[error("no {kind} transition from state '{current}' on '{entity}'")]
    IllegalTransition {
        /// The entity whose state was consulted.
        entity: String,
        /// The entity's current recorded state.
        current: String,
        /// The attempted activity kind.
        kind: ActivityKind,
    },

    /// The wrapped activity of an `Undo` does not match the outer activity's
    /// actor and context.
    #[error(
        "undo target mismatch: expected actor '{expected_actor}' on '{expected_object}', \
         found actor '{found_actor}' on '{found_object}'"
    )]
    MismatchedUndoTarget {
        /// The actor the wrapped activity must have been issued by.
        expected_actor: String,
        /// The actor recorded on the wrapped activity.
        found_actor: String,
        /// The object the wrapped activity must act on.
        expected_object: String,
        /// The object recorded on the wrapped activity.
        found_object: String,
    },

    /// An `Add` (or `Create`, or proposal) names a member that is already
    /// present in the corresponding container.
    #[error("'{member}' is already present in {container}")]
    DuplicateMember {
        /// The container that already holds the member.
        container: &'static str,
        /// The duplicate member's identifier.
        member: String,
    },

    /// The referenced case, report, or participant does not exist.
    #[error("unknown target: {target}")]
    UnknownTarget {
        /// Description of what could not be resolved.
        target: String,
    },
}
