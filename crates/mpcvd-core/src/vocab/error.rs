//! Structural errors of the protocol vocabulary.

use thiserror::Error;

use super::activity::ActivityKind;

/// Errors raised while constructing vocabulary objects or checking an
/// activity against its required-field contract.
///
/// Contract violations are structural: they are detected before any
/// state-machine evaluation and independently of protocol state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabError {
    /// A vocabulary object was constructed with an empty display name.
    #[error("{kind} requires a non-empty name")]
    EmptyName {
        /// The object kind that was being constructed.
        kind: &'static str,
    },

    /// A field required by the activity's contract is missing.
    #[error("{kind} activity is missing required field '{field}'")]
    MissingField {
        /// The activity kind whose contract was violated.
        kind: ActivityKind,
        /// The missing field.
        field: &'static str,
    },

    /// A field not admitted by the activity's contract is present.
    #[error("{kind} activity carries unexpected field '{field}'")]
    UnexpectedField {
        /// The activity kind whose contract was violated.
        kind: ActivityKind,
        /// The offending field.
        field: &'static str,
    },

    /// The object payload has the wrong form for this activity kind.
    #[error("{kind} activity requires its object to be {expected}")]
    InvalidObjectForm {
        /// The activity kind whose contract was violated.
        kind: ActivityKind,
        /// Description of the admitted object form(s).
        expected: &'static str,
    },

    /// The object payload is of a type this activity kind does not act on.
    #[error("{kind} activity does not act on {object}")]
    UnsupportedObject {
        /// The activity kind.
        kind: ActivityKind,
        /// The embedded object type.
        object: &'static str,
    },

    /// A proposal was addressed to the actor it proposes.
    #[error("{kind} activity must be addressed to someone other than the proposed actor")]
    SelfAddressed {
        /// The activity kind.
        kind: ActivityKind,
    },

    /// An embedded object names a context other than the case it is being
    /// attached to.
    #[error("embedded object context '{found}' does not match case '{expected}'")]
    ContextMismatch {
        /// The case the activity targets.
        expected: String,
        /// The context recorded on the embedded object.
        found: String,
    },
}
