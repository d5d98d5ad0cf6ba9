//! The protocol vocabulary: actors, objects, and activities.
//!
//! This module defines the nouns and verbs every other layer speaks.
//! Actors (persons, organizations) perform activities on protocol objects
//! (vulnerability reports, vulnerability cases, case participants, notes).
//! Each activity kind carries a structural required-field contract that is
//! checked before any state-machine evaluation; see
//! [`Activity::check_contract`].
//!
//! # Key Concepts
//!
//! - **Actor**: an identified party; equality by identifier only
//! - **Activity**: an immutable record of one protocol-legal action, the
//!   sole mechanism for mutating entity state
//! - **Contract**: the per-kind rule set over `target`, `origin`, `context`,
//!   `to`, `inReplyTo`, `content`, and the admitted object payload forms
//!
//! All vocabulary types serialize with serde; structs use camel-cased field
//! names and sums carry a `type` tag, so a serialized activity reads like
//! the social-web documents it models.

mod activity;
mod actor;
mod error;
mod object;


pub use activity::{Activity, ActivityKind, ActivityObject, ProtocolObject};
pub use actor::{Actor, ActorCore};
pub use error::VocabError;
pub use object::{
    CaseParticipant, Note, ParticipantRole, ParticipantStatus, VulnerabilityCase,
    VulnerabilityReport,
};
