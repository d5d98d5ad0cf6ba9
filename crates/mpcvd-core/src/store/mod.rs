//! Collaborator seams: the entity store and the actor-role authority.
//!
//! The protocol core never owns shared state. Hosts supply an entity store
//! (load a snapshot, persist a mutation) and a role authority (the fixed
//! finder/vendor/coordinator roles used for report-directed activities).
//! [`MemoryStore`] is the in-crate reference implementation of both,
//! suitable for tests and single-process hosts.
//!
//! Hosts must apply mutations one at a time per entity identifier: the
//! validator's checks assume a consistent snapshot at decision time, and
//! activities must be applied in the order they were admitted.

mod memory;


pub use memory::{AdmitError, MemoryStore};

use thiserror::Error;

use crate::validator::Mutation;
use crate::vocab::{ParticipantRole, VulnerabilityCase, VulnerabilityReport};

/// An owned protocol entity, as loaded from a store.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// A vulnerability report.
    Report(VulnerabilityReport),
    /// A vulnerability case.
    Case(VulnerabilityCase),
}

impl Entity {
    /// The entity's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Report(report) => &report.id,
            Self::Case(case) => &case.id,
        }
    }
}

/// Errors raised by an entity store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No entity is recorded under the identifier.
    #[error("no entity recorded under '{id}'")]
    UnknownEntity {
        /// The unresolved identifier.
        id: String,
    },

    /// An entity already exists under the identifier.
    #[error("an entity already exists under '{id}'")]
    AlreadyExists {
        /// The conflicting identifier.
        id: String,
    },

    /// The identifier resolves to a different kind of entity than the
    /// mutation expects.
    #[error("'{id}' is not the expected kind of entity")]
    WrongEntityKind {
        /// The offending identifier.
        id: String,
    },

    /// The mutation was computed against a state the entity no longer
    /// holds; the caller must re-validate against a fresh snapshot.
    #[error("stale mutation for '{id}': expected state '{expected}', found '{found}'")]
    StaleMutation {
        /// The entity the mutation targeted.
        id: String,
        /// The state the mutation expected.
        expected: String,
        /// The state actually recorded.
        found: String,
    },
}

/// The authoritative entity store consumed by hosts.
pub trait EntityStore {
    /// Loads the entity recorded under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownEntity`] if nothing is recorded.
    fn load(&self, id: &str) -> Result<Entity, StoreError>;

    /// Applies one mutation produced by the validator.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the mutation does not apply cleanly;
    /// the store must be left unchanged in that case.
    fn persist(&mut self, mutation: Mutation) -> Result<(), StoreError>;
}

/// The source of actor roles for report-directed authorization.
pub trait RoleAuthority {
    /// The role `actor_id` holds with respect to `entity_id`, if any.
    fn role_of(&self, actor_id: &str, entity_id: &str) -> Option<ParticipantRole>;
}
