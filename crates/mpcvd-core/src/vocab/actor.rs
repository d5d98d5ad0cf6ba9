//! Identity-bearing actors: persons and organizations.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::error::VocabError;
use crate::config::ProtocolConfig;

/// The identity fields shared by every actor variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorCore {
    /// Stable unique identifier (URI-like string).
    pub id: String,
    /// Display name.
    pub name: String,
}

/// An identified party performing protocol activities.
///
/// Actors are immutable once constructed; equality and hashing consider the
/// identifier only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Actor {
    /// An individual person, typically a finder/reporter.
    Person(ActorCore),
    /// An organization, typically a vendor or coordinator.
    Organization(ActorCore),
}

impl Actor {
    /// Creates a person with a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::EmptyName`] if `name` is empty.
    pub fn person(name: impl Into<String>, id: impl Into<String>) -> Result<Self, VocabError> {
        Ok(Self::Person(ActorCore::new(name, id, "person")?))
    }

    /// Creates a person whose identifier is derived from the configured
    /// base URL convention.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::EmptyName`] if `name` is empty.
    pub fn person_derived(name: impl Into<String>, config: &ProtocolConfig) -> Result<Self, VocabError> {
        let name = name.into();
        let id = config.person_id(&name);
        Self::person(name, id)
    }

    /// Creates an organization with a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::EmptyName`] if `name` is empty.
    pub fn organization(
        name: impl Into<String>,
        id: impl Into<String>,
    ) -> Result<Self, VocabError> {
        Ok(Self::Organization(ActorCore::new(name, id, "organization")?))
    }

    /// Creates an organization whose identifier is derived from the
    /// configured base URL convention.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::EmptyName`] if `name` is empty.
    pub fn organization_derived(
        name: impl Into<String>,
        config: &ProtocolConfig,
    ) -> Result<Self, VocabError> {
        let name = name.into();
        let id = config.organization_id(&name);
        Self::organization(name, id)
    }

    /// The actor's stable identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.core().id
    }

    /// The actor's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.core().name
    }

    fn core(&self) -> &ActorCore {
        match self {
            Self::Person(core) | Self::Organization(core) => core,
        }
    }
}

impl ActorCore {
    fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        kind: &'static str,
    ) -> Result<Self, VocabError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(VocabError::EmptyName { kind });
        }
        Ok(Self {
            id: id.into(),
            name,
        })
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
