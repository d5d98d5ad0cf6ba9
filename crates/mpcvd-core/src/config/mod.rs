//! Protocol configuration and deterministic identifier derivation.
//!
//! This module handles parsing of protocol configuration files (TOML) that
//! define the base URL convention under which entity identifiers are minted.
//! Callers may always supply identifiers directly; when they do not, the
//! derivation here is the single deterministic source of ids, so two hosts
//! configured identically mint identical ids for identical inputs.
//!
//! # Identifier layout
//!
//! ```text
//! {base_url}/{users_path}/{slug}             person
//! {base_url}/{organizations_path}/{slug}     organization
//! {base_url}/{reports_path}/{slug}           vulnerability report
//! {base_url}/{cases_path}/{slug}             vulnerability case
//! {case_id}/participants/{actor slug}        case participant
//! {case_id}/notes/{ordinal}                  note
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or writing protocol configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized back to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Protocol-wide configuration.
///
/// All fields default to the conventional layout, so an empty TOML document
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Base URL under which all derived identifiers are minted.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path segment for person identifiers.
    #[serde(default = "default_users_path")]
    pub users_path: String,

    /// Path segment for organization identifiers.
    #[serde(default = "default_organizations_path")]
    pub organizations_path: String,

    /// Path segment for vulnerability report identifiers.
    #[serde(default = "default_reports_path")]
    pub reports_path: String,

    /// Path segment for vulnerability case identifiers.
    #[serde(default = "default_cases_path")]
    pub cases_path: String,
}

fn default_base_url() -> String {
    "https://mpcvd.example".to_string()
}

fn default_users_path() -> String {
    "users".to_string()
}

fn default_organizations_path() -> String {
    "organizations".to_string()
}

fn default_reports_path() -> String {
    "reports".to_string()
}

fn default_cases_path() -> String {
    "cases".to_string()
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            users_path: default_users_path(),
            organizations_path: default_organizations_path(),
            reports_path: default_reports_path(),
            cases_path: default_cases_path(),
        }
    }
}

impl ProtocolConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Derives a person identifier from a display name.
    #[must_use]
    pub fn person_id(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.users_path, slug(name))
    }

    /// Derives an organization identifier from a display name.
    #[must_use]
    pub fn organization_id(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.organizations_path, slug(name))
    }

    /// Derives a vulnerability report identifier from a report name.
    #[must_use]
    pub fn report_id(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.reports_path, slug(name))
    }

    /// Derives a vulnerability case identifier from a case name.
    #[must_use]
    pub fn case_id(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.cases_path, slug(name))
    }

    /// Derives a participant identifier from the owning case and the
    /// participant's actor identifier.
    ///
    /// Only the final path segment of the actor identifier contributes, so
    /// `https://a.example/users/finn` becomes `{case_id}/participants/finn`.
    #[must_use]
    pub fn participant_id(&self, case_id: &str, actor_id: &str) -> String {
        let shortname = actor_id.rsplit('/').next().unwrap_or(actor_id);
        format!("{case_id}/participants/{}", slug(shortname))
    }

    /// Derives a note identifier from the owning case and a per-case ordinal.
    #[must_use]
    pub fn note_id(&self, case_id: &str, ordinal: u64) -> String {
        format!("{case_id}/notes/{ordinal}")
    }
}

/// Reduces a name to a URL-safe slug.
///
/// Lowercases ASCII alphanumerics and collapses every other run of
/// characters into a single `-`. Leading and trailing separators are
/// trimmed. Identical inputs always produce identical slugs.
#[must_use]
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}
