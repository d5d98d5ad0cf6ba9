//! The activity taxonomy and its required-field contracts.
//!
//! Every protocol action is an [`Activity`]: an immutable record of one
//! actor acting on one object. The set of activity kinds is closed, and each
//! kind imposes a structural contract on which fields must, may, or must not
//! be present. Contract checking is independent of protocol state and always
//! runs before any state-machine evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::VocabError;
use super::object::{CaseParticipant, Note, VulnerabilityCase, VulnerabilityReport};

/// The closed set of activity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    /// Actor originates a new object (report or case).
    Create,
    /// Actor proposes an object to an addressee for acceptance.
    Offer,
    /// Actor acknowledges receipt or inspection of an object.
    Read,
    /// Addressee accepts a prior `Offer`, `Invite`, or `Recommend`; on a
    /// report, the vendor's validation decision.
    Accept,
    /// Addressee declines a prior `Offer`, `Invite`, or `Recommend`; on a
    /// report, the vendor's invalidation decision.
    Reject,
    /// Actor attaches an object (report, participant, or note) to a case.
    Add,
    /// Actor engages a case as an active participant.
    Join,
    /// Actor exits a case, or a vendor closes a report.
    Leave,
    /// Actor defers its engagement with a case without leaving.
    Ignore,
    /// Actor reverses the effect of a prior activity it issued.
    Undo,
    /// Actor signals an out-of-band mutation to an object.
    Update,
    /// Actor invites another actor to participate in a case.
    Invite,
    /// Actor recommends a third actor for participation to an addressee.
    Recommend,
}

impl ActivityKind {
    /// Returns the kind name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Offer => "Offer",
            Self::Read => "Read",
            Self::Accept => "Accept",
            Self::Reject => "Reject",
            Self::Add => "Add",
            Self::Join => "Join",
            Self::Leave => "Leave",
            Self::Ignore => "Ignore",
            Self::Undo => "Undo",
            Self::Update => "Update",
            Self::Invite => "Invite",
            Self::Recommend => "Recommend",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An object embedded in an activity, tagged by its type on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProtocolObject {
    /// An embedded vulnerability report.
    VulnerabilityReport(VulnerabilityReport),
    /// An embedded vulnerability case.
    VulnerabilityCase(VulnerabilityCase),
    /// An embedded case participant.
    CaseParticipant(CaseParticipant),
    /// An embedded note.
    Note(Note),
}

impl ProtocolObject {
    /// The embedded object's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::VulnerabilityReport(report) => &report.id,
            Self::VulnerabilityCase(case) => &case.id,
            Self::CaseParticipant(participant) => &participant.id,
            Self::Note(note) => &note.id,
        }
    }

    /// A short description of the object type for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::VulnerabilityReport(_) => "a vulnerability report",
            Self::VulnerabilityCase(_) => "a vulnerability case",
            Self::CaseParticipant(_) => "a case participant",
            Self::Note(_) => "a note",
        }
    }
}

impl From<VulnerabilityReport> for ProtocolObject {
    fn from(report: VulnerabilityReport) -> Self {
        Self::VulnerabilityReport(report)
    }
}

impl From<VulnerabilityCase> for ProtocolObject {
    fn from(case: VulnerabilityCase) -> Self {
        Self::VulnerabilityCase(case)
    }
}

impl From<CaseParticipant> for ProtocolObject {
    fn from(participant: CaseParticipant) -> Self {
        Self::CaseParticipant(participant)
    }
}

impl From<Note> for ProtocolObject {
    fn from(note: Note) -> Self {
        Self::Note(note)
    }
}

/// The object payload of an activity: a bare reference, an embedded object,
/// or (for `Undo`) an embedded activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityObject {
    /// A reference to an object by identifier.
    Reference(String),
    /// An embedded protocol object.
    Object(Box<ProtocolObject>),
    /// An embedded activity (the payload of an `Undo`).
    Activity(Box<Activity>),
}

impl From<&str> for ActivityObject {
    fn from(id: &str) -> Self {
        Self::Reference(id.to_string())
    }
}

impl From<String> for ActivityObject {
    fn from(id: String) -> Self {
        Self::Reference(id)
    }
}

impl From<ProtocolObject> for ActivityObject {
    fn from(object: ProtocolObject) -> Self {
        Self::Object(Box::new(object))
    }
}

impl From<Activity> for ActivityObject {
    fn from(activity: Activity) -> Self {
        Self::Activity(Box::new(activity))
    }
}

/// An immutable protocol action: one actor, one kind, one object.
///
/// Activities are the sole mechanism for mutating report, case, and
/// participant state. The `id` and `published` fields are envelope metadata
/// and admitted on every kind; the protocol fields (`target`, `origin`,
/// `context`, `to`, `in_reply_to`, `content`) are governed by the per-kind
/// contract enforced by [`check_contract`](Self::check_contract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Optional activity identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The activity kind.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Identifier of the acting party.
    pub actor: String,
    /// The object acted on.
    pub object: ActivityObject,
    /// The object the activity's object is attached to (`Add`, `Invite`,
    /// `Recommend`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// The party an accepted or rejected proposal originated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// The surrounding context, typically the owning case or report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// The addressee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// The identifier of the activity this one responds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<String>,
    /// Free-text message accompanying the activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// When the activity was published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl Activity {
    /// Creates an activity with every optional field unset.
    pub fn new(
        kind: ActivityKind,
        actor: impl Into<String>,
        object: impl Into<ActivityObject>,
    ) -> Self {
        Self {
            id: None,
            kind,
            actor: actor.into(),
            object: object.into(),
            target: None,
            origin: None,
            context: None,
            to: None,
            in_reply_to: None,
            content: None,
            published: None,
        }
    }

    /// Sets the activity identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets the origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the context.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Sets the addressee.
    #[must_use]
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Sets the activity this one responds to.
    #[must_use]
    pub fn with_in_reply_to(mut self, in_reply_to: impl Into<String>) -> Self {
        self.in_reply_to = Some(in_reply_to.into());
        self
    }

    /// Sets the free-text message.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the publication timestamp.
    #[must_use]
    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published = Some(published);
        self
    }

    /// The object reference, if the payload is a bare reference.
    #[must_use]
    pub fn object_ref(&self) -> Option<&str> {
        match &self.object {
            ActivityObject::Reference(id) => Some(id),
            _ => None,
        }
    }

    /// The identifier of the object acted on, whether referenced or
    /// embedded. `None` when the payload is an embedded activity.
    #[must_use]
    pub fn object_id(&self) -> Option<&str> {
        match &self.object {
            ActivityObject::Reference(id) => Some(id),
            ActivityObject::Object(object) => Some(object.id()),
            ActivityObject::Activity(_) => None,
        }
    }

    /// The embedded object, if the payload embeds one.
    #[must_use]
    pub fn embedded_object(&self) -> Option<&ProtocolObject> {
        match &self.object {
            ActivityObject::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The wrapped activity, if the payload embeds one (`Undo`).
    #[must_use]
    pub fn wrapped_activity(&self) -> Option<&Activity> {
        match &self.object {
            ActivityObject::Activity(activity) => Some(activity),
            _ => None,
        }
    }

    /// The identifier of the entity this activity is addressed to, as a
    /// host would use it to load the authoritative snapshot: the embedded
    /// object for `Create`, the `target` for attachment and proposal kinds,
    /// the `context` (or the wrapped activity's object) for `Undo`, and the
    /// object itself otherwise. Responses (`Accept`, `Reject`) prefer the
    /// `context`/`target` case over the object, which for recommendation
    /// responses names the proposed actor rather than an entity.
    #[must_use]
    pub fn target_entity_id(&self) -> Option<&str> {
        match self.kind {
            ActivityKind::Create => self.object_id(),
            ActivityKind::Add | ActivityKind::Invite | ActivityKind::Recommend => {
                self.target.as_deref()
            },
            ActivityKind::Undo => self
                .context
                .as_deref()
                .or_else(|| self.wrapped_activity().and_then(Activity::object_id)),
            ActivityKind::Accept | ActivityKind::Reject => self
                .context
                .as_deref()
                .or(self.target.as_deref())
                .or_else(|| self.object_id()),
            _ => self.object_id(),
        }
    }

    /// Checks this activity against its kind's required-field contract.
    ///
    /// # Errors
    ///
    /// Returns the first [`VocabError`] describing a missing field, an
    /// unexpected field, or a wrong object form. Structural only: protocol
    /// state is not consulted.
    pub fn check_contract(&self) -> Result<(), VocabError> {
        let kind = self.kind;
        if self.actor.trim().is_empty() {
            return Err(VocabError::MissingField {
                kind,
                field: "actor",
            });
        }

        let contract = contract(kind);
        contract.check_object(kind, &self.object)?;
        check_field(kind, "target", contract.target, self.target.as_deref())?;
        check_field(kind, "origin", contract.origin, self.origin.as_deref())?;
        check_field(kind, "context", contract.context, self.context.as_deref())?;
        check_field(kind, "to", contract.to, self.to.as_deref())?;
        check_field(
            kind,
            "inReplyTo",
            contract.in_reply_to,
            self.in_reply_to.as_deref(),
        )?;
        check_field(kind, "content", contract.content, self.content.as_deref())?;

        // A recommendation proposes a third actor to someone else; the
        // addressee and the proposed actor must differ.
        if kind == ActivityKind::Recommend && self.to.as_deref() == self.object_ref() {
            return Err(VocabError::SelfAddressed { kind });
        }
        Ok(())
    }
}

/// Requirement level of one protocol field within a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Required,
    Optional,
    Forbidden,
}

/// Admitted forms of the object payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectRule {
    RefOnly,
    EmbeddedOnly,
    RefOrEmbedded,
    ActivityOnly,
}

/// The structural contract of one activity kind.
#[derive(Debug, Clone, Copy)]
struct Contract {
    object: ObjectRule,
    target: Rule,
    origin: Rule,
    context: Rule,
    to: Rule,
    in_reply_to: Rule,
    content: Rule,
}

impl Contract {
    fn check_object(&self, kind: ActivityKind, object: &ActivityObject) -> Result<(), VocabError> {
        let ok = match self.object {
            ObjectRule::RefOnly => matches!(object, ActivityObject::Reference(_)),
            ObjectRule::EmbeddedOnly => matches!(object, ActivityObject::Object(_)),
            ObjectRule::RefOrEmbedded => matches!(
                object,
                ActivityObject::Reference(_) | ActivityObject::Object(_)
            ),
            ObjectRule::ActivityOnly => matches!(object, ActivityObject::Activity(_)),
        };
        if ok {
            Ok(())
        } else {
            let expected = match self.object {
                ObjectRule::RefOnly => "a reference",
                ObjectRule::EmbeddedOnly => "an embedded object",
                ObjectRule::RefOrEmbedded => "a reference or an embedded object",
                ObjectRule::ActivityOnly => "an embedded activity",
            };
            Err(VocabError::InvalidObjectForm { kind, expected })
        }
    }
}

fn check_field(
    kind: ActivityKind,
    field: &'static str,
    rule: Rule,
    value: Option<&str>,
) -> Result<(), VocabError> {
    match (rule, value) {
        (Rule::Required, None) => Err(VocabError::MissingField { kind, field }),
        (Rule::Forbidden, Some(_)) => Err(VocabError::UnexpectedField { kind, field }),
        _ => Ok(()),
    }
}

/// The contract table, keyed by activity kind.
const fn contract(kind: ActivityKind) -> Contract {
    use ActivityKind as K;
    use ObjectRule as O;
    use Rule::{Forbidden, Optional, Required};

    match kind {
        K::Create => Contract {
            object: O::EmbeddedOnly,
            target: Forbidden,
            origin: Forbidden,
            context: Optional,
            to: Forbidden,
            in_reply_to: Forbidden,
            content: Optional,
        },
        K::Offer => Contract {
            object: O::RefOrEmbedded,
            target: Forbidden,
            origin: Forbidden,
            context: Optional,
            to: Required,
            in_reply_to: Forbidden,
            content: Optional,
        },
        K::Read | K::Update => Contract {
            object: O::RefOnly,
            target: Forbidden,
            origin: Forbidden,
            context: Forbidden,
            to: Forbidden,
            in_reply_to: Forbidden,
            content: Optional,
        },
        K::Accept | K::Reject => Contract {
            object: O::RefOrEmbedded,
            target: Optional,
            origin: Optional,
            context: Optional,
            to: Optional,
            in_reply_to: Optional,
            content: Optional,
        },
        K::Add => Contract {
            object: O::RefOrEmbedded,
            target: Required,
            origin: Forbidden,
            context: Forbidden,
            to: Forbidden,
            in_reply_to: Forbidden,
            content: Optional,
        },
        K::Join | K::Leave | K::Ignore => Contract {
            object: O::RefOnly,
            target: Forbidden,
            origin: Forbidden,
            context: Forbidden,
            to: Forbidden,
            in_reply_to: Forbidden,
            content: Forbidden,
        },
        K::Undo => Contract {
            object: O::ActivityOnly,
            target: Forbidden,
            origin: Forbidden,
            context: Optional,
            to: Forbidden,
            in_reply_to: Forbidden,
            content: Optional,
        },
        K::Invite => Contract {
            object: O::RefOnly,
            target: Required,
            origin: Forbidden,
            context: Forbidden,
            to: Required,
            in_reply_to: Forbidden,
            content: Optional,
        },
        K::Recommend => Contract {
            object: O::RefOnly,
            target: Required,
            origin: Forbidden,
            context: Optional,
            to: Required,
            in_reply_to: Forbidden,
            content: Optional,
        },
    }
}
