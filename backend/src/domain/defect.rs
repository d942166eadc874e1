//! Defect entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Severity, Status};
use super::timestamp::Timestamp;
use super::user::UserId;

/// A defect id string that is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid defect id: {input}")]
pub struct ParseDefectIdError {
    /// The rejected input, verbatim.
    pub input: String,
}

/// Stable defect identifier, assigned by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefectId(Uuid);

impl DefectId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(value: &str) -> Result<Self, ParseDefectIdError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ParseDefectIdError {
                input: value.to_owned(),
            })
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DefectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Tracked defect.
///
/// ## Invariants
/// - `created` and `created_by` are set at creation and immutable after.
/// - `modified`, when set, is never earlier than `created`.
/// - `assigned_to`, when set, references a developer; it is mandatory while
///   the status is [`Status::Reopened`]. Both checks live in the rule engine,
///   which runs before every persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defect {
    id: Option<DefectId>,
    created: Timestamp,
    modified: Option<Timestamp>,
    summary: Option<String>,
    status: Status,
    severity: Option<Severity>,
    created_by: UserId,
    assigned_to: Option<UserId>,
}

impl Defect {
    /// Build a defect from its required components; optional fields start
    /// unset and the id stays unset until the registry assigns one.
    pub fn new(created: Timestamp, status: Status, created_by: UserId) -> Self {
        Self {
            id: None,
            created,
            modified: None,
            summary: None,
            status,
            severity: None,
            created_by,
            assigned_to: None,
        }
    }

    /// Attach the registry-assigned identifier.
    pub fn with_id(mut self, id: DefectId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the last-modification timestamp.
    pub fn with_modified(mut self, modified: Timestamp) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Set the one-line summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the impact classification.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set the assignee reference.
    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Registry-assigned identifier, if persisted.
    pub fn id(&self) -> Option<DefectId> {
        self.id
    }

    /// Creation timestamp, immutable once set.
    pub fn created(&self) -> Timestamp {
        self.created
    }

    /// Last-modification timestamp, when one was recorded.
    pub fn modified(&self) -> Option<Timestamp> {
        self.modified
    }

    /// One-line summary, when one was supplied.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Current workflow state.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Impact classification, when one was supplied.
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// Reference to the reporting user, immutable once set.
    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Reference to the assigned developer, when one is set.
    pub fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }
}

/// Partial update for a defect; absent fields keep their prior values and
/// the immutable fields (`id`, `created`, `created_by`) always come from the
/// prior state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefectPatch {
    /// Replacement modification timestamp, when present.
    pub modified: Option<Timestamp>,
    /// Replacement summary, when present.
    pub summary: Option<String>,
    /// Replacement workflow state, when present.
    pub status: Option<Status>,
    /// Replacement impact classification, when present.
    pub severity: Option<Severity>,
    /// Replacement assignee reference, when present.
    pub assigned_to: Option<UserId>,
}

impl DefectPatch {
    /// Merge onto prior state, preserving the immutable fields.
    pub fn apply_to(&self, prior: &Defect) -> Defect {
        Defect {
            id: prior.id,
            created: prior.created,
            modified: self.modified.or(prior.modified),
            summary: self.summary.clone().or_else(|| prior.summary.clone()),
            status: self.status.unwrap_or(prior.status),
            severity: self.severity.or(prior.severity),
            created_by: prior.created_by,
            assigned_to: self.assigned_to.or(prior.assigned_to),
        }
    }
}
