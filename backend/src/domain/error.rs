//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each kind to a
//! status code; the core only decides which kind a failure belongs to.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::enums::InvalidEnumValue;

/// Stable machine-readable kind describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field was absent from a raw record.
    MissingRequiredField,
    /// An enumerated field held a value outside its closed set.
    InvalidEnumValue,
    /// A field value is malformed or breaks an ordering constraint.
    InvalidValue,
    /// A reference field does not resolve to an existing entity.
    InvalidReference,
    /// The mutation clashes with existing state (duplicate name, ineligible
    /// assignee); it could succeed against a different target.
    Conflict,
    /// The caller supplied an internally inconsistent combination the engine
    /// refuses to auto-correct (reopened defect with no assignee).
    InvariantViolation,
    /// A partially built entity reached the encoder.
    IncompleteEntity,
    /// The operation targets an id with no entity behind it.
    NotFound,
    /// An unexpected fault inside the service.
    Internal,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorKind};
///
/// let err = Error::not_found("no such defect");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[serde(rename = "code")]
    #[schema(example = "invalid_value")]
    kind: ErrorKind,
    #[schema(example = "modified must not be earlier than created")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    details: Option<Value>,
}

impl Error {
    /// Create a new error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_value("bad").with_details(json!({ "field": "modified" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorKind::MissingRequiredField`].
    pub fn missing_required_field(field: &str) -> Self {
        Self::new(
            ErrorKind::MissingRequiredField,
            format!("missing required field: {field}"),
        )
        .with_details(json!({ "field": field }))
    }

    /// Convenience constructor for [`ErrorKind::InvalidValue`].
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidValue, message)
    }

    /// Convenience constructor for [`ErrorKind::InvalidReference`].
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidReference, message)
    }

    /// Convenience constructor for [`ErrorKind::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Convenience constructor for [`ErrorKind::InvariantViolation`].
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvariantViolation, message)
    }

    /// Convenience constructor for [`ErrorKind::IncompleteEntity`].
    pub fn incomplete_entity(field: &str) -> Self {
        Self::new(
            ErrorKind::IncompleteEntity,
            format!("cannot encode entity with unset required field: {field}"),
        )
        .with_details(json!({ "field": field }))
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<InvalidEnumValue> for Error {
    fn from(err: InvalidEnumValue) -> Self {
        let InvalidEnumValue { kind, value } = err;
        Self::new(
            ErrorKind::InvalidEnumValue,
            format!("invalid {kind} value: {value}"),
        )
        .with_details(json!({ "field": kind.as_str(), "value": value }))
    }
}
