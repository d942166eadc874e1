//! Closed enumerations for user and defect classification.
//!
//! Parsing is the only way to obtain an enum value from wire input: exact,
//! case-sensitive match against the closed set, no trimming, no defaulting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which closed set a raw value was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumKind {
    UserType,
    Status,
    Severity,
}

impl EnumKind {
    /// Field-name spelling used in payloads and error details.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserType => "userType",
            Self::Status => "status",
            Self::Severity => "severity",
        }
    }
}

impl fmt::Display for EnumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw value outside its closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value: {value}")]
pub struct InvalidEnumValue {
    /// The closed set the value was checked against.
    pub kind: EnumKind,
    /// The rejected raw value, verbatim.
    pub value: String,
}

impl InvalidEnumValue {
    fn new(kind: EnumKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Role of a user within the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Developer,
    Manager,
    Customer,
    Tester,
}

impl UserType {
    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "DEVELOPER",
            Self::Manager => "MANAGER",
            Self::Customer => "CUSTOMER",
            Self::Tester => "TESTER",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = InvalidEnumValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DEVELOPER" => Ok(Self::Developer),
            "MANAGER" => Ok(Self::Manager),
            "CUSTOMER" => Ok(Self::Customer),
            "TESTER" => Ok(Self::Tester),
            _ => Err(InvalidEnumValue::new(EnumKind::UserType, value)),
        }
    }
}

/// Workflow state of a defect.
///
/// Any status may follow any other; the only guarded transition is entering
/// [`Status::Reopened`], which requires an assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Created,
    Accepted,
    Fixed,
    Reopened,
    Closed,
}

impl Status {
    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Accepted => "ACCEPTED",
            Self::Fixed => "FIXED",
            Self::Reopened => "REOPENED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = InvalidEnumValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CREATED" => Ok(Self::Created),
            "ACCEPTED" => Ok(Self::Accepted),
            "FIXED" => Ok(Self::Fixed),
            "REOPENED" => Ok(Self::Reopened),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(InvalidEnumValue::new(EnumKind::Status, value)),
        }
    }
}

/// Impact classification of a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Trivial,
    Minor,
    Major,
    Showstopper,
}

impl Severity {
    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trivial => "TRIVIAL",
            Self::Minor => "MINOR",
            Self::Major => "MAJOR",
            Self::Showstopper => "SHOWSTOPPER",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = InvalidEnumValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "TRIVIAL" => Ok(Self::Trivial),
            "MINOR" => Ok(Self::Minor),
            "MAJOR" => Ok(Self::Major),
            "SHOWSTOPPER" => Ok(Self::Showstopper),
            _ => Err(InvalidEnumValue::new(EnumKind::Severity, value)),
        }
    }
}
