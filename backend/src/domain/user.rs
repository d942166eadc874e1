//! User entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::UserType;

/// A user id string that is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid user id: {input}")]
pub struct ParseUserIdError {
    /// The rejected input, verbatim.
    pub input: String,
}

/// Stable user identifier, assigned by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(value: &str) -> Result<Self, ParseUserIdError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ParseUserIdError {
                input: value.to_owned(),
            })
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An empty or whitespace-only user name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user name must not be empty")]
pub struct EmptyUserName;

/// Unique display name for a user.
///
/// Construction rejects empty and whitespace-only input; the value itself is
/// stored verbatim, without trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a name from owned or borrowed input.
    pub fn new(name: impl Into<String>) -> Result<Self, EmptyUserName> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EmptyUserName);
        }
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = EmptyUserName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Tracker user.
///
/// ## Invariants
/// - `name` is non-empty by construction; uniqueness across users is enforced
///   by the registry.
/// - `id` is unset until the registry persists the user and immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Option<UserId>,
    name: UserName,
    image_url: Option<String>,
    user_type: UserType,
}

impl User {
    /// Build a user from validated components. The id stays unset until the
    /// registry assigns one.
    pub fn new(name: UserName, user_type: UserType, image_url: Option<String>) -> Self {
        Self {
            id: None,
            name,
            image_url,
            user_type,
        }
    }

    /// Attach the registry-assigned identifier.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Registry-assigned identifier, if persisted.
    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    /// Unique display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Avatar location, when one was supplied.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Role of the user within the tracker.
    pub fn user_type(&self) -> UserType {
        self.user_type
    }
}

/// Partial update for a user; absent fields keep their prior values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement name, when present.
    pub name: Option<UserName>,
    /// Replacement avatar location, when present.
    pub image_url: Option<String>,
    /// Replacement role, when present.
    pub user_type: Option<UserType>,
}

impl UserPatch {
    /// Merge onto prior state, preserving the identifier.
    pub fn apply_to(&self, prior: &User) -> User {
        User {
            id: prior.id,
            name: self.name.clone().unwrap_or_else(|| prior.name.clone()),
            image_url: self.image_url.clone().or_else(|| prior.image_url.clone()),
            user_type: self.user_type.unwrap_or(prior.user_type),
        }
    }
}

#[cfg(test)]
mod tests;
