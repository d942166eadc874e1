//! Read-only ports used by the consistency rules.

use super::user::{User, UserId};

/// Read-only access to persisted users for reference checks.
///
/// The rule engine never mutates through this port; the registry implements
/// it on the locked store so validation and mutation share one lock scope.
#[cfg_attr(test, mockall::automock)]
pub trait UserLookup {
    /// Resolve a user by identifier.
    fn user_by_id(&self, id: &UserId) -> Option<User>;

    /// Resolve a user by exact name.
    fn user_by_name(&self, name: &str) -> Option<User>;
}
