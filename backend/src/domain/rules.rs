//! Cross-field and cross-entity consistency rules.
//!
//! The rules run in a fixed order and stop at the first failure, so a record
//! breaking several rules reports one coherent reason: uniqueness before
//! reference checks (an ambiguous error would leak which names exist),
//! eligibility before the reopened check.

use serde_json::json;

use super::defect::Defect;
use super::enums::{Status, UserType};
use super::error::Error;
use super::ports::UserLookup;
use super::user::User;

/// Mutation kind under validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// The entity does not exist yet.
    Create,
    /// The entity exists and is being replaced by a merged record.
    Update,
}

/// Validate a user mutation.
///
/// `user` is the candidate state after any merge; `prior` is the persisted
/// state on update and absent on create.
pub fn validate_user(
    _op: Operation,
    user: &User,
    prior: Option<&User>,
    lookup: &dyn UserLookup,
) -> Result<(), Error> {
    // Uniqueness. An unchanged name cannot newly collide, so the lookup is
    // only consulted on create or rename.
    let colliding = match prior {
        Some(existing) if existing.name() == user.name() => None,
        _ => lookup.user_by_name(user.name().as_str()),
    };
    if let Some(existing) = colliding {
        if existing.id() != user.id() {
            return Err(Error::conflict(format!(
                "user name already in use: {}",
                user.name()
            ))
            .with_details(json!({ "field": "name" })));
        }
    }
    Ok(())
}

/// Validate a defect mutation.
///
/// `defect` is the candidate state after any merge; the prior state is not
/// consulted because the merge already preserved the immutable fields.
pub fn validate_defect(
    op: Operation,
    defect: &Defect,
    _prior: Option<&Defect>,
    lookup: &dyn UserLookup,
) -> Result<(), Error> {
    // Reference existence. The reporter is fixed at creation; later updates
    // cannot change it, so only creation checks it.
    if op == Operation::Create && lookup.user_by_id(&defect.created_by()).is_none() {
        return Err(Error::invalid_reference(format!(
            "createdBy does not resolve: {}",
            defect.created_by()
        ))
        .with_details(json!({ "field": "createdBy" })));
    }

    // Assignment eligibility. Re-checked on every mutation that carries an
    // assignee: the referenced user's role may have changed since.
    if let Some(assignee_id) = defect.assigned_to() {
        let Some(assignee) = lookup.user_by_id(&assignee_id) else {
            return Err(Error::invalid_reference(format!(
                "assignedTo does not resolve: {assignee_id}"
            ))
            .with_details(json!({ "field": "assignedTo" })));
        };
        if assignee.user_type() != UserType::Developer {
            return Err(Error::conflict(format!(
                "assignee {} is not a developer",
                assignee.name()
            ))
            .with_details(json!({
                "field": "assignedTo",
                "userType": assignee.user_type().as_str(),
            })));
        }
    }

    // A reopened defect must have someone to fix it.
    if defect.status() == Status::Reopened && defect.assigned_to().is_none() {
        return Err(Error::invariant_violation(
            "status REOPENED requires an assignee",
        ));
    }

    // Date ordering.
    if let Some(modified) = defect.modified() {
        if modified < defect.created() {
            return Err(
                Error::invalid_value("modified must not be earlier than created")
                    .with_details(json!({ "field": "modified" })),
            );
        }
    }

    Ok(())
}
