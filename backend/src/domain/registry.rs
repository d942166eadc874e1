//! Resource lifecycle manager over the in-memory store.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::codec::{self, RawRecord};
use super::defect::{Defect, DefectId};
use super::error::Error;
use super::ports::UserLookup;
use super::rules::{self, Operation};
use super::user::{User, UserId};

#[derive(Default)]
struct Stores {
    users: HashMap<UserId, User>,
    defects: HashMap<DefectId, Defect>,
}

impl UserLookup for Stores {
    fn user_by_id(&self, id: &UserId) -> Option<User> {
        self.users.get(id).cloned()
    }

    fn user_by_name(&self, name: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.name().as_str() == name)
            .cloned()
    }
}

/// Sole mutator of persisted state.
///
/// Every mutation holds the write lock across its whole
/// decode-validate-persist sequence, so check-then-act races (two creates
/// claiming one name, a create interleaving with a reset) can never observe
/// or produce intermediate state. Reads share the read lock.
#[derive(Default)]
pub struct Registry {
    stores: RwLock<Stores>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user from a raw record, assigning a fresh identifier.
    pub fn create_user(&self, raw: &RawRecord) -> Result<User, Error> {
        let user = codec::decode_user(raw)?;
        let mut stores = self.stores.write();
        rules::validate_user(Operation::Create, &user, None, &*stores)?;

        let id = UserId::random();
        let user = user.with_id(id);
        stores.users.insert(id, user.clone());
        info!(%id, name = %user.name(), "user created");
        Ok(user)
    }

    /// Fetch a user by identifier.
    pub fn user(&self, id: UserId) -> Result<User, Error> {
        self.stores
            .read()
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("no user {id}")))
    }

    /// All users, in no particular order.
    pub fn users(&self) -> Vec<User> {
        self.stores.read().users.values().cloned().collect()
    }

    /// Merge a raw update onto a stored user and persist the result.
    ///
    /// The identifier never changes; a failed validation leaves the stored
    /// user untouched.
    pub fn update_user(&self, id: UserId, raw: &RawRecord) -> Result<User, Error> {
        let patch = codec::decode_user_patch(raw)?;
        let mut stores = self.stores.write();
        let prior = stores
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("no user {id}")))?;

        let candidate = patch.apply_to(&prior);
        rules::validate_user(Operation::Update, &candidate, Some(&prior), &*stores)?;

        stores.users.insert(id, candidate.clone());
        debug!(%id, "user updated");
        Ok(candidate)
    }

    /// Remove a user by identifier.
    pub fn delete_user(&self, id: UserId) -> Result<(), Error> {
        match self.stores.write().users.remove(&id) {
            Some(_) => {
                debug!(%id, "user deleted");
                Ok(())
            }
            None => Err(Error::not_found(format!("no user {id}"))),
        }
    }

    /// Users whose name matches exactly.
    pub fn find_users_by_name(&self, name: &str) -> Vec<User> {
        self.stores
            .read()
            .users
            .values()
            .filter(|user| user.name().as_str() == name)
            .cloned()
            .collect()
    }

    /// Create a defect from a raw record, assigning a fresh identifier.
    pub fn create_defect(&self, raw: &RawRecord) -> Result<Defect, Error> {
        let defect = codec::decode_defect(raw)?;
        let mut stores = self.stores.write();
        rules::validate_defect(Operation::Create, &defect, None, &*stores)?;

        let id = DefectId::random();
        let defect = defect.with_id(id);
        stores.defects.insert(id, defect.clone());
        info!(%id, created_by = %defect.created_by(), "defect created");
        Ok(defect)
    }

    /// Fetch a defect by identifier.
    pub fn defect(&self, id: DefectId) -> Result<Defect, Error> {
        self.stores
            .read()
            .defects
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("no defect {id}")))
    }

    /// All defects, in no particular order.
    pub fn defects(&self) -> Vec<Defect> {
        self.stores.read().defects.values().cloned().collect()
    }

    /// Merge a raw update onto a stored defect and persist the result.
    ///
    /// `id`, `created` and `createdBy` are preserved from the stored state;
    /// a failed validation leaves the stored defect untouched.
    pub fn update_defect(&self, id: DefectId, raw: &RawRecord) -> Result<Defect, Error> {
        let patch = codec::decode_defect_patch(raw)?;
        let mut stores = self.stores.write();
        let prior = stores
            .defects
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("no defect {id}")))?;

        let candidate = patch.apply_to(&prior);
        rules::validate_defect(Operation::Update, &candidate, Some(&prior), &*stores)?;

        stores.defects.insert(id, candidate.clone());
        debug!(%id, "defect updated");
        Ok(candidate)
    }

    /// Remove a defect by identifier.
    pub fn delete_defect(&self, id: DefectId) -> Result<(), Error> {
        match self.stores.write().defects.remove(&id) {
            Some(_) => {
                debug!(%id, "defect deleted");
                Ok(())
            }
            None => Err(Error::not_found(format!("no defect {id}"))),
        }
    }

    /// Defects reported by the given user.
    pub fn defects_created_by(&self, reporter: UserId) -> Vec<Defect> {
        self.stores
            .read()
            .defects
            .values()
            .filter(|defect| defect.created_by() == reporter)
            .cloned()
            .collect()
    }

    /// Defects assigned to the given user.
    pub fn defects_assigned_to(&self, assignee: UserId) -> Vec<Defect> {
        self.stores
            .read()
            .defects
            .values()
            .filter(|defect| defect.assigned_to() == Some(assignee))
            .cloned()
            .collect()
    }

    /// Remove every defect, then every user, in one lock scope.
    ///
    /// Defects hold references into users, so they go first; no reader can
    /// observe a state with users gone while referencing defects remain.
    /// Resetting an empty registry is a no-op.
    pub fn reset_all(&self) {
        let mut stores = self.stores.write();
        let defects = stores.defects.len();
        let users = stores.users.len();
        stores.defects.clear();
        stores.users.clear();
        info!(defects, users, "store reset");
    }
}
