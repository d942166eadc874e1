//! Domain core: entities, validation, consistency rules and lifecycle.
//!
//! Everything in here is transport agnostic and synchronous. A mutation
//! flows codec → enum parsing → rule engine → registry; each stage returns a
//! typed [`Error`] and the first failure short-circuits the rest.

pub mod codec;
pub mod defect;
pub mod enums;
pub mod error;
pub mod ports;
pub mod registry;
pub mod rules;
pub mod timestamp;
pub mod user;

pub use self::codec::RawRecord;
pub use self::defect::{Defect, DefectId, DefectPatch};
pub use self::enums::{EnumKind, InvalidEnumValue, Severity, Status, UserType};
pub use self::error::{Error, ErrorKind};
pub use self::ports::UserLookup;
pub use self::registry::Registry;
pub use self::rules::Operation;
pub use self::timestamp::Timestamp;
pub use self::user::{User, UserId, UserName, UserPatch};
