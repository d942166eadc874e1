//! Field codec between raw records and typed entities.
//!
//! Raw records are plain JSON objects as handed over by the transport layer.
//! A field is absent when its key is missing or its value is JSON `null`;
//! absent optional fields stay unset on the decoded entity so later checks
//! can tell "absent" from "empty". Required fields are checked before any
//! optional field is touched, and the first absent one aborts the decode.

use serde_json::{Map, Value, json};

use super::defect::{Defect, DefectPatch};
use super::enums::{Severity, Status, UserType};
use super::error::Error;
use super::timestamp::Timestamp;
use super::user::{User, UserId, UserName, UserPatch};

/// Raw structured record exchanged with the transport layer.
pub type RawRecord = Map<String, Value>;

const NAME: &str = "name";
const USER_TYPE: &str = "userType";
const IMAGE_URL: &str = "imageUrl";
const CREATED: &str = "created";
const MODIFIED: &str = "modified";
const SUMMARY: &str = "summary";
const STATUS: &str = "status";
const SEVERITY: &str = "severity";
const CREATED_BY: &str = "createdBy";
const ASSIGNED_TO: &str = "assignedTo";

fn present<'a>(raw: &'a RawRecord, field: &str) -> Option<&'a Value> {
    raw.get(field).filter(|value| !value.is_null())
}

fn as_str<'a>(value: &'a Value, field: &str) -> Result<&'a str, Error> {
    value.as_str().ok_or_else(|| {
        Error::invalid_value(format!("field {field} must be a string"))
            .with_details(json!({ "field": field }))
    })
}

fn require_str<'a>(raw: &'a RawRecord, field: &str) -> Result<&'a str, Error> {
    let value = present(raw, field).ok_or_else(|| Error::missing_required_field(field))?;
    as_str(value, field)
}

fn optional_str<'a>(raw: &'a RawRecord, field: &str) -> Result<Option<&'a str>, Error> {
    present(raw, field)
        .map(|value| as_str(value, field))
        .transpose()
}

fn parse_timestamp(value: &str, field: &str) -> Result<Timestamp, Error> {
    Timestamp::parse(value)
        .map_err(|err| Error::invalid_value(err.to_string()).with_details(json!({ "field": field })))
}

fn parse_user_ref(value: &str, field: &str) -> Result<UserId, Error> {
    UserId::parse(value).map_err(|_| {
        Error::invalid_reference(format!("{field} does not resolve: {value}"))
            .with_details(json!({ "field": field }))
    })
}

fn parse_name(value: &str) -> Result<UserName, Error> {
    UserName::new(value)
        .map_err(|err| Error::invalid_value(err.to_string()).with_details(json!({ "field": NAME })))
}

/// Decode a user creation record.
pub fn decode_user(raw: &RawRecord) -> Result<User, Error> {
    let name = require_str(raw, NAME)?;
    let user_type = require_str(raw, USER_TYPE)?;

    let name = parse_name(name)?;
    let user_type = user_type.parse::<UserType>().map_err(Error::from)?;
    let image_url = optional_str(raw, IMAGE_URL)?.map(str::to_owned);

    Ok(User::new(name, user_type, image_url))
}

/// Decode a partial user update; absent fields keep prior values on merge.
pub fn decode_user_patch(raw: &RawRecord) -> Result<UserPatch, Error> {
    let name = optional_str(raw, NAME)?.map(parse_name).transpose()?;
    let user_type = optional_str(raw, USER_TYPE)?
        .map(|value| value.parse::<UserType>().map_err(Error::from))
        .transpose()?;
    let image_url = optional_str(raw, IMAGE_URL)?.map(str::to_owned);

    Ok(UserPatch {
        name,
        image_url,
        user_type,
    })
}

/// Encode a persisted user, required fields first.
///
/// The typed entity cannot hold an unset `name` or `userType`, so the only
/// incompleteness left to guard against is a missing identifier.
pub fn encode_user(user: &User) -> Result<RawRecord, Error> {
    if user.id().is_none() {
        return Err(Error::incomplete_entity("id"));
    }

    let mut raw = RawRecord::new();
    raw.insert(NAME.to_owned(), Value::String(user.name().as_str().to_owned()));
    raw.insert(
        USER_TYPE.to_owned(),
        Value::String(user.user_type().as_str().to_owned()),
    );
    if let Some(image_url) = user.image_url() {
        raw.insert(IMAGE_URL.to_owned(), Value::String(image_url.to_owned()));
    }
    Ok(raw)
}

/// Decode a defect creation record.
pub fn decode_defect(raw: &RawRecord) -> Result<Defect, Error> {
    let created = require_str(raw, CREATED)?;
    let status = require_str(raw, STATUS)?;
    let created_by = require_str(raw, CREATED_BY)?;

    let created = parse_timestamp(created, CREATED)?;
    let status = status.parse::<Status>().map_err(Error::from)?;
    let created_by = parse_user_ref(created_by, CREATED_BY)?;

    let mut defect = Defect::new(created, status, created_by);
    if let Some(modified) = optional_str(raw, MODIFIED)? {
        defect = defect.with_modified(parse_timestamp(modified, MODIFIED)?);
    }
    if let Some(summary) = optional_str(raw, SUMMARY)? {
        defect = defect.with_summary(summary);
    }
    if let Some(severity) = optional_str(raw, SEVERITY)? {
        defect = defect.with_severity(severity.parse::<Severity>().map_err(Error::from)?);
    }
    if let Some(assignee) = optional_str(raw, ASSIGNED_TO)? {
        defect = defect.with_assignee(parse_user_ref(assignee, ASSIGNED_TO)?);
    }
    Ok(defect)
}

/// Decode a partial defect update; absent fields keep prior values on merge.
///
/// The immutable fields (`created`, `createdBy`) are not read here at all:
/// whatever an update payload carries for them, the merge keeps the prior
/// state.
pub fn decode_defect_patch(raw: &RawRecord) -> Result<DefectPatch, Error> {
    let modified = optional_str(raw, MODIFIED)?
        .map(|value| parse_timestamp(value, MODIFIED))
        .transpose()?;
    let summary = optional_str(raw, SUMMARY)?.map(str::to_owned);
    let status = optional_str(raw, STATUS)?
        .map(|value| value.parse::<Status>().map_err(Error::from))
        .transpose()?;
    let severity = optional_str(raw, SEVERITY)?
        .map(|value| value.parse::<Severity>().map_err(Error::from))
        .transpose()?;
    let assigned_to = optional_str(raw, ASSIGNED_TO)?
        .map(|value| parse_user_ref(value, ASSIGNED_TO))
        .transpose()?;

    Ok(DefectPatch {
        modified,
        summary,
        status,
        severity,
        assigned_to,
    })
}

/// Encode a persisted defect, required fields first.
pub fn encode_defect(defect: &Defect) -> Result<RawRecord, Error> {
    if defect.id().is_none() {
        return Err(Error::incomplete_entity("id"));
    }

    let mut raw = RawRecord::new();
    raw.insert(CREATED.to_owned(), Value::String(defect.created().format()));
    raw.insert(
        STATUS.to_owned(),
        Value::String(defect.status().as_str().to_owned()),
    );
    raw.insert(
        CREATED_BY.to_owned(),
        Value::String(defect.created_by().to_string()),
    );
    if let Some(severity) = defect.severity() {
        raw.insert(
            SEVERITY.to_owned(),
            Value::String(severity.as_str().to_owned()),
        );
    }
    if let Some(summary) = defect.summary() {
        raw.insert(SUMMARY.to_owned(), Value::String(summary.to_owned()));
    }
    if let Some(modified) = defect.modified() {
        raw.insert(MODIFIED.to_owned(), Value::String(modified.format()));
    }
    if let Some(assignee) = defect.assigned_to() {
        raw.insert(ASSIGNED_TO.to_owned(), Value::String(assignee.to_string()));
    }
    Ok(raw)
}
