//! HAL-style response shaping for persisted entities.
//!
//! Every serialised entity carries a `_links.self.href` pointing back at its
//! own resource; defects additionally link their user references. Collection
//! responses wrap their items under `_embedded`, keyed by resource kind.

use serde_json::{Map, Value, json};

use crate::domain::{Defect, DefectId, Error, User, UserId, codec};

/// Path of a user resource.
pub fn user_href(id: UserId) -> String {
    format!("/user/{id}")
}

/// Path of a defect resource.
pub fn defect_href(id: DefectId) -> String {
    format!("/defect/{id}")
}

/// Encode a persisted user with its self link.
pub fn user_resource(user: &User) -> Result<Value, Error> {
    let id = user.id().ok_or_else(|| Error::incomplete_entity("id"))?;
    let mut raw = codec::encode_user(user)?;
    raw.insert(
        "_links".to_owned(),
        json!({ "self": { "href": user_href(id) } }),
    );
    Ok(Value::Object(raw))
}

/// Encode a persisted defect with its self link and reference links.
pub fn defect_resource(defect: &Defect) -> Result<Value, Error> {
    let id = defect.id().ok_or_else(|| Error::incomplete_entity("id"))?;
    let mut raw = codec::encode_defect(defect)?;

    let mut links = Map::new();
    links.insert(
        "self".to_owned(),
        json!({ "href": defect_href(id) }),
    );
    links.insert(
        "createdBy".to_owned(),
        json!({ "href": user_href(defect.created_by()) }),
    );
    if let Some(assignee) = defect.assigned_to() {
        links.insert(
            "assignedTo".to_owned(),
            json!({ "href": user_href(assignee) }),
        );
    }
    raw.insert("_links".to_owned(), Value::Object(links));
    Ok(Value::Object(raw))
}

/// Wrap entity resources as an embedded collection.
pub fn collection(kind: &str, items: Vec<Value>) -> Value {
    let mut embedded = Map::new();
    embedded.insert(kind.to_owned(), Value::Array(items));
    json!({ "_embedded": embedded })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Status, Timestamp, UserName, UserType};

    fn persisted_user() -> User {
        User::new(
            UserName::new("Bar").expect("valid name"),
            UserType::Developer,
            None,
        )
        .with_id(UserId::random())
    }

    #[test]
    fn user_resource_links_to_itself() {
        let user = persisted_user();
        let id = user.id().expect("persisted fixture");
        let value = user_resource(&user).expect("complete entity");

        assert_eq!(
            value.pointer("/_links/self/href").and_then(Value::as_str),
            Some(format!("/user/{id}").as_str())
        );
        assert_eq!(value.get("name").and_then(Value::as_str), Some("Bar"));
    }

    #[test]
    fn user_resource_refuses_an_unpersisted_entity() {
        let user = User::new(
            UserName::new("Bar").expect("valid name"),
            UserType::Developer,
            None,
        );
        assert!(user_resource(&user).is_err());
    }

    #[test]
    fn defect_resource_separates_self_from_reference_links() {
        let reporter = UserId::random();
        let assignee = UserId::random();
        let defect = Defect::new(
            Timestamp::parse("2015-10-03 12:00:00").expect("valid timestamp"),
            Status::Created,
            reporter,
        )
        .with_assignee(assignee)
        .with_id(DefectId::random());
        let id = defect.id().expect("persisted fixture");

        let value = defect_resource(&defect).expect("complete entity");
        assert_eq!(
            value.pointer("/_links/self/href").and_then(Value::as_str),
            Some(format!("/defect/{id}").as_str())
        );
        assert_eq!(
            value
                .pointer("/_links/createdBy/href")
                .and_then(Value::as_str),
            Some(format!("/user/{reporter}").as_str())
        );
        assert_eq!(
            value
                .pointer("/_links/assignedTo/href")
                .and_then(Value::as_str),
            Some(format!("/user/{assignee}").as_str())
        );
    }

    #[test]
    fn unassigned_defects_carry_no_assignee_link() {
        let defect = Defect::new(
            Timestamp::parse("2015-10-03 12:00:00").expect("valid timestamp"),
            Status::Created,
            UserId::random(),
        )
        .with_id(DefectId::random());

        let value = defect_resource(&defect).expect("complete entity");
        assert!(value.pointer("/_links/assignedTo").is_none());
    }

    #[test]
    fn collections_are_keyed_by_resource_kind() {
        let user = persisted_user();
        let items = vec![user_resource(&user).expect("complete entity")];
        let value = collection("user", items);

        let embedded = value
            .pointer("/_embedded/user")
            .and_then(Value::as_array)
            .expect("embedded array");
        assert_eq!(embedded.len(), 1);
    }
}
