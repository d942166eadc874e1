//! Tests for the user entity.

use super::*;
use rstest::rstest;

fn developer(name: &str) -> User {
    User::new(
        UserName::new(name).expect("valid name"),
        UserType::Developer,
        None,
    )
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn name_rejects_empty_input(#[case] raw: &str) {
    assert_eq!(UserName::new(raw), Err(EmptyUserName));
}

#[test]
fn name_is_stored_verbatim() {
    let name = UserName::new(" Bar ").expect("non-empty name");
    assert_eq!(name.as_str(), " Bar ");
}

#[test]
fn new_user_has_no_id() {
    let user = developer("Bar");
    assert_eq!(user.id(), None);
    assert_eq!(user.user_type(), UserType::Developer);
    assert_eq!(user.image_url(), None);
}

#[test]
fn with_id_marks_the_user_persisted() {
    let id = UserId::random();
    let user = developer("Bar").with_id(id);
    assert_eq!(user.id(), Some(id));
}

#[test]
fn user_id_round_trips_through_strings() {
    let id = UserId::random();
    assert_eq!(UserId::parse(&id.to_string()), Ok(id));
}

#[test]
fn user_id_rejects_garbage() {
    let err = UserId::parse("not-a-uuid").expect_err("malformed id");
    assert_eq!(err.input, "not-a-uuid");
}

#[test]
fn absent_and_set_optional_fields_are_distinguished() {
    let without = developer("Bar");
    let with = User::new(
        UserName::new("Bar").expect("valid name"),
        UserType::Developer,
        Some(String::new()),
    );
    assert_ne!(without, with);
}

#[test]
fn empty_patch_is_identity() {
    let user = developer("Bar").with_id(UserId::random());
    let patched = UserPatch::default().apply_to(&user);
    assert_eq!(patched, user);
}

#[test]
fn patch_replaces_present_fields_and_keeps_the_id() {
    let user = User::new(
        UserName::new("Bar").expect("valid name"),
        UserType::Developer,
        Some("http://example.com/bar".to_owned()),
    )
    .with_id(UserId::random());

    let patch = UserPatch {
        name: Some(UserName::new("Test").expect("valid name")),
        user_type: Some(UserType::Customer),
        image_url: None,
    };
    let patched = patch.apply_to(&user);

    assert_eq!(patched.id(), user.id());
    assert_eq!(patched.name().as_str(), "Test");
    assert_eq!(patched.user_type(), UserType::Customer);
    assert_eq!(patched.image_url(), Some("http://example.com/bar"));
}
