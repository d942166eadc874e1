//! End-to-end CRUD and consistency scenarios over the HTTP adapter.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::middleware::NormalizePath;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use backend::inbound::http::{routes, state::HttpState};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new()))
        .wrap(NormalizePath::trim())
        .configure(routes)
}

trait TestService:
    Service<Request, Response = ServiceResponse, Error = actix_web::Error> + Sized
{
}

impl<S> TestService for S where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

async fn post_json(app: &impl TestService, uri: &str, body: &Value) -> ServiceResponse {
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn put_json(app: &impl TestService, uri: &str, body: &Value) -> ServiceResponse {
    let request = actix_test::TestRequest::put()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn get(app: &impl TestService, uri: &str) -> ServiceResponse {
    actix_test::call_service(app, actix_test::TestRequest::get().uri(uri).to_request()).await
}

async fn delete(app: &impl TestService, uri: &str) -> ServiceResponse {
    actix_test::call_service(
        app,
        actix_test::TestRequest::delete().uri(uri).to_request(),
    )
    .await
}

fn location(response: &ServiceResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}

async fn create_user(app: &impl TestService, name: &str, user_type: &str) -> String {
    let response = post_json(
        app,
        "/user/",
        &json!({
            "name": name,
            "imageUrl": "http://example.com/bar",
            "userType": user_type,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    location(&response)
}

async fn create_defect(app: &impl TestService, created_by_url: &str) -> String {
    let created_by = id_segment(created_by_url);
    let response = post_json(
        app,
        "/defect/",
        &json!({
            "created": "2015-10-03 12:00:00",
            "status": "CREATED",
            "createdBy": created_by,
            "severity": "TRIVIAL",
            "summary": "Unfortunately, Notes has Stopped...",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    location(&response)
}

fn id_segment(href: &str) -> &str {
    href.rsplit('/').next().expect("href with an id segment")
}

#[actix_web::test]
async fn user_crud_round_trip() {
    let app = actix_test::init_service(test_app()).await;
    let user_url = create_user(&app, "Bar", "DEVELOPER").await;

    let response = get(&app, &user_url).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Bar"));
    assert_eq!(
        body.get("imageUrl").and_then(Value::as_str),
        Some("http://example.com/bar")
    );
    assert_eq!(
        body.get("userType").and_then(Value::as_str),
        Some("DEVELOPER")
    );
    assert_eq!(
        body.pointer("/_links/self/href").and_then(Value::as_str),
        Some(user_url.as_str())
    );

    let response = put_json(
        &app,
        &user_url,
        &json!({ "name": "Test", "userType": "CUSTOMER" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &user_url).await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Test"));
    assert_eq!(
        body.get("userType").and_then(Value::as_str),
        Some("CUSTOMER")
    );

    let response = delete(&app, &user_url).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(&app, &user_url).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn listing_embeds_users_under_their_kind() {
    let app = actix_test::init_service(test_app()).await;
    create_user(&app, "Bar", "DEVELOPER").await;

    let response = get(&app, "/user").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let users = body
        .pointer("/_embedded/user")
        .and_then(Value::as_array)
        .expect("embedded user array");
    assert_eq!(users.len(), 1);
    assert_eq!(
        users
            .first()
            .and_then(|user| user.get("name"))
            .and_then(Value::as_str),
        Some("Bar")
    );
}

#[actix_web::test]
async fn duplicate_user_names_are_rejected_with_conflict() {
    let app = actix_test::init_service(test_app()).await;
    create_user(&app, "Bar", "DEVELOPER").await;

    let response = post_json(
        &app,
        "/user/",
        &json!({ "name": "Bar", "userType": "MANAGER" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn every_user_type_is_accepted_and_unknown_ones_are_not() {
    let app = actix_test::init_service(test_app()).await;
    let user_url = create_user(&app, "Bar", "DEVELOPER").await;

    for user_type in ["CUSTOMER", "MANAGER", "DEVELOPER", "TESTER"] {
        let response = put_json(&app, &user_url, &json!({ "userType": user_type })).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{user_type}");
    }

    let response = put_json(&app, &user_url, &json!({ "userType": "BADVALUE" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn missing_required_user_fields_fail_fast() {
    let app = actix_test::init_service(test_app()).await;
    let response = post_json(&app, "/user/", &json!({ "userType": "DEVELOPER" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("missing_required_field")
    );
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("name")
    );
}

#[actix_web::test]
async fn every_status_is_accepted_and_unknown_ones_are_not() {
    let app = actix_test::init_service(test_app()).await;
    let user_url = create_user(&app, "Bar", "DEVELOPER").await;
    let defect_url = create_defect(&app, &user_url).await;

    // REOPENED needs an assignee on board first.
    let response = put_json(
        &app,
        &defect_url,
        &json!({ "assignedTo": id_segment(&user_url) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for status in ["CREATED", "ACCEPTED", "FIXED", "REOPENED", "CLOSED"] {
        let response = put_json(&app, &defect_url, &json!({ "status": status })).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{status}");
    }

    let response = put_json(&app, &defect_url, &json!({ "status": "BADVALUE" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn every_severity_is_accepted_and_unknown_ones_are_not() {
    let app = actix_test::init_service(test_app()).await;
    let user_url = create_user(&app, "Bar", "DEVELOPER").await;
    let defect_url = create_defect(&app, &user_url).await;

    for severity in ["TRIVIAL", "MINOR", "MAJOR", "SHOWSTOPPER"] {
        let response = put_json(&app, &defect_url, &json!({ "severity": severity })).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{severity}");
    }

    let response = put_json(&app, &defect_url, &json!({ "severity": "BADVALUE" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn modified_may_never_precede_created() {
    let app = actix_test::init_service(test_app()).await;
    let user_url = create_user(&app, "Bar", "DEVELOPER").await;
    let defect_url = create_defect(&app, &user_url).await;

    let response = put_json(
        &app,
        &defect_url,
        &json!({ "modified": "2001-01-15 03:01:01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_value")
    );

    // The stored defect is untouched: no modified timestamp appears.
    let response = get(&app, &defect_url).await;
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body.get("modified").is_none());
}

#[actix_web::test]
async fn reopened_defects_require_an_assignee() {
    let app = actix_test::init_service(test_app()).await;
    let user_url = create_user(&app, "Bar", "DEVELOPER").await;
    let created_by = id_segment(&user_url);

    // With an assignee the creation succeeds.
    let response = post_json(
        &app,
        "/defect/",
        &json!({
            "created": "2015-10-03 12:00:00",
            "status": "REOPENED",
            "createdBy": created_by,
            "assignedTo": created_by,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Without one it is an invariant violation, reported as a server fault.
    let response = post_json(
        &app,
        "/defect/",
        &json!({
            "created": "2015-10-03 12:00:00",
            "status": "REOPENED",
            "createdBy": created_by,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invariant_violation")
    );
}

#[actix_web::test]
async fn only_developers_can_be_assigned() {
    let app = actix_test::init_service(test_app()).await;
    let reporter_url = create_user(&app, "Bar", "DEVELOPER").await;
    let customer_url = create_user(&app, "Foo", "CUSTOMER").await;

    let response = post_json(
        &app,
        "/defect/",
        &json!({
            "created": "2015-10-03 12:00:00",
            "status": "REOPENED",
            "createdBy": id_segment(&reporter_url),
            "assignedTo": id_segment(&customer_url),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn reference_listings_follow_both_roles() {
    let app = actix_test::init_service(test_app()).await;
    let user_url = create_user(&app, "Bar", "DEVELOPER").await;
    let defect_url = create_defect(&app, &user_url).await;

    let response = put_json(
        &app,
        &defect_url,
        &json!({ "assignedTo": id_segment(&user_url) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for role in ["created", "assigned"] {
        let response = get(&app, &format!("{user_url}/{role}")).await;
        assert_eq!(response.status(), StatusCode::OK, "{role}");
        let body: Value = actix_test::read_body_json(response).await;
        let defects = body
            .pointer("/_embedded/defect")
            .and_then(Value::as_array)
            .expect("embedded defect array");
        assert_eq!(defects.len(), 1);
        assert_eq!(
            defects
                .first()
                .and_then(|defect| defect.get("summary"))
                .and_then(Value::as_str),
            Some("Unfortunately, Notes has Stopped...")
        );
    }
}

#[actix_web::test]
async fn search_by_name_returns_the_exact_match() {
    let app = actix_test::init_service(test_app()).await;
    create_user(&app, "Bar", "DEVELOPER").await;

    let response = get(&app, "/user/search/findByName?name=Bar").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let users = body
        .pointer("/_embedded/user")
        .and_then(Value::as_array)
        .expect("embedded user array");
    assert_eq!(users.len(), 1);
    assert_eq!(
        users
            .first()
            .and_then(|user| user.get("userType"))
            .and_then(Value::as_str),
        Some("DEVELOPER")
    );
}

#[actix_web::test]
async fn reset_empties_defects_and_users_and_repeats_cleanly() {
    let app = actix_test::init_service(test_app()).await;
    let user_url = create_user(&app, "Bar", "DEVELOPER").await;
    create_defect(&app, &user_url).await;

    let response = post_json(&app, "/reset", &json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for kind in ["user", "defect"] {
        let response = get(&app, &format!("/{kind}")).await;
        let body: Value = actix_test::read_body_json(response).await;
        let items = body
            .pointer(&format!("/_embedded/{kind}"))
            .and_then(Value::as_array)
            .expect("embedded array");
        assert!(items.is_empty(), "{kind} survived the reset");
    }

    // Resetting the empty store is a quiet success.
    let response = post_json(&app, "/reset", &json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn defect_updates_cannot_move_created_or_reporter() {
    let app = actix_test::init_service(test_app()).await;
    let reporter_url = create_user(&app, "Bar", "DEVELOPER").await;
    let other_url = create_user(&app, "Foo", "DEVELOPER").await;
    let defect_url = create_defect(&app, &reporter_url).await;

    let response = put_json(
        &app,
        &defect_url,
        &json!({
            "created": "1999-01-01 00:00:00",
            "createdBy": id_segment(&other_url),
            "status": "ACCEPTED",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &defect_url).await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("created").and_then(Value::as_str),
        Some("2015-10-03 12:00:00")
    );
    assert_eq!(
        body.get("createdBy").and_then(Value::as_str),
        Some(id_segment(&reporter_url))
    );
    assert_eq!(body.get("status").and_then(Value::as_str), Some("ACCEPTED"));
}
