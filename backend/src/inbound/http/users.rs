//! User resource handlers.
//!
//! ```text
//! POST   /user                          create
//! GET    /user                          list
//! GET    /user/{id}                     read
//! PUT    /user/{id}                     update
//! DELETE /user/{id}                     delete
//! GET    /user/search/findByName?name=  exact-name search
//! GET    /user/{id}/created             defects the user reported
//! GET    /user/{id}/assigned            defects assigned to the user
//! ```

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use super::error::ApiResult;
use super::hal;
use super::state::HttpState;
use crate::domain::{Error, RawRecord, UserId};

pub(super) fn body_record(payload: &Value) -> ApiResult<&RawRecord> {
    payload
        .as_object()
        .ok_or_else(|| Error::invalid_value("request body must be a JSON object"))
}

/// Resolve a path segment as a user id; anything unparseable names no user.
fn path_user_id(raw: &str) -> ApiResult<UserId> {
    UserId::parse(raw).map_err(|_| Error::not_found(format!("no user {raw}")))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/user",
    tags = ["users"],
    responses(
        (status = 201, description = "User created; Location carries the new resource path"),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 409, description = "Name already in use", body = Error)
    )
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let user = state.registry.create_user(body_record(&payload)?)?;
    let id = user
        .id()
        .ok_or_else(|| Error::internal("created user has no id"))?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, hal::user_href(id)))
        .json(hal::user_resource(&user)?))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/user",
    tags = ["users"],
    responses((status = 200, description = "Embedded collection of users"))
)]
#[get("/user")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let resources = state
        .registry
        .users()
        .iter()
        .map(hal::user_resource)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(hal::collection("user", resources)))
}

/// Query parameters for the exact-name search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct FindByName {
    /// Name to match exactly.
    pub name: String,
}

/// Find users by exact name.
#[utoipa::path(
    get,
    path = "/user/search/findByName",
    tags = ["users"],
    params(FindByName),
    responses((status = 200, description = "Embedded collection of matching users"))
)]
#[get("/user/search/findByName")]
pub async fn find_by_name(
    state: web::Data<HttpState>,
    query: web::Query<FindByName>,
) -> ApiResult<HttpResponse> {
    let resources = state
        .registry
        .find_users_by_name(&query.name)
        .iter()
        .map(hal::user_resource)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(hal::collection("user", resources)))
}

/// Read a user.
#[utoipa::path(
    get,
    path = "/user/{id}",
    tags = ["users"],
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user"),
        (status = 404, description = "No such user", body = Error)
    )
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = state.registry.user(path_user_id(&path)?)?;
    Ok(HttpResponse::Ok().json(hal::user_resource(&user)?))
}

/// Update a user in place.
#[utoipa::path(
    put,
    path = "/user/{id}",
    tags = ["users"],
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 409, description = "Name already in use", body = Error)
    )
)]
#[put("/user/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    state
        .registry
        .update_user(path_user_id(&path)?, body_record(&payload)?)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tags = ["users"],
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user", body = Error)
    )
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.registry.delete_user(path_user_id(&path)?)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Defects reported by a user.
#[utoipa::path(
    get,
    path = "/user/{id}/created",
    tags = ["users"],
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Embedded collection of defects"),
        (status = 404, description = "No such user", body = Error)
    )
)]
#[get("/user/{id}/created")]
pub async fn created_defects(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_user_id(&path)?;
    state.registry.user(id)?;
    let resources = state
        .registry
        .defects_created_by(id)
        .iter()
        .map(hal::defect_resource)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(hal::collection("defect", resources)))
}

/// Defects assigned to a user.
#[utoipa::path(
    get,
    path = "/user/{id}/assigned",
    tags = ["users"],
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Embedded collection of defects"),
        (status = 404, description = "No such user", body = Error)
    )
)]
#[get("/user/{id}/assigned")]
pub async fn assigned_defects(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_user_id(&path)?;
    state.registry.user(id)?;
    let resources = state
        .registry
        .defects_assigned_to(id)
        .iter()
        .map(hal::defect_resource)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(hal::collection("defect", resources)))
}
