//! Defect resource handlers.
//!
//! ```text
//! POST   /defect       create
//! GET    /defect       list
//! GET    /defect/{id}  read
//! PUT    /defect/{id}  update
//! DELETE /defect/{id}  delete
//! ```

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use serde_json::Value;

use super::error::ApiResult;
use super::hal;
use super::state::HttpState;
use super::users::body_record;
use crate::domain::{DefectId, Error};

/// Resolve a path segment as a defect id; anything unparseable names no
/// defect.
fn path_defect_id(raw: &str) -> ApiResult<DefectId> {
    DefectId::parse(raw).map_err(|_| Error::not_found(format!("no defect {raw}")))
}

/// Create a defect.
#[utoipa::path(
    post,
    path = "/defect",
    tags = ["defects"],
    responses(
        (status = 201, description = "Defect created; Location carries the new resource path"),
        (status = 400, description = "Malformed payload or dangling reference", body = Error),
        (status = 409, description = "Assignee is not a developer", body = Error),
        (status = 500, description = "Reopened without an assignee", body = Error)
    )
)]
#[post("/defect")]
pub async fn create_defect(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let defect = state.registry.create_defect(body_record(&payload)?)?;
    let id = defect
        .id()
        .ok_or_else(|| Error::internal("created defect has no id"))?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, hal::defect_href(id)))
        .json(hal::defect_resource(&defect)?))
}

/// List all defects.
#[utoipa::path(
    get,
    path = "/defect",
    tags = ["defects"],
    responses((status = 200, description = "Embedded collection of defects"))
)]
#[get("/defect")]
pub async fn list_defects(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let resources = state
        .registry
        .defects()
        .iter()
        .map(hal::defect_resource)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(hal::collection("defect", resources)))
}

/// Read a defect.
#[utoipa::path(
    get,
    path = "/defect/{id}",
    tags = ["defects"],
    params(("id" = String, Path, description = "Defect identifier")),
    responses(
        (status = 200, description = "The defect"),
        (status = 404, description = "No such defect", body = Error)
    )
)]
#[get("/defect/{id}")]
pub async fn get_defect(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let defect = state.registry.defect(path_defect_id(&path)?)?;
    Ok(HttpResponse::Ok().json(hal::defect_resource(&defect)?))
}

/// Update a defect in place; `created` and `createdBy` are immutable.
#[utoipa::path(
    put,
    path = "/defect/{id}",
    tags = ["defects"],
    params(("id" = String, Path, description = "Defect identifier")),
    responses(
        (status = 204, description = "Defect updated"),
        (status = 400, description = "Malformed payload or ordering violation", body = Error),
        (status = 404, description = "No such defect", body = Error),
        (status = 409, description = "Assignee is not a developer", body = Error),
        (status = 500, description = "Reopened without an assignee", body = Error)
    )
)]
#[put("/defect/{id}")]
pub async fn update_defect(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    state
        .registry
        .update_defect(path_defect_id(&path)?, body_record(&payload)?)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a defect.
#[utoipa::path(
    delete,
    path = "/defect/{id}",
    tags = ["defects"],
    params(("id" = String, Path, description = "Defect identifier")),
    responses(
        (status = 204, description = "Defect deleted"),
        (status = 404, description = "No such defect", body = Error)
    )
)]
#[delete("/defect/{id}")]
pub async fn delete_defect(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.registry.delete_defect(path_defect_id(&path)?)?;
    Ok(HttpResponse::NoContent().finish())
}
