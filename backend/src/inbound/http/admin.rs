//! Administrative store reset.

use actix_web::{HttpResponse, post, web};

use super::state::HttpState;

/// Remove every defect, then every user.
///
/// Idempotent: resetting an already-empty store is a success.
#[utoipa::path(
    post,
    path = "/reset",
    tags = ["admin"],
    responses((status = 204, description = "Store emptied"))
)]
#[post("/reset")]
pub async fn reset(state: web::Data<HttpState>) -> HttpResponse {
    state.registry.reset_all();
    HttpResponse::NoContent().finish()
}
