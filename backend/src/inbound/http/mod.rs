//! HTTP inbound adapter exposing REST endpoints.
//!
//! The adapter holds no business rules: handlers decode nothing themselves,
//! pass raw records to the registry, and map typed errors to status codes.

pub mod admin;
pub mod defects;
pub mod error;
pub mod hal;
pub mod health;
pub mod state;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register every resource endpoint on the given service config.
///
/// Health probes are wired separately because they carry their own state.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_user)
        .service(users::list_users)
        .service(users::find_by_name)
        .service(users::created_defects)
        .service(users::assigned_defects)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(defects::create_defect)
        .service(defects::list_defects)
        .service(defects::get_defect)
        .service(defects::update_defect)
        .service(defects::delete_defect)
        .service(admin::reset);
}
