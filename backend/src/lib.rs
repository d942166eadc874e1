//! Defect tracker backend: a validation and consistency core for users and
//! defects behind a thin REST adapter.

pub mod doc;
pub mod domain;
pub mod inbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
