//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the error schema. The
//! generated document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorKind};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Defect tracker API",
        description = "CRUD interface over users and defects with \
                       cross-entity consistency enforcement."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::find_by_name,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::created_defects,
        crate::inbound::http::users::assigned_defects,
        crate::inbound::http::defects::create_defect,
        crate::inbound::http::defects::list_defects,
        crate::inbound::http::defects::get_defect,
        crate::inbound::http::defects::update_defect,
        crate::inbound::http::defects::delete_defect,
        crate::inbound::http::admin::reset,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorKind)),
    tags(
        (name = "users", description = "Operations on user resources"),
        (name = "defects", description = "Operations on defect resources"),
        (name = "admin", description = "Store administration"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_schema_is_registered_with_its_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        let serialised = serde_json::to_value(error_schema).expect("serialise schema");
        let properties = serialised
            .get("properties")
            .and_then(serde_json::Value::as_object)
            .expect("object schema");
        assert!(properties.contains_key("code"));
        assert!(properties.contains_key("message"));
    }

    #[test]
    fn every_resource_path_is_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/user", "/user/{id}", "/defect", "/defect/{id}", "/reset"] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path {path} in the OpenAPI document"
            );
        }
    }
}
