//! Service entry point: wires REST endpoints, health probes and OpenAPI docs.

use std::env;

use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::{self, state::HttpState};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let state = HttpState::new();
    let health_state = web::Data::new(HealthState::new());
    let server_state = state.clone();
    let server_health = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(server_state.clone()))
            .app_data(server_health.clone())
            .wrap(NormalizePath::trim())
            .configure(http::routes)
            .service(ready)
            .service(live);
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .bind(bind.as_str())?;

    health_state.mark_ready();
    server.run().await
}
