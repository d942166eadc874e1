//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the registry and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::Registry;

/// Dependency bundle for HTTP handlers.
#[derive(Clone, Default)]
pub struct HttpState {
    /// The lifecycle manager behind every resource route.
    pub registry: Arc<Registry>,
}

impl HttpState {
    /// Construct state over an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}
