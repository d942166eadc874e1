//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting handlers
//! turn failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorKind};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MissingRequiredField
        | ErrorKind::InvalidEnumValue
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidReference => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvariantViolation | ErrorKind::IncompleteEntity | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Strip implementation detail from faults before they leave the service.
///
/// Invariant violations stay verbatim: the message names the inconsistent
/// combination the caller sent and carries nothing internal.
fn redact_if_internal(error: &Error) -> Error {
    match error.kind() {
        ErrorKind::Internal | ErrorKind::IncompleteEntity => {
            Error::internal("internal server error")
        }
        _ => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!(kind = ?self.kind(), message = %self.message(), "request failed with a server fault");
        }
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}
