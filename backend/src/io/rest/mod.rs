//! # REST API
//!
//! JSON endpoints under `/api` for pets, services, appointments and vaccine
//! records. Handlers log the request, call the matching domain service and
//! translate [`DomainError`] into a status code with an [`ErrorResponse`] body.

pub mod appointment_apis;
pub mod pet_apis;
pub mod service_apis;
pub mod vaccine_apis;

pub use appointment_apis::*;
pub use pet_apis::*;
pub use service_apis::*;
pub use vaccine_apis::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::error;

use crate::domain::DomainError;

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = match &self {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            DomainError::Storage(e) => {
                error!("Storage failure: {:#}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
