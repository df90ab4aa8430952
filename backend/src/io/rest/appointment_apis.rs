//! # REST API for Appointments
//!
//! Every appointment in a response embeds its `pet` and `service` so the
//! agenda can label slots without extra lookups.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{CreateAppointmentRequest, UpdateAppointmentRequest};

/// Book an appointment for an existing pet and service
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(request): Json<CreateAppointmentRequest>,
) -> impl IntoResponse {
    info!("POST /api/appointments - request: {:?}", request);

    match state.appointment_service.create_appointment(request).await {
        Ok(appointment) => (StatusCode::CREATED, Json(appointment)).into_response(),
        Err(e) => {
            error!("Failed to book appointment: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/appointments/{}", appointment_id);

    match state.appointment_service.get_appointment(appointment_id).await {
        Ok(appointment) => (StatusCode::OK, Json(appointment)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List all appointments, earliest first
pub async fn list_appointments(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/appointments");

    match state.appointment_service.list_appointments().await {
        Ok(appointments) => (StatusCode::OK, Json(appointments)).into_response(),
        Err(e) => {
            error!("Failed to list appointments: {}", e);
            e.into_response()
        }
    }
}

/// Reschedule an appointment or change its status
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i64>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/appointments/{} - request: {:?}", appointment_id, request);

    match state.appointment_service.update_appointment(appointment_id, request).await {
        Ok(appointment) => (StatusCode::OK, Json(appointment)).into_response(),
        Err(e) => {
            error!("Failed to update appointment {}: {}", appointment_id, e);
            e.into_response()
        }
    }
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/appointments/{}", appointment_id);

    match state.appointment_service.delete_appointment(appointment_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete appointment {}: {}", appointment_id, e);
            e.into_response()
        }
    }
}
