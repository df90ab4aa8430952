use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{CreateVaccineRequest, UpdateVaccineRequest};

pub async fn create_vaccine(
    State(state): State<AppState>,
    Json(request): Json<CreateVaccineRequest>,
) -> impl IntoResponse {
    info!("POST /api/vaccines - request: {:?}", request);

    match state.vaccine_service.create_vaccine(request).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => {
            error!("Failed to record vaccine: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_vaccine(
    State(state): State<AppState>,
    Path(vaccine_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/vaccines/{}", vaccine_id);

    match state.vaccine_service.get_vaccine(vaccine_id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_vaccines(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/vaccines");

    match state.vaccine_service.list_vaccines().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!("Failed to list vaccines: {}", e);
            e.into_response()
        }
    }
}

pub async fn update_vaccine(
    State(state): State<AppState>,
    Path(vaccine_id): Path<i64>,
    Json(request): Json<UpdateVaccineRequest>,
) -> impl IntoResponse {
    info!("PUT /api/vaccines/{} - request: {:?}", vaccine_id, request);

    match state.vaccine_service.update_vaccine(vaccine_id, request).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => {
            error!("Failed to update vaccine record {}: {}", vaccine_id, e);
            e.into_response()
        }
    }
}

pub async fn delete_vaccine(
    State(state): State<AppState>,
    Path(vaccine_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/vaccines/{}", vaccine_id);

    match state.vaccine_service.delete_vaccine(vaccine_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete vaccine record {}: {}", vaccine_id, e);
            e.into_response()
        }
    }
}
