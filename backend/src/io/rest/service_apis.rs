//! Endpoints for the service catalog.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{CreateServiceRequest, UpdateServiceRequest};

pub async fn create_service(
    State(state): State<AppState>,
    Json(request): Json<CreateServiceRequest>,
) -> impl IntoResponse {
    info!("POST /api/services - request: {:?}", request);

    match state.catalog_service.create_service(request).await {
        Ok(service) => (StatusCode::CREATED, Json(service)).into_response(),
        Err(e) => {
            error!("Failed to create service: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/services/{}", service_id);

    match state.catalog_service.get_service(service_id).await {
        Ok(service) => (StatusCode::OK, Json(service)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_services(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/services");

    match state.catalog_service.list_services().await {
        Ok(services) => (StatusCode::OK, Json(services)).into_response(),
        Err(e) => {
            error!("Failed to list services: {}", e);
            e.into_response()
        }
    }
}

pub async fn update_service(
    State(state): State<AppState>,
    Path(service_id): Path<i64>,
    Json(request): Json<UpdateServiceRequest>,
) -> impl IntoResponse {
    info!("PUT /api/services/{} - request: {:?}", service_id, request);

    match state.catalog_service.update_service(service_id, request).await {
        Ok(service) => (StatusCode::OK, Json(service)).into_response(),
        Err(e) => {
            error!("Failed to update service {}: {}", service_id, e);
            e.into_response()
        }
    }
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(service_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/services/{}", service_id);

    match state.catalog_service.delete_service(service_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete service {}: {}", service_id, e);
            e.into_response()
        }
    }
}
