//! Endpoints for registering, listing, editing and removing pets.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{CreatePetRequest, UpdatePetRequest};

/// Register a new pet
pub async fn create_pet(
    State(state): State<AppState>,
    Json(request): Json<CreatePetRequest>,
) -> impl IntoResponse {
    info!("POST /api/pets - request: {:?}", request);

    match state.pet_service.create_pet(request).await {
        Ok(pet) => (StatusCode::CREATED, Json(pet)).into_response(),
        Err(e) => {
            error!("Failed to create pet: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_pet(State(state): State<AppState>, Path(pet_id): Path<i64>) -> impl IntoResponse {
    info!("GET /api/pets/{}", pet_id);

    match state.pet_service.get_pet(pet_id).await {
        Ok(pet) => (StatusCode::OK, Json(pet)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_pets(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/pets");

    match state.pet_service.list_pets().await {
        Ok(pets) => (StatusCode::OK, Json(pets)).into_response(),
        Err(e) => {
            error!("Failed to list pets: {}", e);
            e.into_response()
        }
    }
}

pub async fn update_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<i64>,
    Json(request): Json<UpdatePetRequest>,
) -> impl IntoResponse {
    info!("PUT /api/pets/{} - request: {:?}", pet_id, request);

    match state.pet_service.update_pet(pet_id, request).await {
        Ok(pet) => (StatusCode::OK, Json(pet)).into_response(),
        Err(e) => {
            error!("Failed to update pet {}: {}", pet_id, e);
            e.into_response()
        }
    }
}

pub async fn delete_pet(State(state): State<AppState>, Path(pet_id): Path<i64>) -> impl IntoResponse {
    info!("DELETE /api/pets/{}", pet_id);

    match state.pet_service.delete_pet(pet_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete pet {}: {}", pet_id, e);
            e.into_response()
        }
    }
}
