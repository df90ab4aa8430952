//! # Pet Shop Backend
//!
//! HTTP API for the pet shop: registered pets, the service catalog,
//! appointments and vaccine records.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, error translation)
//!     ↓
//! Domain Layer (validation, reference checks)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::domain::{AppointmentService, CatalogService, PetService, VaccineService};
use crate::storage::{
    AppointmentRepository, DbConnection, PetRepository, ServiceRepository, VaccineRepository,
};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub pet_service: PetService,
    pub catalog_service: CatalogService,
    pub appointment_service: AppointmentService,
    pub vaccine_service: VaccineService,
}

/// Open the configured database and build all services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    Ok(initialize_with(db_conn))
}

/// Build the services on top of an already opened connection
pub fn initialize_with(db_conn: DbConnection) -> AppState {
    info!("Setting up domain services");
    let pets = PetRepository::new(db_conn.clone());
    let services = ServiceRepository::new(db_conn.clone());

    AppState {
        pet_service: PetService::new(pets.clone()),
        catalog_service: CatalogService::new(services.clone()),
        appointment_service: AppointmentService::new(
            AppointmentRepository::new(db_conn.clone()),
            pets.clone(),
            services,
        ),
        vaccine_service: VaccineService::new(VaccineRepository::new(db_conn), pets),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Result<Router> {
    let origin = config
        .frontend_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid frontend origin: {}", config.frontend_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/pets", get(io::list_pets).post(io::create_pet))
        .route(
            "/pets/:id",
            get(io::get_pet).put(io::update_pet).delete(io::delete_pet),
        )
        .route("/services", get(io::list_services).post(io::create_service))
        .route(
            "/services/:id",
            get(io::get_service).put(io::update_service).delete(io::delete_service),
        )
        .route(
            "/appointments",
            get(io::list_appointments).post(io::create_appointment),
        )
        .route(
            "/appointments/:id",
            get(io::get_appointment)
                .put(io::update_appointment)
                .delete(io::delete_appointment),
        )
        .route("/vaccines", get(io::list_vaccines).post(io::create_vaccine))
        .route(
            "/vaccines/:id",
            get(io::get_vaccine).put(io::update_vaccine).delete(io::delete_vaccine),
        );

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        create_router(initialize_with(db), &Config::default()).expect("router")
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn seed_pet_and_service(router: &Router) -> (i64, i64) {
        let (status, pet) = send(
            router,
            "POST",
            "/api/pets",
            Some(json!({"name": "Rex", "breed": "Labrador", "owner": "Ana Silva"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, service) = send(
            router,
            "POST",
            "/api/services",
            Some(json!({"name": "Banho", "price": 50.0})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        (pet["id"].as_i64().unwrap(), service["id"].as_i64().unwrap())
    }

    #[tokio::test]
    async fn test_booking_round_trip_embeds_references() {
        let router = test_router().await;
        let (pet_id, service_id) = seed_pet_and_service(&router).await;

        let (status, created) = send(
            &router,
            "POST",
            "/api/appointments",
            Some(json!({"date_time": "2024-03-05T14:00:00Z", "pet_id": pet_id, "service_id": service_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "scheduled");

        let (status, listed) = send(&router, "GET", "/api/appointments", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[0]["date_time"], "2024-03-05T14:00:00Z");
        assert_eq!(listed[0]["pet"]["name"], "Rex");
        assert_eq!(listed[0]["service"]["name"], "Banho");
    }

    #[tokio::test]
    async fn test_unknown_pet_is_bad_request() {
        let router = test_router().await;
        let (_, service_id) = seed_pet_and_service(&router).await;

        let (status, body) = send(
            &router,
            "POST",
            "/api/appointments",
            Some(json!({"date_time": "2024-03-05T14:00:00Z", "pet_id": 999, "service_id": service_id})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown pet: 999");
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let router = test_router().await;

        let (status, body) = send(&router, "GET", "/api/vaccines/12", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Vaccine record not found: 12");
    }

    #[tokio::test]
    async fn test_deleting_booked_pet_is_conflict() {
        let router = test_router().await;
        let (pet_id, service_id) = seed_pet_and_service(&router).await;
        send(
            &router,
            "POST",
            "/api/appointments",
            Some(json!({"date_time": "2024-03-05T14:00:00Z", "pet_id": pet_id, "service_id": service_id})),
        )
        .await;

        let (status, _) = send(&router, "DELETE", &format!("/api/pets/{}", pet_id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&router, "DELETE", &format!("/api/services/{}", service_id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_and_delete_pet() {
        let router = test_router().await;
        let (pet_id, _) = seed_pet_and_service(&router).await;
        let uri = format!("/api/pets/{}", pet_id);

        let (status, updated) = send(&router, "PUT", &uri, Some(json!({"breed": "Vira-lata"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["breed"], "Vira-lata");
        assert_eq!(updated["owner"], "Ana Silva");

        let (status, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
