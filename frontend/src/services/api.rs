use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    Appointment, CreateAppointmentRequest, CreatePetRequest, CreateServiceRequest,
    CreateVaccineRequest, ErrorResponse, Pet, Service, UpdateAppointmentRequest,
    UpdatePetRequest, UpdateServiceRequest, UpdateVaccineRequest, VaccineRecord,
};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Failure talking to the backend. `Display` is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything the view-models need from the backend.
///
/// View-models only see this trait; [`ApiClient`] is the HTTP implementation.
#[async_trait]
pub trait PetShopApi: Send + Sync {
    async fn list_pets(&self) -> ApiResult<Vec<Pet>>;
    async fn create_pet(&self, request: &CreatePetRequest) -> ApiResult<Pet>;
    async fn update_pet(&self, pet_id: i64, request: &UpdatePetRequest) -> ApiResult<Pet>;
    async fn delete_pet(&self, pet_id: i64) -> ApiResult<()>;

    async fn list_services(&self) -> ApiResult<Vec<Service>>;
    async fn create_service(&self, request: &CreateServiceRequest) -> ApiResult<Service>;
    async fn update_service(&self, service_id: i64, request: &UpdateServiceRequest) -> ApiResult<Service>;
    async fn delete_service(&self, service_id: i64) -> ApiResult<()>;

    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>>;
    async fn create_appointment(&self, request: &CreateAppointmentRequest) -> ApiResult<Appointment>;
    async fn update_appointment(
        &self,
        appointment_id: i64,
        request: &UpdateAppointmentRequest,
    ) -> ApiResult<Appointment>;
    async fn delete_appointment(&self, appointment_id: i64) -> ApiResult<()>;

    async fn list_vaccines(&self) -> ApiResult<Vec<VaccineRecord>>;
    async fn create_vaccine(&self, request: &CreateVaccineRequest) -> ApiResult<VaccineRecord>;
    async fn update_vaccine(
        &self,
        vaccine_id: i64,
        request: &UpdateVaccineRequest,
    ) -> ApiResult<VaccineRecord>;
    async fn delete_vaccine(&self, vaccine_id: i64) -> ApiResult<()>;
}

/// API client for communicating with the backend server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::parse(response).await
    }

    async fn put_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::parse(response).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check(response).await.map(|_| ())
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        log::warn!("Request to {} failed with {}: {}", url, status, message);
        Err(ApiError::Status { status: status.as_u16(), message })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefer the server's `{"error": ...}` message, then the raw body, then the status line
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.error;
    }
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.trim().to_string()
    }
}

#[async_trait]
impl PetShopApi for ApiClient {
    async fn list_pets(&self) -> ApiResult<Vec<Pet>> {
        self.get_json("pets").await
    }

    async fn create_pet(&self, request: &CreatePetRequest) -> ApiResult<Pet> {
        self.post_json("pets", request).await
    }

    async fn update_pet(&self, pet_id: i64, request: &UpdatePetRequest) -> ApiResult<Pet> {
        self.put_json(&format!("pets/{}", pet_id), request).await
    }

    async fn delete_pet(&self, pet_id: i64) -> ApiResult<()> {
        self.delete(&format!("pets/{}", pet_id)).await
    }

    async fn list_services(&self) -> ApiResult<Vec<Service>> {
        self.get_json("services").await
    }

    async fn create_service(&self, request: &CreateServiceRequest) -> ApiResult<Service> {
        self.post_json("services", request).await
    }

    async fn update_service(&self, service_id: i64, request: &UpdateServiceRequest) -> ApiResult<Service> {
        self.put_json(&format!("services/{}", service_id), request).await
    }

    async fn delete_service(&self, service_id: i64) -> ApiResult<()> {
        self.delete(&format!("services/{}", service_id)).await
    }

    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>> {
        self.get_json("appointments").await
    }

    async fn create_appointment(&self, request: &CreateAppointmentRequest) -> ApiResult<Appointment> {
        self.post_json("appointments", request).await
    }

    async fn update_appointment(
        &self,
        appointment_id: i64,
        request: &UpdateAppointmentRequest,
    ) -> ApiResult<Appointment> {
        self.put_json(&format!("appointments/{}", appointment_id), request).await
    }

    async fn delete_appointment(&self, appointment_id: i64) -> ApiResult<()> {
        self.delete(&format!("appointments/{}", appointment_id)).await
    }

    async fn list_vaccines(&self) -> ApiResult<Vec<VaccineRecord>> {
        self.get_json("vaccines").await
    }

    async fn create_vaccine(&self, request: &CreateVaccineRequest) -> ApiResult<VaccineRecord> {
        self.post_json("vaccines", request).await
    }

    async fn update_vaccine(
        &self,
        vaccine_id: i64,
        request: &UpdateVaccineRequest,
    ) -> ApiResult<VaccineRecord> {
        self.put_json(&format!("vaccines/{}", vaccine_id), request).await
    }

    async fn delete_vaccine(&self, vaccine_id: i64) -> ApiResult<()> {
        self.delete(&format!("vaccines/{}", vaccine_id)).await
    }
}
