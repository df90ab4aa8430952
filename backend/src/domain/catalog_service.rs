use tracing::{info, warn};

use crate::domain::error::{required_text, DomainError, DomainResult};
use crate::storage::{is_foreign_key_violation, ServiceRepository};
use shared::{CreateServiceRequest, Service, UpdateServiceRequest};

const MAX_NAME_LEN: usize = 100;

/// Service catalog management. Names are not unique at this layer.
#[derive(Clone)]
pub struct CatalogService {
    repo: ServiceRepository,
}

impl CatalogService {
    pub fn new(repo: ServiceRepository) -> Self {
        Self { repo }
    }

    pub async fn create_service(&self, request: CreateServiceRequest) -> DomainResult<Service> {
        info!("Creating service: name={}, price={:.2}", request.name, request.price);

        let request = CreateServiceRequest {
            name: required_text("Service name", &request.name, MAX_NAME_LEN)?,
            price: validate_price(request.price)?,
        };

        let service = self.repo.store_service(&request).await?;
        info!("Created service {} with ID {}", service.name, service.id);
        Ok(service)
    }

    pub async fn get_service(&self, service_id: i64) -> DomainResult<Service> {
        self.repo.get_service(service_id).await?.ok_or_else(|| {
            warn!("Service not found: {}", service_id);
            not_found(service_id)
        })
    }

    pub async fn list_services(&self) -> DomainResult<Vec<Service>> {
        Ok(self.repo.list_services().await?)
    }

    pub async fn update_service(
        &self,
        service_id: i64,
        request: UpdateServiceRequest,
    ) -> DomainResult<Service> {
        info!("Updating service: {}", service_id);

        let mut service = self.get_service(service_id).await?;
        if let Some(name) = request.name {
            service.name = required_text("Service name", &name, MAX_NAME_LEN)?;
        }
        if let Some(price) = request.price {
            service.price = validate_price(price)?;
        }

        if !self.repo.update_service(&service).await? {
            return Err(not_found(service_id));
        }
        Ok(service)
    }

    pub async fn delete_service(&self, service_id: i64) -> DomainResult<()> {
        info!("Deleting service: {}", service_id);

        match self.repo.delete_service(service_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(not_found(service_id)),
            Err(e) if is_foreign_key_violation(&e) => Err(DomainError::Conflict(format!(
                "Service {} is still booked by appointments",
                service_id
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

fn not_found(service_id: i64) -> DomainError {
    DomainError::NotFound(format!("Service not found: {}", service_id))
}

fn validate_price(price: f64) -> DomainResult<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::Validation("Price must be zero or positive".to_string()));
    }
    Ok(price)
}
