use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::models::{ServiceAlert, ServiceAlertRequest};
use crate::repositories::ServiceAlertRepository;
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};

pub struct ServiceAlertController {
    repository: Arc<dyn ServiceAlertRepository>,
}

impl ServiceAlertController {
    pub fn new(repository: Arc<dyn ServiceAlertRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<ServiceAlert>> {
        info!("Getting all service alerts");
        self.repository.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ServiceAlert> {
        info!("Getting service alert with ID: {}", id);

        self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!("Service alert {} not found", id);
            not_found_error("Service alert", id)
        })
    }

    pub async fn list_by_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<ServiceAlert>> {
        info!("Getting service alerts for vehicle: {}", vehicle_id);
        self.repository.list_by_vehicle(vehicle_id).await
    }

    pub async fn create(&self, request: ServiceAlertRequest) -> AppResult<ServiceAlert> {
        request.validate()?;
        info!(
            "Creating {} alert for vehicle: {}",
            request.priority, request.vehicle_id
        );

        let alert = self.repository.create(request.into_new_alert(Utc::now())).await?;

        info!("Service alert created with ID: {}", alert.id);
        Ok(alert)
    }

    pub async fn update(&self, id: i32, request: ServiceAlertRequest) -> AppResult<ServiceAlert> {
        if request.id != Some(id) {
            warn!("Service alert ID mismatch: {} vs {:?}", id, request.id);
            return Err(bad_request_error("Service alert id in body does not match the URL"));
        }
        request.validate()?;

        let alert = request.into_new_alert(Utc::now()).with_id(id);
        let alert = self.repository.replace(&alert).await?;

        info!("Service alert {} updated", id);
        Ok(alert)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        info!("Deleting service alert: {}", id);
        self.repository.delete(id).await
    }
}
