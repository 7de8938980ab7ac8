use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::models::{MaintenanceRecord, MaintenanceRecordRequest};
use crate::repositories::{MaintenanceRepository, MAINTENANCE_LIST_LIMIT};
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

pub struct MaintenanceController {
    repository: Arc<dyn MaintenanceRepository>,
}

impl MaintenanceController {
    pub fn new(repository: Arc<dyn MaintenanceRepository>) -> Self {
        Self { repository }
    }

    /// Los 100 registros más recientes por fecha de servicio
    pub async fn list(&self) -> AppResult<Vec<MaintenanceRecord>> {
        info!("Getting all maintenance records");
        self.repository.list_recent(MAINTENANCE_LIST_LIMIT).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRecord> {
        info!("Getting maintenance record with ID: {}", id);

        self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!("Maintenance record {} not found", id);
            not_found_error("Maintenance record", id)
        })
    }

    pub async fn list_by_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<MaintenanceRecord>> {
        info!("Getting maintenance records for vehicle: {}", vehicle_id);
        self.repository.list_by_vehicle(vehicle_id).await
    }

    pub async fn create(&self, request: MaintenanceRecordRequest) -> AppResult<MaintenanceRecord> {
        request.validate()?;
        info!("Creating maintenance record for vehicle: {}", request.vehicle_id);

        let record = self.repository.create(request.into_new_record(Utc::now())).await?;

        info!("Maintenance record created with ID: {}", record.id);
        Ok(record)
    }

    pub async fn update(&self, id: i32, request: MaintenanceRecordRequest) -> AppResult<MaintenanceRecord> {
        if request.id != Some(id) {
            warn!("Maintenance record ID mismatch: {} vs {:?}", id, request.id);
            return Err(bad_request_error("Maintenance record id in body does not match the URL"));
        }
        request.validate()?;

        let record = request.into_new_record(Utc::now()).with_id(id);
        let record = self.repository.replace(&record).await?;

        info!("Maintenance record {} updated", id);
        Ok(record)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        info!("Deleting maintenance record: {}", id);

        self.repository.delete(id).await.map_err(|e| {
            if let AppError::NotFound(_) = e {
                warn!("Maintenance record {} not found for deletion", id);
            }
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewVehicle, VehicleStatus};
    use crate::repositories::{InMemoryFleetStore, VehicleRepository};
    use chrono::{DateTime, Duration};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn request(vehicle_id: i32, service_date: DateTime<Utc>, cost: &str) -> MaintenanceRecordRequest {
        MaintenanceRecordRequest {
            id: None,
            vehicle_id,
            service_date,
            service_type: "Oil Change".to_string(),
            performed_by: Some("Jorge Ruiz".to_string()),
            cost: Decimal::from_str(cost).unwrap(),
            mileage_at_service: 45000,
            notes: None,
            parts_replaced: Some("Oil filter".to_string()),
            is_warranty_covered: false,
            created_date: None,
        }
    }

    async fn setup() -> (MaintenanceController, i32) {
        let store = InMemoryFleetStore::new();
        let vehicle = VehicleRepository::create(
            &store,
            NewVehicle {
                vin: "1FTFW1ET5DFC10312".to_string(),
                make: "Ford".to_string(),
                model: "F-150".to_string(),
                year: 2020,
                mileage: 50000,
                status: VehicleStatus::Active,
                department: None,
                date_acquired: Utc::now(),
                last_service_date: None,
            },
        )
        .await
        .unwrap();
        (MaintenanceController::new(Arc::new(store)), vehicle.id)
    }

    #[tokio::test]
    async fn test_cost_is_rounded_to_two_decimals() {
        let (controller, vehicle_id) = setup().await;
        let record = controller
            .create(request(vehicle_id, Utc::now(), "49.999"))
            .await
            .unwrap();
        assert_eq!(record.cost, Decimal::from_str("50.00").unwrap());
    }

    #[tokio::test]
    async fn test_unknown_vehicle_is_a_validation_error() {
        let (controller, vehicle_id) = setup().await;
        let err = controller
            .create(request(vehicle_id + 100, Utc::now(), "10"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_by_vehicle_is_newest_first() {
        let (controller, vehicle_id) = setup().await;
        let now = Utc::now();
        controller.create(request(vehicle_id, now - Duration::days(30), "80")).await.unwrap();
        controller.create(request(vehicle_id, now - Duration::days(2), "40")).await.unwrap();

        let records = controller.list_by_vehicle(vehicle_id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].service_date > records[1].service_date);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (controller, vehicle_id) = setup().await;
        let record = controller.create(request(vehicle_id, Utc::now(), "50")).await.unwrap();

        let mut body = request(vehicle_id, record.service_date, "500");
        body.id = Some(record.id);
        body.service_type = "Major Service".to_string();
        controller.update(record.id, body).await.unwrap();

        let updated = controller.get_by_id(record.id).await.unwrap();
        assert_eq!(updated.service_type, "Major Service");
        assert_eq!(updated.cost, Decimal::new(500, 0));

        controller.delete(record.id).await.unwrap();
        assert!(matches!(controller.get_by_id(record.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(controller.delete(record.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id_is_bad_request() {
        let (controller, vehicle_id) = setup().await;
        let mut body = request(vehicle_id, Utc::now(), "50");
        body.id = Some(2);
        assert!(matches!(controller.update(1, body).await, Err(AppError::BadRequest(_))));
    }
}
