use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::models::{Vehicle, VehicleRequest};
use crate::repositories::VehicleRepository;
use crate::utils::errors::{bad_request_error, not_found_error, validation_error, AppError, AppResult};

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        info!("Getting all vehicles");
        self.repository.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Vehicle> {
        info!("Getting vehicle with ID: {}", id);

        self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!("Vehicle with ID {} not found", id);
            not_found_error("Vehicle", id)
        })
    }

    pub async fn create(&self, request: VehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;
        info!("Creating new vehicle: {}", request.vin);

        // Verificar que el VIN no exista en la flota
        if self.repository.vin_exists(&request.vin, None).await? {
            return Err(validation_error("vin", "VIN is already registered"));
        }

        let vehicle = self.repository.create(request.into_new_vehicle(Utc::now())).await?;

        info!("Vehicle created with ID: {}", vehicle.id);
        Ok(vehicle)
    }

    /// Reemplazo completo. El id del body tiene que coincidir con el del path.
    pub async fn update(&self, id: i32, request: VehicleRequest) -> AppResult<Vehicle> {
        if request.id != Some(id) {
            warn!("Vehicle ID mismatch: {} vs {:?}", id, request.id);
            return Err(bad_request_error("Vehicle id in body does not match the URL"));
        }
        request.validate()?;

        let vehicle = request.into_new_vehicle(Utc::now()).with_id(id);
        match self.repository.replace(&vehicle).await {
            Ok(vehicle) => {
                info!("Vehicle {} updated successfully", id);
                Ok(vehicle)
            }
            Err(AppError::NotFound(msg)) => {
                warn!("Vehicle {} not found during update", id);
                Err(AppError::NotFound(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// Elimina el vehículo junto con sus mantenimientos y alertas
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        info!("Deleting vehicle with ID: {}", id);

        match self.repository.delete(id).await {
            Ok(()) => {
                info!("Vehicle {} deleted successfully", id);
                Ok(())
            }
            Err(AppError::NotFound(msg)) => {
                warn!("Vehicle {} not found for deletion", id);
                Err(AppError::NotFound(msg))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleStatus;
    use crate::repositories::InMemoryFleetStore;

    fn request(vin: &str) -> VehicleRequest {
        VehicleRequest {
            id: None,
            vin: vin.to_string(),
            make: "Ford".to_string(),
            model: "F-150".to_string(),
            year: 2020,
            mileage: 50000,
            status: None,
            department: None,
            date_acquired: None,
            last_service_date: None,
        }
    }

    fn controller() -> VehicleController {
        VehicleController::new(Arc::new(InMemoryFleetStore::new()))
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let controller = controller();
        let before = Utc::now();
        let vehicle = controller.create(request("12345678901234567")).await.unwrap();

        assert!(vehicle.id > 0);
        assert_eq!(vehicle.status, VehicleStatus::Active);
        assert!(vehicle.date_acquired >= before);

        let fetched = controller.get_by_id(vehicle.id).await.unwrap();
        assert_eq!(fetched, vehicle);
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_fields() {
        let controller = controller();

        let mut too_old = request("12345678901234567");
        too_old.year = 1899;
        assert!(matches!(controller.create(too_old).await, Err(AppError::Validation(_))));

        let mut negative_mileage = request("12345678901234567");
        negative_mileage.mileage = -1;
        assert!(matches!(controller.create(negative_mileage).await, Err(AppError::Validation(_))));

        let mut invalid = request("1234567890");
        invalid.make = String::new();
        assert!(matches!(controller.create(invalid).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_vin() {
        let controller = controller();
        controller.create(request("12345678901234567")).await.unwrap();

        let err = controller.create(request("12345678901234567")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id_is_bad_request() {
        let controller = controller();
        for (path_id, body_id) in [(1, Some(2)), (2, Some(1)), (5, None), (7, Some(-7))] {
            let mut body = request("12345678901234567");
            body.id = body_id;
            let err = controller.update(path_id, body).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let controller = controller();
        let vehicle = controller.create(request("12345678901234567")).await.unwrap();

        let mut body = request("12345678901234567");
        body.id = Some(vehicle.id);
        body.mileage = 60000;
        body.status = Some(VehicleStatus::Maintenance);
        controller.update(vehicle.id, body).await.unwrap();

        let updated = controller.get_by_id(vehicle.id).await.unwrap();
        assert_eq!(updated.mileage, 60000);
        assert_eq!(updated.status, VehicleStatus::Maintenance);
    }

    #[tokio::test]
    async fn test_missing_vehicle_is_not_found() {
        let controller = controller();
        let mut body = request("12345678901234567");
        body.id = Some(99);

        assert!(matches!(controller.get_by_id(99).await, Err(AppError::NotFound(_))));
        assert!(matches!(controller.update(99, body).await, Err(AppError::NotFound(_))));
        assert!(matches!(controller.delete(99).await, Err(AppError::NotFound(_))));
    }
}
