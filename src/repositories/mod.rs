//! Capa de repositorios
//! 
//! CRUD tipado y lecturas filtradas/ordenadas sobre las tres tablas de la flota.
//! Cada repositorio es un trait con dos implementaciones: PostgreSQL (sqlx)
//! y en memoria (`memory::InMemoryFleetStore`).

pub mod maintenance_repository;
pub mod memory;
pub mod service_alert_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{
    AlertPriority, MaintenanceRecord, NewMaintenanceRecord, NewServiceAlert, NewVehicle,
    ServiceAlert, Vehicle, VehicleStatus,
};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub use maintenance_repository::PgMaintenanceRepository;
pub use memory::InMemoryFleetStore;
pub use service_alert_repository::PgServiceAlertRepository;
pub use vehicle_repository::PgVehicleRepository;

/// Máximo de registros devueltos por el listado general de mantenimientos
pub const MAINTENANCE_LIST_LIMIT: i64 = 100;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Todos los vehículos, sin orden garantizado
    async fn list(&self) -> AppResult<Vec<Vehicle>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>>;
    async fn exists(&self, id: i32) -> AppResult<bool>;
    /// `exclude_id` permite ignorar el propio vehículo al actualizar
    async fn vin_exists(&self, vin: &str, exclude_id: Option<i32>) -> AppResult<bool>;
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;
    /// Reemplaza el registro completo. `NotFound` si ya no existe.
    async fn replace(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;
    /// Elimina el vehículo y, en cascada, sus mantenimientos y alertas
    async fn delete(&self, id: i32) -> AppResult<()>;
    /// Número de vehículos, opcionalmente filtrado por estado
    async fn count(&self, status: Option<VehicleStatus>) -> AppResult<i64>;
}

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Los `limit` registros más recientes por fecha de servicio
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<MaintenanceRecord>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<MaintenanceRecord>>;
    /// Registros de un vehículo, fecha de servicio descendente
    async fn list_by_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<MaintenanceRecord>>;
    async fn exists(&self, id: i32) -> AppResult<bool>;
    async fn create(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord>;
    async fn replace(&self, record: &MaintenanceRecord) -> AppResult<MaintenanceRecord>;
    async fn delete(&self, id: i32) -> AppResult<()>;
    /// Suma de costes con `service_date >= since`
    async fn total_cost_since(&self, since: DateTime<Utc>) -> AppResult<Decimal>;
}

#[async_trait]
pub trait ServiceAlertRepository: Send + Sync {
    /// Pendientes primero, después las más recientes
    async fn list(&self) -> AppResult<Vec<ServiceAlert>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceAlert>>;
    /// Alertas de un vehículo, fecha de creación descendente
    async fn list_by_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<ServiceAlert>>;
    async fn exists(&self, id: i32) -> AppResult<bool>;
    async fn create(&self, alert: NewServiceAlert) -> AppResult<ServiceAlert>;
    async fn replace(&self, alert: &ServiceAlert) -> AppResult<ServiceAlert>;
    async fn delete(&self, id: i32) -> AppResult<()>;
    /// Alertas no resueltas, opcionalmente de una prioridad concreta
    async fn count_unresolved(&self, priority: Option<AlertPriority>) -> AppResult<i64>;
}

/// Una escritura que no afectó a ninguna fila: si el registro ya no existe
/// es un `NotFound` (borrado concurrente), si existe es un conflicto.
pub fn resolve_write_conflict(resource: &str, id: i32, still_exists: bool) -> AppError {
    if still_exists {
        AppError::Conflict(format!("{} with id '{}' was modified concurrently", resource, id))
    } else {
        not_found_error(resource, id)
    }
}
