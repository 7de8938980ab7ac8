//! Almacenamiento en memoria
//!
//! Implementa los tres repositorios sobre un único conjunto de tablas
//! protegido por un `RwLock`, de modo que unicidad del VIN, integridad
//! referencial y borrado en cascada se comprueban de forma atómica.
//! Se usa en los tests y con `STORAGE_BACKEND=memory`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{MaintenanceRepository, ServiceAlertRepository, VehicleRepository};
use crate::models::{
    AlertPriority, MaintenanceRecord, NewMaintenanceRecord, NewServiceAlert, NewVehicle,
    ServiceAlert, Vehicle, VehicleStatus,
};
use crate::utils::errors::{not_found_error, validation_error, AppResult};

#[derive(Debug, Default)]
struct FleetTables {
    vehicles: BTreeMap<i32, Vehicle>,
    maintenance: BTreeMap<i32, MaintenanceRecord>,
    alerts: BTreeMap<i32, ServiceAlert>,
    last_vehicle_id: i32,
    last_maintenance_id: i32,
    last_alert_id: i32,
}

impl FleetTables {
    fn vin_taken(&self, vin: &str, exclude_id: Option<i32>) -> bool {
        self.vehicles
            .values()
            .any(|v| v.vin == vin && Some(v.id) != exclude_id)
    }

    fn ensure_vehicle(&self, vehicle_id: i32) -> AppResult<()> {
        if self.vehicles.contains_key(&vehicle_id) {
            Ok(())
        } else {
            Err(validation_error("vehicleId", "Vehicle does not exist"))
        }
    }
}

/// Fecha de servicio descendente; a igualdad, el id más alto primero
fn newest_service_first(a: &MaintenanceRecord, b: &MaintenanceRecord) -> Ordering {
    b.service_date
        .cmp(&a.service_date)
        .then_with(|| b.id.cmp(&a.id))
}

fn newest_alert_first(a: &ServiceAlert, b: &ServiceAlert) -> Ordering {
    b.created_date
        .cmp(&a.created_date)
        .then_with(|| b.id.cmp(&a.id))
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFleetStore {
    tables: Arc<RwLock<FleetTables>>,
}

impl InMemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryFleetStore {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.get(&id).cloned())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.contains_key(&id))
    }

    async fn vin_exists(&self, vin: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.vin_taken(vin, exclude_id))
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if tables.vin_taken(&vehicle.vin, None) {
            return Err(validation_error("vin", "VIN is already registered"));
        }

        tables.last_vehicle_id += 1;
        let vehicle = vehicle.with_id(tables.last_vehicle_id);
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn replace(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if !tables.vehicles.contains_key(&vehicle.id) {
            return Err(not_found_error("Vehicle", vehicle.id));
        }
        if tables.vin_taken(&vehicle.vin, Some(vehicle.id)) {
            return Err(validation_error("vin", "VIN is already registered"));
        }

        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.vehicles.remove(&id).is_none() {
            return Err(not_found_error("Vehicle", id));
        }

        tables.maintenance.retain(|_, m| m.vehicle_id != id);
        tables.alerts.retain(|_, a| a.vehicle_id != id);
        Ok(())
    }

    async fn count(&self, status: Option<VehicleStatus>) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .vehicles
            .values()
            .filter(|v| status.map_or(true, |s| v.status == s))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryFleetStore {
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<MaintenanceRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<MaintenanceRecord> = tables.maintenance.values().cloned().collect();
        records.sort_by(newest_service_first);
        records.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(records)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<MaintenanceRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.maintenance.get(&id).cloned())
    }

    async fn list_by_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<MaintenanceRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<MaintenanceRecord> = tables
            .maintenance
            .values()
            .filter(|m| m.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        records.sort_by(newest_service_first);
        Ok(records)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.maintenance.contains_key(&id))
    }

    async fn create(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord> {
        let mut tables = self.tables.write().await;
        tables.ensure_vehicle(record.vehicle_id)?;

        tables.last_maintenance_id += 1;
        let record = record.with_id(tables.last_maintenance_id);
        tables.maintenance.insert(record.id, record.clone());
        Ok(record)
    }

    async fn replace(&self, record: &MaintenanceRecord) -> AppResult<MaintenanceRecord> {
        let mut tables = self.tables.write().await;
        if !tables.maintenance.contains_key(&record.id) {
            return Err(not_found_error("Maintenance record", record.id));
        }
        tables.ensure_vehicle(record.vehicle_id)?;

        tables.maintenance.insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        match tables.maintenance.remove(&id) {
            Some(_) => Ok(()),
            None => Err(not_found_error("Maintenance record", id)),
        }
    }

    async fn total_cost_since(&self, since: DateTime<Utc>) -> AppResult<Decimal> {
        let tables = self.tables.read().await;
        Ok(tables
            .maintenance
            .values()
            .filter(|m| m.service_date >= since)
            .map(|m| m.cost)
            .sum())
    }
}

#[async_trait]
impl ServiceAlertRepository for InMemoryFleetStore {
    async fn list(&self) -> AppResult<Vec<ServiceAlert>> {
        let tables = self.tables.read().await;
        let mut alerts: Vec<ServiceAlert> = tables.alerts.values().cloned().collect();
        alerts.sort_by(|a, b| {
            a.is_resolved
                .cmp(&b.is_resolved)
                .then_with(|| newest_alert_first(a, b))
        });
        Ok(alerts)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceAlert>> {
        let tables = self.tables.read().await;
        Ok(tables.alerts.get(&id).cloned())
    }

    async fn list_by_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<ServiceAlert>> {
        let tables = self.tables.read().await;
        let mut alerts: Vec<ServiceAlert> = tables
            .alerts
            .values()
            .filter(|a| a.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        alerts.sort_by(newest_alert_first);
        Ok(alerts)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.alerts.contains_key(&id))
    }

    async fn create(&self, alert: NewServiceAlert) -> AppResult<ServiceAlert> {
        let mut tables = self.tables.write().await;
        tables.ensure_vehicle(alert.vehicle_id)?;

        tables.last_alert_id += 1;
        let alert = alert.with_id(tables.last_alert_id);
        tables.alerts.insert(alert.id, alert.clone());
        Ok(alert)
    }

    async fn replace(&self, alert: &ServiceAlert) -> AppResult<ServiceAlert> {
        let mut tables = self.tables.write().await;
        if !tables.alerts.contains_key(&alert.id) {
            return Err(not_found_error("Service alert", alert.id));
        }
        tables.ensure_vehicle(alert.vehicle_id)?;

        tables.alerts.insert(alert.id, alert.clone());
        Ok(alert.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        match tables.alerts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(not_found_error("Service alert", id)),
        }
    }

    async fn count_unresolved(&self, priority: Option<AlertPriority>) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .alerts
            .values()
            .filter(|a| !a.is_resolved)
            .filter(|a| priority.map_or(true, |p| a.priority == p))
            .count();
        Ok(count as i64)
    }
}
