//! Servicio de Dashboard
//! 
//! Calcula el snapshot del dashboard a partir del contenido actual de la flota.
//! Es de solo lectura: el mismo contenido y el mismo instante dan el mismo resultado.

use chrono::{DateTime, Months, Utc};
use std::sync::Arc;
use tracing::info;

use crate::models::{AlertPriority, DashboardStats, RecentMaintenance, VehicleStatus};
use crate::repositories::{MaintenanceRepository, ServiceAlertRepository, VehicleRepository};
use crate::utils::errors::AppResult;

/// Mantenimientos incluidos en `recent_maintenance`
pub const RECENT_MAINTENANCE_LIMIT: i64 = 5;

/// Meses hacia atrás que cubre el coste anual de mantenimiento
const ANNUAL_WINDOW_MONTHS: u32 = 12;

#[derive(Clone)]
pub struct DashboardService {
    vehicles: Arc<dyn VehicleRepository>,
    maintenance: Arc<dyn MaintenanceRepository>,
    alerts: Arc<dyn ServiceAlertRepository>,
}

impl DashboardService {
    pub fn new(
        vehicles: Arc<dyn VehicleRepository>,
        maintenance: Arc<dyn MaintenanceRepository>,
        alerts: Arc<dyn ServiceAlertRepository>,
    ) -> Self {
        Self {
            vehicles,
            maintenance,
            alerts,
        }
    }

    /// Snapshot evaluado en el instante actual
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        self.stats_at(Utc::now()).await
    }

    /// Snapshot evaluado en `now`
    pub async fn stats_at(&self, now: DateTime<Utc>) -> AppResult<DashboardStats> {
        info!("Fetching dashboard statistics");

        let total_vehicles = self.vehicles.count(None).await?;
        let active_vehicles = self.vehicles.count(Some(VehicleStatus::Active)).await?;
        let vehicles_in_maintenance = self.vehicles.count(Some(VehicleStatus::Maintenance)).await?;
        let unresolved_alerts = self.alerts.count_unresolved(None).await?;
        let critical_alerts = self.alerts.count_unresolved(Some(AlertPriority::Critical)).await?;

        let recent_maintenance = self
            .maintenance
            .list_recent(RECENT_MAINTENANCE_LIMIT)
            .await?
            .into_iter()
            .map(RecentMaintenance::from)
            .collect();

        let annual_maintenance_cost = self
            .maintenance
            .total_cost_since(annual_window_start(now))
            .await?;

        info!("Dashboard stats retrieved successfully");
        Ok(DashboardStats {
            total_vehicles,
            active_vehicles,
            vehicles_in_maintenance,
            unresolved_alerts,
            critical_alerts,
            recent_maintenance,
            annual_maintenance_cost,
        })
    }
}

/// Inicio (inclusive) de la ventana de 12 meses que termina en `now`
pub fn annual_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(ANNUAL_WINDOW_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewMaintenanceRecord, NewServiceAlert, NewVehicle};
    use crate::repositories::InMemoryFleetStore;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    fn service_for(store: &InMemoryFleetStore) -> DashboardService {
        let store = Arc::new(store.clone());
        DashboardService::new(store.clone(), store.clone(), store)
    }

    async fn add_vehicle(store: &InMemoryFleetStore, vin: &str, status: VehicleStatus) -> i32 {
        let vehicle = NewVehicle {
            vin: vin.to_string(),
            make: "Toyota".to_string(),
            model: "Hilux".to_string(),
            year: 2021,
            mileage: 12000,
            status,
            department: Some("Field Operations".to_string()),
            date_acquired: Utc::now(),
            last_service_date: None,
        };
        VehicleRepository::create(store, vehicle).await.unwrap().id
    }

    async fn add_record(store: &InMemoryFleetStore, vehicle_id: i32, service_date: DateTime<Utc>, cost: i64) {
        let record = NewMaintenanceRecord {
            vehicle_id,
            service_date,
            service_type: "Brake Service".to_string(),
            performed_by: None,
            cost: Decimal::new(cost, 0),
            mileage_at_service: 10000,
            notes: None,
            parts_replaced: None,
            is_warranty_covered: false,
            created_date: service_date,
        };
        MaintenanceRepository::create(store, record).await.unwrap();
    }

    async fn add_alert(store: &InMemoryFleetStore, vehicle_id: i32, priority: AlertPriority, is_resolved: bool) {
        let alert = NewServiceAlert {
            vehicle_id,
            alert_type: "Safety Recall".to_string(),
            priority,
            description: "Recall notice".to_string(),
            created_date: Utc::now(),
            due_date: None,
            is_resolved,
            resolved_date: None,
            resolved_by: None,
            resolution_notes: None,
        };
        ServiceAlertRepository::create(store, alert).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_store_returns_zeroes() {
        let store = InMemoryFleetStore::new();
        let stats = service_for(&store).stats().await.unwrap();

        assert_eq!(stats.total_vehicles, 0);
        assert_eq!(stats.active_vehicles, 0);
        assert_eq!(stats.vehicles_in_maintenance, 0);
        assert_eq!(stats.unresolved_alerts, 0);
        assert_eq!(stats.critical_alerts, 0);
        assert!(stats.recent_maintenance.is_empty());
        assert_eq!(stats.annual_maintenance_cost, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_counts_by_status_and_priority() {
        let store = InMemoryFleetStore::new();
        let first = add_vehicle(&store, "JTDBR32E720000001", VehicleStatus::Active).await;
        add_vehicle(&store, "JTDBR32E720000002", VehicleStatus::Active).await;
        add_vehicle(&store, "JTDBR32E720000003", VehicleStatus::Maintenance).await;
        add_vehicle(&store, "JTDBR32E720000004", VehicleStatus::Retired).await;
        add_alert(&store, first, AlertPriority::Critical, false).await;
        add_alert(&store, first, AlertPriority::Critical, true).await;
        add_alert(&store, first, AlertPriority::High, false).await;

        let stats = service_for(&store).stats().await.unwrap();

        assert_eq!(stats.total_vehicles, 4);
        assert_eq!(stats.active_vehicles, 2);
        assert_eq!(stats.vehicles_in_maintenance, 1);
        assert_eq!(stats.unresolved_alerts, 2);
        assert_eq!(stats.critical_alerts, 1);
    }

    #[tokio::test]
    async fn test_annual_cost_excludes_records_older_than_twelve_months() {
        let store = InMemoryFleetStore::new();
        let vehicle = add_vehicle(&store, "JTDBR32E720000001", VehicleStatus::Active).await;
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let thirteen_months_ago = now.checked_sub_months(Months::new(13)).unwrap();
        let one_month_ago = now.checked_sub_months(Months::new(1)).unwrap();
        add_record(&store, vehicle, thirteen_months_ago, 100).await;
        add_record(&store, vehicle, one_month_ago, 50).await;

        let stats = service_for(&store).stats_at(now).await.unwrap();

        assert_eq!(stats.annual_maintenance_cost, Decimal::new(50, 0));
        assert_eq!(stats.recent_maintenance.len(), 2);
    }

    #[tokio::test]
    async fn test_recent_maintenance_keeps_five_newest() {
        let store = InMemoryFleetStore::new();
        let vehicle = add_vehicle(&store, "JTDBR32E720000001", VehicleStatus::Active).await;
        let now = Utc::now();
        for days_ago in 0..8 {
            add_record(&store, vehicle, now - Duration::days(days_ago * 10), 10).await;
        }

        let stats = service_for(&store).stats_at(now).await.unwrap();

        assert_eq!(stats.recent_maintenance.len(), 5);
        assert_eq!(stats.recent_maintenance[0].service_date, now);
        assert!(stats
            .recent_maintenance
            .windows(2)
            .all(|w| w[0].service_date >= w[1].service_date));
    }

    #[test]
    fn test_annual_window_start_is_twelve_calendar_months_back() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 8, 30, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2023, 2, 28, 8, 30, 0).unwrap();
        assert_eq!(annual_window_start(now), expected);
    }
}
