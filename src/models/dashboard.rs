//! Resumen del dashboard
//! 
//! Snapshot calculado a partir del contenido actual de la flota.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::MaintenanceRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_vehicles: i64,
    pub active_vehicles: i64,
    pub vehicles_in_maintenance: i64,
    pub unresolved_alerts: i64,
    pub critical_alerts: i64,
    pub recent_maintenance: Vec<RecentMaintenance>,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_maintenance_cost: Decimal,
}

/// Proyección reducida de un MaintenanceRecord para el dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMaintenance {
    pub id: i32,
    pub vehicle_id: i32,
    pub service_type: String,
    pub service_date: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

impl From<MaintenanceRecord> for RecentMaintenance {
    fn from(record: MaintenanceRecord) -> Self {
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            service_type: record.service_type,
            service_date: record.service_date,
            cost: record.cost,
        }
    }
}
