//! Modelo de MaintenanceRecord
//! 
//! Un registro de servicio pertenece a un único vehículo (`vehicle_id`).
//! No hay back-reference embebida: el vehículo se obtiene por su id.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::validate_cost;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub service_date: DateTime<Utc>,
    /// Oil Change, Tire Rotation, Brake Service, ...
    pub service_type: String,
    pub performed_by: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    pub mileage_at_service: i32,
    pub notes: Option<String>,
    pub parts_replaced: Option<String>,
    pub is_warranty_covered: bool,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceRecord {
    pub vehicle_id: i32,
    pub service_date: DateTime<Utc>,
    pub service_type: String,
    pub performed_by: Option<String>,
    pub cost: Decimal,
    pub mileage_at_service: i32,
    pub notes: Option<String>,
    pub parts_replaced: Option<String>,
    pub is_warranty_covered: bool,
    pub created_date: DateTime<Utc>,
}

impl NewMaintenanceRecord {
    pub fn with_id(self, id: i32) -> MaintenanceRecord {
        MaintenanceRecord {
            id,
            vehicle_id: self.vehicle_id,
            service_date: self.service_date,
            service_type: self.service_type,
            performed_by: self.performed_by,
            cost: self.cost,
            mileage_at_service: self.mileage_at_service,
            notes: self.notes,
            parts_replaced: self.parts_replaced,
            is_warranty_covered: self.is_warranty_covered,
            created_date: self.created_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecordRequest {
    pub id: Option<i32>,

    pub vehicle_id: i32,

    pub service_date: DateTime<Utc>,

    #[validate(length(min = 1, max = 100))]
    pub service_type: String,

    #[validate(length(max = 50))]
    pub performed_by: Option<String>,

    #[serde(default, with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_cost")]
    pub cost: Decimal,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub mileage_at_service: i32,

    #[validate(length(max = 500))]
    pub notes: Option<String>,

    #[validate(length(max = 100))]
    pub parts_replaced: Option<String>,

    #[serde(default)]
    pub is_warranty_covered: bool,

    pub created_date: Option<DateTime<Utc>>,
}

impl MaintenanceRecordRequest {
    /// El coste se guarda con dos decimales, igual que la columna NUMERIC(10,2)
    pub fn into_new_record(self, now: DateTime<Utc>) -> NewMaintenanceRecord {
        NewMaintenanceRecord {
            vehicle_id: self.vehicle_id,
            service_date: self.service_date,
            service_type: self.service_type,
            performed_by: self.performed_by,
            cost: self.cost.round_dp(2),
            mileage_at_service: self.mileage_at_service,
            notes: self.notes,
            parts_replaced: self.parts_replaced,
            is_warranty_covered: self.is_warranty_covered,
            created_date: self.created_date.unwrap_or(now),
        }
    }
}
