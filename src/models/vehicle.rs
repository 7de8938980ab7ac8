//! Modelo de Vehicle
//! 
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente a la tabla `vehicles`: el VIN es único en toda la flota
//! y los mantenimientos/alertas dependientes se eliminan en cascada.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use validator::Validate;

use crate::utils::validation::validate_vin;

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_status")]
pub enum VehicleStatus {
    #[default]
    Active,
    Maintenance,
    Retired,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [Self::Active, Self::Maintenance, Self::Retired];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Maintenance => "Maintenance",
            Self::Retired => "Retired",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    pub status: VehicleStatus,
    pub department: Option<String>,
    pub date_acquired: DateTime<Utc>,
    pub last_service_date: Option<DateTime<Utc>>,
}

/// Vehículo listo para insertar: los defaults ya están resueltos
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    pub status: VehicleStatus,
    pub department: Option<String>,
    pub date_acquired: DateTime<Utc>,
    pub last_service_date: Option<DateTime<Utc>>,
}

impl NewVehicle {
    pub fn with_id(self, id: i32) -> Vehicle {
        Vehicle {
            id,
            vin: self.vin,
            make: self.make,
            model: self.model,
            year: self.year,
            mileage: self.mileage,
            status: self.status,
            department: self.department,
            date_acquired: self.date_acquired,
            last_service_date: self.last_service_date,
        }
    }
}

/// Body de POST/PUT. En PUT el `id` del body debe coincidir con el del path.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub id: Option<i32>,

    #[validate(custom = "validate_vin")]
    pub vin: String,

    #[validate(length(min = 1, max = 50))]
    pub make: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(range(min = 0, max = 999999))]
    pub mileage: i32,

    pub status: Option<VehicleStatus>,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    pub date_acquired: Option<DateTime<Utc>>,

    pub last_service_date: Option<DateTime<Utc>>,
}

impl VehicleRequest {
    /// Resuelve los defaults (Status = Active, DateAcquired = ahora)
    pub fn into_new_vehicle(self, now: DateTime<Utc>) -> NewVehicle {
        NewVehicle {
            vin: self.vin,
            make: self.make,
            model: self.model,
            year: self.year,
            mileage: self.mileage,
            status: self.status.unwrap_or_default(),
            department: self.department,
            date_acquired: self.date_acquired.unwrap_or(now),
            last_service_date: self.last_service_date,
        }
    }
}
