//! Modelo de ServiceAlert
//! 
//! Alertas abiertas sobre un vehículo (inspecciones, recalls, ...).
//! Los campos de resolución solo pueden venir informados cuando
//! `is_resolved` es true; se valida al escribir.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use validator::Validate;

use crate::utils::validation::validate_resolution;

/// Prioridad de la alerta - mapea al ENUM alert_priority
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "alert_priority")]
pub enum AlertPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl AlertPriority {
    pub const ALL: [AlertPriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAlert {
    pub id: i32,
    pub vehicle_id: i32,
    /// Inspection Due, Maintenance Overdue, ...
    pub alert_type: String,
    pub priority: AlertPriority,
    pub description: String,
    pub created_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_resolved: bool,
    pub resolved_date: Option<DateTime<Utc>>,
    pub resolved_by: Option<String>,
    pub resolution_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceAlert {
    pub vehicle_id: i32,
    pub alert_type: String,
    pub priority: AlertPriority,
    pub description: String,
    pub created_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_resolved: bool,
    pub resolved_date: Option<DateTime<Utc>>,
    pub resolved_by: Option<String>,
    pub resolution_notes: Option<String>,
}

impl NewServiceAlert {
    pub fn with_id(self, id: i32) -> ServiceAlert {
        ServiceAlert {
            id,
            vehicle_id: self.vehicle_id,
            alert_type: self.alert_type,
            priority: self.priority,
            description: self.description,
            created_date: self.created_date,
            due_date: self.due_date,
            is_resolved: self.is_resolved,
            resolved_date: self.resolved_date,
            resolved_by: self.resolved_by,
            resolution_notes: self.resolution_notes,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_resolution", skip_on_field_errors = false))]
pub struct ServiceAlertRequest {
    pub id: Option<i32>,

    pub vehicle_id: i32,

    #[validate(length(min = 1, max = 50))]
    pub alert_type: String,

    pub priority: AlertPriority,

    #[validate(length(min = 1, max = 250))]
    pub description: String,

    pub created_date: Option<DateTime<Utc>>,

    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub is_resolved: bool,

    pub resolved_date: Option<DateTime<Utc>>,

    #[validate(length(max = 100))]
    pub resolved_by: Option<String>,

    #[validate(length(max = 250))]
    pub resolution_notes: Option<String>,
}

impl ServiceAlertRequest {
    pub fn has_resolution_details(&self) -> bool {
        self.resolved_date.is_some() || self.resolved_by.is_some() || self.resolution_notes.is_some()
    }

    pub fn into_new_alert(self, now: DateTime<Utc>) -> NewServiceAlert {
        NewServiceAlert {
            vehicle_id: self.vehicle_id,
            alert_type: self.alert_type,
            priority: self.priority,
            description: self.description,
            created_date: self.created_date.unwrap_or(now),
            due_date: self.due_date,
            is_resolved: self.is_resolved,
            resolved_date: self.resolved_date,
            resolved_by: self.resolved_by,
            resolution_notes: self.resolution_notes,
        }
    }
}
