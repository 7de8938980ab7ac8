//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los repositorios van detrás de traits para
//! poder servir la misma API sobre PostgreSQL o sobre el almacén en memoria.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    InMemoryFleetStore, MaintenanceRepository, PgMaintenanceRepository, PgServiceAlertRepository,
    PgVehicleRepository, ServiceAlertRepository, VehicleRepository,
};
use crate::services::{DashboardService, DatabaseHealthCheck, InMemoryHealthCheck, PgDatabaseHealthCheck};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
    pub alerts: Arc<dyn ServiceAlertRepository>,
    pub health: Arc<dyn DatabaseHealthCheck>,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            config: Arc::new(config),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            maintenance: Arc::new(PgMaintenanceRepository::new(pool.clone())),
            alerts: Arc::new(PgServiceAlertRepository::new(pool.clone())),
            health: Arc::new(PgDatabaseHealthCheck::new(pool)),
        }
    }

    pub fn in_memory(store: InMemoryFleetStore, config: EnvironmentConfig) -> Self {
        Self {
            config: Arc::new(config),
            vehicles: Arc::new(store.clone()),
            maintenance: Arc::new(store.clone()),
            alerts: Arc::new(store.clone()),
            health: Arc::new(InMemoryHealthCheck::new(store)),
        }
    }

    /// Sustituye el diagnóstico de base de datos
    pub fn with_health_check(mut self, health: Arc<dyn DatabaseHealthCheck>) -> Self {
        self.health = health;
        self
    }

    pub fn dashboard_service(&self) -> DashboardService {
        DashboardService::new(
            self.vehicles.clone(),
            self.maintenance.clone(),
            self.alerts.clone(),
        )
    }
}
