//! Diagnóstico de base de datos
//! 
//! Ejecuta tres consultas fijas de introspección (operaciones en curso,
//! tamaño de la base de datos y conexiones activas) y devuelve sus filas
//! indexadas por nombre. Cualquier fallo de conexión se devuelve como
//! `AppError::StorageUnavailable`.

use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::time::Instant;
use tracing::{info, warn};

use crate::models::{
    DiagnosticQuery, DiagnosticReport, ACTIVE_CONNECTIONS, CURRENTLY_EXECUTING, DATABASE_SIZE,
};
use crate::repositories::{InMemoryFleetStore, MaintenanceRepository, ServiceAlertRepository, VehicleRepository};
use crate::utils::errors::{AppError, AppResult};

pub const DIAGNOSTIC_QUERIES: [DiagnosticQuery; 3] = [
    DiagnosticQuery {
        name: CURRENTLY_EXECUTING,
        sql: "SELECT pid AS session_id, state AS status, left(query, 200) AS command \
              FROM pg_stat_activity WHERE state = 'active' AND backend_type = 'client backend'",
    },
    DiagnosticQuery {
        name: DATABASE_SIZE,
        sql: "SELECT datname AS db_name, pg_database_size(datname) / 1024 / 1024 AS size_mb \
              FROM pg_database WHERE NOT datistemplate",
    },
    DiagnosticQuery {
        name: ACTIVE_CONNECTIONS,
        sql: "SELECT datname AS db_name, COUNT(*) AS connections \
              FROM pg_stat_activity WHERE datname IS NOT NULL GROUP BY datname",
    },
];

#[async_trait]
pub trait DatabaseHealthCheck: Send + Sync {
    async fn run(&self) -> AppResult<DiagnosticReport>;
}

pub struct PgDatabaseHealthCheck {
    pool: PgPool,
}

impl PgDatabaseHealthCheck {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_queries(&self) -> Result<DiagnosticReport, sqlx::Error> {
        let mut connection = self.pool.acquire().await?;
        let mut report = DiagnosticReport::new();

        for query in DIAGNOSTIC_QUERIES {
            info!("Running diagnostic query: {}", query.name);
            let sql = format!("SELECT row_to_json(q) FROM ({}) q", query.sql);
            let rows: Vec<Value> = sqlx::query_scalar(&sql)
                .fetch_all(&mut *connection)
                .await?;
            report.insert(query.name.to_string(), rows);
        }

        Ok(report)
    }
}

#[async_trait]
impl DatabaseHealthCheck for PgDatabaseHealthCheck {
    async fn run(&self) -> AppResult<DiagnosticReport> {
        let started = Instant::now();
        info!("Starting database health check...");

        let report = self.run_queries().await.map_err(|e| {
            warn!("Database health check failed after {} ms", started.elapsed().as_millis());
            AppError::StorageUnavailable(e.to_string())
        })?;

        info!("Database health check completed in {} ms", started.elapsed().as_millis());
        Ok(report)
    }
}

/// Diagnóstico equivalente para el backend en memoria
pub struct InMemoryHealthCheck {
    store: InMemoryFleetStore,
}

impl InMemoryHealthCheck {
    pub fn new(store: InMemoryFleetStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DatabaseHealthCheck for InMemoryHealthCheck {
    async fn run(&self) -> AppResult<DiagnosticReport> {
        info!("Starting in-memory health check...");

        let vehicles = VehicleRepository::count(&self.store, None).await?;
        let maintenance = MaintenanceRepository::list_recent(&self.store, i64::MAX).await?.len();
        let alerts = ServiceAlertRepository::list(&self.store).await?.len();

        let mut report = DiagnosticReport::new();
        report.insert(CURRENTLY_EXECUTING.to_string(), Vec::new());
        report.insert(
            DATABASE_SIZE.to_string(),
            vec![json!({
                "db_name": "memory",
                "vehicles": vehicles,
                "maintenance_records": maintenance,
                "service_alerts": alerts,
            })],
        );
        report.insert(
            ACTIVE_CONNECTIONS.to_string(),
            vec![json!({ "db_name": "memory", "connections": 1 })],
        );
        Ok(report)
    }
}
