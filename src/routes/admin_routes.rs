//! Endpoints operativos: diagnóstico de la base de datos y liveness

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::models::DiagnosticReport;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/database-health", get(database_health))
        .route("/api/health", get(health))
}

async fn database_health(State(state): State<AppState>) -> Result<Json<DiagnosticReport>, AppError> {
    Ok(Json(state.health.run().await?))
}

/// Endpoint de liveness, no toca la base de datos
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-management",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "storage": state.config.storage_backend.as_str(),
    }))
}
