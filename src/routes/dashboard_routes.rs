use axum::{extract::State, routing::get, Json, Router};

use crate::models::DashboardStats;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/stats", get(get_stats))
}

async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let stats = state.dashboard_service().stats().await?;
    Ok(Json(stats))
}
