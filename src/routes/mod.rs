//! Rutas HTTP
//! 
//! Cada recurso expone su propio `Router<AppState>`; `create_router` los
//! monta bajo `/api` y añade CORS, compresión y logging de peticiones.

pub mod admin_routes;
pub mod alert_routes;
pub mod dashboard_routes;
pub mod maintenance_routes;
pub mod vehicle_routes;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    middleware, Json, Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::warn;

use crate::middleware::{cors::cors_layer, request_logging::log_requests};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/maintenance", maintenance_routes::create_maintenance_router())
        .nest("/api/alerts", alert_routes::create_alert_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .merge(admin_routes::create_admin_router())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Un body JSON mal formado o con tipos inválidos es un 400
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(AppError::BadRequest(rejection.body_text()))
        }
    }
}

/// Un id de path que no es un entero válido también es un 400 con cuerpo JSON
pub(crate) fn path_id(id: Result<Path<i32>, PathRejection>) -> AppResult<i32> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            warn!("Rejected path parameter: {}", rejection.body_text());
            Err(AppError::BadRequest(rejection.body_text()))
        }
    }
}
