use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::controllers::ServiceAlertController;
use crate::models::{ServiceAlert, ServiceAlertRequest};
use crate::routes::{json_body, path_id};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_alert_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alerts).post(create_alert))
        .route("/:id", get(get_alert).put(update_alert).delete(delete_alert))
        .route("/vehicle/:vehicle_id", get(list_alerts_by_vehicle))
}

async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<ServiceAlert>>, AppError> {
    let controller = ServiceAlertController::new(state.alerts.clone());
    Ok(Json(controller.list().await?))
}

async fn get_alert(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ServiceAlert>, AppError> {
    let id = path_id(id)?;
    let controller = ServiceAlertController::new(state.alerts.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_alerts_by_vehicle(
    State(state): State<AppState>,
    vehicle_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<ServiceAlert>>, AppError> {
    let vehicle_id = path_id(vehicle_id)?;
    let controller = ServiceAlertController::new(state.alerts.clone());
    Ok(Json(controller.list_by_vehicle(vehicle_id).await?))
}

async fn create_alert(
    State(state): State<AppState>,
    payload: Result<Json<ServiceAlertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    let controller = ServiceAlertController::new(state.alerts.clone());
    let alert = controller.create(request).await?;

    let location = format!("/api/alerts/{}", alert.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(alert)))
}

async fn update_alert(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ServiceAlertRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(id)?;
    let request = json_body(payload)?;
    let controller = ServiceAlertController::new(state.alerts.clone());
    controller.update(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_alert(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(id)?;
    let controller = ServiceAlertController::new(state.alerts.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
