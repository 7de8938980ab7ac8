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

use crate::controllers::MaintenanceController;
use crate::models::{MaintenanceRecord, MaintenanceRecordRequest};
use crate::routes::{json_body, path_id};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route("/:id", get(get_record).put(update_record).delete(delete_record))
        .route("/vehicle/:vehicle_id", get(list_records_by_vehicle))
}

async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceRecord>>, AppError> {
    let controller = MaintenanceController::new(state.maintenance.clone());
    Ok(Json(controller.list().await?))
}

async fn get_record(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MaintenanceRecord>, AppError> {
    let id = path_id(id)?;
    let controller = MaintenanceController::new(state.maintenance.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_records_by_vehicle(
    State(state): State<AppState>,
    vehicle_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<MaintenanceRecord>>, AppError> {
    let vehicle_id = path_id(vehicle_id)?;
    let controller = MaintenanceController::new(state.maintenance.clone());
    Ok(Json(controller.list_by_vehicle(vehicle_id).await?))
}

async fn create_record(
    State(state): State<AppState>,
    payload: Result<Json<MaintenanceRecordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    let controller = MaintenanceController::new(state.maintenance.clone());
    let record = controller.create(request).await?;

    let location = format!("/api/maintenance/{}", record.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(record)))
}

async fn update_record(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MaintenanceRecordRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(id)?;
    let request = json_body(payload)?;
    let controller = MaintenanceController::new(state.maintenance.clone());
    controller.update(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_record(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(id)?;
    let controller = MaintenanceController::new(state.maintenance.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
