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

use crate::controllers::VehicleController;
use crate::models::{Vehicle, VehicleRequest};
use crate::routes::{json_body, path_id};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    Ok(Json(controller.list().await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vehicle>, AppError> {
    let id = path_id(id)?;
    let controller = VehicleController::new(state.vehicles.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    let controller = VehicleController::new(state.vehicles.clone());
    let vehicle = controller.create(request).await?;

    let location = format!("/api/vehicles/{}", vehicle.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(id)?;
    let request = json_body(payload)?;
    let controller = VehicleController::new(state.vehicles.clone());
    controller.update(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(id)?;
    let controller = VehicleController::new(state.vehicles.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
