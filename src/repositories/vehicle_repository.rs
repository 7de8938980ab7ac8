use async_trait::async_trait;
use sqlx::PgPool;

use super::{resolve_write_conflict, VehicleRepository};
use crate::models::{NewVehicle, Vehicle, VehicleStatus};
use crate::utils::errors::{map_constraint_error, not_found_error, AppResult};

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn vin_exists(&self, vin: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE vin = $1 AND ($2::INTEGER IS NULL OR id <> $2))"
        )
        .bind(vin)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (vin, make, model, year, mileage, status, department, date_acquired, last_service_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#
        )
        .bind(vehicle.vin)
        .bind(vehicle.make)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.mileage)
        .bind(vehicle.status)
        .bind(vehicle.department)
        .bind(vehicle.date_acquired)
        .bind(vehicle.last_service_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(vehicle)
    }

    async fn replace(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vin = $2, make = $3, model = $4, year = $5, mileage = $6, status = $7,
                department = $8, date_acquired = $9, last_service_date = $10
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(vehicle.id)
        .bind(&vehicle.vin)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.mileage)
        .bind(vehicle.status)
        .bind(&vehicle.department)
        .bind(vehicle.date_acquired)
        .bind(vehicle.last_service_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        match updated {
            Some(vehicle) => Ok(vehicle),
            None => Err(resolve_write_conflict("Vehicle", vehicle.id, self.exists(vehicle.id).await?)),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle", id));
        }

        Ok(())
    }

    async fn count(&self, status: Option<VehicleStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM vehicles WHERE ($1::vehicle_status IS NULL OR status = $1)"
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
