use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{resolve_write_conflict, MaintenanceRepository};
use crate::models::{MaintenanceRecord, NewMaintenanceRecord};
use crate::utils::errors::{map_constraint_error, not_found_error, AppResult};

pub struct PgMaintenanceRepository {
    pool: PgPool,
}

impl PgMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<MaintenanceRecord>> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records ORDER BY service_date DESC, id DESC LIMIT $1"
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<MaintenanceRecord>> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_by_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<MaintenanceRecord>> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE vehicle_id = $1 ORDER BY service_date DESC, id DESC"
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM maintenance_records WHERE id = $1)"
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn create(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (
                vehicle_id, service_date, service_type, performed_by, cost,
                mileage_at_service, notes, parts_replaced, is_warranty_covered, created_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#
        )
        .bind(record.vehicle_id)
        .bind(record.service_date)
        .bind(record.service_type)
        .bind(record.performed_by)
        .bind(record.cost)
        .bind(record.mileage_at_service)
        .bind(record.notes)
        .bind(record.parts_replaced)
        .bind(record.is_warranty_covered)
        .bind(record.created_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(record)
    }

    async fn replace(&self, record: &MaintenanceRecord) -> AppResult<MaintenanceRecord> {
        let updated = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET vehicle_id = $2, service_date = $3, service_type = $4, performed_by = $5, cost = $6,
                mileage_at_service = $7, notes = $8, parts_replaced = $9, is_warranty_covered = $10,
                created_date = $11
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(record.service_date)
        .bind(&record.service_type)
        .bind(&record.performed_by)
        .bind(record.cost)
        .bind(record.mileage_at_service)
        .bind(&record.notes)
        .bind(&record.parts_replaced)
        .bind(record.is_warranty_covered)
        .bind(record.created_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        match updated {
            Some(record) => Ok(record),
            None => Err(resolve_write_conflict(
                "Maintenance record",
                record.id,
                self.exists(record.id).await?,
            )),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Maintenance record", id));
        }

        Ok(())
    }

    async fn total_cost_since(&self, since: DateTime<Utc>) -> AppResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(cost), 0) FROM maintenance_records WHERE service_date >= $1"
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}
