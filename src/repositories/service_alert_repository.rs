use async_trait::async_trait;
use sqlx::PgPool;

use super::{resolve_write_conflict, ServiceAlertRepository};
use crate::models::{AlertPriority, NewServiceAlert, ServiceAlert};
use crate::utils::errors::{map_constraint_error, not_found_error, AppResult};

pub struct PgServiceAlertRepository {
    pool: PgPool,
}

impl PgServiceAlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceAlertRepository for PgServiceAlertRepository {
    async fn list(&self) -> AppResult<Vec<ServiceAlert>> {
        let alerts = sqlx::query_as::<_, ServiceAlert>(
            "SELECT * FROM service_alerts ORDER BY is_resolved ASC, created_date DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(alerts)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceAlert>> {
        let alert = sqlx::query_as::<_, ServiceAlert>("SELECT * FROM service_alerts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(alert)
    }

    async fn list_by_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<ServiceAlert>> {
        let alerts = sqlx::query_as::<_, ServiceAlert>(
            "SELECT * FROM service_alerts WHERE vehicle_id = $1 ORDER BY created_date DESC, id DESC"
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(alerts)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM service_alerts WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn create(&self, alert: NewServiceAlert) -> AppResult<ServiceAlert> {
        let alert = sqlx::query_as::<_, ServiceAlert>(
            r#"
            INSERT INTO service_alerts (
                vehicle_id, alert_type, priority, description, created_date, due_date,
                is_resolved, resolved_date, resolved_by, resolution_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#
        )
        .bind(alert.vehicle_id)
        .bind(alert.alert_type)
        .bind(alert.priority)
        .bind(alert.description)
        .bind(alert.created_date)
        .bind(alert.due_date)
        .bind(alert.is_resolved)
        .bind(alert.resolved_date)
        .bind(alert.resolved_by)
        .bind(alert.resolution_notes)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(alert)
    }

    async fn replace(&self, alert: &ServiceAlert) -> AppResult<ServiceAlert> {
        let updated = sqlx::query_as::<_, ServiceAlert>(
            r#"
            UPDATE service_alerts
            SET vehicle_id = $2, alert_type = $3, priority = $4, description = $5, created_date = $6,
                due_date = $7, is_resolved = $8, resolved_date = $9, resolved_by = $10,
                resolution_notes = $11
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(alert.id)
        .bind(alert.vehicle_id)
        .bind(&alert.alert_type)
        .bind(alert.priority)
        .bind(&alert.description)
        .bind(alert.created_date)
        .bind(alert.due_date)
        .bind(alert.is_resolved)
        .bind(alert.resolved_date)
        .bind(&alert.resolved_by)
        .bind(&alert.resolution_notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        match updated {
            Some(alert) => Ok(alert),
            None => Err(resolve_write_conflict(
                "Service alert",
                alert.id,
                self.exists(alert.id).await?,
            )),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM service_alerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Service alert", id));
        }

        Ok(())
    }

    async fn count_unresolved(&self, priority: Option<AlertPriority>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM service_alerts WHERE NOT is_resolved AND ($1::alert_priority IS NULL OR priority = $1)"
        )
        .bind(priority)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
