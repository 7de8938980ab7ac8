//! Configuración de conexión a PostgreSQL
//! 
//! Este módulo abre el pool de conexiones y aplica las migraciones embebidas.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Conexión a la base de datos ya migrada
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar y ejecutar las migraciones pendientes
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Conectando a PostgreSQL en {}", mask_database_url(&config.url));

        let pool = config
            .create_pool()
            .await
            .context("Error creating PostgreSQL pool")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Error running database migrations")?;

        info!("Migraciones aplicadas");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|pos| pos + 3).unwrap_or(0);
    if scheme_end > at_pos {
        return url.to_string();
    }
    format!("{}***:***@{}", &url[..scheme_end], &url[at_pos + 1..])
}
