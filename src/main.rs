use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_management::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use fleet_management::database::{seed, DatabaseConnection};
use fleet_management::repositories::InMemoryFleetStore;
use fleet_management::routes::create_router;
use fleet_management::state::AppState;

const DEFAULT_LOG_FILTER: &str = "info,tower_http=warn,sqlx=warn";

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("🚚 Fleet Management API");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    info!(
        "Entorno: {} | almacenamiento: {}",
        config.environment,
        config.storage_backend.as_str()
    );

    let app_state = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let db_connection = match DatabaseConnection::new(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            AppState::postgres(db_connection.pool().clone(), config.clone())
        }
        StorageBackend::Memory => {
            warn!("⚠️ Usando almacenamiento en memoria, los datos se pierden al reiniciar");
            AppState::in_memory(InMemoryFleetStore::new(), config.clone())
        }
    };

    if config.seed_database {
        let seeded = seed::seed_if_empty(
            app_state.vehicles.as_ref(),
            app_state.maintenance.as_ref(),
            app_state.alerts.as_ref(),
        )
        .await;
        if let Err(e) = seeded {
            error!("❌ Error cargando datos de ejemplo: {}", e);
            return Err(anyhow::anyhow!("Error de seed: {}", e));
        }
    }

    let app = create_router(app_state);
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    if config.is_development() {
        info!("🔍 Endpoints disponibles:");
        info!("   GET|POST /api/vehicles, GET|PUT|DELETE /api/vehicles/:id");
        info!("   GET|POST /api/maintenance, GET|PUT|DELETE /api/maintenance/:id");
        info!("   GET  /api/maintenance/vehicle/:vehicle_id");
        info!("   GET|POST /api/alerts, GET|PUT|DELETE /api/alerts/:id");
        info!("   GET  /api/alerts/vehicle/:vehicle_id");
        info!("   GET  /api/dashboard/stats");
        info!("   GET  /api/admin/database-health");
        info!("   GET  /api/health");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
