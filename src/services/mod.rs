//! Services module
//! 
//! Este módulo contiene la lógica de negocio que combina varios repositorios:
//! el resumen del dashboard y el diagnóstico de base de datos.

pub mod dashboard_service;
pub mod health_service;

pub use dashboard_service::DashboardService;
pub use health_service::{DatabaseHealthCheck, InMemoryHealthCheck, PgDatabaseHealthCheck};
