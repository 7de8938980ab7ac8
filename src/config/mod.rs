//! Configuración del proyecto
//! 
//! Este módulo contiene la configuración de base de datos y variables de entorno.
//! Se construye una sola vez al arrancar y se pasa explícitamente a quien la necesite.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::*;
