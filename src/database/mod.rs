//! Módulo de base de datos
//! 
//! Maneja la conexión con PostgreSQL y la carga de datos de ejemplo.

pub mod connection;
pub mod seed;

pub use connection::DatabaseConnection;
