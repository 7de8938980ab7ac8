//! Fleet management API
//! 
//! Vehículos, mantenimientos y alertas de servicio sobre PostgreSQL o un
//! almacén en memoria, con un dashboard agregado y diagnóstico de base de datos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
