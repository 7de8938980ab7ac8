//! Resultado del diagnóstico de base de datos

use serde_json::Value;
use std::collections::BTreeMap;

/// Filas de cada consulta de diagnóstico, indexadas por nombre de consulta
pub type DiagnosticReport = BTreeMap<String, Vec<Value>>;

/// Consulta de introspección con nombre fijo
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticQuery {
    pub name: &'static str,
    pub sql: &'static str,
}

pub const CURRENTLY_EXECUTING: &str = "CurrentlyExecuting";
pub const DATABASE_SIZE: &str = "DatabaseSize";
pub const ACTIVE_CONNECTIONS: &str = "ActiveConnections";
