//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

/// Backend de almacenamiento de los repositorios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(anyhow!("unknown STORAGE_BACKEND '{}'", other)),
        }
    }
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub storage_backend: StorageBackend,
    pub seed_database: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            storage_backend: StorageBackend::Postgres,
            seed_database: true,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de una función de lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{}'", value))?,
            None => defaults.port,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.storage_backend,
        };

        let seed_database = match lookup("SEED_DATABASE") {
            Some(value) => parse_bool(&value)
                .with_context(|| format!("SEED_DATABASE must be true or false, got '{}'", value))?,
            None => defaults.seed_database,
        };

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: lookup("HOST").unwrap_or(defaults.host),
            cors_origins,
            storage_backend,
            seed_database,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("invalid boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<EnvironmentConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage_backend, StorageBackend::Postgres);
        assert!(config.seed_database);
        assert!(config.cors_origins.is_empty());
        assert!(config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("CORS_ORIGINS", "http://localhost:5173, https://fleet.example.com,"),
            ("STORAGE_BACKEND", "memory"),
            ("SEED_DATABASE", "false"),
        ])
        .unwrap();

        assert_eq!(config.environment, "production");
        assert!(!config.is_development());
        assert_eq!(config.server_url(), "127.0.0.1:8080");
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173".to_string(), "https://fleet.example.com".to_string()]
        );
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert!(!config.seed_database);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "sqlite")]).is_err());
        assert!(config_from(&[("SEED_DATABASE", "maybe")]).is_err());
    }
}
