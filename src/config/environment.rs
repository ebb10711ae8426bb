//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{bail, Context, Result};
use std::env;

use crate::config::database::DatabaseConfig;

/// Validez fija de los tokens: 7 días
pub const DEFAULT_JWT_EXPIRATION: u64 = 7 * 24 * 60 * 60;

const DEFAULT_BCRYPT_COST: u32 = 10;
const DEVELOPMENT_JWT_SECRET: &str = "changeme";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub database: Option<DatabaseConfig>,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let is_production = environment == "production";

        let port = match env::var("PORT") {
            Ok(value) => value.parse().context("PORT must be a valid number")?,
            Err(_) => 3000,
        };

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if is_production => bail!("JWT_SECRET must be set in production"),
            _ => {
                tracing::warn!("⚠️ JWT_SECRET no definido, usando secreto de desarrollo");
                DEVELOPMENT_JWT_SECRET.to_string()
            }
        };

        let jwt_expiration = match env::var("JWT_EXPIRATION") {
            Ok(value) => value
                .parse()
                .context("JWT_EXPIRATION must be a valid number")?,
            Err(_) => DEFAULT_JWT_EXPIRATION,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(value) => value.parse().context("BCRYPT_COST must be a valid number")?,
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let database = DatabaseConfig::from_env()?;
        if database.is_none() && is_production {
            bail!("DATABASE_URL must be set in production");
        }

        Ok(Self {
            environment,
            port,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret,
            jwt_expiration,
            bcrypt_cost,
            cors_origins,
            database,
        })
    }

    /// Configuración para tests y ejecución local en memoria
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: DEFAULT_JWT_EXPIRATION,
            bcrypt_cost: 4,
            cors_origins: Vec::new(),
            database: None,
        }
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Único test que toca el entorno del proceso
    #[test]
    fn test_production_requires_database_url() {
        env::set_var("ENVIRONMENT", "production");
        env::set_var("JWT_SECRET", "secreto-de-produccion");
        env::remove_var("DATABASE_URL");

        let error = EnvironmentConfig::from_env().unwrap_err();
        assert!(error.to_string().contains("DATABASE_URL"));

        env::remove_var("ENVIRONMENT");
        env::remove_var("JWT_SECRET");
    }
}
