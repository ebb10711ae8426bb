//! Conexión a PostgreSQL
//!
//! Abre el pool a partir de `DatabaseConfig` y aplica las migraciones de
//! `migrations/` antes de servir peticiones.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("🗄️ Conectando a PostgreSQL: {}", config.masked_url());

        let pool = config
            .create_pool()
            .await
            .context("No se pudo conectar a la base de datos")?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .context("La base de datos no responde")?;

        Ok(Self { pool })
    }

    /// Ejecutar migraciones pendientes
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Error aplicando migraciones")?;
        info!("✅ Migraciones aplicadas");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
