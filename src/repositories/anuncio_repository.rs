use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::anuncio::{Anuncio, TipoAnuncio},
    utils::errors::AppResult,
};

#[async_trait]
pub trait AnuncioRepository: Send + Sync {
    async fn create(&self, anuncio: Anuncio) -> AppResult<Anuncio>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Anuncio>>;
    /// Anuncios activos, del más reciente al más antiguo
    async fn list_activos(&self, tipo: Option<TipoAnuncio>) -> AppResult<Vec<Anuncio>>;
    async fn update(&self, anuncio: Anuncio) -> AppResult<Anuncio>;
}

pub struct PgAnuncioRepository {
    pool: PgPool,
}

impl PgAnuncioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnuncioRepository for PgAnuncioRepository {
    async fn create(&self, anuncio: Anuncio) -> AppResult<Anuncio> {
        let anuncio = sqlx::query_as::<_, Anuncio>(
            r#"
            INSERT INTO anuncios (id, titulo, descripcion, tipo, prioridad, creado_por, estado, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(anuncio.id)
        .bind(&anuncio.titulo)
        .bind(&anuncio.descripcion)
        .bind(anuncio.tipo)
        .bind(anuncio.prioridad)
        .bind(anuncio.creado_por)
        .bind(anuncio.estado)
        .bind(anuncio.created_at)
        .bind(anuncio.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(anuncio)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Anuncio>> {
        let anuncio = sqlx::query_as::<_, Anuncio>("SELECT * FROM anuncios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(anuncio)
    }

    async fn list_activos(&self, tipo: Option<TipoAnuncio>) -> AppResult<Vec<Anuncio>> {
        let anuncios = sqlx::query_as::<_, Anuncio>(
            r#"
            SELECT * FROM anuncios
            WHERE estado = 'activo' AND ($1::tipo_anuncio IS NULL OR tipo = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(tipo)
        .fetch_all(&self.pool)
        .await?;

        Ok(anuncios)
    }

    async fn update(&self, anuncio: Anuncio) -> AppResult<Anuncio> {
        let anuncio = sqlx::query_as::<_, Anuncio>(
            r#"
            UPDATE anuncios
            SET titulo = $2, descripcion = $3, tipo = $4, prioridad = $5, estado = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(anuncio.id)
        .bind(&anuncio.titulo)
        .bind(&anuncio.descripcion)
        .bind(anuncio.tipo)
        .bind(anuncio.prioridad)
        .bind(anuncio.estado)
        .fetch_one(&self.pool)
        .await?;

        Ok(anuncio)
    }
}
