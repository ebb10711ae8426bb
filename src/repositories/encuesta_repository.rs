//! Repositorio de encuestas y sus respuestas
//!
//! La unicidad de (encuesta, usuario) la garantiza el índice único de
//! `respuestas_encuesta`; una segunda respuesta devuelve `Conflict`.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    models::encuesta::{Encuesta, EstadoEncuesta, Pregunta, RespuestaEncuesta, RespuestaPregunta},
    utils::errors::{map_unique_violation, AppResult},
};

pub const RESPUESTA_DUPLICADA: &str = "Ya has respondido esta encuesta";

#[async_trait]
pub trait EncuestaRepository: Send + Sync {
    async fn create(&self, encuesta: Encuesta) -> AppResult<Encuesta>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Encuesta>>;
    /// Del más reciente al más antiguo; `solo_abiertas` excluye las cerradas
    async fn list(&self, solo_abiertas: bool) -> AppResult<Vec<Encuesta>>;
    async fn update_estado(&self, id: Uuid, estado: EstadoEncuesta) -> AppResult<Option<Encuesta>>;
    /// Borra la encuesta junto con sus respuestas
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn create_respuesta(&self, respuesta: RespuestaEncuesta) -> AppResult<RespuestaEncuesta>;
    async fn ya_respondio(&self, encuesta_id: Uuid, usuario_id: Uuid) -> AppResult<bool>;
    /// Ids de las encuestas que respondió el usuario
    async fn respondidas_por(&self, usuario_id: Uuid) -> AppResult<HashSet<Uuid>>;
    /// Respuestas de una encuesta en orden de llegada
    async fn respuestas_de(&self, encuesta_id: Uuid) -> AppResult<Vec<RespuestaEncuesta>>;
}

#[derive(Debug, sqlx::FromRow)]
struct EncuestaRow {
    id: Uuid,
    titulo: String,
    descripcion: String,
    preguntas: Json<Vec<Pregunta>>,
    creado_por: Uuid,
    estado: EstadoEncuesta,
    fecha_cierre: Option<DateTime<Utc>>,
    anonima: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EncuestaRow> for Encuesta {
    fn from(row: EncuestaRow) -> Self {
        Self {
            id: row.id,
            titulo: row.titulo,
            descripcion: row.descripcion,
            preguntas: row.preguntas.0,
            creado_por: row.creado_por,
            estado: row.estado,
            fecha_cierre: row.fecha_cierre,
            anonima: row.anonima,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RespuestaRow {
    id: Uuid,
    encuesta_id: Uuid,
    usuario_id: Uuid,
    respuestas: Json<Vec<RespuestaPregunta>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RespuestaRow> for RespuestaEncuesta {
    fn from(row: RespuestaRow) -> Self {
        Self {
            id: row.id,
            encuesta_id: row.encuesta_id,
            usuario_id: row.usuario_id,
            respuestas: row.respuestas.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgEncuestaRepository {
    pool: PgPool,
}

impl PgEncuestaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EncuestaRepository for PgEncuestaRepository {
    async fn create(&self, encuesta: Encuesta) -> AppResult<Encuesta> {
        let row = sqlx::query_as::<_, EncuestaRow>(
            r#"
            INSERT INTO encuestas (id, titulo, descripcion, preguntas, creado_por, estado, fecha_cierre, anonima, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(encuesta.id)
        .bind(&encuesta.titulo)
        .bind(&encuesta.descripcion)
        .bind(Json(&encuesta.preguntas))
        .bind(encuesta.creado_por)
        .bind(encuesta.estado)
        .bind(encuesta.fecha_cierre)
        .bind(encuesta.anonima)
        .bind(encuesta.created_at)
        .bind(encuesta.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Encuesta>> {
        let row = sqlx::query_as::<_, EncuestaRow>("SELECT * FROM encuestas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Encuesta::from))
    }

    async fn list(&self, solo_abiertas: bool) -> AppResult<Vec<Encuesta>> {
        let rows = sqlx::query_as::<_, EncuestaRow>(
            "SELECT * FROM encuestas WHERE (NOT $1 OR estado = 'abierta') ORDER BY created_at DESC",
        )
        .bind(solo_abiertas)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Encuesta::from).collect())
    }

    async fn update_estado(&self, id: Uuid, estado: EstadoEncuesta) -> AppResult<Option<Encuesta>> {
        let row = sqlx::query_as::<_, EncuestaRow>(
            "UPDATE encuestas SET estado = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Encuesta::from))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM respuestas_encuesta WHERE encuesta_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM encuestas WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_respuesta(&self, respuesta: RespuestaEncuesta) -> AppResult<RespuestaEncuesta> {
        let row = sqlx::query_as::<_, RespuestaRow>(
            r#"
            INSERT INTO respuestas_encuesta (id, encuesta_id, usuario_id, respuestas, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(respuesta.id)
        .bind(respuesta.encuesta_id)
        .bind(respuesta.usuario_id)
        .bind(Json(&respuesta.respuestas))
        .bind(respuesta.created_at)
        .bind(respuesta.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, RESPUESTA_DUPLICADA))?;

        Ok(row.into())
    }

    async fn ya_respondio(&self, encuesta_id: Uuid, usuario_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM respuestas_encuesta WHERE encuesta_id = $1 AND usuario_id = $2)",
        )
        .bind(encuesta_id)
        .bind(usuario_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn respondidas_por(&self, usuario_id: Uuid) -> AppResult<HashSet<Uuid>> {
        let ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT encuesta_id FROM respuestas_encuesta WHERE usuario_id = $1")
                .bind(usuario_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids.into_iter().collect())
    }

    async fn respuestas_de(&self, encuesta_id: Uuid) -> AppResult<Vec<RespuestaEncuesta>> {
        let rows = sqlx::query_as::<_, RespuestaRow>(
            "SELECT * FROM respuestas_encuesta WHERE encuesta_id = $1 ORDER BY created_at ASC",
        )
        .bind(encuesta_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RespuestaEncuesta::from).collect())
    }
}
