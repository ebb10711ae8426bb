use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    models::{
        common::HoraDelDia,
        visitante::{EstadoVisita, Vehiculo, Visitante},
    },
    utils::errors::AppResult,
};

#[async_trait]
pub trait VisitanteRepository: Send + Sync {
    async fn create(&self, visitante: Visitante) -> AppResult<Visitante>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Visitante>>;
    /// Ordenados por fecha de visita descendente
    async fn list(&self, estado: Option<EstadoVisita>) -> AppResult<Vec<Visitante>>;
    async fn list_by_usuario(&self, usuario_id: Uuid) -> AppResult<Vec<Visitante>>;
    async fn update(&self, visitante: Visitante) -> AppResult<Visitante>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

// Fila de la tabla visitantes, con el vehículo en JSONB
#[derive(Debug, sqlx::FromRow)]
struct VisitanteRow {
    id: Uuid,
    solicitado_por: Uuid,
    nombre_visitante: String,
    fecha_visita: NaiveDate,
    hora_llegada: HoraDelDia,
    vehiculo: Json<Vehiculo>,
    estado: EstadoVisita,
    notas: String,
    hora_entrada: Option<DateTime<Utc>>,
    hora_salida: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VisitanteRow> for Visitante {
    fn from(row: VisitanteRow) -> Self {
        Self {
            id: row.id,
            solicitado_por: row.solicitado_por,
            nombre_visitante: row.nombre_visitante,
            fecha_visita: row.fecha_visita,
            hora_llegada: row.hora_llegada,
            vehiculo: row.vehiculo.0,
            estado: row.estado,
            notas: row.notas,
            hora_entrada: row.hora_entrada,
            hora_salida: row.hora_salida,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgVisitanteRepository {
    pool: PgPool,
}

impl PgVisitanteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitanteRepository for PgVisitanteRepository {
    async fn create(&self, visitante: Visitante) -> AppResult<Visitante> {
        let row = sqlx::query_as::<_, VisitanteRow>(
            r#"
            INSERT INTO visitantes (id, solicitado_por, nombre_visitante, fecha_visita, hora_llegada, vehiculo,
                                    estado, notas, hora_entrada, hora_salida, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(visitante.id)
        .bind(visitante.solicitado_por)
        .bind(&visitante.nombre_visitante)
        .bind(visitante.fecha_visita)
        .bind(visitante.hora_llegada)
        .bind(Json(&visitante.vehiculo))
        .bind(visitante.estado)
        .bind(&visitante.notas)
        .bind(visitante.hora_entrada)
        .bind(visitante.hora_salida)
        .bind(visitante.created_at)
        .bind(visitante.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Visitante>> {
        let row = sqlx::query_as::<_, VisitanteRow>("SELECT * FROM visitantes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Visitante::from))
    }

    async fn list(&self, estado: Option<EstadoVisita>) -> AppResult<Vec<Visitante>> {
        let rows = sqlx::query_as::<_, VisitanteRow>(
            r#"
            SELECT * FROM visitantes
            WHERE ($1::estado_visita IS NULL OR estado = $1)
            ORDER BY fecha_visita DESC, hora_llegada DESC
            "#,
        )
        .bind(estado)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Visitante::from).collect())
    }

    async fn list_by_usuario(&self, usuario_id: Uuid) -> AppResult<Vec<Visitante>> {
        let rows = sqlx::query_as::<_, VisitanteRow>(
            "SELECT * FROM visitantes WHERE solicitado_por = $1 ORDER BY fecha_visita DESC, hora_llegada DESC",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Visitante::from).collect())
    }

    async fn update(&self, visitante: Visitante) -> AppResult<Visitante> {
        let row = sqlx::query_as::<_, VisitanteRow>(
            r#"
            UPDATE visitantes
            SET nombre_visitante = $2, fecha_visita = $3, hora_llegada = $4, vehiculo = $5, estado = $6,
                notas = $7, hora_entrada = $8, hora_salida = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(visitante.id)
        .bind(&visitante.nombre_visitante)
        .bind(visitante.fecha_visita)
        .bind(visitante.hora_llegada)
        .bind(Json(&visitante.vehiculo))
        .bind(visitante.estado)
        .bind(&visitante.notas)
        .bind(visitante.hora_entrada)
        .bind(visitante.hora_salida)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM visitantes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
