use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dto::reservacion_dto::ReservacionFilters,
    models::reservacion::{AreaComun, Reservacion},
    utils::errors::AppResult,
};

#[async_trait]
pub trait ReservacionRepository: Send + Sync {
    async fn create(&self, reservacion: Reservacion) -> AppResult<Reservacion>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservacion>>;
    /// Ordenadas por fecha descendente
    async fn list(&self, filters: &ReservacionFilters) -> AppResult<Vec<Reservacion>>;
    async fn list_by_usuario(&self, usuario_id: Uuid) -> AppResult<Vec<Reservacion>>;
    /// Reservaciones no canceladas de un área en una fecha
    async fn find_active_for_slot(
        &self,
        area: AreaComun,
        fecha: NaiveDate,
    ) -> AppResult<Vec<Reservacion>>;
    async fn update(&self, reservacion: Reservacion) -> AppResult<Reservacion>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

pub struct PgReservacionRepository {
    pool: PgPool,
}

impl PgReservacionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservacionRepository for PgReservacionRepository {
    async fn create(&self, reservacion: Reservacion) -> AppResult<Reservacion> {
        let reservacion = sqlx::query_as::<_, Reservacion>(
            r#"
            INSERT INTO reservaciones (id, usuario_id, area, fecha, hora_inicio, hora_fin, estado, notas, costo, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(reservacion.id)
        .bind(reservacion.usuario_id)
        .bind(reservacion.area)
        .bind(reservacion.fecha)
        .bind(reservacion.hora_inicio)
        .bind(reservacion.hora_fin)
        .bind(reservacion.estado)
        .bind(&reservacion.notas)
        .bind(reservacion.costo)
        .bind(reservacion.created_at)
        .bind(reservacion.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(reservacion)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservacion>> {
        let reservacion =
            sqlx::query_as::<_, Reservacion>("SELECT * FROM reservaciones WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(reservacion)
    }

    async fn list(&self, filters: &ReservacionFilters) -> AppResult<Vec<Reservacion>> {
        let reservaciones = sqlx::query_as::<_, Reservacion>(
            r#"
            SELECT * FROM reservaciones
            WHERE ($1::area_comun IS NULL OR area = $1)
              AND ($2::estado_reservacion IS NULL OR estado = $2)
            ORDER BY fecha DESC, hora_inicio DESC
            "#,
        )
        .bind(filters.area)
        .bind(filters.estado)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservaciones)
    }

    async fn list_by_usuario(&self, usuario_id: Uuid) -> AppResult<Vec<Reservacion>> {
        let reservaciones = sqlx::query_as::<_, Reservacion>(
            "SELECT * FROM reservaciones WHERE usuario_id = $1 ORDER BY fecha DESC, hora_inicio DESC",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservaciones)
    }

    async fn find_active_for_slot(
        &self,
        area: AreaComun,
        fecha: NaiveDate,
    ) -> AppResult<Vec<Reservacion>> {
        let reservaciones = sqlx::query_as::<_, Reservacion>(
            r#"
            SELECT * FROM reservaciones
            WHERE area = $1 AND fecha = $2 AND estado <> 'Cancelada'
            ORDER BY hora_inicio
            "#,
        )
        .bind(area)
        .bind(fecha)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservaciones)
    }

    async fn update(&self, reservacion: Reservacion) -> AppResult<Reservacion> {
        let reservacion = sqlx::query_as::<_, Reservacion>(
            r#"
            UPDATE reservaciones
            SET area = $2, fecha = $3, hora_inicio = $4, hora_fin = $5, estado = $6, notas = $7, costo = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(reservacion.id)
        .bind(reservacion.area)
        .bind(reservacion.fecha)
        .bind(reservacion.hora_inicio)
        .bind(reservacion.hora_fin)
        .bind(reservacion.estado)
        .bind(&reservacion.notas)
        .bind(reservacion.costo)
        .fetch_one(&self.pool)
        .await?;

        Ok(reservacion)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reservaciones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
