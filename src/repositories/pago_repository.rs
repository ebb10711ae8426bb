use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dto::pago_dto::PagoFilters,
    models::pago::{EstadoPago, Pago},
    utils::errors::AppResult,
};

#[async_trait]
pub trait PagoRepository: Send + Sync {
    async fn create(&self, pago: Pago) -> AppResult<Pago>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Pago>>;
    /// Ordenados por fecha de vencimiento, el más próximo primero
    async fn list(&self, filters: &PagoFilters) -> AppResult<Vec<Pago>>;
    async fn list_by_usuario(
        &self,
        usuario_id: Uuid,
        estado: Option<EstadoPago>,
    ) -> AppResult<Vec<Pago>>;
    async fn update(&self, pago: Pago) -> AppResult<Pago>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

pub struct PgPagoRepository {
    pool: PgPool,
}

impl PgPagoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PagoRepository for PgPagoRepository {
    async fn create(&self, pago: Pago) -> AppResult<Pago> {
        let pago = sqlx::query_as::<_, Pago>(
            r#"
            INSERT INTO pagos (id, usuario_id, concepto, monto, mes, fecha_vencimiento, fecha_pago, estado,
                               metodo_pago, notas, registrado_por, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(pago.id)
        .bind(pago.usuario_id)
        .bind(pago.concepto)
        .bind(pago.monto)
        .bind(&pago.mes)
        .bind(pago.fecha_vencimiento)
        .bind(pago.fecha_pago)
        .bind(pago.estado)
        .bind(&pago.metodo_pago)
        .bind(&pago.notas)
        .bind(pago.registrado_por)
        .bind(pago.created_at)
        .bind(pago.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(pago)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Pago>> {
        let pago = sqlx::query_as::<_, Pago>("SELECT * FROM pagos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(pago)
    }

    async fn list(&self, filters: &PagoFilters) -> AppResult<Vec<Pago>> {
        let pagos = sqlx::query_as::<_, Pago>(
            r#"
            SELECT * FROM pagos
            WHERE ($1::estado_pago IS NULL OR estado = $1)
              AND ($2::concepto_pago IS NULL OR concepto = $2)
            ORDER BY fecha_vencimiento ASC
            "#,
        )
        .bind(filters.estado)
        .bind(filters.concepto)
        .fetch_all(&self.pool)
        .await?;

        Ok(pagos)
    }

    async fn list_by_usuario(
        &self,
        usuario_id: Uuid,
        estado: Option<EstadoPago>,
    ) -> AppResult<Vec<Pago>> {
        let pagos = sqlx::query_as::<_, Pago>(
            r#"
            SELECT * FROM pagos
            WHERE usuario_id = $1 AND ($2::estado_pago IS NULL OR estado = $2)
            ORDER BY fecha_vencimiento ASC
            "#,
        )
        .bind(usuario_id)
        .bind(estado)
        .fetch_all(&self.pool)
        .await?;

        Ok(pagos)
    }

    async fn update(&self, pago: Pago) -> AppResult<Pago> {
        let pago = sqlx::query_as::<_, Pago>(
            r#"
            UPDATE pagos
            SET concepto = $2, monto = $3, mes = $4, fecha_vencimiento = $5, fecha_pago = $6,
                estado = $7, metodo_pago = $8, notas = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(pago.id)
        .bind(pago.concepto)
        .bind(pago.monto)
        .bind(&pago.mes)
        .bind(pago.fecha_vencimiento)
        .bind(pago.fecha_pago)
        .bind(pago.estado)
        .bind(&pago.metodo_pago)
        .bind(&pago.notas)
        .fetch_one(&self.pool)
        .await?;

        Ok(pago)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM pagos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
