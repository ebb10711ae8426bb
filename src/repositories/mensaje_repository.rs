//! Repositorio de mensajes
//!
//! Las conversaciones siempre son entre un residente y la administración;
//! los mensajes de residentes van a la bandeja común (`para IS NULL`).

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{models::mensaje::Mensaje, utils::errors::AppResult};

#[async_trait]
pub trait MensajeRepository: Send + Sync {
    async fn create(&self, mensaje: Mensaje) -> AppResult<Mensaje>;
    /// Mensajes del admin al residente y del residente a la bandeja, del más antiguo al más reciente
    async fn conversacion_admin(&self, admin_id: Uuid, usuario_id: Uuid) -> AppResult<Vec<Mensaje>>;
    /// Mensajes del residente a la bandeja y los dirigidos a él
    async fn conversacion_residente(&self, usuario_id: Uuid) -> AppResult<Vec<Mensaje>>;
    /// Marca como leídos los mensajes no leídos de un residente a la bandeja
    async fn marcar_leidos_de(&self, usuario_id: Uuid) -> AppResult<u64>;
    /// Marca como leídos los mensajes no leídos dirigidos a un usuario
    async fn marcar_leidos_para(&self, usuario_id: Uuid) -> AppResult<u64>;
    async fn contar_no_leidos_bandeja(&self) -> AppResult<u64>;
    async fn contar_no_leidos_para(&self, usuario_id: Uuid) -> AppResult<u64>;
    /// Mensajes de la bandeja de administración, del más antiguo al más reciente
    async fn list_admin_facing(&self) -> AppResult<Vec<Mensaje>>;
}

pub struct PgMensajeRepository {
    pool: PgPool,
}

impl PgMensajeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MensajeRepository for PgMensajeRepository {
    async fn create(&self, mensaje: Mensaje) -> AppResult<Mensaje> {
        let mensaje = sqlx::query_as::<_, Mensaje>(
            r#"
            INSERT INTO mensajes (id, de, para, mensaje, leido, es_del_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(mensaje.id)
        .bind(mensaje.de)
        .bind(mensaje.para)
        .bind(&mensaje.mensaje)
        .bind(mensaje.leido)
        .bind(mensaje.es_del_admin)
        .bind(mensaje.created_at)
        .bind(mensaje.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(mensaje)
    }

    async fn conversacion_admin(&self, admin_id: Uuid, usuario_id: Uuid) -> AppResult<Vec<Mensaje>> {
        let mensajes = sqlx::query_as::<_, Mensaje>(
            r#"
            SELECT * FROM mensajes
            WHERE (de = $1 AND para = $2) OR (de = $2 AND para IS NULL)
            ORDER BY created_at ASC
            "#,
        )
        .bind(admin_id)
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(mensajes)
    }

    async fn conversacion_residente(&self, usuario_id: Uuid) -> AppResult<Vec<Mensaje>> {
        let mensajes = sqlx::query_as::<_, Mensaje>(
            r#"
            SELECT * FROM mensajes
            WHERE (de = $1 AND para IS NULL) OR para = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(mensajes)
    }

    async fn marcar_leidos_de(&self, usuario_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE mensajes SET leido = TRUE, updated_at = NOW() WHERE de = $1 AND para IS NULL AND NOT leido",
        )
        .bind(usuario_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn marcar_leidos_para(&self, usuario_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE mensajes SET leido = TRUE, updated_at = NOW() WHERE para = $1 AND NOT leido",
        )
        .bind(usuario_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn contar_no_leidos_bandeja(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM mensajes WHERE para IS NULL AND NOT es_del_admin AND NOT leido",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count as u64)
    }

    async fn contar_no_leidos_para(&self, usuario_id: Uuid) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM mensajes WHERE para = $1 AND NOT leido")
                .bind(usuario_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count as u64)
    }

    async fn list_admin_facing(&self) -> AppResult<Vec<Mensaje>> {
        let mensajes = sqlx::query_as::<_, Mensaje>(
            "SELECT * FROM mensajes WHERE para IS NULL OR es_del_admin ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(mensajes)
    }
}
