//! Modelo de Mensaje
//!
//! `para = None` significa que el mensaje va dirigido a la bandeja común de
//! administración.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::common::UsuarioResumen;

/// Mensaje - mapea a la tabla mensajes
#[derive(Debug, Clone, FromRow)]
pub struct Mensaje {
    pub id: Uuid,
    pub de: Uuid,
    pub para: Option<Uuid>,
    pub mensaje: String,
    pub leido: bool,
    pub es_del_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mensaje {
    pub fn new(de: Uuid, para: Option<Uuid>, mensaje: String, es_del_admin: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            de,
            para,
            mensaje,
            leido: false,
            es_del_admin,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mensajes que forman parte de la bandeja de administración
    pub fn is_admin_facing(&self) -> bool {
        self.para.is_none() || self.es_del_admin
    }

    /// Residente con quien se lleva la conversación
    pub fn counterpart(&self) -> Uuid {
        self.para.unwrap_or(self.de)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MensajeResponse {
    pub id: Uuid,
    pub de: Option<UsuarioResumen>,
    pub para: Option<UsuarioResumen>,
    pub mensaje: String,
    pub leido: bool,
    pub es_del_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl MensajeResponse {
    pub fn new(
        mensaje: Mensaje,
        de: Option<UsuarioResumen>,
        para: Option<UsuarioResumen>,
    ) -> Self {
        Self {
            id: mensaje.id,
            de,
            para,
            mensaje: mensaje.mensaje,
            leido: mensaje.leido,
            es_del_admin: mensaje.es_del_admin,
            created_at: mensaje.created_at,
        }
    }
}

/// Resumen de una conversación en la bandeja del administrador
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversacionResumen {
    pub usuario: Option<UsuarioResumen>,
    pub ultimo_mensaje: String,
    pub ultima_fecha: DateTime<Utc>,
    pub no_leidos: u64,
}
