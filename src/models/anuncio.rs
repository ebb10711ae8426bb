//! Modelo de Anuncio

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::common::UsuarioResumen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "tipo_anuncio")]
pub enum TipoAnuncio {
    Anuncio,
    Reporte,
}

impl Default for TipoAnuncio {
    fn default() -> Self {
        TipoAnuncio::Anuncio
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "prioridad_anuncio")]
pub enum Prioridad {
    Baja,
    Media,
    Alta,
}

impl Default for Prioridad {
    fn default() -> Self {
        Prioridad::Media
    }
}

/// Ciclo de vida de la publicación; los archivados no aparecen en listados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "estado_anuncio", rename_all = "lowercase")]
pub enum EstadoAnuncio {
    Activo,
    Archivado,
}

impl EstadoAnuncio {
    pub fn from_activo(activo: bool) -> Self {
        if activo {
            EstadoAnuncio::Activo
        } else {
            EstadoAnuncio::Archivado
        }
    }
}

/// Anuncio - mapea a la tabla anuncios
#[derive(Debug, Clone, FromRow)]
pub struct Anuncio {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: String,
    pub tipo: TipoAnuncio,
    pub prioridad: Prioridad,
    pub creado_por: Uuid,
    pub estado: EstadoAnuncio,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnuncioResponse {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: String,
    pub tipo: TipoAnuncio,
    pub prioridad: Prioridad,
    pub creado_por: Option<UsuarioResumen>,
    pub estado: EstadoAnuncio,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AnuncioResponse {
    pub fn new(anuncio: Anuncio, creado_por: Option<UsuarioResumen>) -> Self {
        Self {
            id: anuncio.id,
            titulo: anuncio.titulo,
            descripcion: anuncio.descripcion,
            tipo: anuncio.tipo,
            prioridad: anuncio.prioridad,
            creado_por,
            estado: anuncio.estado,
            created_at: anuncio.created_at,
            updated_at: anuncio.updated_at,
        }
    }
}
