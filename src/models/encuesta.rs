//! Modelos de Encuesta y RespuestaEncuesta

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

use crate::models::common::UsuarioResumen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoPregunta {
    OpcionMultiple,
    TextoLibre,
    Escala,
}

/// Pregunta de una encuesta; se guarda dentro de `encuestas.preguntas` (JSONB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pregunta {
    pub id: Uuid,
    pub texto_pregunta: String,
    pub tipo_pregunta: TipoPregunta,
    #[serde(default)]
    pub opciones: Vec<String>,
    pub escala_min: i32,
    pub escala_max: i32,
}

/// Estado de la encuesta - mapea al ENUM estado_encuesta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "estado_encuesta", rename_all = "lowercase")]
pub enum EstadoEncuesta {
    Abierta,
    Cerrada,
}

/// Encuesta - mapea a la tabla encuestas
#[derive(Debug, Clone)]
pub struct Encuesta {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: String,
    pub preguntas: Vec<Pregunta>,
    pub creado_por: Uuid,
    pub estado: EstadoEncuesta,
    pub fecha_cierre: Option<DateTime<Utc>>,
    pub anonima: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Encuesta {
    /// Una encuesta acepta respuestas mientras esté abierta y no haya
    /// pasado su fecha de cierre
    pub fn accepts_responses_at(&self, now: DateTime<Utc>) -> bool {
        self.estado == EstadoEncuesta::Abierta && self.fecha_cierre.map_or(true, |cierre| now < cierre)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespuestaPregunta {
    pub pregunta_id: Uuid,
    pub respuesta: serde_json::Value,
}

/// RespuestaEncuesta - única por (encuesta, usuario)
#[derive(Debug, Clone)]
pub struct RespuestaEncuesta {
    pub id: Uuid,
    pub encuesta_id: Uuid,
    pub usuario_id: Uuid,
    pub respuestas: Vec<RespuestaPregunta>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncuestaResponse {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: String,
    pub preguntas: Vec<Pregunta>,
    pub creado_por: Option<UsuarioResumen>,
    pub estado: EstadoEncuesta,
    pub fecha_cierre: Option<DateTime<Utc>>,
    pub anonima: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ya_respondio: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EncuestaResponse {
    pub fn new(
        encuesta: Encuesta,
        creado_por: Option<UsuarioResumen>,
        ya_respondio: Option<bool>,
    ) -> Self {
        Self {
            id: encuesta.id,
            titulo: encuesta.titulo,
            descripcion: encuesta.descripcion,
            preguntas: encuesta.preguntas,
            creado_por,
            estado: encuesta.estado,
            fecha_cierre: encuesta.fecha_cierre,
            anonima: encuesta.anonima,
            ya_respondio,
            created_at: encuesta.created_at,
            updated_at: encuesta.updated_at,
        }
    }
}

/// Respuesta individual con el usuario expandido (solo encuestas no anónimas)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespuestaDetallada {
    pub id: Uuid,
    pub usuario: Option<UsuarioResumen>,
    pub respuestas: Vec<RespuestaPregunta>,
    pub created_at: DateTime<Utc>,
}
