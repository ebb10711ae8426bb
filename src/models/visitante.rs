//! Modelo de Visitante
//!
//! Solicitud de acceso de un visitante. `hora_entrada` y `hora_salida` solo
//! se llenan por acción del administrador en la caseta.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

use crate::models::common::{HoraDelDia, UsuarioResumen};

/// Estado de la visita - mapea al ENUM estado_visita
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "estado_visita")]
pub enum EstadoVisita {
    Pendiente,
    Aprobada,
    Rechazada,
    Finalizada,
}

/// Datos del vehículo del visitante (JSONB)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehiculo {
    pub placas: String,
    pub marca: String,
    pub color: String,
}

impl Vehiculo {
    pub fn normalized(self) -> Self {
        Self {
            placas: self.placas.trim().to_string(),
            marca: self.marca.trim().to_string(),
            color: self.color.trim().to_string(),
        }
    }
}

/// Visitante - mapea a la tabla visitantes
#[derive(Debug, Clone)]
pub struct Visitante {
    pub id: Uuid,
    pub solicitado_por: Uuid,
    pub nombre_visitante: String,
    pub fecha_visita: NaiveDate,
    pub hora_llegada: HoraDelDia,
    pub vehiculo: Vehiculo,
    pub estado: EstadoVisita,
    pub notas: String,
    pub hora_entrada: Option<DateTime<Utc>>,
    pub hora_salida: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Visitante {
    pub fn registrar_entrada(&mut self) {
        self.estado = EstadoVisita::Aprobada;
        self.hora_entrada = Some(Utc::now());
    }

    pub fn registrar_salida(&mut self) {
        self.estado = EstadoVisita::Finalizada;
        self.hora_salida = Some(Utc::now());
    }
}

/// Response de visitante con solicitante expandido
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitanteResponse {
    pub id: Uuid,
    pub solicitado_por: Option<UsuarioResumen>,
    pub nombre_visitante: String,
    pub fecha_visita: NaiveDate,
    pub hora_llegada: HoraDelDia,
    pub vehiculo: Vehiculo,
    pub estado: EstadoVisita,
    pub notas: String,
    pub hora_entrada: Option<DateTime<Utc>>,
    pub hora_salida: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VisitanteResponse {
    pub fn new(visitante: Visitante, solicitado_por: Option<UsuarioResumen>) -> Self {
        Self {
            id: visitante.id,
            solicitado_por,
            nombre_visitante: visitante.nombre_visitante,
            fecha_visita: visitante.fecha_visita,
            hora_llegada: visitante.hora_llegada,
            vehiculo: visitante.vehiculo,
            estado: visitante.estado,
            notas: visitante.notas,
            hora_entrada: visitante.hora_entrada,
            hora_salida: visitante.hora_salida,
            created_at: visitante.created_at,
            updated_at: visitante.updated_at,
        }
    }
}
