use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::models::{
    common::HoraDelDia,
    visitante::{EstadoVisita, Vehiculo},
};
use crate::utils::validation::validate_not_blank;

// Request para registrar un visitante
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitanteRequest {
    #[validate(custom = "validate_not_blank")]
    pub nombre_visitante: String,
    pub fecha_visita: NaiveDate,
    pub hora_llegada: HoraDelDia,
    #[serde(default)]
    pub vehiculo: Option<Vehiculo>,
    #[serde(default)]
    pub notas: Option<String>,
}

// Request para actualizar un visitante
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVisitanteRequest {
    #[validate(custom = "validate_not_blank")]
    pub nombre_visitante: Option<String>,
    pub fecha_visita: Option<NaiveDate>,
    pub hora_llegada: Option<HoraDelDia>,
    pub vehiculo: Option<Vehiculo>,
    pub estado: Option<EstadoVisita>,
    pub notas: Option<String>,
}

// Filtros del listado de administración
#[derive(Debug, Default, Deserialize)]
pub struct VisitanteFilters {
    pub estado: Option<EstadoVisita>,
}
