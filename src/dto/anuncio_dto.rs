use serde::Deserialize;
use validator::Validate;

use crate::models::anuncio::{Prioridad, TipoAnuncio};
use crate::utils::validation::validate_not_blank;

// Request para crear un anuncio
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnuncioRequest {
    #[validate(custom = "validate_not_blank")]
    pub titulo: String,
    #[validate(custom = "validate_not_blank")]
    pub descripcion: String,
    #[serde(default)]
    pub tipo: TipoAnuncio,
    #[serde(default)]
    pub prioridad: Prioridad,
}

// Request para actualizar un anuncio
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnuncioRequest {
    #[validate(custom = "validate_not_blank")]
    pub titulo: Option<String>,
    #[validate(custom = "validate_not_blank")]
    pub descripcion: Option<String>,
    pub tipo: Option<TipoAnuncio>,
    pub prioridad: Option<Prioridad>,
    pub activo: Option<bool>,
}

// Filtros del listado
#[derive(Debug, Default, Deserialize)]
pub struct AnuncioFilters {
    pub tipo: Option<TipoAnuncio>,
}
