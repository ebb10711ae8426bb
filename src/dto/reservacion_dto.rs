use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::{
    common::HoraDelDia,
    reservacion::{AreaComun, EstadoReservacion},
};

// Request para crear una reservación
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_interval", skip_on_field_errors = false))]
pub struct CreateReservacionRequest {
    pub area: AreaComun,
    pub fecha: NaiveDate,
    pub hora_inicio: HoraDelDia,
    pub hora_fin: HoraDelDia,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub costo: Option<Decimal>,
}

// Request para actualizar una reservación
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservacionRequest {
    pub area: Option<AreaComun>,
    pub fecha: Option<NaiveDate>,
    pub hora_inicio: Option<HoraDelDia>,
    pub hora_fin: Option<HoraDelDia>,
    pub estado: Option<EstadoReservacion>,
    pub notas: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub costo: Option<Decimal>,
}

impl UpdateReservacionRequest {
    /// Un residente solo puede cancelar: ningún otro campo presente
    pub fn is_cancellation_only(&self) -> bool {
        self.estado == Some(EstadoReservacion::Cancelada)
            && self.area.is_none()
            && self.fecha.is_none()
            && self.hora_inicio.is_none()
            && self.hora_fin.is_none()
            && self.notas.is_none()
            && self.costo.is_none()
    }
}

// Filtros del listado de administración
#[derive(Debug, Default, Deserialize)]
pub struct ReservacionFilters {
    pub area: Option<AreaComun>,
    pub estado: Option<EstadoReservacion>,
}

fn validate_create_interval(request: &CreateReservacionRequest) -> Result<(), ValidationError> {
    validate_interval(request.hora_inicio, request.hora_fin)?;
    if request.costo.is_some_and(|c| c.is_sign_negative()) {
        return Err(ValidationError::new("costo_negativo"));
    }
    Ok(())
}

/// `horaInicio` debe ser anterior a `horaFin`
pub fn validate_interval(inicio: HoraDelDia, fin: HoraDelDia) -> Result<(), ValidationError> {
    if inicio >= fin {
        let mut error = ValidationError::new("intervalo_invalido");
        error.message = Some("La hora de inicio debe ser anterior a la hora de fin".into());
        return Err(error);
    }
    Ok(())
}
