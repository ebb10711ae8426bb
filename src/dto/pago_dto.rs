use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::pago::{ConceptoPago, EstadoPago};
use crate::utils::validation::deserialize_optional_datetime;

// Request para registrar un pago (solo admin)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePagoRequest {
    pub usuario: Uuid,
    pub concepto: ConceptoPago,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_monto")]
    pub monto: Decimal,
    #[serde(default)]
    pub mes: Option<String>,
    pub fecha_vencimiento: NaiveDate,
    #[serde(default)]
    pub notas: Option<String>,
}

// Request para actualizar un pago
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePagoRequest {
    pub concepto: Option<ConceptoPago>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_monto")]
    pub monto: Option<Decimal>,
    pub mes: Option<String>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub estado: Option<EstadoPago>,
    pub metodo_pago: Option<String>,
    pub notas: Option<String>,
}

// Request para marcar un pago como pagado
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarcarPagadoRequest {
    pub metodo_pago: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub fecha_pago: Option<DateTime<Utc>>,
}

// Filtros de los listados
#[derive(Debug, Default, Deserialize)]
pub struct PagoFilters {
    pub estado: Option<EstadoPago>,
    pub concepto: Option<ConceptoPago>,
}

fn validate_monto(monto: &Decimal) -> Result<(), ValidationError> {
    if *monto <= Decimal::ZERO {
        let mut error = ValidationError::new("monto_no_positivo");
        error.message = Some("El monto debe ser mayor a cero".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_monto_must_be_positive() {
        let request: CreatePagoRequest = serde_json::from_value(json!({
            "usuario": Uuid::new_v4(),
            "concepto": "Mantenimiento",
            "monto": 0,
            "fechaVencimiento": "2024-06-10"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_marcar_pagado_accepts_plain_date() {
        let request: MarcarPagadoRequest =
            serde_json::from_value(json!({ "fechaPago": "2024-06-05" })).unwrap();
        assert_eq!(
            request.fecha_pago.unwrap().to_rfc3339(),
            "2024-06-05T00:00:00+00:00"
        );

        let empty: MarcarPagadoRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.fecha_pago.is_none());
    }
}
