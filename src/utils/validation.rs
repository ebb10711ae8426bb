//! Utilidades de validación
//!
//! Este módulo contiene el extractor `ValidatedJson` y funciones helper
//! para validación de datos y conversión de tipos.

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::utils::errors::AppError;

/// Cuerpo JSON deserializado y validado con `validator`.
///
/// Los errores de formato (campos faltantes, enums desconocidos, JSON
/// malformado) se reportan como 400 en lugar del 422 por defecto de axum.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Cuerpo JSON opcional: vacío equivale a `T::default()`, malformado es 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrDefault<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrDefault<T>
where
    T: DeserializeOwned + Validate + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        parse_optional_body(&bytes).map(JsonOrDefault)
    }
}

fn parse_optional_body<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let value: T = serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("JSON inválido: {}", e)))?;
    value.validate()?;
    Ok(value)
}

/// Validar que un string no esté vacío (ignorando espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("El campo no puede estar vacío".into());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Fecha inválida '{}', se espera YYYY-MM-DD", value))
}

/// Validar y convertir string a hora del día (`HH:MM` o `HH:MM:SS`)
pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| format!("Hora inválida '{}', se espera HH:MM", value))
}

/// Validar y convertir string a datetime. Acepta RFC3339 o una fecha
/// `YYYY-MM-DD`, que se interpreta como medianoche UTC.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value.trim()) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = parse_date(value)
        .map_err(|_| format!("Fecha inválida '{}', se espera RFC3339 o YYYY-MM-DD", value))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Deserializador para campos `Option<DateTime<Utc>>` en requests
pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) if !value.trim().is_empty() => parse_datetime(&value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Normaliza un email para búsquedas y unicidad
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("hola").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-06-01").is_ok());
        assert!(parse_date("2024/06/01").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("14:00").unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("07:30:15").unwrap(),
            NaiveTime::from_hms_opt(7, 30, 15).unwrap()
        );
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("dos de la tarde").is_err());
    }

    #[test]
    fn test_parse_datetime_accepts_plain_dates() {
        let dt = parse_datetime("2024-06-15").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-15T00:00:00+00:00");

        let dt = parse_datetime("2024-06-15T10:30:00-06:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-15T16:30:00+00:00");

        assert!(parse_datetime("mañana").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Condo.MX "), "ana@condo.mx");
    }

    #[test]
    fn test_optional_body_empty_is_default() {
        use crate::dto::pago_dto::MarcarPagadoRequest;

        let request: MarcarPagadoRequest = parse_optional_body(b"").unwrap();
        assert!(request.fecha_pago.is_none());
        let request: MarcarPagadoRequest = parse_optional_body(b"  \n").unwrap();
        assert!(request.metodo_pago.is_none());
    }

    #[test]
    fn test_optional_body_malformed_is_bad_request() {
        use crate::dto::pago_dto::MarcarPagadoRequest;

        let result = parse_optional_body::<MarcarPagadoRequest>(br#"{"fechaPago":"no-es-fecha"}"#);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        let result = parse_optional_body::<MarcarPagadoRequest>(b"{roto");
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let request: MarcarPagadoRequest =
            parse_optional_body(br#"{"fechaPago":"2027-03-15","metodoPago":"Efectivo"}"#).unwrap();
        assert_eq!(request.metodo_pago.as_deref(), Some("Efectivo"));
        assert!(request.fecha_pago.is_some());
    }
}
