//! Modelo de Reservacion
//!
//! Reservación de un área común para una fecha y un intervalo `[inicio, fin)`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::common::{HoraDelDia, UsuarioResumen};

/// Áreas comunes reservables - mapea al ENUM area_comun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "area_comun")]
pub enum AreaComun {
    #[serde(rename = "Salón de fiestas")]
    #[sqlx(rename = "Salón de fiestas")]
    SalonDeFiestas,
    Alberca,
    Gym,
    Cancha,
    Terraza,
    #[serde(rename = "BBQ")]
    #[sqlx(rename = "BBQ")]
    Bbq,
    Otro,
}

/// Estado de la reservación - mapea al ENUM estado_reservacion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "estado_reservacion")]
pub enum EstadoReservacion {
    Pendiente,
    Confirmada,
    Cancelada,
}

/// Reservacion - mapea a la tabla reservaciones
#[derive(Debug, Clone, FromRow)]
pub struct Reservacion {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub area: AreaComun,
    pub fecha: NaiveDate,
    pub hora_inicio: HoraDelDia,
    pub hora_fin: HoraDelDia,
    pub estado: EstadoReservacion,
    pub notas: String,
    pub costo: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservacion {
    pub fn is_cancelled(&self) -> bool {
        self.estado == EstadoReservacion::Cancelada
    }
}

/// Response de reservación con el usuario expandido
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservacionResponse {
    pub id: Uuid,
    pub usuario: Option<UsuarioResumen>,
    pub area: AreaComun,
    pub fecha: NaiveDate,
    pub hora_inicio: HoraDelDia,
    pub hora_fin: HoraDelDia,
    pub estado: EstadoReservacion,
    pub notas: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub costo: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReservacionResponse {
    pub fn new(reservacion: Reservacion, usuario: Option<UsuarioResumen>) -> Self {
        Self {
            id: reservacion.id,
            usuario,
            area: reservacion.area,
            fecha: reservacion.fecha,
            hora_inicio: reservacion.hora_inicio,
            hora_fin: reservacion.hora_fin,
            estado: reservacion.estado,
            notas: reservacion.notas,
            costo: reservacion.costo,
            created_at: reservacion.created_at,
            updated_at: reservacion.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_names_match_api() {
        assert_eq!(
            serde_json::to_string(&AreaComun::SalonDeFiestas).unwrap(),
            "\"Salón de fiestas\""
        );
        assert_eq!(serde_json::to_string(&AreaComun::Bbq).unwrap(), "\"BBQ\"");
        let area: AreaComun = serde_json::from_str("\"Alberca\"").unwrap();
        assert_eq!(area, AreaComun::Alberca);
        assert!(serde_json::from_str::<AreaComun>("\"Sauna\"").is_err());
    }
}
