//! Tipos compartidos entre modelos

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::models::auth::Role;
use crate::utils::validation::parse_time;

/// Hora del día con formato `HH:MM` en la API
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct HoraDelDia(pub NaiveTime);

impl HoraDelDia {
    pub fn hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(HoraDelDia)
    }
}

impl std::fmt::Display for HoraDelDia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for HoraDelDia {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HoraDelDia {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw)
            .map(HoraDelDia)
            .map_err(serde::de::Error::custom)
    }
}

/// Resumen de usuario que reemplaza las referencias en las respuestas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UsuarioResumen {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub unidad: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hora_del_dia_json() {
        let hora: HoraDelDia = serde_json::from_str("\"14:00\"").unwrap();
        assert_eq!(hora, HoraDelDia::hm(14, 0).unwrap());
        assert_eq!(serde_json::to_string(&hora).unwrap(), "\"14:00\"");
        assert!(serde_json::from_str::<HoraDelDia>("\"14h\"").is_err());
    }

    #[test]
    fn test_hora_del_dia_ordering() {
        assert!(HoraDelDia::hm(9, 59).unwrap() < HoraDelDia::hm(10, 0).unwrap());
    }
}
