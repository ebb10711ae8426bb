//! Modelo de User
//!
//! Cuenta de residente o administrador. Las cuentas no se borran: la baja
//! es un cambio de `EstadoCuenta`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::{auth::Role, common::UsuarioResumen};

/// Ciclo de vida de la cuenta - mapea al ENUM estado_cuenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "estado_cuenta", rename_all = "lowercase")]
pub enum EstadoCuenta {
    Activo,
    Inactivo,
}

impl EstadoCuenta {
    pub fn from_activo(activo: bool) -> Self {
        if activo {
            EstadoCuenta::Activo
        } else {
            EstadoCuenta::Inactivo
        }
    }
}

/// User - mapea a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub unidad: String,
    pub telefono: String,
    pub estado: EstadoCuenta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        role: Role,
        unidad: String,
        telefono: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            unidad,
            telefono,
            estado: EstadoCuenta::Activo,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.estado == EstadoCuenta::Activo
    }

    pub fn summary(&self) -> UsuarioResumen {
        UsuarioResumen {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            unidad: self.unidad.clone(),
            role: self.role,
        }
    }
}

/// Response de usuario para la API (sin credencial)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub unidad: String,
    pub telefono: String,
    pub estado: EstadoCuenta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            unidad: user.unidad,
            telefono: user.telefono,
            estado: user.estado,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_hides_password_hash() {
        let user = User::new(
            "Ana".into(),
            "ana@condo.mx".into(),
            "$2b$10$secreto".into(),
            Role::Usuario,
            "A-101".into(),
            String::new(),
        );
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("secreto"));
        assert_eq!(json["estado"], "activo");
        assert_eq!(json["unidad"], "A-101");
    }
}
