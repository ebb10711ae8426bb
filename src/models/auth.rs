//! Identidad del sujeto autenticado
//!
//! Roles del sistema, claims del JWT y el `Subject` que se inyecta en cada
//! request protegida.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "rol_usuario", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Usuario,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Usuario => "usuario",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Usuario
    }
}

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// Actor autenticado de la request.
///
/// Las reglas de acceso se deciden sobre la variante, nunca sobre strings
/// de rol sueltos en los handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Admin { id: Uuid },
    Residente { id: Uuid },
}

impl Subject {
    pub fn new(id: Uuid, role: Role) -> Self {
        match role {
            Role::Admin => Subject::Admin { id },
            Role::Usuario => Subject::Residente { id },
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Subject::Admin { id } | Subject::Residente { id } => *id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Subject::Admin { .. } => Role::Admin,
            Subject::Residente { .. } => Role::Usuario,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Subject::Admin { .. })
    }
}
