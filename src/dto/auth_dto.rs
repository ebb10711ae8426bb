use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{auth::Role, user::UserResponse};
use crate::utils::validation::validate_not_blank;

// Request para crear el primer administrador
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FirstAdminRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[serde(default)]
    pub unidad: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

// Request de registro de usuario (solo admin)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub unidad: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "validate_not_blank")]
    pub email: String,
    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

// Request para actualizar un usuario; `role` y `activo` solo aplican para admin
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub unidad: Option<String>,
    pub role: Option<Role>,
    pub activo: Option<bool>,
}

// Query del listado de usuarios
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    #[serde(default)]
    pub incluir_inactivos: bool,
}

// Response de login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "email": "no-es-email",
            "password": "123"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = serde_json::from_value::<RegisterRequest>(serde_json::json!({
            "name": "Ana",
            "email": "ana@condo.mx",
            "password": "secreto1",
            "role": "root"
        }));
        assert!(result.is_err());
    }
}
