//! Controlador de autenticación y usuarios
//!
//! Bootstrap del primer administrador, login, perfil y administración de
//! cuentas. Las cuentas nunca se borran; se desactivan.

use bcrypt::{hash, verify};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    dto::auth_dto::{
        FirstAdminRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest,
        UserListQuery,
    },
    models::{
        auth::{Role, Subject},
        user::{EstadoCuenta, User, UserResponse},
    },
    repositories::Repositories,
    services::authorization_service::{require_admin, require_owner_or_admin},
    state::AppState,
    utils::{
        errors::{bad_request_error, forbidden_error, not_found_error, AppError, AppResult},
        jwt::{generate_token, JwtConfig},
        validation::normalize_email,
    },
};

const CREDENCIALES_INVALIDAS: &str = "Email o contraseña inválidos";

pub struct AuthController {
    repos: Repositories,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            jwt: state.jwt.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))
    }

    /// Crear el primer administrador; solo funciona mientras no exista ninguno
    pub async fn first_admin(&self, request: FirstAdminRequest) -> AppResult<Value> {
        if self.repos.users.admin_exists().await? {
            return Err(bad_request_error("Ya existe un administrador"));
        }

        let password_hash = self.hash_password(&request.password)?;
        let admin = User::new(
            request.name.trim().to_string(),
            normalize_email(&request.email),
            password_hash,
            Role::Admin,
            request.unidad.unwrap_or_default().trim().to_string(),
            request.telefono.unwrap_or_default().trim().to_string(),
        );

        let admin = self.repos.users.create(admin).await?;
        tracing::info!(user_id = %admin.id, "👑 Primer administrador creado");

        Ok(json!({
            "message": "Administrador creado correctamente",
            "admin": UserResponse::from(admin),
        }))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let email = normalize_email(&request.email);
        let user = self
            .repos
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()))?;

        if !user.is_active() {
            tracing::info!(user_id = %user.id, "🚫 Login de cuenta desactivada");
            return Err(forbidden_error("Usuario desactivado. Contacte al administrador"));
        }

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()));
        }

        let token = generate_token(user.id, user.role, &self.jwt)?;
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "✅ Login exitoso");

        Ok(LoginResponse {
            token,
            user: UserResponse::from(user),
        })
    }

    pub async fn profile(&self, subject: &Subject) -> AppResult<Value> {
        let user = self
            .repos
            .users
            .find_by_id(subject.id())
            .await?
            .ok_or_else(|| not_found_error("Usuario"))?;

        Ok(json!({ "user": UserResponse::from(user) }))
    }

    /// Alta de usuario por un administrador
    pub async fn register(&self, subject: &Subject, request: RegisterRequest) -> AppResult<Value> {
        require_admin(subject)?;

        let password_hash = self.hash_password(&request.password)?;
        let user = User::new(
            request.name.trim().to_string(),
            normalize_email(&request.email),
            password_hash,
            request.role.unwrap_or_default(),
            request.unidad.unwrap_or_default().trim().to_string(),
            request.telefono.unwrap_or_default().trim().to_string(),
        );

        let user = self.repos.users.create(user).await?;
        tracing::info!(user_id = %user.id, created_by = %subject.id(), "👤 Usuario creado");

        Ok(json!({
            "message": "Usuario creado exitosamente",
            "user": UserResponse::from(user),
        }))
    }

    pub async fn list_users(&self, subject: &Subject, query: UserListQuery) -> AppResult<Value> {
        require_admin(subject)?;

        let users: Vec<UserResponse> = self
            .repos
            .users
            .list(query.incluir_inactivos)
            .await?
            .into_iter()
            .map(UserResponse::from)
            .collect();

        Ok(json!({ "users": users }))
    }

    /// Los usuarios desactivados siguen siendo consultables por id
    pub async fn get_user(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_owner_or_admin(subject, id, "No tienes permisos para ver este usuario")?;

        let user = self
            .repos
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario"))?;

        Ok(json!({ "user": UserResponse::from(user) }))
    }

    pub async fn update_user(
        &self,
        subject: &Subject,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> AppResult<Value> {
        require_owner_or_admin(subject, id, "No tienes permisos para actualizar este usuario")?;

        let mut user = self
            .repos
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario"))?;

        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = request.email {
            user.email = normalize_email(&email);
        }
        if let Some(telefono) = request.telefono {
            user.telefono = telefono.trim().to_string();
        }
        if let Some(unidad) = request.unidad {
            user.unidad = unidad.trim().to_string();
        }

        // Rol y estado de la cuenta solo los cambia un admin
        if subject.is_admin() {
            if let Some(role) = request.role {
                user.role = role;
            }
            if let Some(activo) = request.activo {
                user.estado = EstadoCuenta::from_activo(activo);
            }
        }

        let user = self.repos.users.update(user).await?;

        Ok(json!({
            "message": "Usuario actualizado",
            "user": UserResponse::from(user),
        }))
    }

    pub async fn deactivate_user(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        let mut user = self
            .repos
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario"))?;

        user.estado = EstadoCuenta::Inactivo;
        let user = self.repos.users.update(user).await?;
        tracing::info!(user_id = %user.id, "🔒 Usuario desactivado");

        Ok(json!({
            "message": "Usuario desactivado",
            "user": UserResponse::from(user),
        }))
    }
}
