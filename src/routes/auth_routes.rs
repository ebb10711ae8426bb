use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    FirstAdminRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest,
    UserListQuery,
};
use crate::models::auth::Subject;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

/// Rutas públicas de autenticación (sin token)
pub fn public_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/first-admin", post(first_admin))
        .route("/login", post(login))
}

/// Rutas de autenticación y gestión de usuarios que requieren token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/register", post(register))
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(deactivate_user),
        )
}

async fn first_admin(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<FirstAdminRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = AuthController::new(&state).first_admin(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthController::new(&state).login(request).await?;
    Ok(Json(response))
}

async fn profile(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Value>, AppError> {
    let response = AuthController::new(&state).profile(&subject).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = AuthController::new(&state).register(&subject, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Value>, AppError> {
    let response = AuthController::new(&state).list_users(&subject, query).await?;
    Ok(Json(response))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = AuthController::new(&state).get_user(&subject, id).await?;
    Ok(Json(response))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<Value>, AppError> {
    let response = AuthController::new(&state)
        .update_user(&subject, id, request)
        .await?;
    Ok(Json(response))
}

async fn deactivate_user(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = AuthController::new(&state).deactivate_user(&subject, id).await?;
    Ok(Json(response))
}
