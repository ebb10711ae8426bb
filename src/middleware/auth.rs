//! Middleware de autenticación JWT
//!
//! Este módulo maneja la extracción del token Bearer y la inyección del
//! `Subject` autenticado en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError},
        jwt::{extract_token_from_header, subject_from_token},
    },
};

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let subject = subject_from_token(token, &state.jwt)?;

    // Un usuario desactivado pierde el acceso aunque su token siga vigente
    if let Some(user) = state.repos.users.find_by_id(subject.id()).await? {
        if !user.is_active() {
            return Err(forbidden_error("Usuario desactivado. Contacte al administrador"));
        }
    }

    tracing::debug!(user_id = %subject.id(), role = subject.role().as_str(), "🔐 Sujeto autenticado");

    request.extensions_mut().insert(subject);

    Ok(next.run(request).await)
}
