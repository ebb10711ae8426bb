use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::Value;

use crate::controllers::mensaje_controller::MensajeController;
use crate::dto::mensaje_dto::{ConversacionQuery, EnviarMensajeRequest, MarcarLeidoRequest};
use crate::models::auth::Subject;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{JsonOrDefault, ValidatedJson};

pub fn mensaje_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(enviar_mensaje))
        .route("/conversacion", get(conversacion))
        .route("/marcar-leido", put(marcar_leido))
        .route("/no-leidos", get(no_leidos))
        .route("/conversaciones", get(conversaciones))
}

async fn enviar_mensaje(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    ValidatedJson(request): ValidatedJson<EnviarMensajeRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = MensajeController::new(&state).enviar(&subject, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn conversacion(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Query(query): Query<ConversacionQuery>,
) -> Result<Json<Value>, AppError> {
    let response = MensajeController::new(&state)
        .conversacion(&subject, query)
        .await?;
    Ok(Json(response))
}

// El residente puede llamar sin cuerpo
async fn marcar_leido(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    JsonOrDefault(request): JsonOrDefault<MarcarLeidoRequest>,
) -> Result<Json<Value>, AppError> {
    let response = MensajeController::new(&state)
        .marcar_leido(&subject, request)
        .await?;
    Ok(Json(response))
}

async fn no_leidos(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Value>, AppError> {
    let response = MensajeController::new(&state).no_leidos(&subject).await?;
    Ok(Json(response))
}

async fn conversaciones(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Value>, AppError> {
    let response = MensajeController::new(&state).conversaciones(&subject).await?;
    Ok(Json(response))
}
