use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::encuesta_controller::EncuestaController;
use crate::dto::encuesta_dto::{CreateEncuestaRequest, ResponderEncuestaRequest};
use crate::models::auth::Subject;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn encuesta_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_encuestas).post(create_encuesta))
        .route("/:id", get(get_encuesta).delete(delete_encuesta))
        .route("/:id/responder", post(responder_encuesta))
        .route("/:id/resultados", get(resultados))
        .route("/:id/exportar", get(exportar))
        .route("/:id/cerrar", patch(cerrar_encuesta))
}

async fn create_encuesta(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    ValidatedJson(request): ValidatedJson<CreateEncuestaRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = EncuestaController::new(&state).create(&subject, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_encuestas(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Value>, AppError> {
    let response = EncuestaController::new(&state).list(&subject).await?;
    Ok(Json(response))
}

async fn get_encuesta(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = EncuestaController::new(&state).get(&subject, id).await?;
    Ok(Json(response))
}

async fn responder_encuesta(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ResponderEncuestaRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = EncuestaController::new(&state)
        .responder(&subject, id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn resultados(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = EncuestaController::new(&state).resultados(&subject, id).await?;
    Ok(Json(response))
}

async fn exportar(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = EncuestaController::new(&state).exportar(&subject, id).await?;
    Ok(Json(response))
}

async fn cerrar_encuesta(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = EncuestaController::new(&state).cerrar(&subject, id).await?;
    Ok(Json(response))
}

async fn delete_encuesta(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = EncuestaController::new(&state).delete(&subject, id).await?;
    Ok(Json(response))
}
