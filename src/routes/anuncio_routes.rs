use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::anuncio_controller::AnuncioController;
use crate::dto::anuncio_dto::{AnuncioFilters, CreateAnuncioRequest, UpdateAnuncioRequest};
use crate::models::auth::Subject;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn anuncio_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_anuncios).post(create_anuncio))
        .route(
            "/:id",
            get(get_anuncio).put(update_anuncio).delete(archive_anuncio),
        )
}

async fn create_anuncio(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    ValidatedJson(request): ValidatedJson<CreateAnuncioRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = AnuncioController::new(&state).create(&subject, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_anuncios(
    State(state): State<AppState>,
    Query(filters): Query<AnuncioFilters>,
) -> Result<Json<Value>, AppError> {
    let response = AnuncioController::new(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_anuncio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = AnuncioController::new(&state).get(id).await?;
    Ok(Json(response))
}

async fn update_anuncio(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateAnuncioRequest>,
) -> Result<Json<Value>, AppError> {
    let response = AnuncioController::new(&state)
        .update(&subject, id, request)
        .await?;
    Ok(Json(response))
}

async fn archive_anuncio(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = AnuncioController::new(&state).archive(&subject, id).await?;
    Ok(Json(response))
}
