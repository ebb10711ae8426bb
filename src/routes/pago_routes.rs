use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::pago_controller::PagoController;
use crate::dto::pago_dto::{CreatePagoRequest, MarcarPagadoRequest, PagoFilters, UpdatePagoRequest};
use crate::models::auth::Subject;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{JsonOrDefault, ValidatedJson};

pub fn pago_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pagos).post(create_pago))
        .route("/mis-pagos", get(mis_pagos))
        .route("/:id", get(get_pago).put(update_pago).delete(delete_pago))
        .route("/:id/pagar", patch(marcar_pagado))
}

async fn create_pago(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    ValidatedJson(request): ValidatedJson<CreatePagoRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = PagoController::new(&state).create(&subject, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_pagos(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Query(filters): Query<PagoFilters>,
) -> Result<Json<Value>, AppError> {
    let response = PagoController::new(&state).list(&subject, filters).await?;
    Ok(Json(response))
}

async fn mis_pagos(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Query(filters): Query<PagoFilters>,
) -> Result<Json<Value>, AppError> {
    let response = PagoController::new(&state).list_mine(&subject, filters).await?;
    Ok(Json(response))
}

async fn get_pago(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = PagoController::new(&state).get(&subject, id).await?;
    Ok(Json(response))
}

async fn update_pago(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePagoRequest>,
) -> Result<Json<Value>, AppError> {
    let response = PagoController::new(&state)
        .update(&subject, id, request)
        .await?;
    Ok(Json(response))
}

// El cuerpo es opcional: sin él se usa la fecha actual
async fn marcar_pagado(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
    JsonOrDefault(request): JsonOrDefault<MarcarPagadoRequest>,
) -> Result<Json<Value>, AppError> {
    let response = PagoController::new(&state)
        .marcar_pagado(&subject, id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_pago(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = PagoController::new(&state).delete(&subject, id).await?;
    Ok(Json(response))
}
