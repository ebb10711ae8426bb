use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::visitante_controller::VisitanteController;
use crate::dto::visitante_dto::{CreateVisitanteRequest, UpdateVisitanteRequest, VisitanteFilters};
use crate::models::auth::Subject;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn visitante_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_visitantes).post(create_visitante))
        .route("/mis-visitas", get(mis_visitas))
        .route(
            "/:id",
            get(get_visitante)
                .put(update_visitante)
                .delete(delete_visitante),
        )
        .route("/:id/entrada", patch(registrar_entrada))
        .route("/:id/salida", patch(registrar_salida))
}

async fn create_visitante(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    ValidatedJson(request): ValidatedJson<CreateVisitanteRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = VisitanteController::new(&state)
        .create(&subject, request)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_visitantes(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Query(filters): Query<VisitanteFilters>,
) -> Result<Json<Value>, AppError> {
    let response = VisitanteController::new(&state)
        .list(&subject, filters)
        .await?;
    Ok(Json(response))
}

async fn mis_visitas(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Value>, AppError> {
    let response = VisitanteController::new(&state).list_mine(&subject).await?;
    Ok(Json(response))
}

async fn get_visitante(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = VisitanteController::new(&state).get(&subject, id).await?;
    Ok(Json(response))
}

async fn update_visitante(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateVisitanteRequest>,
) -> Result<Json<Value>, AppError> {
    let response = VisitanteController::new(&state)
        .update(&subject, id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_visitante(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = VisitanteController::new(&state).delete(&subject, id).await?;
    Ok(Json(response))
}

async fn registrar_entrada(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = VisitanteController::new(&state)
        .registrar_entrada(&subject, id)
        .await?;
    Ok(Json(response))
}

async fn registrar_salida(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = VisitanteController::new(&state)
        .registrar_salida(&subject, id)
        .await?;
    Ok(Json(response))
}
