use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::reservacion_controller::ReservacionController;
use crate::dto::reservacion_dto::{
    CreateReservacionRequest, ReservacionFilters, UpdateReservacionRequest,
};
use crate::models::auth::Subject;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn reservacion_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reservaciones).post(create_reservacion))
        .route("/mis-reservaciones", get(mis_reservaciones))
        .route(
            "/:id",
            get(get_reservacion)
                .put(update_reservacion)
                .delete(delete_reservacion),
        )
}

async fn create_reservacion(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    ValidatedJson(request): ValidatedJson<CreateReservacionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = ReservacionController::new(&state)
        .create(&subject, request)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_reservaciones(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Query(filters): Query<ReservacionFilters>,
) -> Result<Json<Value>, AppError> {
    let response = ReservacionController::new(&state)
        .list(&subject, filters)
        .await?;
    Ok(Json(response))
}

async fn mis_reservaciones(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Value>, AppError> {
    let response = ReservacionController::new(&state).list_mine(&subject).await?;
    Ok(Json(response))
}

async fn get_reservacion(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = ReservacionController::new(&state).get(&subject, id).await?;
    Ok(Json(response))
}

async fn update_reservacion(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateReservacionRequest>,
) -> Result<Json<Value>, AppError> {
    let response = ReservacionController::new(&state)
        .update(&subject, id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_reservacion(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let response = ReservacionController::new(&state).delete(&subject, id).await?;
    Ok(Json(response))
}
