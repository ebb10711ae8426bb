//! Router de la API
//!
//! Las rutas públicas (bootstrap y login) quedan fuera del middleware de
//! autenticación; el resto exige un token válido.

pub mod anuncio_routes;
pub mod auth_routes;
pub mod encuesta_routes;
pub mod mensaje_routes;
pub mod pago_routes;
pub mod reservacion_routes;
pub mod visitante_routes;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::middleware::auth_middleware;
use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/auth", auth_routes::auth_routes())
        .nest("/anuncios", anuncio_routes::anuncio_routes())
        .nest("/reservaciones", reservacion_routes::reservacion_routes())
        .nest("/pagos", pago_routes::pago_routes())
        .nest("/visitantes", visitante_routes::visitante_routes())
        .nest("/mensajes", mensaje_routes::mensaje_routes())
        .nest("/encuestas", encuesta_routes::encuesta_routes())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .nest("/auth", auth_routes::public_auth_routes())
        .merge(protected);

    Router::new()
        .route("/", get(root))
        .nest("/api", api)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "ok": true, "name": "condominios-api" }))
}
