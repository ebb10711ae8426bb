//! API de administración de condominios
//!
//! Usuarios y autenticación, anuncios, reservaciones de áreas comunes,
//! pagos, visitantes, mensajería y encuestas.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Construir la aplicación completa con CORS y trazas HTTP
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    routes::api_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
