//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean al schema
//! PostgreSQL y sus responses para la API.

pub mod anuncio;
pub mod auth;
pub mod common;
pub mod encuesta;
pub mod mensaje;
pub mod pago;
pub mod reservacion;
pub mod user;
pub mod visitante;
