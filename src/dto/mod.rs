//! DTOs de la API
//!
//! Requests, filtros y responses que no son modelos de persistencia.

pub mod anuncio_dto;
pub mod auth_dto;
pub mod encuesta_dto;
pub mod mensaje_dto;
pub mod pago_dto;
pub mod reservacion_dto;
pub mod visitante_dto;
