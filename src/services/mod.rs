//! Services module
//!
//! Este módulo contiene la lógica de negocio que no depende del
//! almacenamiento: autorización, traslapes de reservaciones, resultados de
//! encuestas y agrupación de conversaciones.

pub mod authorization_service;
pub mod conversation_service;
pub mod reservation_conflict;
pub mod survey_results;
