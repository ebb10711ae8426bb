//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;
use crate::services::reservation_conflict::ReservationLocks;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub reservation_locks: ReservationLocks,
}

impl AppState {
    pub fn new(repos: Repositories, config: EnvironmentConfig) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            repos,
            config,
            reservation_locks: ReservationLocks::new(),
        }
    }
}
