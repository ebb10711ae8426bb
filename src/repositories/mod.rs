//! Repositorios de datos
//!
//! Un trait por colección con dos backends: PostgreSQL (`sqlx`) y el
//! almacenamiento en memoria.

pub mod anuncio_repository;
pub mod encuesta_repository;
pub mod memory_store;
pub mod mensaje_repository;
pub mod pago_repository;
pub mod reservacion_repository;
pub mod user_repository;
pub mod visitante_repository;

use std::sync::Arc;

use sqlx::PgPool;

use anuncio_repository::{AnuncioRepository, PgAnuncioRepository};
use encuesta_repository::{EncuestaRepository, PgEncuestaRepository};
use memory_store::MemoryStore;
use mensaje_repository::{MensajeRepository, PgMensajeRepository};
use pago_repository::{PagoRepository, PgPagoRepository};
use reservacion_repository::{PgReservacionRepository, ReservacionRepository};
use user_repository::{PgUserRepository, UserRepository};
use visitante_repository::{PgVisitanteRepository, VisitanteRepository};

/// Conjunto de repositorios compartido por los controladores
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub anuncios: Arc<dyn AnuncioRepository>,
    pub reservaciones: Arc<dyn ReservacionRepository>,
    pub pagos: Arc<dyn PagoRepository>,
    pub visitantes: Arc<dyn VisitanteRepository>,
    pub mensajes: Arc<dyn MensajeRepository>,
    pub encuestas: Arc<dyn EncuestaRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            anuncios: Arc::new(PgAnuncioRepository::new(pool.clone())),
            reservaciones: Arc::new(PgReservacionRepository::new(pool.clone())),
            pagos: Arc::new(PgPagoRepository::new(pool.clone())),
            visitantes: Arc::new(PgVisitanteRepository::new(pool.clone())),
            mensajes: Arc::new(PgMensajeRepository::new(pool.clone())),
            encuestas: Arc::new(PgEncuestaRepository::new(pool)),
        }
    }

    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            anuncios: Arc::new(store.clone()),
            reservaciones: Arc::new(store.clone()),
            pagos: Arc::new(store.clone()),
            visitantes: Arc::new(store.clone()),
            mensajes: Arc::new(store.clone()),
            encuestas: Arc::new(store),
        }
    }
}
