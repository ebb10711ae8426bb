//! Almacenamiento en memoria
//!
//! Implementa todos los repositorios sobre mapas protegidos por
//! `tokio::sync::RwLock`. Se usa en desarrollo sin `DATABASE_URL` y en los
//! tests de integración. Los clones comparten el mismo estado.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    dto::{pago_dto::PagoFilters, reservacion_dto::ReservacionFilters},
    models::{
        anuncio::{Anuncio, EstadoAnuncio, TipoAnuncio},
        auth::Role,
        common::UsuarioResumen,
        encuesta::{Encuesta, EstadoEncuesta, RespuestaEncuesta},
        mensaje::Mensaje,
        pago::{EstadoPago, Pago},
        reservacion::{AreaComun, Reservacion},
        user::User,
        visitante::{EstadoVisita, Visitante},
    },
    repositories::{
        anuncio_repository::AnuncioRepository,
        encuesta_repository::{EncuestaRepository, RESPUESTA_DUPLICADA},
        mensaje_repository::MensajeRepository,
        pago_repository::PagoRepository,
        reservacion_repository::ReservacionRepository,
        user_repository::UserRepository,
        visitante_repository::VisitanteRepository,
    },
    utils::errors::{not_found_error, AppError, AppResult},
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    anuncios: HashMap<Uuid, Anuncio>,
    reservaciones: HashMap<Uuid, Reservacion>,
    pagos: HashMap<Uuid, Pago>,
    visitantes: HashMap<Uuid, Visitante>,
    mensajes: Vec<Mensaje>,
    encuestas: HashMap<Uuid, Encuesta>,
    respuestas: Vec<RespuestaEncuesta>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn update_row<T: Clone>(
    table: &mut HashMap<Uuid, T>,
    id: Uuid,
    mut row: T,
    touch: impl FnOnce(&mut T),
    resource: &str,
) -> AppResult<T> {
    let slot = table.get_mut(&id).ok_or_else(|| not_found_error(resource))?;
    touch(&mut row);
    *slot = row.clone();
    Ok(row)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn admin_exists(&self) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.role == Role::Admin))
    }

    async fn list(&self, incluir_inactivos: bool) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .users
            .values()
            .filter(|u| incluir_inactivos || u.is_active())
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }
        let id = user.id;
        update_row(&mut tables.users, id, user, |u| u.updated_at = Utc::now(), "Usuario")
    }

    async fn summaries(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, UsuarioResumen>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id))
            .map(|u| (u.id, u.summary()))
            .collect())
    }
}

#[async_trait]
impl AnuncioRepository for MemoryStore {
    async fn create(&self, anuncio: Anuncio) -> AppResult<Anuncio> {
        let mut tables = self.tables.write().await;
        tables.anuncios.insert(anuncio.id, anuncio.clone());
        Ok(anuncio)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Anuncio>> {
        Ok(self.tables.read().await.anuncios.get(&id).cloned())
    }

    async fn list_activos(&self, tipo: Option<TipoAnuncio>) -> AppResult<Vec<Anuncio>> {
        let tables = self.tables.read().await;
        let mut anuncios: Vec<Anuncio> = tables
            .anuncios
            .values()
            .filter(|a| a.estado == EstadoAnuncio::Activo)
            .filter(|a| tipo.map_or(true, |t| a.tipo == t))
            .cloned()
            .collect();
        anuncios.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(anuncios)
    }

    async fn update(&self, anuncio: Anuncio) -> AppResult<Anuncio> {
        let mut tables = self.tables.write().await;
        let id = anuncio.id;
        update_row(&mut tables.anuncios, id, anuncio, |a| a.updated_at = Utc::now(), "Anuncio")
    }
}

#[async_trait]
impl ReservacionRepository for MemoryStore {
    async fn create(&self, reservacion: Reservacion) -> AppResult<Reservacion> {
        let mut tables = self.tables.write().await;
        tables.reservaciones.insert(reservacion.id, reservacion.clone());
        Ok(reservacion)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservacion>> {
        Ok(self.tables.read().await.reservaciones.get(&id).cloned())
    }

    async fn list(&self, filters: &ReservacionFilters) -> AppResult<Vec<Reservacion>> {
        let tables = self.tables.read().await;
        let mut reservaciones: Vec<Reservacion> = tables
            .reservaciones
            .values()
            .filter(|r| filters.area.map_or(true, |area| r.area == area))
            .filter(|r| filters.estado.map_or(true, |estado| r.estado == estado))
            .cloned()
            .collect();
        sort_reservaciones(&mut reservaciones);
        Ok(reservaciones)
    }

    async fn list_by_usuario(&self, usuario_id: Uuid) -> AppResult<Vec<Reservacion>> {
        let tables = self.tables.read().await;
        let mut reservaciones: Vec<Reservacion> = tables
            .reservaciones
            .values()
            .filter(|r| r.usuario_id == usuario_id)
            .cloned()
            .collect();
        sort_reservaciones(&mut reservaciones);
        Ok(reservaciones)
    }

    async fn find_active_for_slot(
        &self,
        area: AreaComun,
        fecha: NaiveDate,
    ) -> AppResult<Vec<Reservacion>> {
        let tables = self.tables.read().await;
        let mut reservaciones: Vec<Reservacion> = tables
            .reservaciones
            .values()
            .filter(|r| r.area == area && r.fecha == fecha && !r.is_cancelled())
            .cloned()
            .collect();
        reservaciones.sort_by_key(|r| r.hora_inicio);
        Ok(reservaciones)
    }

    async fn update(&self, reservacion: Reservacion) -> AppResult<Reservacion> {
        let mut tables = self.tables.write().await;
        let id = reservacion.id;
        update_row(
            &mut tables.reservaciones,
            id,
            reservacion,
            |r| r.updated_at = Utc::now(),
            "Reservación",
        )
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tables.write().await.reservaciones.remove(&id).is_some())
    }
}

fn sort_reservaciones(reservaciones: &mut [Reservacion]) {
    reservaciones.sort_by(|a, b| {
        b.fecha
            .cmp(&a.fecha)
            .then_with(|| b.hora_inicio.cmp(&a.hora_inicio))
    });
}

#[async_trait]
impl PagoRepository for MemoryStore {
    async fn create(&self, pago: Pago) -> AppResult<Pago> {
        let mut tables = self.tables.write().await;
        tables.pagos.insert(pago.id, pago.clone());
        Ok(pago)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Pago>> {
        Ok(self.tables.read().await.pagos.get(&id).cloned())
    }

    async fn list(&self, filters: &PagoFilters) -> AppResult<Vec<Pago>> {
        let tables = self.tables.read().await;
        let mut pagos: Vec<Pago> = tables
            .pagos
            .values()
            .filter(|p| filters.estado.map_or(true, |estado| p.estado == estado))
            .filter(|p| filters.concepto.map_or(true, |concepto| p.concepto == concepto))
            .cloned()
            .collect();
        pagos.sort_by_key(|p| p.fecha_vencimiento);
        Ok(pagos)
    }

    async fn list_by_usuario(
        &self,
        usuario_id: Uuid,
        estado: Option<EstadoPago>,
    ) -> AppResult<Vec<Pago>> {
        let tables = self.tables.read().await;
        let mut pagos: Vec<Pago> = tables
            .pagos
            .values()
            .filter(|p| p.usuario_id == usuario_id)
            .filter(|p| estado.map_or(true, |estado| p.estado == estado))
            .cloned()
            .collect();
        pagos.sort_by_key(|p| p.fecha_vencimiento);
        Ok(pagos)
    }

    async fn update(&self, pago: Pago) -> AppResult<Pago> {
        let mut tables = self.tables.write().await;
        let id = pago.id;
        update_row(&mut tables.pagos, id, pago, |p| p.updated_at = Utc::now(), "Pago")
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tables.write().await.pagos.remove(&id).is_some())
    }
}

#[async_trait]
impl VisitanteRepository for MemoryStore {
    async fn create(&self, visitante: Visitante) -> AppResult<Visitante> {
        let mut tables = self.tables.write().await;
        tables.visitantes.insert(visitante.id, visitante.clone());
        Ok(visitante)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Visitante>> {
        Ok(self.tables.read().await.visitantes.get(&id).cloned())
    }

    async fn list(&self, estado: Option<EstadoVisita>) -> AppResult<Vec<Visitante>> {
        let tables = self.tables.read().await;
        let mut visitantes: Vec<Visitante> = tables
            .visitantes
            .values()
            .filter(|v| estado.map_or(true, |estado| v.estado == estado))
            .cloned()
            .collect();
        sort_visitantes(&mut visitantes);
        Ok(visitantes)
    }

    async fn list_by_usuario(&self, usuario_id: Uuid) -> AppResult<Vec<Visitante>> {
        let tables = self.tables.read().await;
        let mut visitantes: Vec<Visitante> = tables
            .visitantes
            .values()
            .filter(|v| v.solicitado_por == usuario_id)
            .cloned()
            .collect();
        sort_visitantes(&mut visitantes);
        Ok(visitantes)
    }

    async fn update(&self, visitante: Visitante) -> AppResult<Visitante> {
        let mut tables = self.tables.write().await;
        let id = visitante.id;
        update_row(
            &mut tables.visitantes,
            id,
            visitante,
            |v| v.updated_at = Utc::now(),
            "Visitante",
        )
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tables.write().await.visitantes.remove(&id).is_some())
    }
}

fn sort_visitantes(visitantes: &mut [Visitante]) {
    visitantes.sort_by(|a, b| {
        b.fecha_visita
            .cmp(&a.fecha_visita)
            .then_with(|| b.hora_llegada.cmp(&a.hora_llegada))
    });
}

// Los mensajes se guardan en orden de inserción, que es el cronológico
#[async_trait]
impl MensajeRepository for MemoryStore {
    async fn create(&self, mensaje: Mensaje) -> AppResult<Mensaje> {
        let mut tables = self.tables.write().await;
        tables.mensajes.push(mensaje.clone());
        Ok(mensaje)
    }

    async fn conversacion_admin(&self, admin_id: Uuid, usuario_id: Uuid) -> AppResult<Vec<Mensaje>> {
        let tables = self.tables.read().await;
        Ok(tables
            .mensajes
            .iter()
            .filter(|m| {
                (m.de == admin_id && m.para == Some(usuario_id))
                    || (m.de == usuario_id && m.para.is_none())
            })
            .cloned()
            .collect())
    }

    async fn conversacion_residente(&self, usuario_id: Uuid) -> AppResult<Vec<Mensaje>> {
        let tables = self.tables.read().await;
        Ok(tables
            .mensajes
            .iter()
            .filter(|m| (m.de == usuario_id && m.para.is_none()) || m.para == Some(usuario_id))
            .cloned()
            .collect())
    }

    async fn marcar_leidos_de(&self, usuario_id: Uuid) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let mut count = 0;
        for m in tables
            .mensajes
            .iter_mut()
            .filter(|m| m.de == usuario_id && m.para.is_none() && !m.leido)
        {
            m.leido = true;
            m.updated_at = now;
            count += 1;
        }
        Ok(count)
    }

    async fn marcar_leidos_para(&self, usuario_id: Uuid) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let mut count = 0;
        for m in tables
            .mensajes
            .iter_mut()
            .filter(|m| m.para == Some(usuario_id) && !m.leido)
        {
            m.leido = true;
            m.updated_at = now;
            count += 1;
        }
        Ok(count)
    }

    async fn contar_no_leidos_bandeja(&self) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .mensajes
            .iter()
            .filter(|m| m.para.is_none() && !m.es_del_admin && !m.leido)
            .count() as u64)
    }

    async fn contar_no_leidos_para(&self, usuario_id: Uuid) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .mensajes
            .iter()
            .filter(|m| m.para == Some(usuario_id) && !m.leido)
            .count() as u64)
    }

    async fn list_admin_facing(&self) -> AppResult<Vec<Mensaje>> {
        let tables = self.tables.read().await;
        Ok(tables
            .mensajes
            .iter()
            .filter(|m| m.is_admin_facing())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EncuestaRepository for MemoryStore {
    async fn create(&self, encuesta: Encuesta) -> AppResult<Encuesta> {
        let mut tables = self.tables.write().await;
        tables.encuestas.insert(encuesta.id, encuesta.clone());
        Ok(encuesta)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Encuesta>> {
        Ok(self.tables.read().await.encuestas.get(&id).cloned())
    }

    async fn list(&self, solo_abiertas: bool) -> AppResult<Vec<Encuesta>> {
        let tables = self.tables.read().await;
        let mut encuestas: Vec<Encuesta> = tables
            .encuestas
            .values()
            .filter(|e| !solo_abiertas || e.estado == EstadoEncuesta::Abierta)
            .cloned()
            .collect();
        encuestas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(encuestas)
    }

    async fn update_estado(&self, id: Uuid, estado: EstadoEncuesta) -> AppResult<Option<Encuesta>> {
        let mut tables = self.tables.write().await;
        Ok(tables.encuestas.get_mut(&id).map(|e| {
            e.estado = estado;
            e.updated_at = Utc::now();
            e.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        tables.respuestas.retain(|r| r.encuesta_id != id);
        Ok(tables.encuestas.remove(&id).is_some())
    }

    async fn create_respuesta(&self, respuesta: RespuestaEncuesta) -> AppResult<RespuestaEncuesta> {
        let mut tables = self.tables.write().await;
        if tables
            .respuestas
            .iter()
            .any(|r| r.encuesta_id == respuesta.encuesta_id && r.usuario_id == respuesta.usuario_id)
        {
            return Err(AppError::Conflict(RESPUESTA_DUPLICADA.to_string()));
        }
        tables.respuestas.push(respuesta.clone());
        Ok(respuesta)
    }

    async fn ya_respondio(&self, encuesta_id: Uuid, usuario_id: Uuid) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .respuestas
            .iter()
            .any(|r| r.encuesta_id == encuesta_id && r.usuario_id == usuario_id))
    }

    async fn respondidas_por(&self, usuario_id: Uuid) -> AppResult<HashSet<Uuid>> {
        let tables = self.tables.read().await;
        Ok(tables
            .respuestas
            .iter()
            .filter(|r| r.usuario_id == usuario_id)
            .map(|r| r.encuesta_id)
            .collect())
    }

    async fn respuestas_de(&self, encuesta_id: Uuid) -> AppResult<Vec<RespuestaEncuesta>> {
        let tables = self.tables.read().await;
        Ok(tables
            .respuestas
            .iter()
            .filter(|r| r.encuesta_id == encuesta_id)
            .cloned()
            .collect())
    }
}
