//! Controlador de reservaciones
//!
//! Toda escritura que pueda ocupar un horario pasa por el candado del slot
//! (área, fecha) y por `has_conflict` antes de persistirse.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    dto::reservacion_dto::{
        validate_interval, CreateReservacionRequest, ReservacionFilters, UpdateReservacionRequest,
    },
    models::{
        auth::Subject,
        common::HoraDelDia,
        reservacion::{AreaComun, EstadoReservacion, Reservacion, ReservacionResponse},
    },
    repositories::Repositories,
    services::{
        authorization_service::{authorize_mutation, require_admin, require_owner_or_admin, Acceso},
        reservation_conflict::{has_conflict, ReservationLocks},
    },
    state::AppState,
    utils::errors::{bad_request_error, forbidden_error, AppError, AppResult},
};

const HORARIO_OCUPADO: &str = "Ya existe una reservación en ese horario";

pub struct ReservacionController {
    repos: Repositories,
    locks: ReservationLocks,
}

impl ReservacionController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            locks: state.reservation_locks.clone(),
        }
    }

    async fn to_response(&self, reservacion: Reservacion) -> AppResult<ReservacionResponse> {
        let usuario = self.repos.users.summary(reservacion.usuario_id).await?;
        Ok(ReservacionResponse::new(reservacion, usuario))
    }

    async fn to_responses(&self, reservaciones: Vec<Reservacion>) -> AppResult<Vec<ReservacionResponse>> {
        let ids: Vec<Uuid> = reservaciones.iter().map(|r| r.usuario_id).collect();
        let usuarios = self.repos.users.summaries(&ids).await?;
        Ok(reservaciones
            .into_iter()
            .map(|r| {
                let usuario = usuarios.get(&r.usuario_id).cloned();
                ReservacionResponse::new(r, usuario)
            })
            .collect())
    }

    async fn ensure_slot_free(
        &self,
        area: AreaComun,
        fecha: NaiveDate,
        inicio: HoraDelDia,
        fin: HoraDelDia,
        exclude: Option<Uuid>,
    ) -> AppResult<()> {
        let existentes = self.repos.reservaciones.find_active_for_slot(area, fecha).await?;
        if has_conflict(&existentes, inicio, fin, exclude) {
            tracing::debug!(?area, %fecha, %inicio, %fin, "⛔ Horario ocupado");
            return Err(AppError::Conflict(HORARIO_OCUPADO.to_string()));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        subject: &Subject,
        request: CreateReservacionRequest,
    ) -> AppResult<Value> {
        let _slot = self.locks.acquire(request.area, request.fecha).await;
        self.ensure_slot_free(
            request.area,
            request.fecha,
            request.hora_inicio,
            request.hora_fin,
            None,
        )
        .await?;

        let now = Utc::now();
        let reservacion = Reservacion {
            id: Uuid::new_v4(),
            usuario_id: subject.id(),
            area: request.area,
            fecha: request.fecha,
            hora_inicio: request.hora_inicio,
            hora_fin: request.hora_fin,
            estado: EstadoReservacion::Confirmada,
            notas: request.notas.unwrap_or_default().trim().to_string(),
            costo: request.costo.unwrap_or(Decimal::ZERO),
            created_at: now,
            updated_at: now,
        };

        let reservacion = self.repos.reservaciones.create(reservacion).await?;
        tracing::info!(
            reservacion_id = %reservacion.id,
            area = ?reservacion.area,
            fecha = %reservacion.fecha,
            "📅 Reservación creada"
        );

        Ok(json!({
            "message": "Reservación creada",
            "reservacion": self.to_response(reservacion).await?,
        }))
    }

    pub async fn list(&self, subject: &Subject, filters: ReservacionFilters) -> AppResult<Value> {
        require_admin(subject)?;

        let reservaciones = self.repos.reservaciones.list(&filters).await?;
        Ok(json!({ "reservaciones": self.to_responses(reservaciones).await? }))
    }

    pub async fn list_mine(&self, subject: &Subject) -> AppResult<Value> {
        let reservaciones = self.repos.reservaciones.list_by_usuario(subject.id()).await?;
        Ok(json!({ "reservaciones": self.to_responses(reservaciones).await? }))
    }

    pub async fn get(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        let reservacion = self.find(id).await?;
        require_owner_or_admin(
            subject,
            reservacion.usuario_id,
            "No tienes permiso para ver esta reservación",
        )?;

        Ok(json!({ "reservacion": self.to_response(reservacion).await? }))
    }

    pub async fn update(
        &self,
        subject: &Subject,
        id: Uuid,
        request: UpdateReservacionRequest,
    ) -> AppResult<Value> {
        let actual = self.find(id).await?;
        let acceso = authorize_mutation(
            subject,
            actual.usuario_id,
            "No tienes permiso para modificar esta reservación",
        )?;

        if acceso == Acceso::SoloPropietario && !request.is_cancellation_only() {
            return Err(forbidden_error("Solo puedes cancelar tu reservación"));
        }

        let mut reservacion = actual.clone();
        if let Some(area) = request.area {
            reservacion.area = area;
        }
        if let Some(fecha) = request.fecha {
            reservacion.fecha = fecha;
        }
        if let Some(hora_inicio) = request.hora_inicio {
            reservacion.hora_inicio = hora_inicio;
        }
        if let Some(hora_fin) = request.hora_fin {
            reservacion.hora_fin = hora_fin;
        }
        if let Some(estado) = request.estado {
            reservacion.estado = estado;
        }
        if let Some(notas) = request.notas {
            reservacion.notas = notas.trim().to_string();
        }
        if let Some(costo) = request.costo {
            if costo.is_sign_negative() {
                return Err(bad_request_error("El costo no puede ser negativo"));
            }
            reservacion.costo = costo;
        }

        validate_interval(reservacion.hora_inicio, reservacion.hora_fin)
            .map_err(|_| bad_request_error("La hora de inicio debe ser anterior a la hora de fin"))?;

        let ocupa_otro_horario = reservacion.area != actual.area
            || reservacion.fecha != actual.fecha
            || reservacion.hora_inicio != actual.hora_inicio
            || reservacion.hora_fin != actual.hora_fin
            || (actual.is_cancelled() && !reservacion.is_cancelled());

        let reservacion = if ocupa_otro_horario && !reservacion.is_cancelled() {
            let _slot = self.locks.acquire(reservacion.area, reservacion.fecha).await;
            self.ensure_slot_free(
                reservacion.area,
                reservacion.fecha,
                reservacion.hora_inicio,
                reservacion.hora_fin,
                Some(reservacion.id),
            )
            .await?;
            self.repos.reservaciones.update(reservacion).await?
        } else {
            self.repos.reservaciones.update(reservacion).await?
        };

        tracing::info!(reservacion_id = %reservacion.id, estado = ?reservacion.estado, "✏️ Reservación actualizada");

        Ok(json!({
            "message": "Reservación actualizada",
            "reservacion": self.to_response(reservacion).await?,
        }))
    }

    pub async fn delete(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        if !self.repos.reservaciones.delete(id).await? {
            return Err(AppError::NotFound("Reservación no encontrada".to_string()));
        }

        Ok(json!({ "message": "Reservación eliminada" }))
    }

    async fn find(&self, id: Uuid) -> AppResult<Reservacion> {
        self.repos
            .reservaciones
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reservación no encontrada".to_string()))
    }
}
