use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    dto::visitante_dto::{CreateVisitanteRequest, UpdateVisitanteRequest, VisitanteFilters},
    models::{
        auth::Subject,
        visitante::{EstadoVisita, Visitante, VisitanteResponse},
    },
    repositories::Repositories,
    services::authorization_service::{
        authorize_mutation, require_admin, require_owner_or_admin, Acceso,
    },
    state::AppState,
    utils::errors::{forbidden_error, not_found_error, AppResult},
};

pub struct VisitanteController {
    repos: Repositories,
}

impl VisitanteController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    async fn to_response(&self, visitante: Visitante) -> AppResult<VisitanteResponse> {
        let solicitante = self.repos.users.summary(visitante.solicitado_por).await?;
        Ok(VisitanteResponse::new(visitante, solicitante))
    }

    async fn to_responses(&self, visitantes: Vec<Visitante>) -> AppResult<Vec<VisitanteResponse>> {
        let ids: Vec<Uuid> = visitantes.iter().map(|v| v.solicitado_por).collect();
        let usuarios = self.repos.users.summaries(&ids).await?;
        Ok(visitantes
            .into_iter()
            .map(|v| {
                let solicitante = usuarios.get(&v.solicitado_por).cloned();
                VisitanteResponse::new(v, solicitante)
            })
            .collect())
    }

    async fn find(&self, id: Uuid) -> AppResult<Visitante> {
        self.repos
            .visitantes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Visitante"))
    }

    pub async fn create(
        &self,
        subject: &Subject,
        request: CreateVisitanteRequest,
    ) -> AppResult<Value> {
        let now = Utc::now();
        let visitante = Visitante {
            id: Uuid::new_v4(),
            solicitado_por: subject.id(),
            nombre_visitante: request.nombre_visitante.trim().to_string(),
            fecha_visita: request.fecha_visita,
            hora_llegada: request.hora_llegada,
            vehiculo: request.vehiculo.unwrap_or_default().normalized(),
            estado: EstadoVisita::Pendiente,
            notas: request.notas.unwrap_or_default().trim().to_string(),
            hora_entrada: None,
            hora_salida: None,
            created_at: now,
            updated_at: now,
        };

        let visitante = self.repos.visitantes.create(visitante).await?;
        tracing::info!(visitante_id = %visitante.id, "🚪 Visitante registrado");

        Ok(json!({
            "message": "Visitante registrado",
            "visitante": self.to_response(visitante).await?,
        }))
    }

    pub async fn list(&self, subject: &Subject, filters: VisitanteFilters) -> AppResult<Value> {
        require_admin(subject)?;

        let visitantes = self.repos.visitantes.list(filters.estado).await?;
        Ok(json!({ "visitantes": self.to_responses(visitantes).await? }))
    }

    pub async fn list_mine(&self, subject: &Subject) -> AppResult<Value> {
        let visitantes = self.repos.visitantes.list_by_usuario(subject.id()).await?;
        Ok(json!({ "visitantes": self.to_responses(visitantes).await? }))
    }

    pub async fn get(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        let visitante = self.find(id).await?;
        require_owner_or_admin(
            subject,
            visitante.solicitado_por,
            "No tienes permiso para ver este visitante",
        )?;

        Ok(json!({ "visitante": self.to_response(visitante).await? }))
    }

    /// El residente solo edita sus solicitudes pendientes y nunca cambia el estado
    pub async fn update(
        &self,
        subject: &Subject,
        id: Uuid,
        request: UpdateVisitanteRequest,
    ) -> AppResult<Value> {
        let mut visitante = self.find(id).await?;
        let acceso = authorize_mutation(
            subject,
            visitante.solicitado_por,
            "No tienes permiso para modificar esta solicitud",
        )?;

        if acceso == Acceso::SoloPropietario {
            if visitante.estado != EstadoVisita::Pendiente {
                return Err(forbidden_error("Solo puedes modificar solicitudes pendientes"));
            }
            if request.estado.is_some() {
                return Err(forbidden_error(
                    "Solo la administración puede cambiar el estado de la visita",
                ));
            }
        }

        if let Some(nombre) = request.nombre_visitante {
            visitante.nombre_visitante = nombre.trim().to_string();
        }
        if let Some(fecha_visita) = request.fecha_visita {
            visitante.fecha_visita = fecha_visita;
        }
        if let Some(hora_llegada) = request.hora_llegada {
            visitante.hora_llegada = hora_llegada;
        }
        if let Some(vehiculo) = request.vehiculo {
            visitante.vehiculo = vehiculo.normalized();
        }
        if let Some(estado) = request.estado {
            visitante.estado = estado;
        }
        if let Some(notas) = request.notas {
            visitante.notas = notas.trim().to_string();
        }

        let visitante = self.repos.visitantes.update(visitante).await?;

        Ok(json!({
            "message": "Visitante actualizado",
            "visitante": self.to_response(visitante).await?,
        }))
    }

    pub async fn delete(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        let visitante = self.find(id).await?;
        require_owner_or_admin(
            subject,
            visitante.solicitado_por,
            "No tienes permiso para cancelar esta solicitud",
        )?;

        if !self.repos.visitantes.delete(id).await? {
            return Err(not_found_error("Visitante"));
        }

        Ok(json!({ "message": "Visitante eliminado" }))
    }

    pub async fn registrar_entrada(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        let mut visitante = self.find(id).await?;
        visitante.registrar_entrada();
        let visitante = self.repos.visitantes.update(visitante).await?;
        tracing::info!(visitante_id = %visitante.id, "➡️ Entrada registrada");

        Ok(json!({
            "message": "Entrada registrada",
            "visitante": self.to_response(visitante).await?,
        }))
    }

    pub async fn registrar_salida(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        let mut visitante = self.find(id).await?;
        visitante.registrar_salida();
        let visitante = self.repos.visitantes.update(visitante).await?;
        tracing::info!(visitante_id = %visitante.id, "⬅️ Salida registrada");

        Ok(json!({
            "message": "Salida registrada",
            "visitante": self.to_response(visitante).await?,
        }))
    }
}
