use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    dto::pago_dto::{CreatePagoRequest, MarcarPagadoRequest, PagoFilters, UpdatePagoRequest},
    models::{
        auth::Subject,
        pago::{EstadoPago, Pago, PagoResponse},
    },
    repositories::Repositories,
    services::authorization_service::{require_admin, require_owner_or_admin},
    state::AppState,
    utils::errors::{not_found_error, AppResult},
};

pub struct PagoController {
    repos: Repositories,
}

impl PagoController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    async fn to_responses(&self, pagos: Vec<Pago>) -> AppResult<Vec<PagoResponse>> {
        let mut ids: Vec<Uuid> = pagos.iter().map(|p| p.usuario_id).collect();
        ids.extend(pagos.iter().filter_map(|p| p.registrado_por));
        let usuarios = self.repos.users.summaries(&ids).await?;

        Ok(pagos
            .into_iter()
            .map(|p| {
                let usuario = usuarios.get(&p.usuario_id).cloned();
                let registrado_por = p.registrado_por.and_then(|id| usuarios.get(&id).cloned());
                PagoResponse::new(p, usuario, registrado_por)
            })
            .collect())
    }

    async fn to_response(&self, pago: Pago) -> AppResult<PagoResponse> {
        let mut responses = self.to_responses(vec![pago]).await?;
        Ok(responses.remove(0))
    }

    async fn find(&self, id: Uuid) -> AppResult<Pago> {
        self.repos
            .pagos
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Pago"))
    }

    pub async fn create(&self, subject: &Subject, request: CreatePagoRequest) -> AppResult<Value> {
        require_admin(subject)?;

        if self.repos.users.find_by_id(request.usuario).await?.is_none() {
            return Err(not_found_error("Usuario"));
        }

        let now = Utc::now();
        let pago = Pago {
            id: Uuid::new_v4(),
            usuario_id: request.usuario,
            concepto: request.concepto,
            monto: request.monto,
            mes: request.mes.unwrap_or_default().trim().to_string(),
            fecha_vencimiento: request.fecha_vencimiento,
            fecha_pago: None,
            estado: EstadoPago::Pendiente,
            metodo_pago: String::new(),
            notas: request.notas.unwrap_or_default().trim().to_string(),
            registrado_por: Some(subject.id()),
            created_at: now,
            updated_at: now,
        };

        let pago = self.repos.pagos.create(pago).await?;
        tracing::info!(pago_id = %pago.id, usuario_id = %pago.usuario_id, "💰 Pago registrado");

        Ok(json!({
            "message": "Pago registrado",
            "pago": self.to_response(pago).await?,
        }))
    }

    pub async fn list(&self, subject: &Subject, filters: PagoFilters) -> AppResult<Value> {
        require_admin(subject)?;

        let pagos = self.repos.pagos.list(&filters).await?;
        Ok(json!({ "pagos": self.to_responses(pagos).await? }))
    }

    pub async fn list_mine(&self, subject: &Subject, filters: PagoFilters) -> AppResult<Value> {
        let pagos = self
            .repos
            .pagos
            .list_by_usuario(subject.id(), filters.estado)
            .await?;
        Ok(json!({ "pagos": self.to_responses(pagos).await? }))
    }

    pub async fn get(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        let pago = self.find(id).await?;
        require_owner_or_admin(subject, pago.usuario_id, "No tienes permiso para ver este pago")?;

        Ok(json!({ "pago": self.to_response(pago).await? }))
    }

    pub async fn update(
        &self,
        subject: &Subject,
        id: Uuid,
        request: UpdatePagoRequest,
    ) -> AppResult<Value> {
        require_admin(subject)?;

        let mut pago = self.find(id).await?;
        if let Some(concepto) = request.concepto {
            pago.concepto = concepto;
        }
        if let Some(monto) = request.monto {
            pago.monto = monto;
        }
        if let Some(mes) = request.mes {
            pago.mes = mes.trim().to_string();
        }
        if let Some(fecha_vencimiento) = request.fecha_vencimiento {
            pago.fecha_vencimiento = fecha_vencimiento;
        }
        if let Some(estado) = request.estado {
            pago.estado = estado;
        }
        if let Some(metodo_pago) = request.metodo_pago {
            pago.metodo_pago = metodo_pago.trim().to_string();
        }
        if let Some(notas) = request.notas {
            pago.notas = notas.trim().to_string();
        }

        let pago = self.repos.pagos.update(pago).await?;

        Ok(json!({
            "message": "Pago actualizado",
            "pago": self.to_response(pago).await?,
        }))
    }

    /// Marca el pago como pagado con la fecha indicada o la actual
    pub async fn marcar_pagado(
        &self,
        subject: &Subject,
        id: Uuid,
        request: MarcarPagadoRequest,
    ) -> AppResult<Value> {
        require_admin(subject)?;

        let mut pago = self.find(id).await?;
        pago.marcar_pagado(request.fecha_pago, request.metodo_pago);
        let pago = self.repos.pagos.update(pago).await?;
        tracing::info!(pago_id = %pago.id, "✅ Pago marcado como pagado");

        Ok(json!({
            "message": "Pago registrado como pagado",
            "pago": self.to_response(pago).await?,
        }))
    }

    pub async fn delete(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        if !self.repos.pagos.delete(id).await? {
            return Err(not_found_error("Pago"));
        }

        Ok(json!({ "message": "Pago eliminado" }))
    }
}
