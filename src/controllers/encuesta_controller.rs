//! Controlador de encuestas
//!
//! Los residentes solo ven encuestas abiertas y responden una vez cada una.
//! Resultados, exportación y cierre son exclusivos del administrador.

use std::collections::HashSet;

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    dto::encuesta_dto::{CreateEncuestaRequest, ResponderEncuestaRequest},
    models::{
        auth::Subject,
        encuesta::{
            Encuesta, EncuestaResponse, EstadoEncuesta, RespuestaDetallada, RespuestaEncuesta,
        },
    },
    repositories::Repositories,
    services::{
        authorization_service::require_admin,
        survey_results::{aggregate, export_rows},
    },
    state::AppState,
    utils::errors::{bad_request_error, AppError, AppResult},
};

fn encuesta_no_encontrada() -> AppError {
    AppError::NotFound("Encuesta no encontrada".to_string())
}

pub struct EncuestaController {
    repos: Repositories,
}

impl EncuestaController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    async fn find(&self, id: Uuid) -> AppResult<Encuesta> {
        self.repos
            .encuestas
            .find_by_id(id)
            .await?
            .ok_or_else(encuesta_no_encontrada)
    }

    // yaRespondio solo tiene sentido para residentes
    async fn to_responses(
        &self,
        subject: &Subject,
        encuestas: Vec<Encuesta>,
    ) -> AppResult<Vec<EncuestaResponse>> {
        let respondidas: Option<HashSet<Uuid>> = match subject {
            Subject::Admin { .. } => None,
            Subject::Residente { id } => Some(self.repos.encuestas.respondidas_por(*id).await?),
        };

        let ids: Vec<Uuid> = encuestas.iter().map(|e| e.creado_por).collect();
        let autores = self.repos.users.summaries(&ids).await?;

        Ok(encuestas
            .into_iter()
            .map(|e| {
                let autor = autores.get(&e.creado_por).cloned();
                let ya_respondio = respondidas.as_ref().map(|set| set.contains(&e.id));
                EncuestaResponse::new(e, autor, ya_respondio)
            })
            .collect())
    }

    pub async fn create(
        &self,
        subject: &Subject,
        request: CreateEncuestaRequest,
    ) -> AppResult<Value> {
        require_admin(subject)?;

        let now = Utc::now();
        let encuesta = Encuesta {
            id: Uuid::new_v4(),
            titulo: request.titulo.trim().to_string(),
            descripcion: request.descripcion.unwrap_or_default().trim().to_string(),
            preguntas: request
                .preguntas
                .into_iter()
                .map(|p| p.into_pregunta())
                .collect(),
            creado_por: subject.id(),
            estado: EstadoEncuesta::Abierta,
            fecha_cierre: request.fecha_cierre,
            anonima: request.anonima,
            created_at: now,
            updated_at: now,
        };

        let encuesta = self.repos.encuestas.create(encuesta).await?;
        tracing::info!(
            encuesta_id = %encuesta.id,
            preguntas = encuesta.preguntas.len(),
            "📋 Encuesta creada"
        );

        let encuesta = self.to_responses(subject, vec![encuesta]).await?.into_iter().next();
        Ok(json!({
            "message": "Encuesta creada exitosamente",
            "encuesta": encuesta,
        }))
    }

    pub async fn list(&self, subject: &Subject) -> AppResult<Value> {
        let encuestas = self.repos.encuestas.list(!subject.is_admin()).await?;
        Ok(json!({ "encuestas": self.to_responses(subject, encuestas).await? }))
    }

    pub async fn get(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        let encuesta = self.find(id).await?;
        let encuesta = self.to_responses(subject, vec![encuesta]).await?.into_iter().next();
        Ok(json!({ "encuesta": encuesta }))
    }

    /// Registra la respuesta del usuario; exige contestar todas las preguntas
    pub async fn responder(
        &self,
        subject: &Subject,
        id: Uuid,
        request: ResponderEncuestaRequest,
    ) -> AppResult<Value> {
        let encuesta = self.find(id).await?;

        if !encuesta.accepts_responses_at(Utc::now()) {
            return Err(bad_request_error("Esta encuesta ya está cerrada"));
        }

        let contestadas: HashSet<Uuid> = request.respuestas.iter().map(|r| r.pregunta_id).collect();
        if encuesta.preguntas.iter().any(|p| !contestadas.contains(&p.id)) {
            return Err(bad_request_error("Debes responder todas las preguntas"));
        }

        let now = Utc::now();
        let respuesta = RespuestaEncuesta {
            id: Uuid::new_v4(),
            encuesta_id: encuesta.id,
            usuario_id: subject.id(),
            respuestas: request.respuestas,
            created_at: now,
            updated_at: now,
        };

        self.repos.encuestas.create_respuesta(respuesta).await?;
        tracing::info!(encuesta_id = %encuesta.id, usuario_id = %subject.id(), "🗳️ Respuesta registrada");

        Ok(json!({ "message": "Respuesta enviada exitosamente" }))
    }

    pub async fn resultados(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        let encuesta = self.find(id).await?;
        let respuestas = self.repos.encuestas.respuestas_de(id).await?;
        let resultados = aggregate(&encuesta, &respuestas);

        let detalladas = if encuesta.anonima {
            None
        } else {
            let ids: Vec<Uuid> = respuestas.iter().map(|r| r.usuario_id).collect();
            let usuarios = self.repos.users.summaries(&ids).await?;
            Some(
                respuestas
                    .iter()
                    .map(|r| RespuestaDetallada {
                        id: r.id,
                        usuario: usuarios.get(&r.usuario_id).cloned(),
                        respuestas: r.respuestas.clone(),
                        created_at: r.created_at,
                    })
                    .collect::<Vec<_>>(),
            )
        };

        Ok(json!({
            "encuesta": {
                "titulo": encuesta.titulo,
                "descripcion": encuesta.descripcion,
                "totalRespuestas": respuestas.len(),
            },
            "resultados": resultados,
            "respuestasDetalladas": detalladas,
        }))
    }

    pub async fn exportar(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        let encuesta = self.find(id).await?;
        let respuestas = self.repos.encuestas.respuestas_de(id).await?;
        let ids: Vec<Uuid> = respuestas.iter().map(|r| r.usuario_id).collect();
        let usuarios = self.repos.users.summaries(&ids).await?;

        let datos = export_rows(&encuesta, &respuestas, &usuarios);
        Ok(json!({ "total": datos.len(), "datos": datos }))
    }

    pub async fn cerrar(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        let encuesta = self
            .repos
            .encuestas
            .update_estado(id, EstadoEncuesta::Cerrada)
            .await?
            .ok_or_else(encuesta_no_encontrada)?;
        tracing::info!(encuesta_id = %encuesta.id, "🔒 Encuesta cerrada");

        let encuesta = self.to_responses(subject, vec![encuesta]).await?.into_iter().next();
        Ok(json!({
            "message": "Encuesta cerrada exitosamente",
            "encuesta": encuesta,
        }))
    }

    pub async fn delete(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        if !self.repos.encuestas.delete(id).await? {
            return Err(encuesta_no_encontrada());
        }

        Ok(json!({ "message": "Encuesta eliminada exitosamente" }))
    }
}
