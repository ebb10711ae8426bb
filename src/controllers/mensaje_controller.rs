//! Controlador de mensajería residente ↔ administración

use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    dto::mensaje_dto::{ConversacionQuery, EnviarMensajeRequest, MarcarLeidoRequest},
    models::{
        auth::Subject,
        mensaje::{Mensaje, MensajeResponse},
    },
    repositories::Repositories,
    services::{
        authorization_service::require_admin,
        conversation_service::{group_threads, with_summaries},
    },
    state::AppState,
    utils::errors::{bad_request_error, not_found_error, AppResult},
};

pub struct MensajeController {
    repos: Repositories,
}

impl MensajeController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    async fn to_responses(&self, mensajes: Vec<Mensaje>) -> AppResult<Vec<MensajeResponse>> {
        let mut ids: Vec<Uuid> = mensajes.iter().map(|m| m.de).collect();
        ids.extend(mensajes.iter().filter_map(|m| m.para));
        let usuarios = self.repos.users.summaries(&ids).await?;

        Ok(mensajes
            .into_iter()
            .map(|m| {
                let de = usuarios.get(&m.de).cloned();
                let para = m.para.and_then(|id| usuarios.get(&id).cloned());
                MensajeResponse::new(m, de, para)
            })
            .collect())
    }

    /// El admin escribe a un residente concreto; el residente escribe a la bandeja
    pub async fn enviar(&self, subject: &Subject, request: EnviarMensajeRequest) -> AppResult<Value> {
        let texto = request.mensaje.trim().to_string();

        let mensaje = match subject {
            Subject::Admin { id } => {
                let para = request
                    .para
                    .ok_or_else(|| bad_request_error("Debes especificar el destinatario"))?;
                if self.repos.users.find_by_id(para).await?.is_none() {
                    return Err(not_found_error("Usuario"));
                }
                Mensaje::new(*id, Some(para), texto, true)
            }
            Subject::Residente { id } => Mensaje::new(*id, None, texto, false),
        };

        let mensaje = self.repos.mensajes.create(mensaje).await?;
        tracing::debug!(mensaje_id = %mensaje.id, de = %mensaje.de, "✉️ Mensaje enviado");

        let mensaje = self
            .to_responses(vec![mensaje])
            .await?
            .into_iter()
            .next();

        Ok(json!({ "message": "Mensaje enviado", "mensaje": mensaje }))
    }

    pub async fn conversacion(&self, subject: &Subject, query: ConversacionQuery) -> AppResult<Value> {
        let mensajes = match subject {
            Subject::Admin { id } => {
                let usuario_id = query
                    .con_usuario_id
                    .ok_or_else(|| bad_request_error("Debes especificar con qué usuario hablar"))?;
                self.repos.mensajes.conversacion_admin(*id, usuario_id).await?
            }
            Subject::Residente { id } => self.repos.mensajes.conversacion_residente(*id).await?,
        };

        Ok(json!({ "mensajes": self.to_responses(mensajes).await? }))
    }

    pub async fn marcar_leido(&self, subject: &Subject, request: MarcarLeidoRequest) -> AppResult<Value> {
        let marcados = match subject {
            Subject::Admin { .. } => {
                let usuario_id = request
                    .con_usuario_id
                    .ok_or_else(|| bad_request_error("Debes especificar con qué usuario hablar"))?;
                self.repos.mensajes.marcar_leidos_de(usuario_id).await?
            }
            Subject::Residente { id } => self.repos.mensajes.marcar_leidos_para(*id).await?,
        };

        Ok(json!({ "message": "Mensajes marcados como leídos", "marcados": marcados }))
    }

    pub async fn no_leidos(&self, subject: &Subject) -> AppResult<Value> {
        let count = match subject {
            Subject::Admin { .. } => self.repos.mensajes.contar_no_leidos_bandeja().await?,
            Subject::Residente { id } => self.repos.mensajes.contar_no_leidos_para(*id).await?,
        };

        Ok(json!({ "noLeidos": count }))
    }

    pub async fn conversaciones(&self, subject: &Subject) -> AppResult<Value> {
        require_admin(subject)?;

        let mensajes = self.repos.mensajes.list_admin_facing().await?;
        let hilos = group_threads(&mensajes);
        let ids: Vec<Uuid> = hilos.iter().map(|h| h.usuario_id).collect();
        let usuarios = self.repos.users.summaries(&ids).await?;

        Ok(json!({ "conversaciones": with_summaries(hilos, &usuarios) }))
    }
}
