use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    dto::anuncio_dto::{AnuncioFilters, CreateAnuncioRequest, UpdateAnuncioRequest},
    models::{
        anuncio::{Anuncio, AnuncioResponse, EstadoAnuncio},
        auth::Subject,
    },
    repositories::Repositories,
    services::authorization_service::require_admin,
    state::AppState,
    utils::errors::{not_found_error, AppResult},
};

pub struct AnuncioController {
    repos: Repositories,
}

impl AnuncioController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    async fn to_response(&self, anuncio: Anuncio) -> AppResult<AnuncioResponse> {
        let autor = self.repos.users.summary(anuncio.creado_por).await?;
        Ok(AnuncioResponse::new(anuncio, autor))
    }

    pub async fn create(&self, subject: &Subject, request: CreateAnuncioRequest) -> AppResult<Value> {
        require_admin(subject)?;

        let now = Utc::now();
        let anuncio = Anuncio {
            id: Uuid::new_v4(),
            titulo: request.titulo.trim().to_string(),
            descripcion: request.descripcion.trim().to_string(),
            tipo: request.tipo,
            prioridad: request.prioridad,
            creado_por: subject.id(),
            estado: EstadoAnuncio::Activo,
            created_at: now,
            updated_at: now,
        };

        let anuncio = self.repos.anuncios.create(anuncio).await?;
        tracing::info!(anuncio_id = %anuncio.id, "📢 Anuncio creado");

        Ok(json!({
            "message": "Anuncio creado",
            "anuncio": self.to_response(anuncio).await?,
        }))
    }

    pub async fn list(&self, filters: AnuncioFilters) -> AppResult<Value> {
        let anuncios = self.repos.anuncios.list_activos(filters.tipo).await?;

        let ids: Vec<Uuid> = anuncios.iter().map(|a| a.creado_por).collect();
        let autores = self.repos.users.summaries(&ids).await?;
        let anuncios: Vec<AnuncioResponse> = anuncios
            .into_iter()
            .map(|a| {
                let autor = autores.get(&a.creado_por).cloned();
                AnuncioResponse::new(a, autor)
            })
            .collect();

        Ok(json!({ "anuncios": anuncios }))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Value> {
        let anuncio = self
            .repos
            .anuncios
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Anuncio"))?;

        Ok(json!({ "anuncio": self.to_response(anuncio).await? }))
    }

    pub async fn update(
        &self,
        subject: &Subject,
        id: Uuid,
        request: UpdateAnuncioRequest,
    ) -> AppResult<Value> {
        require_admin(subject)?;

        let mut anuncio = self
            .repos
            .anuncios
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Anuncio"))?;

        if let Some(titulo) = request.titulo {
            anuncio.titulo = titulo.trim().to_string();
        }
        if let Some(descripcion) = request.descripcion {
            anuncio.descripcion = descripcion.trim().to_string();
        }
        if let Some(tipo) = request.tipo {
            anuncio.tipo = tipo;
        }
        if let Some(prioridad) = request.prioridad {
            anuncio.prioridad = prioridad;
        }
        if let Some(activo) = request.activo {
            anuncio.estado = EstadoAnuncio::from_activo(activo);
        }

        let anuncio = self.repos.anuncios.update(anuncio).await?;

        Ok(json!({
            "message": "Anuncio actualizado",
            "anuncio": self.to_response(anuncio).await?,
        }))
    }

    /// Archiva el anuncio; deja de aparecer en el listado
    pub async fn archive(&self, subject: &Subject, id: Uuid) -> AppResult<Value> {
        require_admin(subject)?;

        let mut anuncio = self
            .repos
            .anuncios
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Anuncio"))?;

        anuncio.estado = EstadoAnuncio::Archivado;
        let anuncio = self.repos.anuncios.update(anuncio).await?;
        tracing::info!(anuncio_id = %anuncio.id, "🗄️ Anuncio archivado");

        Ok(json!({
            "message": "Anuncio desactivado",
            "anuncio": self.to_response(anuncio).await?,
        }))
    }
}
