use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Request para enviar un mensaje; `para` solo se usa cuando escribe un admin
#[derive(Debug, Deserialize, Validate)]
pub struct EnviarMensajeRequest {
    #[serde(default)]
    pub para: Option<Uuid>,
    #[validate(custom = "validate_not_blank")]
    pub mensaje: String,
}

// Query de la conversación
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversacionQuery {
    pub con_usuario_id: Option<Uuid>,
}

// Request para marcar mensajes como leídos
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarcarLeidoRequest {
    #[serde(default)]
    pub con_usuario_id: Option<Uuid>,
}
