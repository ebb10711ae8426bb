use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::encuesta::{Pregunta, RespuestaPregunta, TipoPregunta};
use crate::utils::validation::{deserialize_optional_datetime, validate_not_blank};

fn default_escala_min() -> i32 {
    1
}

fn default_escala_max() -> i32 {
    5
}

// Pregunta tal como llega al crear la encuesta (sin id)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreguntaInput {
    pub texto_pregunta: String,
    pub tipo_pregunta: TipoPregunta,
    #[serde(default)]
    pub opciones: Vec<String>,
    #[serde(default = "default_escala_min")]
    pub escala_min: i32,
    #[serde(default = "default_escala_max")]
    pub escala_max: i32,
}

impl PreguntaInput {
    pub fn into_pregunta(self) -> Pregunta {
        Pregunta {
            id: Uuid::new_v4(),
            texto_pregunta: self.texto_pregunta.trim().to_string(),
            tipo_pregunta: self.tipo_pregunta,
            opciones: self
                .opciones
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            escala_min: self.escala_min,
            escala_max: self.escala_max,
        }
    }
}

// Request para crear una encuesta (solo admin)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_preguntas"))]
pub struct CreateEncuestaRequest {
    #[validate(custom = "validate_not_blank")]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[validate(length(min = 1, message = "Se requiere al menos una pregunta"))]
    pub preguntas: Vec<PreguntaInput>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub fecha_cierre: Option<DateTime<Utc>>,
    #[serde(default)]
    pub anonima: bool,
}

// Request para responder una encuesta
#[derive(Debug, Deserialize, Validate)]
pub struct ResponderEncuestaRequest {
    #[validate(length(min = 1, message = "Debes responder todas las preguntas"))]
    pub respuestas: Vec<RespuestaPregunta>,
}

fn validate_preguntas(request: &CreateEncuestaRequest) -> Result<(), ValidationError> {
    for pregunta in &request.preguntas {
        if pregunta.texto_pregunta.trim().is_empty() {
            let mut error = ValidationError::new("pregunta_vacia");
            error.message = Some("Cada pregunta requiere un texto".into());
            return Err(error);
        }

        match pregunta.tipo_pregunta {
            TipoPregunta::OpcionMultiple
                if pregunta.opciones.iter().all(|o| o.trim().is_empty()) =>
            {
                let mut error = ValidationError::new("opciones_requeridas");
                error.message = Some("Las preguntas de opción múltiple requieren opciones".into());
                return Err(error);
            }
            TipoPregunta::Escala if pregunta.escala_max <= pregunta.escala_min => {
                let mut error = ValidationError::new("escala_invalida");
                error.message = Some("escalaMax debe ser mayor que escalaMin".into());
                return Err(error);
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(preguntas: serde_json::Value) -> CreateEncuestaRequest {
        serde_json::from_value(json!({ "titulo": "Alberca", "preguntas": preguntas })).unwrap()
    }

    #[test]
    fn test_scale_defaults() {
        let req = request(json!([{ "textoPregunta": "¿Qué tan limpia?", "tipoPregunta": "escala" }]));
        assert!(req.validate().is_ok());
        let pregunta = req.preguntas[0].clone().into_pregunta();
        assert_eq!((pregunta.escala_min, pregunta.escala_max), (1, 5));
    }

    #[test]
    fn test_multiple_choice_requires_options() {
        let req = request(json!([{ "textoPregunta": "¿Horario?", "tipoPregunta": "opcion_multiple" }]));
        assert!(req.validate().is_err());

        let req = request(json!([{
            "textoPregunta": "¿Horario?",
            "tipoPregunta": "opcion_multiple",
            "opciones": ["Mañana", "Tarde"]
        }]));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_requires_at_least_one_question() {
        assert!(request(json!([])).validate().is_err());
    }

    #[test]
    fn test_inverted_scale_is_invalid() {
        let req = request(json!([{
            "textoPregunta": "¿Ruido?",
            "tipoPregunta": "escala",
            "escalaMin": 5,
            "escalaMax": 1
        }]));
        assert!(req.validate().is_err());
    }
}
