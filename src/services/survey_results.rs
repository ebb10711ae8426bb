//! Agregación de resultados de encuestas
//!
//! Las respuestas se asocian a cada pregunta por `preguntaId`.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{
    common::UsuarioResumen,
    encuesta::{Encuesta, Pregunta, RespuestaEncuesta, TipoPregunta},
};

/// Resumen de una pregunta según su tipo
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resumen {
    /// Conteo por opción, todas las opciones presentes
    Conteo(Map<String, Value>),
    Escala { promedio: f64, total: u64 },
    Textos(Vec<String>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoPregunta {
    pub pregunta_id: Uuid,
    pub pregunta: String,
    pub tipo: TipoPregunta,
    pub resumen: Resumen,
}

fn respuestas_a<'a>(
    pregunta: &'a Pregunta,
    respuestas: &'a [RespuestaEncuesta],
) -> impl Iterator<Item = &'a Value> + 'a {
    respuestas.iter().flat_map(move |r| {
        r.respuestas
            .iter()
            .filter(move |rp| rp.pregunta_id == pregunta.id)
            .map(|rp| &rp.respuesta)
    })
}

fn resumir(pregunta: &Pregunta, respuestas: &[RespuestaEncuesta]) -> Resumen {
    match pregunta.tipo_pregunta {
        TipoPregunta::OpcionMultiple => {
            let mut conteo = Map::new();
            for opcion in &pregunta.opciones {
                let total = respuestas_a(pregunta, respuestas)
                    .filter(|valor| valor.as_str() == Some(opcion.as_str()))
                    .count();
                conteo.insert(opcion.clone(), Value::from(total as u64));
            }
            Resumen::Conteo(conteo)
        }
        TipoPregunta::Escala => {
            let valores: Vec<f64> = respuestas_a(pregunta, respuestas)
                .filter_map(Value::as_f64)
                .collect();
            let promedio = if valores.is_empty() {
                0.0
            } else {
                valores.iter().sum::<f64>() / valores.len() as f64
            };
            Resumen::Escala {
                promedio: (promedio * 100.0).round() / 100.0,
                total: valores.len() as u64,
            }
        }
        TipoPregunta::TextoLibre => Resumen::Textos(
            respuestas_a(pregunta, respuestas)
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|texto| !texto.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    }
}

/// Resumen por pregunta, en el orden de la encuesta
pub fn aggregate(encuesta: &Encuesta, respuestas: &[RespuestaEncuesta]) -> Vec<ResultadoPregunta> {
    encuesta
        .preguntas
        .iter()
        .map(|pregunta| ResultadoPregunta {
            pregunta_id: pregunta.id,
            pregunta: pregunta.texto_pregunta.clone(),
            tipo: pregunta.tipo_pregunta,
            resumen: resumir(pregunta, respuestas),
        })
        .collect()
}

/// Tabla plana para exportar: una fila por respuesta y un par
/// `pregunta_N` / `respuesta_N` por pregunta. En encuestas anónimas las
/// columnas del usuario van vacías.
pub fn export_rows(
    encuesta: &Encuesta,
    respuestas: &[RespuestaEncuesta],
    usuarios: &HashMap<Uuid, UsuarioResumen>,
) -> Vec<Map<String, Value>> {
    respuestas
        .iter()
        .map(|respuesta| {
            let usuario = if encuesta.anonima {
                None
            } else {
                usuarios.get(&respuesta.usuario_id)
            };

            let mut fila = Map::new();
            fila.insert("encuesta_id".into(), Value::from(encuesta.id.to_string()));
            fila.insert("encuesta_titulo".into(), Value::from(encuesta.titulo.clone()));
            fila.insert(
                "usuario_id".into(),
                if encuesta.anonima {
                    Value::Null
                } else {
                    Value::from(respuesta.usuario_id.to_string())
                },
            );
            fila.insert(
                "usuario_nombre".into(),
                usuario.map_or(Value::Null, |u| Value::from(u.name.clone())),
            );
            fila.insert(
                "usuario_email".into(),
                usuario.map_or(Value::Null, |u| Value::from(u.email.clone())),
            );
            fila.insert(
                "usuario_unidad".into(),
                usuario.map_or(Value::Null, |u| Value::from(u.unidad.clone())),
            );
            fila.insert(
                "fecha_respuesta".into(),
                Value::from(respuesta.created_at.to_rfc3339()),
            );

            for (index, pregunta) in encuesta.preguntas.iter().enumerate() {
                let valor = respuesta
                    .respuestas
                    .iter()
                    .find(|rp| rp.pregunta_id == pregunta.id)
                    .map_or(Value::Null, |rp| rp.respuesta.clone());
                fila.insert(
                    format!("pregunta_{}", index + 1),
                    Value::from(pregunta.texto_pregunta.clone()),
                );
                fila.insert(format!("respuesta_{}", index + 1), valor);
            }

            fila
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        auth::Role,
        encuesta::{EstadoEncuesta, RespuestaPregunta},
    };
    use chrono::Utc;
    use serde_json::json;

    fn pregunta(texto: &str, tipo: TipoPregunta, opciones: &[&str]) -> Pregunta {
        Pregunta {
            id: Uuid::new_v4(),
            texto_pregunta: texto.into(),
            tipo_pregunta: tipo,
            opciones: opciones.iter().map(|o| o.to_string()).collect(),
            escala_min: 1,
            escala_max: 5,
        }
    }

    fn encuesta(preguntas: Vec<Pregunta>, anonima: bool) -> Encuesta {
        let now = Utc::now();
        Encuesta {
            id: Uuid::new_v4(),
            titulo: "Amenidades".into(),
            descripcion: String::new(),
            preguntas,
            creado_por: Uuid::new_v4(),
            estado: EstadoEncuesta::Abierta,
            fecha_cierre: None,
            anonima,
            created_at: now,
            updated_at: now,
        }
    }

    fn respuesta(encuesta: &Encuesta, valores: Vec<Value>) -> RespuestaEncuesta {
        let now = Utc::now();
        RespuestaEncuesta {
            id: Uuid::new_v4(),
            encuesta_id: encuesta.id,
            usuario_id: Uuid::new_v4(),
            // Orden invertido: el match es por id, no por posición
            respuestas: encuesta
                .preguntas
                .iter()
                .zip(valores)
                .map(|(p, v)| RespuestaPregunta {
                    pregunta_id: p.id,
                    respuesta: v,
                })
                .rev()
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_aggregate_by_question_type() {
        let encuesta = encuesta(
            vec![
                pregunta("Horario", TipoPregunta::OpcionMultiple, &["Mañana", "Tarde", "Noche"]),
                pregunta("Limpieza", TipoPregunta::Escala, &[]),
                pregunta("Comentarios", TipoPregunta::TextoLibre, &[]),
            ],
            false,
        );
        let respuestas = vec![
            respuesta(&encuesta, vec![json!("Mañana"), json!(4), json!("Muy bien")]),
            respuesta(&encuesta, vec![json!("Mañana"), json!(5), json!("")]),
            respuesta(&encuesta, vec![json!("Tarde"), json!(4), json!("Falta luz")]),
        ];

        let resultados = aggregate(&encuesta, &respuestas);

        match &resultados[0].resumen {
            Resumen::Conteo(conteo) => {
                assert_eq!(conteo["Mañana"], json!(2));
                assert_eq!(conteo["Tarde"], json!(1));
                assert_eq!(conteo["Noche"], json!(0));
            }
            other => panic!("resumen inesperado: {:?}", other),
        }
        assert_eq!(
            resultados[1].resumen,
            Resumen::Escala {
                promedio: 4.33,
                total: 3
            }
        );
        assert_eq!(
            resultados[2].resumen,
            Resumen::Textos(vec!["Muy bien".into(), "Falta luz".into()])
        );
    }

    #[test]
    fn test_scale_without_answers_is_zero() {
        let encuesta = encuesta(vec![pregunta("Ruido", TipoPregunta::Escala, &[])], false);
        let resultados = aggregate(&encuesta, &[]);
        assert_eq!(
            resultados[0].resumen,
            Resumen::Escala {
                promedio: 0.0,
                total: 0
            }
        );
    }

    #[test]
    fn test_export_rows() {
        let encuesta = encuesta(vec![pregunta("Limpieza", TipoPregunta::Escala, &[])], false);
        let respuesta = respuesta(&encuesta, vec![json!(3)]);
        let usuarios = HashMap::from([(
            respuesta.usuario_id,
            UsuarioResumen {
                id: respuesta.usuario_id,
                name: "Ana".into(),
                email: "ana@condo.mx".into(),
                unidad: "A-101".into(),
                role: Role::Usuario,
            },
        )]);

        let filas = export_rows(&encuesta, &[respuesta], &usuarios);
        assert_eq!(filas.len(), 1);
        assert_eq!(filas[0]["usuario_nombre"], json!("Ana"));
        assert_eq!(filas[0]["pregunta_1"], json!("Limpieza"));
        assert_eq!(filas[0]["respuesta_1"], json!(3));
    }

    #[test]
    fn test_export_hides_identity_of_anonymous_surveys() {
        let encuesta = encuesta(vec![pregunta("Limpieza", TipoPregunta::Escala, &[])], true);
        let respuesta = respuesta(&encuesta, vec![json!(3)]);
        let filas = export_rows(&encuesta, &[respuesta], &HashMap::new());
        assert_eq!(filas[0]["usuario_id"], Value::Null);
        assert_eq!(filas[0]["usuario_nombre"], Value::Null);
    }
}
