//! Agrupación de conversaciones para la bandeja de administración

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    common::UsuarioResumen,
    mensaje::{ConversacionResumen, Mensaje},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Hilo {
    pub usuario_id: Uuid,
    pub ultimo_mensaje: String,
    pub ultima_fecha: DateTime<Utc>,
    pub no_leidos: u64,
}

/// Agrupa los mensajes por residente. El hilo más reciente va primero.
pub fn group_threads(mensajes: &[Mensaje]) -> Vec<Hilo> {
    let mut hilos: HashMap<Uuid, Hilo> = HashMap::new();

    for mensaje in mensajes.iter().filter(|m| m.is_admin_facing()) {
        let hilo = hilos.entry(mensaje.counterpart()).or_insert_with(|| Hilo {
            usuario_id: mensaje.counterpart(),
            ultimo_mensaje: mensaje.mensaje.clone(),
            ultima_fecha: mensaje.created_at,
            no_leidos: 0,
        });

        if mensaje.created_at >= hilo.ultima_fecha {
            hilo.ultimo_mensaje = mensaje.mensaje.clone();
            hilo.ultima_fecha = mensaje.created_at;
        }
        if !mensaje.leido && !mensaje.es_del_admin {
            hilo.no_leidos += 1;
        }
    }

    let mut hilos: Vec<Hilo> = hilos.into_values().collect();
    hilos.sort_by(|a, b| b.ultima_fecha.cmp(&a.ultima_fecha));
    hilos
}

/// Une cada hilo con el resumen del residente
pub fn with_summaries(
    hilos: Vec<Hilo>,
    usuarios: &HashMap<Uuid, UsuarioResumen>,
) -> Vec<ConversacionResumen> {
    hilos
        .into_iter()
        .map(|hilo| ConversacionResumen {
            usuario: usuarios.get(&hilo.usuario_id).cloned(),
            ultimo_mensaje: hilo.ultimo_mensaje,
            ultima_fecha: hilo.ultima_fecha,
            no_leidos: hilo.no_leidos,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn mensaje(de: Uuid, para: Option<Uuid>, texto: &str, minutos: i64, del_admin: bool) -> Mensaje {
        let mut m = Mensaje::new(de, para, texto.into(), del_admin);
        m.created_at = Utc::now() - Duration::minutes(100 - minutos);
        m
    }

    #[test]
    fn test_group_threads() {
        let admin = Uuid::new_v4();
        let ana = Uuid::new_v4();
        let luis = Uuid::new_v4();

        let mensajes = vec![
            mensaje(ana, None, "Hola", 1, false),
            mensaje(admin, Some(ana), "¿En qué ayudo?", 2, true),
            mensaje(luis, None, "Fuga en B-2", 3, false),
            mensaje(ana, None, "La alberca", 4, false),
            mensaje(luis, None, "Sigue la fuga", 5, false),
        ];

        let hilos = group_threads(&mensajes);
        assert_eq!(hilos.len(), 2);

        assert_eq!(hilos[0].usuario_id, luis);
        assert_eq!(hilos[0].ultimo_mensaje, "Sigue la fuga");
        assert_eq!(hilos[0].no_leidos, 2);

        assert_eq!(hilos[1].usuario_id, ana);
        assert_eq!(hilos[1].ultimo_mensaje, "La alberca");
        // El mensaje del admin no cuenta como no leído
        assert_eq!(hilos[1].no_leidos, 2);
    }

    #[test]
    fn test_read_messages_are_not_counted() {
        let ana = Uuid::new_v4();
        let mut leido = mensaje(ana, None, "Hola", 1, false);
        leido.leido = true;
        let hilos = group_threads(&[leido]);
        assert_eq!(hilos[0].no_leidos, 0);
    }
}
