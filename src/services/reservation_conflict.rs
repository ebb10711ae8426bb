//! Detección de traslapes de reservaciones
//!
//! Dos reservaciones del mismo área y fecha chocan cuando sus intervalos
//! `[inicio, fin)` se traslapan. Las canceladas nunca participan.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::models::{
    common::HoraDelDia,
    reservacion::{AreaComun, Reservacion},
};

/// `true` si `[inicio, fin)` choca con alguna reservación no cancelada,
/// ignorando la reservación `exclude` (la que se está editando)
pub fn has_conflict(
    existentes: &[Reservacion],
    inicio: HoraDelDia,
    fin: HoraDelDia,
    exclude: Option<Uuid>,
) -> bool {
    existentes
        .iter()
        .filter(|r| !r.is_cancelled())
        .filter(|r| Some(r.id) != exclude)
        .any(|r| r.hora_inicio < fin && r.hora_fin > inicio)
}

/// Candados por (área, fecha) para serializar verificación e inserción
#[derive(Clone, Default)]
pub struct ReservationLocks {
    locks: Arc<Mutex<HashMap<(AreaComun, NaiveDate), Arc<Mutex<()>>>>>,
}

impl ReservationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toma el candado del slot; se libera al soltar el guard
    pub async fn acquire(&self, area: AreaComun, fecha: NaiveDate) -> OwnedMutexGuard<()> {
        let slot = {
            let mut locks = self.locks.lock().await;
            // Descarta candados que nadie más sostiene
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry((area, fecha))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        slot.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservacion::EstadoReservacion;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn hora(h: u32) -> HoraDelDia {
        HoraDelDia::hm(h, 0).unwrap()
    }

    fn reservacion(inicio: u32, fin: u32, estado: EstadoReservacion) -> Reservacion {
        let now = Utc::now();
        Reservacion {
            id: Uuid::new_v4(),
            usuario_id: Uuid::new_v4(),
            area: AreaComun::Alberca,
            fecha: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            hora_inicio: hora(inicio),
            hora_fin: hora(fin),
            estado,
            notas: String::new(),
            costo: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_alberca_scenario() {
        let existentes = vec![reservacion(14, 16, EstadoReservacion::Confirmada)];

        assert!(has_conflict(&existentes, hora(15), hora(17), None));
        // El fin de una coincide con el inicio de la otra: no hay traslape
        assert!(!has_conflict(&existentes, hora(16), hora(18), None));
        assert!(!has_conflict(&existentes, hora(12), hora(14), None));
    }

    #[test]
    fn test_contained_and_containing_intervals() {
        let existentes = vec![reservacion(14, 16, EstadoReservacion::Pendiente)];
        assert!(has_conflict(&existentes, hora(14), hora(15), None));
        assert!(has_conflict(&existentes, hora(10), hora(20), None));
    }

    #[test]
    fn test_cancelled_reservations_free_the_slot() {
        let existentes = vec![reservacion(14, 16, EstadoReservacion::Cancelada)];
        assert!(!has_conflict(&existentes, hora(14), hora(16), None));
    }

    #[test]
    fn test_excluded_reservation_does_not_conflict_with_itself() {
        let existente = reservacion(14, 16, EstadoReservacion::Confirmada);
        let id = existente.id;
        let existentes = vec![existente];
        assert!(!has_conflict(&existentes, hora(14), hora(17), Some(id)));
        assert!(has_conflict(&existentes, hora(14), hora(17), None));
    }

    #[tokio::test]
    async fn test_locks_are_per_slot() {
        let locks = ReservationLocks::new();
        let fecha = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let _alberca = locks.acquire(AreaComun::Alberca, fecha).await;
        // Otro slot no espera al primero
        let _gym = locks.acquire(AreaComun::Gym, fecha).await;

        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            locks.acquire(AreaComun::Alberca, fecha),
        )
        .await;
        assert!(pending.is_err());
    }
}
