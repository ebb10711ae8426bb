//! Reglas de autorización
//!
//! Las tres formas de control de acceso de la API: solo admin, propietario o
//! admin, y la mutación restringida del propietario.

use uuid::Uuid;

use crate::{
    models::auth::Subject,
    utils::errors::{forbidden_error, AppError},
};

/// Nivel de acceso de un sujeto sobre un registro que puede modificar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceso {
    /// Administrador: cualquier campo
    Total,
    /// Propietario no admin: solo la transición permitida
    SoloPropietario,
}

/// Verifica si el sujeto es el propietario de un registro
pub fn is_owner(subject: &Subject, owner_id: Uuid) -> bool {
    subject.id() == owner_id
}

/// Verifica si el sujeto es administrador
pub fn is_admin(subject: &Subject) -> bool {
    subject.is_admin()
}

/// Solo administradores
pub fn require_admin(subject: &Subject) -> Result<(), AppError> {
    match subject {
        Subject::Admin { .. } => Ok(()),
        Subject::Residente { .. } => Err(forbidden_error(
            "Acceso denegado. Se requieren permisos de administrador",
        )),
    }
}

/// Propietario del registro o administrador
pub fn require_owner_or_admin(
    subject: &Subject,
    owner_id: Uuid,
    message: &str,
) -> Result<(), AppError> {
    if is_admin(subject) || is_owner(subject, owner_id) {
        Ok(())
    } else {
        Err(forbidden_error(message))
    }
}

/// Resuelve el nivel de acceso para modificar un registro
pub fn authorize_mutation(
    subject: &Subject,
    owner_id: Uuid,
    message: &str,
) -> Result<Acceso, AppError> {
    require_owner_or_admin(subject, owner_id, message)?;
    Ok(match subject {
        Subject::Admin { .. } => Acceso::Total,
        Subject::Residente { .. } => Acceso::SoloPropietario,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        let id = Uuid::new_v4();
        assert!(require_admin(&Subject::Admin { id }).is_ok());
        assert!(matches!(
            require_admin(&Subject::Residente { id }),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_owner_or_admin() {
        let owner = Uuid::new_v4();
        let otro = Uuid::new_v4();

        assert!(require_owner_or_admin(&Subject::Residente { id: owner }, owner, "x").is_ok());
        assert!(require_owner_or_admin(&Subject::Admin { id: otro }, owner, "x").is_ok());
        assert!(require_owner_or_admin(&Subject::Residente { id: otro }, owner, "x").is_err());
    }

    #[test]
    fn test_authorize_mutation_levels() {
        let owner = Uuid::new_v4();
        assert_eq!(
            authorize_mutation(&Subject::Admin { id: Uuid::new_v4() }, owner, "x").unwrap(),
            Acceso::Total
        );
        assert_eq!(
            authorize_mutation(&Subject::Residente { id: owner }, owner, "x").unwrap(),
            Acceso::SoloPropietario
        );
        assert!(authorize_mutation(&Subject::Residente { id: Uuid::new_v4() }, owner, "x").is_err());
    }

    #[test]
    fn test_is_owner() {
        let id = Uuid::new_v4();
        assert!(is_owner(&Subject::Residente { id }, id));
        assert!(!is_owner(&Subject::Admin { id }, Uuid::new_v4()));
        assert!(is_admin(&Subject::Admin { id }));
    }
}
