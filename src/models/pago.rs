//! Modelo de Pago

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::common::UsuarioResumen;

/// Concepto de cobro - mapea al ENUM concepto_pago
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "concepto_pago")]
pub enum ConceptoPago {
    Mantenimiento,
    Renta,
    #[serde(rename = "Reservación")]
    #[sqlx(rename = "Reservación")]
    Reservacion,
    Multa,
    Otro,
}

/// Estado del pago - mapea al ENUM estado_pago
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "estado_pago")]
pub enum EstadoPago {
    Pendiente,
    Pagado,
    Vencido,
}

/// Método de pago que se registra cuando no se especifica
pub const METODO_PAGO_NO_ESPECIFICADO: &str = "No especificado";

/// Pago - mapea a la tabla pagos
#[derive(Debug, Clone, FromRow)]
pub struct Pago {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub concepto: ConceptoPago,
    pub monto: Decimal,
    pub mes: String,
    pub fecha_vencimiento: NaiveDate,
    pub fecha_pago: Option<DateTime<Utc>>,
    pub estado: EstadoPago,
    pub metodo_pago: String,
    pub notas: String,
    pub registrado_por: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pago {
    /// Registra el pago con la fecha dada o la actual
    pub fn marcar_pagado(&mut self, fecha_pago: Option<DateTime<Utc>>, metodo_pago: Option<String>) {
        self.estado = EstadoPago::Pagado;
        self.fecha_pago = Some(fecha_pago.unwrap_or_else(Utc::now));
        self.metodo_pago = metodo_pago
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| METODO_PAGO_NO_ESPECIFICADO.to_string());
    }
}

/// Response de pago con usuario y registrador expandidos
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagoResponse {
    pub id: Uuid,
    pub usuario: Option<UsuarioResumen>,
    pub concepto: ConceptoPago,
    #[serde(with = "rust_decimal::serde::float")]
    pub monto: Decimal,
    pub mes: String,
    pub fecha_vencimiento: NaiveDate,
    pub fecha_pago: Option<DateTime<Utc>>,
    pub estado: EstadoPago,
    pub metodo_pago: String,
    pub notas: String,
    pub registrado_por: Option<UsuarioResumen>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PagoResponse {
    pub fn new(
        pago: Pago,
        usuario: Option<UsuarioResumen>,
        registrado_por: Option<UsuarioResumen>,
    ) -> Self {
        Self {
            id: pago.id,
            usuario,
            concepto: pago.concepto,
            monto: pago.monto,
            mes: pago.mes,
            fecha_vencimiento: pago.fecha_vencimiento,
            fecha_pago: pago.fecha_pago,
            estado: pago.estado,
            metodo_pago: pago.metodo_pago,
            notas: pago.notas,
            registrado_por,
            created_at: pago.created_at,
            updated_at: pago.updated_at,
        }
    }
}
