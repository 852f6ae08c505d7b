//! Record shapes stored by the BanQuito application
//!
//! Only the shape is modelled here: typed fields, wire names and the
//! conversion to BSON. Balances and amounts are exact decimals and are
//! written as BSON `Decimal128`.

use crate::error::BootstrapResult;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document};
use rust_decimal::Decimal;

mod account;
pub mod decimal;
mod enums;
mod movement;

pub use account::BankAccount;
pub use enums::{AccountStatus, AccountType, MovementType, UnknownVariant};
pub use movement::AccountMovement;

/// Wire field names
pub mod fields {
    /// Fields of `cuentas_bancarias` documents
    pub mod account {
        pub const NUMERO_CUENTA: &str = "numeroCuenta";
        pub const CLIENTE_IDENTIFICACION: &str = "clienteIdentificacion";
        pub const CLIENTE_NOMBRE: &str = "clienteNombre";
        pub const TIPO_CUENTA: &str = "tipoCuenta";
        pub const ESTADO_CUENTA: &str = "estadoCuenta";
        pub const SALDO_DISPONIBLE: &str = "saldoDisponible";
        pub const SALDO_CONTABLE: &str = "saldoContable";
        pub const LIMITE_SOBREGIRO: &str = "limiteSobregiro";
        pub const FECHA_CREACION: &str = "fechaCreacion";
        pub const FECHA_ULTIMA_ACTUALIZACION: &str = "fechaUltimaActualizacion";
        pub const MONEDA: &str = "moneda";
        pub const SUCURSAL: &str = "sucursal";
        pub const EJECUTIVO: &str = "ejecutivo";
        pub const PERMITE_DEBITO: &str = "permiteDebito";
        pub const PERMITE_CREDITO: &str = "permiteCredito";
        pub const GENERA_EXTRACTOS: &str = "generaExtractos";
        pub const DIAS_INACTIVIDAD: &str = "diasInactividad";
    }

    /// Fields of `movimientos_cuenta` documents
    pub mod movement {
        pub const NUMERO_CUENTA: &str = "numeroCuenta";
        pub const NUMERO_COMPROBANTE: &str = "numeroComprobante";
        pub const TIPO_MOVIMIENTO: &str = "tipoMovimiento";
        pub const MONTO: &str = "monto";
        pub const CONCEPTO: &str = "concepto";
        pub const DESCRIPCION: &str = "descripcion";
        pub const SALDO_ANTERIOR: &str = "saldoAnterior";
        pub const SALDO_POSTERIOR: &str = "saldoPosterior";
        pub const FECHA_MOVIMIENTO: &str = "fechaMovimiento";
        pub const FECHA_VALOR: &str = "fechaValor";
        pub const SUCURSAL: &str = "sucursal";
        pub const CAJERO: &str = "cajero";
        pub const CANAL_TRANSACCION: &str = "canalTransaccion";
        pub const REFERENCIA_EXTERNA: &str = "referenciaExterna";
        pub const OBSERVACIONES: &str = "observaciones";
        pub const PROCESADO: &str = "procesado";
        pub const REVERSADO: &str = "reversado";
        pub const MOVIMIENTO_REVERSO: &str = "movimientoReverso";
    }
}

/// Insert an optional value, omitting the key when absent
pub(crate) fn put_opt<T: Into<Bson>>(doc: &mut Document, key: &str, value: Option<T>) {
    if let Some(value) = value {
        doc.insert(key, value.into());
    }
}

pub(crate) fn decimal_bson(value: Decimal) -> BootstrapResult<Bson> {
    decimal::to_decimal128(value).map(Bson::Decimal128)
}

pub(crate) fn datetime_bson(value: DateTime<Utc>) -> Bson {
    Bson::DateTime(bson::DateTime::from_millis(value.timestamp_millis()))
}
