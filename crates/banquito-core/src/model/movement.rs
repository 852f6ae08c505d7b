//! Account movement record

use super::fields::movement as f;
use super::{MovementType, datetime_bson, decimal_bson, put_opt};
use crate::error::BootstrapResult;
use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A document of the `movimientos_cuenta` collection.
///
/// `account_number` refers to a bank account by value only; nothing checks
/// that the account exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountMovement {
    #[serde(rename = "numeroCuenta")]
    pub account_number: String,
    #[serde(rename = "numeroComprobante")]
    pub voucher_number: String,
    #[serde(rename = "tipoMovimiento")]
    pub movement_type: MovementType,
    #[serde(rename = "monto")]
    pub amount: Decimal,
    #[serde(rename = "concepto")]
    pub concept: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "saldoAnterior", default)]
    pub previous_balance: Option<Decimal>,
    #[serde(rename = "saldoPosterior", default)]
    pub resulting_balance: Option<Decimal>,
    #[serde(rename = "fechaMovimiento", default)]
    pub movement_date: Option<DateTime<Utc>>,
    #[serde(rename = "fechaValor", default)]
    pub value_date: Option<DateTime<Utc>>,
    #[serde(rename = "sucursal", default)]
    pub branch: Option<String>,
    #[serde(rename = "cajero", default)]
    pub teller: Option<String>,
    #[serde(rename = "canalTransaccion", default)]
    pub channel: Option<String>,
    #[serde(rename = "referenciaExterna", default)]
    pub external_reference: Option<String>,
    #[serde(rename = "observaciones", default)]
    pub remarks: Option<String>,
    #[serde(rename = "procesado", default)]
    pub processed: Option<bool>,
    #[serde(rename = "reversado", default)]
    pub reversed: Option<bool>,
    #[serde(rename = "movimientoReverso", default)]
    pub reversal_movement: Option<String>,
}

impl AccountMovement {
    /// A movement dated now, not yet processed nor reversed
    pub fn new(
        account_number: impl Into<String>,
        voucher_number: impl Into<String>,
        movement_type: MovementType,
        amount: Decimal,
        concept: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            account_number: account_number.into(),
            voucher_number: voucher_number.into(),
            movement_type,
            amount,
            concept: concept.into(),
            description: None,
            previous_balance: None,
            resulting_balance: None,
            movement_date: Some(now),
            value_date: Some(now),
            branch: None,
            teller: None,
            channel: None,
            external_reference: None,
            remarks: None,
            processed: Some(false),
            reversed: Some(false),
            reversal_movement: None,
        }
    }

    /// Set the movement date
    pub fn dated(mut self, movement_date: DateTime<Utc>) -> Self {
        self.movement_date = Some(movement_date);
        self
    }

    /// BSON document with wire field names; absent optionals are omitted
    pub fn to_document(&self) -> BootstrapResult<Document> {
        let mut doc = Document::new();
        doc.insert(f::NUMERO_CUENTA, self.account_number.as_str());
        doc.insert(f::NUMERO_COMPROBANTE, self.voucher_number.as_str());
        doc.insert(f::TIPO_MOVIMIENTO, self.movement_type.as_str());
        doc.insert(f::MONTO, decimal_bson(self.amount)?);
        doc.insert(f::CONCEPTO, self.concept.as_str());
        put_opt(&mut doc, f::DESCRIPCION, self.description.clone());
        put_opt(
            &mut doc,
            f::SALDO_ANTERIOR,
            self.previous_balance.map(decimal_bson).transpose()?,
        );
        put_opt(
            &mut doc,
            f::SALDO_POSTERIOR,
            self.resulting_balance.map(decimal_bson).transpose()?,
        );
        put_opt(&mut doc, f::FECHA_MOVIMIENTO, self.movement_date.map(datetime_bson));
        put_opt(&mut doc, f::FECHA_VALOR, self.value_date.map(datetime_bson));
        put_opt(&mut doc, f::SUCURSAL, self.branch.clone());
        put_opt(&mut doc, f::CAJERO, self.teller.clone());
        put_opt(&mut doc, f::CANAL_TRANSACCION, self.channel.clone());
        put_opt(&mut doc, f::REFERENCIA_EXTERNA, self.external_reference.clone());
        put_opt(&mut doc, f::OBSERVACIONES, self.remarks.clone());
        put_opt(&mut doc, f::PROCESADO, self.processed);
        put_opt(&mut doc, f::REVERSADO, self.reversed);
        put_opt(&mut doc, f::MOVIMIENTO_REVERSO, self.reversal_movement.clone());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::decimal::from_decimal128;
    use chrono::TimeZone;
    use mongodb::bson::Bson;
    use std::str::FromStr;

    #[test]
    fn test_document_keeps_amount_exact() {
        let amount = Decimal::from_str("125.75").unwrap();
        let movement = AccountMovement::new("2200000001", "CMP-0001", MovementType::Credit, amount, "Deposito");
        let doc = movement.to_document().unwrap();

        assert_eq!(doc.get_str("tipoMovimiento").unwrap(), "CREDITO");
        match doc.get("monto") {
            Some(Bson::Decimal128(value)) => {
                assert_eq!(from_decimal128(*value), Some(amount));
                assert_eq!(value.to_string(), "125.75");
            }
            other => panic!("expected Decimal128, got {:?}", other),
        }
    }

    #[test]
    fn test_dated_sets_movement_date() {
        let date = Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap();
        let movement = AccountMovement::new("2200000001", "CMP-0002", MovementType::Debit, Decimal::ONE, "Retiro")
            .dated(date);
        let doc = movement.to_document().unwrap();
        let stored = doc.get_datetime("fechaMovimiento").unwrap();
        assert_eq!(stored.timestamp_millis(), date.timestamp_millis());
    }
}
