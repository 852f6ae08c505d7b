//! Bank account record

use super::fields::account as f;
use super::{AccountStatus, AccountType, datetime_bson, decimal_bson, put_opt};
use crate::error::BootstrapResult;
use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A document of the `cuentas_bancarias` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(rename = "numeroCuenta")]
    pub account_number: String,
    #[serde(rename = "clienteIdentificacion")]
    pub owner_id: String,
    #[serde(rename = "clienteNombre")]
    pub owner_name: String,
    #[serde(rename = "tipoCuenta")]
    pub account_type: AccountType,
    #[serde(rename = "estadoCuenta")]
    pub status: AccountStatus,
    #[serde(rename = "saldoDisponible", default)]
    pub available_balance: Option<Decimal>,
    #[serde(rename = "saldoContable", default)]
    pub ledger_balance: Option<Decimal>,
    #[serde(rename = "limiteSobregiro", default)]
    pub overdraft_limit: Option<Decimal>,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "fechaUltimaActualizacion", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "moneda", default)]
    pub currency: Option<String>,
    #[serde(rename = "sucursal", default)]
    pub branch: Option<String>,
    #[serde(rename = "ejecutivo", default)]
    pub account_officer: Option<String>,
    #[serde(rename = "permiteDebito", default)]
    pub allows_debit: Option<bool>,
    #[serde(rename = "permiteCredito", default)]
    pub allows_credit: Option<bool>,
    #[serde(rename = "generaExtractos", default)]
    pub issues_statements: Option<bool>,
    #[serde(rename = "diasInactividad", default)]
    pub inactive_days: Option<i32>,
}

impl BankAccount {
    /// A freshly opened account: active, zero balances, USD
    pub fn new(
        account_number: impl Into<String>,
        owner_id: impl Into<String>,
        owner_name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        let now = Utc::now();
        Self {
            account_number: account_number.into(),
            owner_id: owner_id.into(),
            owner_name: owner_name.into(),
            account_type,
            status: AccountStatus::Active,
            available_balance: Some(Decimal::ZERO),
            ledger_balance: Some(Decimal::ZERO),
            overdraft_limit: Some(Decimal::ZERO),
            created_at: Some(now),
            updated_at: Some(now),
            currency: Some("USD".to_string()),
            branch: None,
            account_officer: None,
            allows_debit: Some(true),
            allows_credit: Some(true),
            issues_statements: Some(true),
            inactive_days: Some(0),
        }
    }

    /// BSON document with wire field names; absent optionals are omitted
    pub fn to_document(&self) -> BootstrapResult<Document> {
        let mut doc = Document::new();
        doc.insert(f::NUMERO_CUENTA, self.account_number.as_str());
        doc.insert(f::CLIENTE_IDENTIFICACION, self.owner_id.as_str());
        doc.insert(f::CLIENTE_NOMBRE, self.owner_name.as_str());
        doc.insert(f::TIPO_CUENTA, self.account_type.as_str());
        doc.insert(f::ESTADO_CUENTA, self.status.as_str());
        put_opt(
            &mut doc,
            f::SALDO_DISPONIBLE,
            self.available_balance.map(decimal_bson).transpose()?,
        );
        put_opt(
            &mut doc,
            f::SALDO_CONTABLE,
            self.ledger_balance.map(decimal_bson).transpose()?,
        );
        put_opt(
            &mut doc,
            f::LIMITE_SOBREGIRO,
            self.overdraft_limit.map(decimal_bson).transpose()?,
        );
        put_opt(&mut doc, f::FECHA_CREACION, self.created_at.map(datetime_bson));
        put_opt(
            &mut doc,
            f::FECHA_ULTIMA_ACTUALIZACION,
            self.updated_at.map(datetime_bson),
        );
        put_opt(&mut doc, f::MONEDA, self.currency.clone());
        put_opt(&mut doc, f::SUCURSAL, self.branch.clone());
        put_opt(&mut doc, f::EJECUTIVO, self.account_officer.clone());
        put_opt(&mut doc, f::PERMITE_DEBITO, self.allows_debit);
        put_opt(&mut doc, f::PERMITE_CREDITO, self.allows_credit);
        put_opt(&mut doc, f::GENERA_EXTRACTOS, self.issues_statements);
        put_opt(&mut doc, f::DIAS_INACTIVIDAD, self.inactive_days);
        Ok(doc)
    }
}
