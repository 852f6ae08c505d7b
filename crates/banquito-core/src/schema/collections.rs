//! The two BanQuito collections

use super::json_schema::{BsonType, JsonSchema, PropertySchema};
use crate::model::fields::{account as acc, movement as mov};
use crate::model::{AccountStatus, AccountType, MovementType};
use crate::storage::{IndexDirection, IndexSpec};
use mongodb::bson::Document;

/// Bank accounts
pub const ACCOUNTS_COLLECTION: &str = "cuentas_bancarias";

/// Account movements
pub const MOVEMENTS_COLLECTION: &str = "movimientos_cuenta";

/// A collection to create: name, validator schema and indexes
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSpec {
    pub name: String,
    pub schema: JsonSchema,
    pub indexes: Vec<IndexSpec>,
}

impl CollectionSpec {
    /// `$jsonSchema` validator document
    pub fn validator(&self) -> Document {
        self.schema.to_validator()
    }
}

/// `cuentas_bancarias`: unique account number, lookups by owner, status and type
pub fn account_collection() -> CollectionSpec {
    let schema = JsonSchema::new()
        .property(
            acc::NUMERO_CUENTA,
            true,
            PropertySchema::new(BsonType::String, "Número único de cuenta bancaria"),
        )
        .property(
            acc::CLIENTE_IDENTIFICACION,
            true,
            PropertySchema::new(BsonType::String, "Identificación del cliente"),
        )
        .property(
            acc::CLIENTE_NOMBRE,
            true,
            PropertySchema::new(BsonType::String, "Nombre completo del cliente"),
        )
        .property(
            acc::TIPO_CUENTA,
            true,
            PropertySchema::new(BsonType::String, "Tipo de cuenta bancaria")
                .one_of(AccountType::literals()),
        )
        .property(
            acc::ESTADO_CUENTA,
            true,
            PropertySchema::new(BsonType::String, "Estado actual de la cuenta")
                .one_of(AccountStatus::literals()),
        )
        .property(
            acc::SALDO_DISPONIBLE,
            false,
            PropertySchema::new(BsonType::Decimal, "Saldo disponible para transacciones"),
        )
        .property(
            acc::SALDO_CONTABLE,
            false,
            PropertySchema::new(BsonType::Decimal, "Saldo contable de la cuenta"),
        );

    CollectionSpec {
        name: ACCOUNTS_COLLECTION.to_string(),
        schema,
        indexes: vec![
            IndexSpec::ascending(acc::NUMERO_CUENTA).unique(),
            IndexSpec::ascending(acc::CLIENTE_IDENTIFICACION),
            IndexSpec::ascending(acc::ESTADO_CUENTA),
            IndexSpec::ascending(acc::TIPO_CUENTA),
        ],
    }
}

/// `movimientos_cuenta`: unique voucher number, per-account history newest first
pub fn movement_collection() -> CollectionSpec {
    let schema = JsonSchema::new()
        .property(
            mov::NUMERO_CUENTA,
            true,
            PropertySchema::new(BsonType::String, "Número de cuenta asociada"),
        )
        .property(
            mov::NUMERO_COMPROBANTE,
            true,
            PropertySchema::new(BsonType::String, "Número único del comprobante"),
        )
        .property(
            mov::TIPO_MOVIMIENTO,
            true,
            PropertySchema::new(BsonType::String, "Tipo de movimiento")
                .one_of(MovementType::literals()),
        )
        .property(
            mov::MONTO,
            true,
            PropertySchema::new(BsonType::Decimal, "Monto del movimiento"),
        )
        .property(
            mov::CONCEPTO,
            true,
            PropertySchema::new(BsonType::String, "Concepto del movimiento"),
        );

    CollectionSpec {
        name: MOVEMENTS_COLLECTION.to_string(),
        schema,
        indexes: vec![
            IndexSpec::ascending(mov::NUMERO_CUENTA),
            IndexSpec::ascending(mov::NUMERO_COMPROBANTE).unique(),
            IndexSpec::descending(mov::FECHA_MOVIMIENTO),
            IndexSpec::ascending(mov::NUMERO_CUENTA)
                .then(mov::FECHA_MOVIMIENTO, IndexDirection::Descending),
        ],
    }
}

/// Both collections, in creation order
pub fn banquito_collections() -> Vec<CollectionSpec> {
    vec![account_collection(), movement_collection()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_required_fields() {
        let accounts = account_collection();
        assert_eq!(
            accounts.schema.required,
            vec![
                "numeroCuenta",
                "clienteIdentificacion",
                "clienteNombre",
                "tipoCuenta",
                "estadoCuenta"
            ]
        );
        let tipo = accounts.schema.get("tipoCuenta").unwrap();
        assert_eq!(
            tipo.enum_values.as_deref(),
            Some(&["AHORROS", "CORRIENTE", "PLAZO_FIJO", "VISTA"].map(String::from)[..])
        );
        assert_eq!(
            accounts.schema.get("saldoContable").unwrap().bson_type,
            BsonType::Decimal
        );
    }

    #[test]
    fn test_movement_schema_leaves_date_unvalidated() {
        let movements = movement_collection();
        assert_eq!(
            movements.schema.required,
            vec!["numeroCuenta", "numeroComprobante", "tipoMovimiento", "monto", "concepto"]
        );
        assert!(movements.schema.get("fechaMovimiento").is_none());
    }

    #[test]
    fn test_index_sets() {
        let accounts = account_collection();
        let names: Vec<String> = accounts.indexes.iter().map(|i| i.default_name()).collect();
        assert_eq!(
            names,
            vec!["numeroCuenta_1", "clienteIdentificacion_1", "estadoCuenta_1", "tipoCuenta_1"]
        );
        assert_eq!(accounts.indexes.iter().filter(|i| i.unique).count(), 1);

        let movements = movement_collection();
        let names: Vec<String> = movements.indexes.iter().map(|i| i.default_name()).collect();
        assert_eq!(
            names,
            vec![
                "numeroCuenta_1",
                "numeroComprobante_1",
                "fechaMovimiento_-1",
                "numeroCuenta_1_fechaMovimiento_-1"
            ]
        );
        assert!(movements.indexes[1].unique);
    }
}
