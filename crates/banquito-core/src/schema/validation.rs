//! Local evaluation of `$jsonSchema` validators
//!
//! Supports the keywords the BanQuito validators use: `bsonType` (single
//! alias or list), `required`, `properties` and `enum`. Annotation keywords
//! such as `description` are ignored.

use super::json_schema::BsonType;
use mongodb::bson::{Bson, Document};

/// Check a document against a collection validator (`{ $jsonSchema: {...} }`).
///
/// Returns every violation found, not only the first.
pub fn validate(validator: &Document, document: &Document) -> Result<(), Vec<String>> {
    let schema = match validator.get_document("$jsonSchema") {
        Ok(schema) => schema,
        Err(_) => return Err(vec!["validator has no $jsonSchema".to_string()]),
    };

    let mut errors = Vec::new();
    check(schema, &Bson::Document(document.clone()), "", &mut errors);
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Whether a validator only uses keywords [`validate`] understands
pub fn is_supported(validator: &Document) -> bool {
    validator.len() == 1 && validator.get_document("$jsonSchema").is_ok()
}

fn check(schema: &Document, value: &Bson, path: &str, errors: &mut Vec<String>) {
    if let Some(types) = schema.get("bsonType") {
        let aliases: Vec<&str> = match types {
            Bson::String(alias) => vec![alias.as_str()],
            Bson::Array(list) => list.iter().filter_map(|b| b.as_str()).collect(),
            _ => Vec::new(),
        };
        let ok = aliases
            .iter()
            .filter_map(|alias| BsonType::from_alias(alias))
            .any(|ty| ty.matches(value));
        if !ok {
            errors.push(format!(
                "{}: expected {}, found {}",
                display_path(path),
                aliases.join(" or "),
                type_name(value)
            ));
            return;
        }
    }

    if let Ok(allowed) = schema.get_array("enum") {
        if !allowed.contains(value) {
            errors.push(format!(
                "{}: {} is not one of the permitted values",
                display_path(path),
                value
            ));
        }
    }

    let Bson::Document(object) = value else {
        return;
    };

    if let Ok(required) = schema.get_array("required") {
        for field in required.iter().filter_map(|b| b.as_str()) {
            if !object.contains_key(field) {
                errors.push(format!("{}: required field missing", join(path, field)));
            }
        }
    }

    if let Ok(properties) = schema.get_document("properties") {
        for (field, sub_schema) in properties {
            if let (Some(sub_value), Bson::Document(sub_schema)) = (object.get(field), sub_schema) {
                check(sub_schema, sub_value, &join(path, field), errors);
            }
        }
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "document" } else { path }
}

fn type_name(value: &Bson) -> &'static str {
    match value {
        Bson::Document(_) => "object",
        Bson::String(_) => "string",
        Bson::Decimal128(_) => "decimal",
        Bson::DateTime(_) => "date",
        Bson::Boolean(_) => "bool",
        Bson::Int32(_) => "int",
        Bson::Int64(_) => "long",
        Bson::Double(_) => "double",
        Bson::Array(_) => "array",
        Bson::Null => "null",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountType, BankAccount};
    use crate::schema::account_collection;
    use mongodb::bson::doc;

    #[test]
    fn test_well_formed_account_passes() {
        let validator = account_collection().validator();
        let account = BankAccount::new("2200000001", "1712345678", "Ana Torres", AccountType::Savings);
        assert_eq!(validate(&validator, &account.to_document().unwrap()), Ok(()));
    }

    #[test]
    fn test_missing_required_fields_reported() {
        let validator = account_collection().validator();
        let document = doc! {
            "numeroCuenta": "2200000001",
            "tipoCuenta": "AHORROS",
            "estadoCuenta": "ACTIVA",
        };
        let errors = validate(&validator, &document).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "clienteIdentificacion: required field missing".to_string(),
                "clienteNombre: required field missing".to_string(),
            ]
        );
    }

    #[test]
    fn test_enum_and_type_violations() {
        let validator = account_collection().validator();
        let document = doc! {
            "numeroCuenta": "2200000001",
            "clienteIdentificacion": "1712345678",
            "clienteNombre": "Ana Torres",
            "tipoCuenta": "SAVINGS",
            "estadoCuenta": "ACTIVA",
            "saldoDisponible": 10.5,
        };
        let errors = validate(&validator, &document).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("tipoCuenta:"));
        assert_eq!(errors[1], "saldoDisponible: expected decimal, found double");
    }

    #[test]
    fn test_supported_validator_shape() {
        let validator = account_collection().validator();
        assert!(is_supported(&validator));
        assert!(!is_supported(&doc! { "numeroCuenta": { "$exists": true } }));
        assert!(validate(&doc! {}, &doc! {}).is_err());
    }
}
