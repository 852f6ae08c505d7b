//! From trait implementations for BootstrapError conversions

use super::types::BootstrapError;
use crate::storage::{DatabaseError, ObjectKind};

impl From<DatabaseError> for BootstrapError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Connection(message) => Self::connectivity(message),
            DatabaseError::Duplicate {
                kind,
                name,
                message,
            } => Self::duplicate(kind, name, message),
            DatabaseError::DuplicateKey {
                collection,
                index,
                message,
            } => Self::duplicate(
                ObjectKind::Document,
                format!("{}.{}", collection, index),
                message,
            ),
            DatabaseError::IndexConflict {
                collection,
                index,
                message,
            } => Self::duplicate(
                ObjectKind::Index,
                format!("{}.{}", collection, index),
                message,
            ),
            DatabaseError::Unauthorized(message) => Self::Permission {
                message,
                code: Some(13),
            },
            DatabaseError::Authentication(message) => Self::Permission {
                message,
                code: Some(18),
            },
            DatabaseError::Validation {
                collection,
                message,
            } => Self::validation(collection, message),
            DatabaseError::NotFound(message) => Self::database(message, None),
            DatabaseError::Server { code, message } => Self::database(message, Some(code)),
            DatabaseError::Serialization(message) | DatabaseError::Internal(message) => {
                Self::other(message)
            }
        }
    }
}

impl From<mongodb::error::Error> for BootstrapError {
    fn from(error: mongodb::error::Error) -> Self {
        DatabaseError::from(error).into()
    }
}

impl From<std::io::Error> for BootstrapError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for BootstrapError {
    fn from(error: serde_json::Error) -> Self {
        Self::other(format!("JSON error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_database_error_categories() {
        let cases = vec![
            (
                DatabaseError::Connection("no server".into()),
                ErrorCategory::Connectivity,
            ),
            (
                DatabaseError::Duplicate {
                    kind: ObjectKind::User,
                    name: "banquito_user".into(),
                    message: "exists".into(),
                },
                ErrorCategory::Duplicate,
            ),
            (
                DatabaseError::IndexConflict {
                    collection: "cuentas_bancarias".into(),
                    index: "numeroCuenta_1".into(),
                    message: "options differ".into(),
                },
                ErrorCategory::Duplicate,
            ),
            (
                DatabaseError::Unauthorized("not allowed".into()),
                ErrorCategory::Permission,
            ),
            (
                DatabaseError::Validation {
                    collection: "cuentas_bancarias".into(),
                    message: "missing numeroCuenta".into(),
                },
                ErrorCategory::Validation,
            ),
            (
                DatabaseError::Server {
                    code: 2,
                    message: "bad value".into(),
                },
                ErrorCategory::Database,
            ),
        ];

        for (db_err, expected) in cases {
            let err: BootstrapError = db_err.into();
            assert_eq!(err.category(), expected, "unexpected category for {}", err);
        }
    }

    #[test]
    fn test_duplicate_key_names_index() {
        let err: BootstrapError = DatabaseError::DuplicateKey {
            collection: "movimientos_cuenta".into(),
            index: "numeroComprobante_1".into(),
            message: "E11000".into(),
        }
        .into();

        match err {
            BootstrapError::Duplicate { kind, name, .. } => {
                assert_eq!(kind, ObjectKind::Document);
                assert_eq!(name, "movimientos_cuenta.numeroComprobante_1");
            }
            other => panic!("expected duplicate, got {:?}", other),
        }
    }

    #[test]
    fn test_only_connectivity_is_retryable() {
        let conn: BootstrapError = DatabaseError::Connection("refused".into()).into();
        let perm: BootstrapError = DatabaseError::Unauthorized("no".into()).into();
        assert!(conn.is_retryable());
        assert!(!perm.is_retryable());
    }
}
