//! Constructor methods for BootstrapError

use super::types::BootstrapError;
use crate::storage::ObjectKind;

impl BootstrapError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a duplicate-object error
    pub fn duplicate(kind: ObjectKind, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a connectivity error
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity {
            message: message.into(),
            context: None,
        }
    }

    /// Create a validation error
    pub fn validation(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Create a database error carrying the server code
    pub fn database(message: impl Into<String>, code: Option<i32>) -> Self {
        Self::Database {
            message: message.into(),
            code,
            context: None,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    /// Create an IO error with the path involved
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            context: None,
        }
    }

    /// Attach context to variants that carry it; other variants are returned as-is
    pub fn with_context(self, context: impl Into<String>) -> Self {
        let context = Some(context.into());
        match self {
            Self::Config { message, .. } => Self::Config { message, context },
            Self::Connectivity { message, .. } => Self::Connectivity { message, context },
            Self::Database { message, code, .. } => Self::Database {
                message,
                code,
                context,
            },
            Self::Other { message, .. } => Self::Other { message, context },
            other => other,
        }
    }
}
