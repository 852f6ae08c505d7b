//! Core error types for the bootstrapper

use crate::storage::ObjectKind;
use thiserror::Error;

/// Result type alias for bootstrapper operations
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Extension trait for adding context to foreign results
pub trait ResultExt<T> {
    /// Wrap the error as a configuration error with context
    fn config_context<C: std::fmt::Display>(self, context: C) -> BootstrapResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn config_context<C: std::fmt::Display>(self, context: C) -> BootstrapResult<T> {
        self.map_err(|e| BootstrapError::config_with_context(e.to_string(), context.to_string()))
    }
}

/// Failure class of a [`BootstrapError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// User, collection, index or unique key already present
    Duplicate,
    /// Invoking principal lacks the required rights
    Permission,
    /// Server unreachable or not accepting connections
    Connectivity,
    /// Document rejected by a collection validator
    Validation,
    /// Bad configuration input
    Configuration,
    /// Any other server-side failure
    Database,
    /// Local file system failures
    FileSystem,
    /// Anything else
    Internal,
}

impl ErrorCategory {
    /// Get a user-friendly category name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Duplicate => "Object Already Exists",
            Self::Permission => "Permission Error",
            Self::Connectivity => "Connection Error",
            Self::Validation => "Validation Error",
            Self::Configuration => "Configuration Error",
            Self::Database => "Database Error",
            Self::FileSystem => "File System Error",
            Self::Internal => "Internal Error",
        }
    }
}

/// Main error type for the bootstrapper
#[derive(Error, Debug, Clone)]
pub enum BootstrapError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// An object with the same identity already exists
    #[error("{kind} '{name}' already exists: {message}")]
    Duplicate {
        kind: ObjectKind,
        name: String,
        message: String,
    },

    /// Not authorized or not authenticated
    #[error("Permission denied: {message}")]
    Permission {
        message: String,
        code: Option<i32>,
    },

    /// Server could not be reached
    #[error("Connection error: {message}")]
    Connectivity {
        message: String,
        context: Option<String>,
    },

    /// Document rejected by a collection validator
    #[error("Document rejected by '{collection}' validator: {message}")]
    Validation { collection: String, message: String },

    /// Other server-side errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        code: Option<i32>,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}

impl BootstrapError {
    /// Failure class of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Duplicate { .. } => ErrorCategory::Duplicate,
            Self::Permission { .. } => ErrorCategory::Permission,
            Self::Connectivity { .. } => ErrorCategory::Connectivity,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Database { .. } => ErrorCategory::Database,
            Self::Io { .. } => ErrorCategory::FileSystem,
            Self::Other { .. } => ErrorCategory::Internal,
        }
    }

    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "BANQUITO_CONFIG",
            Self::Duplicate { .. } => "BANQUITO_DUPLICATE",
            Self::Permission { .. } => "BANQUITO_PERMISSION",
            Self::Connectivity { .. } => "BANQUITO_CONNECTIVITY",
            Self::Validation { .. } => "BANQUITO_VALIDATION",
            Self::Database { .. } => "BANQUITO_DATABASE",
            Self::Io { .. } => "BANQUITO_IO",
            Self::Other { .. } => "BANQUITO_OTHER",
        }
    }

    /// Optional context attached to the error
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::Connectivity { context, .. }
            | Self::Database { context, .. }
            | Self::Other { context, .. } => context.as_deref(),
            Self::Io { path, .. } => path.as_deref(),
            Self::Duplicate { .. } | Self::Permission { .. } | Self::Validation { .. } => None,
        }
    }

    /// Whether a later attempt could succeed without changes.
    ///
    /// Provisioning itself never retries; this is for callers that wrap it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }
}
