//! Configuration validation

use super::logging_config::LoggingConfig;
use super::model::{ConnectionConfig, CredentialConfig};
use crate::error::{BootstrapError, BootstrapResult};
use std::time::Duration;

/// URI schemes the driver accepts
const URI_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

/// Characters MongoDB forbids in database names
const FORBIDDEN_DB_CHARS: [char; 7] = ['/', '\\', '.', ' ', '"', '$', '\0'];

/// Longest database name MongoDB accepts, in bytes
const MAX_DB_NAME_LEN: usize = 63;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate connection settings
pub fn validate_connection(connection: &ConnectionConfig) -> BootstrapResult<()> {
    if connection.uri.trim().is_empty() {
        return Err(BootstrapError::config("MongoDB connection URI cannot be empty"));
    }
    if !URI_SCHEMES.iter().any(|scheme| connection.uri.starts_with(scheme)) {
        return Err(BootstrapError::config_with_context(
            format!(
                "Invalid MongoDB connection URI: {}",
                connection.redacted_uri()
            ),
            "The URI must start with mongodb:// or mongodb+srv://",
        ));
    }
    if connection.connect_timeout == Duration::ZERO {
        return Err(BootstrapError::config("connect_timeout must be greater than zero"));
    }
    if connection.server_selection_timeout == Duration::ZERO {
        return Err(BootstrapError::config(
            "server_selection_timeout must be greater than zero",
        ));
    }
    Ok(())
}

/// Validate the target database name
pub fn validate_database_name(database: &str) -> BootstrapResult<()> {
    if database.is_empty() {
        return Err(BootstrapError::config("Database name cannot be empty"));
    }
    if database.len() > MAX_DB_NAME_LEN {
        return Err(BootstrapError::config(format!(
            "Database name '{}' is longer than {} bytes",
            database, MAX_DB_NAME_LEN
        )));
    }
    if let Some(c) = database.chars().find(|c| FORBIDDEN_DB_CHARS.contains(c)) {
        return Err(BootstrapError::config(format!(
            "Database name '{}' contains the forbidden character {:?}",
            database, c
        )));
    }
    Ok(())
}

/// Validate the application credential
pub fn validate_credential(credential: &CredentialConfig) -> BootstrapResult<()> {
    if credential.username.trim().is_empty() {
        return Err(BootstrapError::config("Application username cannot be empty"));
    }
    if credential.password.is_empty() {
        return Err(BootstrapError::config("Application password cannot be empty"));
    }
    if credential.role.trim().is_empty() {
        return Err(BootstrapError::config("Application role cannot be empty"));
    }
    if let Some(db) = &credential.role_database {
        validate_database_name(db)?;
    }
    Ok(())
}

/// Whether `directive` is a bare level or a `target=level` pair
fn is_valid_directive(directive: &str) -> bool {
    let level = match directive.rsplit_once('=') {
        Some((target, level)) if !target.trim().is_empty() => level,
        Some(_) => return false,
        None => directive,
    };
    LOG_LEVELS.contains(&level.trim().to_lowercase().as_str())
}

/// Validate logging settings
pub fn validate_logging(logging: &LoggingConfig) -> BootstrapResult<()> {
    if !logging.level.split(',').all(is_valid_directive) {
        return Err(BootstrapError::config(format!(
            "Invalid log level '{}', expected one of {} or comma-separated target=level directives",
            logging.level,
            LOG_LEVELS.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_connection_scheme() {
        let mut connection = ConnectionConfig::default();
        assert!(validate_connection(&connection).is_ok());

        connection.uri = "mongodb+srv://cluster0.example.net".into();
        assert!(validate_connection(&connection).is_ok());

        connection.uri = "postgres://root:pw@localhost".into();
        let err = validate_connection(&connection).unwrap_err();
        assert!(err.to_string().contains("root:***@localhost"));

        connection.uri = "".into();
        assert!(validate_connection(&connection).is_err());
    }

    #[test]
    fn test_validate_database_name() {
        assert!(validate_database_name("banquito").is_ok());
        assert!(validate_database_name("").is_err());
        assert!(validate_database_name("ban.quito").is_err());
        assert!(validate_database_name(&"b".repeat(64)).is_err());
    }

    #[test]
    fn test_validate_credential_rejects_empty_fields() {
        let mut credential = CredentialConfig::default();
        assert!(validate_credential(&credential).is_ok());

        credential.password = String::new();
        assert!(validate_credential(&credential).is_err());

        let credential = CredentialConfig {
            role: " ".into(),
            ..Default::default()
        };
        assert!(validate_credential(&credential).is_err());
    }

    #[test]
    fn test_validate_logging_level() {
        let mut logging = LoggingConfig::default();
        assert!(validate_logging(&logging).is_ok());
        logging.level = "DEBUG".into();
        assert!(validate_logging(&logging).is_ok());
        logging.level = "verbose".into();
        assert!(validate_logging(&logging).is_err());
    }

    #[test]
    fn test_validate_logging_accepts_target_directives() {
        let mut logging = LoggingConfig::default();
        logging.level = "banquito_core=debug".into();
        assert!(validate_logging(&logging).is_ok());
        logging.level = "warn,banquito_core=trace,mongodb=info".into();
        assert!(validate_logging(&logging).is_ok());

        logging.level = "banquito_core=loud".into();
        assert!(validate_logging(&logging).is_err());
        logging.level = "=debug".into();
        assert!(validate_logging(&logging).is_err());
        logging.level = "info,".into();
        assert!(validate_logging(&logging).is_err());
    }
}
