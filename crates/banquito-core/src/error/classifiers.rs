//! Error classification for user-facing messages

use super::types::BootstrapError;
use crate::storage::ObjectKind;

/// Title and suggested actions for an error
pub(super) fn classify(error: &BootstrapError) -> (String, Vec<String>) {
    match error {
        BootstrapError::Duplicate { kind, name, .. } => {
            let mut suggestions = vec![format!(
                "The database already contains {} '{}'; provisioning expects a pristine database",
                kind, name
            )];
            if *kind != ObjectKind::Document {
                suggestions.push(
                    "Re-run with --if-absent to skip objects that already exist".to_string(),
                );
            }
            (format!("{} already exists", kind), suggestions)
        }
        BootstrapError::Permission { code, .. } => {
            let title = match code {
                Some(18) => "Authentication failed",
                _ => "Not authorized",
            };
            (
                title.to_string(),
                vec![
                    "Connect with an administrative user (for example the root user of the container)"
                        .to_string(),
                    "Check the credentials embedded in BANQUITO_MONGO_URI".to_string(),
                ],
            )
        }
        BootstrapError::Connectivity { .. } => (
            "Cannot reach the database server".to_string(),
            vec![
                "Check that the server is running and accepting connections".to_string(),
                "Verify host and port in BANQUITO_MONGO_URI".to_string(),
            ],
        ),
        BootstrapError::Config { .. } => (
            "Invalid configuration".to_string(),
            vec![
                "Check the configuration file syntax".to_string(),
                "Check the BANQUITO_* environment variables".to_string(),
            ],
        ),
        BootstrapError::Validation { collection, .. } => (
            format!("Document rejected by '{}'", collection),
            vec!["Supply every required field with a permitted value".to_string()],
        ),
        BootstrapError::Io { .. } => (
            "File system error".to_string(),
            vec!["Check the path and its permissions".to_string()],
        ),
        BootstrapError::Database { .. } | BootstrapError::Other { .. } => {
            ("Provisioning failed".to_string(), Vec::new())
        }
    }
}
