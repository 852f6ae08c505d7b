//! CLI commands

pub mod init;
pub mod plan;
pub mod verify;

use banquito_core::BootstrapError;
use banquito_core::config::BootstrapConfig;
use banquito_core::storage::{AdminBackend, MongoBackend};

/// Connect with the administrative URI and check the server answers
pub(crate) async fn connect(config: &BootstrapConfig) -> Result<MongoBackend, BootstrapError> {
    let backend = MongoBackend::connect(&config.connection, &config.database).await?;
    backend
        .ping()
        .await
        .map_err(|e| BootstrapError::from(e).with_context("Connecting to MongoDB"))?;
    tracing::debug!("Connected to {}", config.connection.redacted_uri());
    Ok(backend)
}
