//! Command line arguments-based configuration loading

use super::logging_config::LogFormat;
use super::model::{ConfigLayer, ProvisionMode};
use crate::error::{BootstrapError, BootstrapResult};
use std::collections::HashMap;

/// Load configuration from command line arguments
///
/// Supports args for uri, database, app_user, app_password, mode, log_level
/// and log_format.
pub fn load_from_args(args: &HashMap<String, String>) -> BootstrapResult<ConfigLayer> {
    let mut layer = ConfigLayer::default();

    layer.connection.uri = args.get("uri").cloned();
    layer.database = args.get("database").cloned();
    layer.credential.username = args.get("app_user").cloned();
    layer.credential.password = args.get("app_password").cloned();

    if let Some(mode) = args.get("mode") {
        layer.mode = Some(
            mode.parse::<ProvisionMode>()
                .map_err(BootstrapError::config)?,
        );
    }

    layer.logging.level = args.get("log_level").cloned();
    if let Some(format) = args.get("log_format") {
        layer.logging.format = Some(format.parse::<LogFormat>().map_err(BootstrapError::config)?);
    }

    Ok(layer)
}
