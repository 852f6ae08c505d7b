//! Configuration source loading logic

use super::types::ConfigSource;
use crate::config::args_loader;
use crate::config::env_loader;
use crate::config::file_loader;
use crate::config::model::{BootstrapConfig, ConfigLayer};
use crate::error::BootstrapResult;

/// Load the layer a specific source contributes
pub(super) fn load_from_source(source: &ConfigSource) -> BootstrapResult<ConfigLayer> {
    match source {
        ConfigSource::File(path) => {
            tracing::debug!("Loading config from file: {}", path.display());
            file_loader::load_from_file(path)
        }
        ConfigSource::Environment => {
            tracing::debug!("Loading config from environment");
            env_loader::load_from_env()
        }
        ConfigSource::CommandLine(args) => {
            tracing::debug!("Loading config from command line");
            args_loader::load_from_args(args)
        }
        ConfigSource::Default => {
            tracing::debug!("Loading default config");
            Ok(ConfigLayer::from(BootstrapConfig::default()))
        }
    }
}
