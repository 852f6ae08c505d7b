//! Configuration management for the BanQuito bootstrapper

// Internal modules
mod args_loader;
mod env_loader;
mod file_loader;
mod logging_config;
mod model;

// Public modules
pub mod loader;
pub mod timeouts;
pub mod validation;

// Re-export public API
pub use args_loader::load_from_args;
pub use env_loader::{load_from_env, load_from_vars};
pub use file_loader::load_from_file;
pub use loader::{ConfigLoader, ConfigSource};
pub use logging_config::{LogFormat, LoggingConfig};
pub use model::{
    BootstrapConfig, ConfigLayer, ConnectionConfig, ConnectionLayer, CredentialConfig,
    CredentialLayer, LoggingLayer, ProvisionMode,
};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "banquito.toml";

/// Load configuration from defaults, an optional file, the environment and
/// command-line overrides, in that order
pub fn load_config(
    config_file: impl AsRef<std::path::Path>,
    args: std::collections::HashMap<String, String>,
) -> crate::error::BootstrapResult<BootstrapConfig> {
    ConfigLoader::new()
        .with_defaults()
        .with_file(config_file)
        .with_env()
        .with_args(args)
        .load()
}
