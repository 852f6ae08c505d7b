//! CLI argument definitions using clap
//!
//! - banquito-init                # Provision the database (same as `init`)
//! - banquito-init verify         # Compare the database with the plan
//! - banquito-init plan           # Print the provisioning plan as JSON

use banquito_core::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[command(name = "banquito-init")]
#[command(about = "Bootstrap the BanQuito MongoDB database")]
#[command(
    long_about = r#"Bootstrap the BanQuito MongoDB database

Creates the application user, the cuentas_bancarias and movimientos_cuenta
collections with their validators, and the supporting indexes.

USAGE:
  banquito-init                          # Provision (strict mode)
  banquito-init --if-absent              # Provision, skipping existing objects
  banquito-init verify                   # Check the database against the plan
  banquito-init plan                     # Print the plan as JSON"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (JSON, TOML or YAML; optional)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// MongoDB connection string with administrative rights
    #[arg(long, global = true, env = "BANQUITO_MONGO_URI", hide_env_values = true)]
    pub uri: Option<String>,

    /// Target database
    #[arg(long, global = true, env = "BANQUITO_DATABASE")]
    pub database: Option<String>,

    /// Application user to create
    #[arg(long, global = true, env = "BANQUITO_APP_USER")]
    pub app_user: Option<String>,

    /// Password of the application user
    #[arg(long, global = true, env = "BANQUITO_APP_PASSWORD", hide_env_values = true)]
    pub app_password: Option<String>,

    /// Skip objects that already exist instead of failing
    #[arg(long, global = true)]
    pub if_absent: bool,

    /// Log level (trace, debug, info, warn, error) or target=level directives
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format
    #[arg(long, global = true, value_parser = ["pretty", "compact", "json"])]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Provision the database (default)
    Init,

    /// Compare the live database with the provisioning plan
    Verify {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the provisioning plan as JSON without connecting
    Plan,
}

impl Cli {
    /// Command to run; `init` when none is given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Init)
    }

    /// Command-line configuration overrides, keyed as the config loader expects
    pub fn overrides(&self) -> HashMap<String, String> {
        let mut args = HashMap::new();
        let mut put = |key: &str, value: &Option<String>| {
            if let Some(value) = value {
                args.insert(key.to_string(), value.clone());
            }
        };
        put("uri", &self.uri);
        put("database", &self.database);
        put("app_user", &self.app_user);
        put("app_password", &self.app_password);
        put("log_level", &self.log_level);
        put("log_format", &self.log_format);
        if self.if_absent {
            args.insert("mode".to_string(), "if-absent".to_string());
        }
        args
    }
}
