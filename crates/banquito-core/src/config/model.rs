//! Configuration model

use super::logging_config::{LogFormat, LoggingConfig};
use super::timeouts;
use super::validation;
use crate::error::BootstrapResult;
use crate::storage::{RoleGrant, UserSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How provisioning treats objects that already exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvisionMode {
    /// No existence checks; an existing object fails the run
    #[default]
    Strict,
    /// Check before each object and skip the ones already present
    IfAbsent,
}

impl fmt::Display for ProvisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::IfAbsent => write!(f, "if-absent"),
        }
    }
}

impl FromStr for ProvisionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "if-absent" | "if_absent" => Ok(Self::IfAbsent),
            other => Err(format!(
                "unknown provisioning mode '{}', expected strict or if-absent",
                other
            )),
        }
    }
}

/// Connection to the MongoDB deployment
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Connection string carrying the administrative credentials
    pub uri: String,
    /// Application name reported to the server
    pub app_name: String,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub server_selection_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            app_name: "banquito-init".to_string(),
            connect_timeout: timeouts::mongo::connect_timeout(),
            server_selection_timeout: timeouts::mongo::server_selection_timeout(),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("uri", &self.redacted_uri())
            .field("app_name", &self.app_name)
            .field("connect_timeout", &self.connect_timeout)
            .field("server_selection_timeout", &self.server_selection_timeout)
            .finish()
    }
}

impl ConnectionConfig {
    /// Connection string with the password replaced by `***`
    pub fn redacted_uri(&self) -> String {
        let Some(scheme_end) = self.uri.find("://").map(|i| i + 3) else {
            return self.uri.clone();
        };
        let rest = &self.uri[scheme_end..];
        let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());

        match rest[..authority_end].rfind('@') {
            Some(at) => match rest[..at].split_once(':') {
                Some((user, _)) => format!(
                    "{}{}:***@{}",
                    &self.uri[..scheme_end],
                    user,
                    &rest[at + 1..]
                ),
                None => self.uri.clone(),
            },
            None => self.uri.clone(),
        }
    }
}

/// Application credential created during provisioning
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialConfig {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Role granted to the user
    pub role: String,
    /// Database the role is scoped to; the target database when absent
    pub role_database: Option<String>,
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role", &self.role)
            .field("role_database", &self.role_database)
            .finish()
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            username: "banquito_user".to_string(),
            password: "banquito_pass".to_string(),
            role: "readWrite".to_string(),
            role_database: None,
        }
    }
}

/// Complete bootstrapper configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub connection: ConnectionConfig,
    /// Target database, selected by name
    pub database: String,
    pub credential: CredentialConfig,
    pub mode: ProvisionMode,
    pub logging: LoggingConfig,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            database: "banquito".to_string(),
            credential: CredentialConfig::default(),
            mode: ProvisionMode::Strict,
            logging: LoggingConfig::default(),
        }
    }
}

impl BootstrapConfig {
    /// Role grant of the application user
    pub fn role_grant(&self) -> RoleGrant {
        let db = self
            .credential
            .role_database
            .clone()
            .unwrap_or_else(|| self.database.clone());
        RoleGrant::new(self.credential.role.clone(), db)
    }

    /// User to create, with exactly one role grant
    pub fn user_spec(&self) -> UserSpec {
        UserSpec {
            username: self.credential.username.clone(),
            password: self.credential.password.clone(),
            roles: vec![self.role_grant()],
        }
    }

    /// Overlay the values a layer sets
    pub fn merge(&mut self, layer: ConfigLayer) {
        let connection = layer.connection;
        if let Some(uri) = connection.uri {
            self.connection.uri = uri;
        }
        if let Some(app_name) = connection.app_name {
            self.connection.app_name = app_name;
        }
        if let Some(timeout) = connection.connect_timeout {
            self.connection.connect_timeout = timeout;
        }
        if let Some(timeout) = connection.server_selection_timeout {
            self.connection.server_selection_timeout = timeout;
        }

        if let Some(database) = layer.database {
            self.database = database;
        }

        let credential = layer.credential;
        if let Some(username) = credential.username {
            self.credential.username = username;
        }
        if let Some(password) = credential.password {
            self.credential.password = password;
        }
        if let Some(role) = credential.role {
            self.credential.role = role;
        }
        if credential.role_database.is_some() {
            self.credential.role_database = credential.role_database;
        }

        if let Some(mode) = layer.mode {
            self.mode = mode;
        }

        let logging = LoggingConfig {
            level: layer.logging.level.unwrap_or_default(),
            format: layer.logging.format.unwrap_or(self.logging.format),
        };
        self.logging.merge(logging);
    }

    /// Validate the configuration
    pub fn validate(&self) -> BootstrapResult<()> {
        validation::validate_connection(&self.connection)?;
        validation::validate_database_name(&self.database)?;
        validation::validate_credential(&self.credential)?;
        validation::validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Partial configuration produced by one source; unset values leave the
/// lower layers untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub connection: ConnectionLayer,
    pub database: Option<String>,
    pub credential: CredentialLayer,
    pub mode: Option<ProvisionMode>,
    pub logging: LoggingLayer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionLayer {
    pub uri: Option<String>,
    pub app_name: Option<String>,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub server_selection_timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialLayer {
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub role: Option<String>,
    pub role_database: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingLayer {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

impl From<BootstrapConfig> for ConfigLayer {
    fn from(config: BootstrapConfig) -> Self {
        Self {
            connection: ConnectionLayer {
                uri: Some(config.connection.uri),
                app_name: Some(config.connection.app_name),
                connect_timeout: Some(config.connection.connect_timeout),
                server_selection_timeout: Some(config.connection.server_selection_timeout),
            },
            database: Some(config.database),
            credential: CredentialLayer {
                username: Some(config.credential.username),
                password: Some(config.credential.password),
                role: Some(config.credential.role),
                role_database: config.credential.role_database,
            },
            mode: Some(config.mode),
            logging: LoggingLayer {
                level: Some(config.logging.level),
                format: Some(config.logging.format),
            },
        }
    }
}
