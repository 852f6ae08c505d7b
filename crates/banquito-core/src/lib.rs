//! BanQuito Database Bootstrapper Core Library
//!
//! This crate prepares a MongoDB database for the BanQuito banking
//! application: it creates the application user, the schema-validated
//! `cuentas_bancarias` and `movimientos_cuenta` collections and their
//! indexes, then reports readiness.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod schema;
pub mod storage;

// Re-export commonly used types
pub use bootstrap::{
    ProvisionMode, ProvisionReport, ProvisioningPlan, VerificationReport, initialize, verify,
};
pub use config::{BootstrapConfig, ConfigLoader, LoggingConfig};
pub use error::{BootstrapError, BootstrapResult, UserFriendlyError};
pub use model::{AccountMovement, AccountStatus, AccountType, BankAccount, MovementType};
pub use storage::{AdminBackend, DatabaseError, InMemoryBackend, MongoBackend};
