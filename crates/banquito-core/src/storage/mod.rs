//! Database administration backends
//!
//! Provisioning talks to the database only through [`AdminBackend`], the
//! administrative surface it needs: select a database by name, create a
//! user, create a collection with a validator, create and list indexes.
//!
//! # Backends
//! - [`MongoBackend`]: a live MongoDB server through the official driver
//! - [`InMemoryBackend`]: a disposable in-process database for tests and
//!   dry runs, enforcing validators, unique indexes and role grants
//!
//! # Example
//! ```ignore
//! let backend = MongoBackend::connect(&config.connection, &config.database).await?;
//! backend.ping().await?;
//! ```

pub mod backend;

pub use backend::{
    AdminBackend, AuthSession, BackendType, CollectionSnapshot, DatabaseError, DatabaseSnapshot,
    InMemoryBackend, IndexDirection,
    IndexInfo, IndexSpec, MongoBackend, ObjectKind, Privilege, RoleGrant, UserSpec,
};
