//! Database backend implementations
//!
//! Provides a unified administration interface with MongoDB and in-memory
//! implementations.

mod memory;
mod mongo;
#[allow(clippy::module_inception)]
mod r#trait;
mod types;

// Re-export all public APIs
pub use memory::{AuthSession, CollectionSnapshot, DatabaseSnapshot, InMemoryBackend, Privilege};
pub use mongo::MongoBackend;
pub use r#trait::AdminBackend;
pub use types::{
    BackendType, DatabaseError, IndexDirection, IndexInfo, IndexSpec, ObjectKind, RoleGrant,
    UserSpec,
};

#[cfg(test)]
pub use r#trait::MockAdminBackend;
