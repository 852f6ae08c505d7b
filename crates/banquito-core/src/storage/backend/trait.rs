//! Administration backend trait

use super::types::{BackendType, DatabaseError, IndexInfo, IndexSpec, UserSpec};
use async_trait::async_trait;
use mongodb::bson::Document;

/// Administrative surface consumed by provisioning.
///
/// A backend is bound to one database at construction time; every call
/// operates on that database. Each call succeeds or fails atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminBackend: Send + Sync {
    /// Get backend type
    fn backend_type(&self) -> BackendType;

    /// Name of the database this backend is bound to
    fn database_name(&self) -> String;

    /// Ping the server
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Check whether a user exists in the database's user store
    async fn user_exists(&self, username: &str) -> Result<bool, DatabaseError>;

    /// Create a database-level user; fails if the user already exists
    async fn create_user(&self, user: &UserSpec) -> Result<(), DatabaseError>;

    /// Check whether a collection exists
    async fn collection_exists(&self, name: &str) -> Result<bool, DatabaseError>;

    /// Create a collection with an optional validator; fails if it already exists
    async fn create_collection(
        &self,
        name: &str,
        validator: Option<Document>,
    ) -> Result<(), DatabaseError>;

    /// Validator of an existing collection, `None` when it has none.
    ///
    /// Fails with a not-found error when the collection does not exist.
    async fn collection_validator(&self, name: &str) -> Result<Option<Document>, DatabaseError>;

    /// List index metadata of a collection, including `_id_`
    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexInfo>, DatabaseError>;

    /// Create an index and return its name.
    ///
    /// Creating an index identical to an existing one is a no-op; an index on
    /// the same key pattern with different options is an error.
    async fn create_index(&self, collection: &str, index: &IndexSpec)
    -> Result<String, DatabaseError>;
}
