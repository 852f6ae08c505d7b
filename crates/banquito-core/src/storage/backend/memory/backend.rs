//! In-memory backend implementation
//!
//! Main backend struct and AdminBackend trait implementation.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::schema::validation;
use crate::storage::backend::r#trait::AdminBackend;
use crate::storage::backend::types::{
    BackendType, DatabaseError, IndexDirection, IndexInfo, IndexSpec, ObjectKind, RoleGrant,
    UserSpec,
};

use super::auth::{self, AuthSession, Privilege};

#[derive(Debug, Clone)]
struct UserRecord {
    password: String,
    roles: Vec<RoleGrant>,
}

#[derive(Debug, Clone)]
struct CollectionState {
    validator: Option<Document>,
    indexes: Vec<IndexInfo>,
    documents: Vec<Document>,
}

impl CollectionState {
    fn new(validator: Option<Document>) -> Self {
        Self {
            validator,
            indexes: vec![IndexInfo {
                name: IndexInfo::ID_INDEX.to_string(),
                keys: vec![("_id".to_string(), IndexDirection::Ascending)],
                unique: true,
            }],
            documents: Vec::new(),
        }
    }

    /// Key values of `document` under `index`; missing fields index as null
    fn key_of(index: &IndexInfo, document: &Document) -> Vec<Bson> {
        index
            .keys
            .iter()
            .map(|(field, _)| document.get(field).cloned().unwrap_or(Bson::Null))
            .collect()
    }

    fn duplicate_key(
        database: &str,
        collection: &str,
        index: &IndexInfo,
        key: &[Bson],
    ) -> DatabaseError {
        let dup = index
            .keys
            .iter()
            .zip(key)
            .map(|((field, _), value)| format!("{}: {}", field, value))
            .collect::<Vec<_>>()
            .join(", ");
        DatabaseError::DuplicateKey {
            collection: collection.to_string(),
            index: index.name.clone(),
            message: format!(
                "E11000 duplicate key error collection: {}.{} index: {} dup key: {{ {} }}",
                database, collection, index.name, dup
            ),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<String, UserRecord>,
    collections: BTreeMap<String, CollectionState>,
}

/// Point-in-time copy of a database, comparable across runs
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSnapshot {
    pub users: BTreeMap<String, Vec<RoleGrant>>,
    pub collections: BTreeMap<String, CollectionSnapshot>,
}

/// State of one collection inside a [`DatabaseSnapshot`]
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot {
    pub validator: Option<Document>,
    pub indexes: Vec<IndexInfo>,
    pub document_count: usize,
}

/// In-memory database bound to one database name.
///
/// Clones made with [`InMemoryBackend::login`] share the same data; a
/// backend without a session acts with administrator rights.
pub struct InMemoryBackend {
    database: String,
    state: Arc<RwLock<State>>,
    connected: Arc<RwLock<bool>>,
    session: Option<AuthSession>,
}

impl InMemoryBackend {
    /// Create an empty database
    pub fn new(database: impl Into<String>) -> Self {
        let database = database.into();
        tracing::info!("In-memory backend created for database: {}", database);

        Self {
            database,
            state: Arc::new(RwLock::new(State::default())),
            connected: Arc::new(RwLock::new(true)),
            session: None,
        }
    }

    /// Authenticate against this database's user store and return a handle
    /// acting as that user
    pub async fn login(&self, username: &str, password: &str) -> Result<Self, DatabaseError> {
        self.ensure_connected().await?;

        let state = self.state.read().await;
        let record = state
            .users
            .get(username)
            .filter(|record| record.password == password)
            .ok_or_else(|| DatabaseError::Authentication("Authentication failed.".to_string()))?;

        Ok(Self {
            database: self.database.clone(),
            state: Arc::clone(&self.state),
            connected: Arc::clone(&self.connected),
            session: Some(AuthSession {
                username: username.to_string(),
                database: self.database.clone(),
                roles: record.roles.clone(),
            }),
        })
    }

    /// Session this handle acts as, `None` for the administrator
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Drop the simulated connection; every later call fails with a
    /// connection error
    pub async fn disconnect(&self) {
        *self.connected.write().await = false;
    }

    /// Insert one document, enforcing the collection validator and every
    /// unique index. Missing collections are created without a validator.
    pub async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<Bson, DatabaseError> {
        self.guard(Privilege::Insert).await?;

        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        let mut state = self.state.write().await;
        let coll = state
            .collections
            .entry(collection.to_string())
            .or_insert_with(|| CollectionState::new(None));

        if let Some(validator) = &coll.validator {
            validation::validate(validator, &document).map_err(|errors| {
                DatabaseError::Validation {
                    collection: collection.to_string(),
                    message: format!("Document failed validation: {}", errors.join("; ")),
                }
            })?;
        }

        for index in coll.indexes.iter().filter(|index| index.unique) {
            let key = CollectionState::key_of(index, &document);
            if coll
                .documents
                .iter()
                .any(|existing| CollectionState::key_of(index, existing) == key)
            {
                return Err(CollectionState::duplicate_key(
                    &self.database,
                    collection,
                    index,
                    &key,
                ));
            }
        }

        coll.documents.push(document);
        Ok(id)
    }

    /// Number of documents stored in a collection
    pub async fn count_documents(&self, collection: &str) -> Result<usize, DatabaseError> {
        self.guard(Privilege::Find).await?;
        let state = self.state.read().await;
        Ok(state
            .collections
            .get(collection)
            .map(|coll| coll.documents.len())
            .unwrap_or(0))
    }

    /// Copy of users, collections, validators and indexes
    pub async fn snapshot(&self) -> DatabaseSnapshot {
        let state = self.state.read().await;
        DatabaseSnapshot {
            users: state
                .users
                .iter()
                .map(|(name, record)| (name.clone(), record.roles.clone()))
                .collect(),
            collections: state
                .collections
                .iter()
                .map(|(name, coll)| {
                    (
                        name.clone(),
                        CollectionSnapshot {
                            validator: coll.validator.clone(),
                            indexes: coll.indexes.clone(),
                            document_count: coll.documents.len(),
                        },
                    )
                })
                .collect(),
        }
    }

    async fn ensure_connected(&self) -> Result<(), DatabaseError> {
        if *self.connected.read().await {
            Ok(())
        } else {
            Err(DatabaseError::Connection("Not connected".to_string()))
        }
    }

    async fn guard(&self, privilege: Privilege) -> Result<(), DatabaseError> {
        self.ensure_connected().await?;
        match &self.session {
            Some(session) => session.authorize(privilege),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdminBackend for InMemoryBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::InMemory
    }

    fn database_name(&self) -> String {
        self.database.clone()
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.ensure_connected().await
    }

    async fn user_exists(&self, username: &str) -> Result<bool, DatabaseError> {
        self.guard(Privilege::ViewUser).await?;
        Ok(self.state.read().await.users.contains_key(username))
    }

    async fn create_user(&self, user: &UserSpec) -> Result<(), DatabaseError> {
        self.guard(Privilege::CreateUser).await?;

        if user.password.is_empty() {
            return Err(DatabaseError::Server {
                code: 2,
                message: "Password cannot be empty".to_string(),
            });
        }
        if let Some(grant) = user.roles.iter().find(|g| !auth::is_builtin_role(&g.role)) {
            return Err(DatabaseError::Server {
                code: 31,
                message: format!("Could not find role: {}@{}", grant.role, grant.db),
            });
        }

        let mut state = self.state.write().await;
        if state.users.contains_key(&user.username) {
            return Err(DatabaseError::Duplicate {
                kind: ObjectKind::User,
                name: user.username.clone(),
                message: format!("User \"{}@{}\" already exists", user.username, self.database),
            });
        }

        state.users.insert(
            user.username.clone(),
            UserRecord {
                password: user.password.clone(),
                roles: user.roles.clone(),
            },
        );
        tracing::debug!("In-memory user created: {}", user.username);
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool, DatabaseError> {
        self.guard(Privilege::ListCollections).await?;
        Ok(self.state.read().await.collections.contains_key(name))
    }

    async fn create_collection(
        &self,
        name: &str,
        validator: Option<Document>,
    ) -> Result<(), DatabaseError> {
        self.guard(Privilege::CreateCollection).await?;

        if let Some(validator) = &validator {
            if !validation::is_supported(validator) {
                return Err(DatabaseError::Server {
                    code: 2,
                    message: "only $jsonSchema validators are supported".to_string(),
                });
            }
        }

        let mut state = self.state.write().await;
        if state.collections.contains_key(name) {
            return Err(DatabaseError::Duplicate {
                kind: ObjectKind::Collection,
                name: name.to_string(),
                message: format!("Collection {}.{} already exists.", self.database, name),
            });
        }

        state
            .collections
            .insert(name.to_string(), CollectionState::new(validator));
        Ok(())
    }

    async fn collection_validator(&self, name: &str) -> Result<Option<Document>, DatabaseError> {
        self.guard(Privilege::ListCollections).await?;
        let state = self.state.read().await;
        state
            .collections
            .get(name)
            .map(|coll| coll.validator.clone())
            .ok_or_else(|| {
                DatabaseError::NotFound(format!("ns does not exist: {}.{}", self.database, name))
            })
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexInfo>, DatabaseError> {
        self.guard(Privilege::ListIndexes).await?;
        let state = self.state.read().await;
        state
            .collections
            .get(collection)
            .map(|coll| coll.indexes.clone())
            .ok_or_else(|| {
                DatabaseError::NotFound(format!(
                    "ns does not exist: {}.{}",
                    self.database, collection
                ))
            })
    }

    async fn create_index(
        &self,
        collection: &str,
        index: &IndexSpec,
    ) -> Result<String, DatabaseError> {
        self.guard(Privilege::CreateIndex).await?;

        let name = index.effective_name();
        let mut state = self.state.write().await;
        let coll = state
            .collections
            .entry(collection.to_string())
            .or_insert_with(|| CollectionState::new(None));

        let conflict = |message: String| DatabaseError::IndexConflict {
            collection: collection.to_string(),
            index: name.clone(),
            message,
        };

        if let Some(existing) = coll.indexes.iter().find(|i| i.name == name) {
            if index.same_keys(existing) && existing.unique == index.unique {
                return Ok(name);
            }
            return Err(conflict(format!(
                "An existing index has the same name as the requested index: {}",
                name
            )));
        }
        if let Some(existing) = coll.indexes.iter().find(|i| index.same_keys(i)) {
            return Err(conflict(format!(
                "An equivalent index already exists with a different name and options: {}",
                existing.name
            )));
        }

        let info = IndexInfo {
            name: name.clone(),
            keys: index.keys.clone(),
            unique: index.unique,
        };

        if info.unique {
            let mut seen: Vec<Vec<Bson>> = Vec::new();
            for document in &coll.documents {
                let key = CollectionState::key_of(&info, document);
                if seen.contains(&key) {
                    return Err(CollectionState::duplicate_key(
                        &self.database,
                        collection,
                        &info,
                        &key,
                    ));
                }
                seen.push(key);
            }
        }

        coll.indexes.push(info);
        Ok(name)
    }
}
