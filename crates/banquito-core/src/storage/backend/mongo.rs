//! MongoDB backend implementation

use super::r#trait::AdminBackend;
use super::types::{BackendType, DatabaseError, IndexInfo, IndexSpec, ObjectKind, UserSpec};
use crate::config::ConnectionConfig;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, Credential, IndexOptions};
use mongodb::{Client, Database, IndexModel};

/// Server error codes the bootstrapper distinguishes
mod codes {
    pub const UNAUTHORIZED: i32 = 13;
    pub const AUTHENTICATION_FAILED: i32 = 18;
    pub const NAMESPACE_NOT_FOUND: i32 = 26;
    pub const NAMESPACE_EXISTS: i32 = 48;
    pub const INDEX_ALREADY_EXISTS: i32 = 68;
    pub const INDEX_OPTIONS_CONFLICT: i32 = 85;
    pub const INDEX_KEY_SPECS_CONFLICT: i32 = 86;
    pub const DOCUMENT_VALIDATION_FAILURE: i32 = 121;
    pub const DUPLICATE_KEY: i32 = 11000;
    pub const USER_ALREADY_EXISTS: i32 = 51003;
}

/// What an administrative call was acting on, used to name failures
#[derive(Debug, Clone, Copy)]
struct Target<'a> {
    collection: &'a str,
    name: &'a str,
}

impl<'a> Target<'a> {
    const NONE: Target<'static> = Target {
        collection: "",
        name: "",
    };

    fn user(name: &'a str) -> Self {
        Self {
            collection: "",
            name,
        }
    }

    fn collection(name: &'a str) -> Self {
        Self {
            collection: name,
            name,
        }
    }

    fn index(collection: &'a str, name: &'a str) -> Self {
        Self { collection, name }
    }
}

/// Map a server error code onto the storage taxonomy
fn from_server_code(code: i32, message: String, target: Target<'_>) -> DatabaseError {
    match code {
        codes::USER_ALREADY_EXISTS => DatabaseError::Duplicate {
            kind: ObjectKind::User,
            name: target.name.to_string(),
            message,
        },
        codes::NAMESPACE_EXISTS => DatabaseError::Duplicate {
            kind: ObjectKind::Collection,
            name: target.name.to_string(),
            message,
        },
        codes::INDEX_ALREADY_EXISTS
        | codes::INDEX_OPTIONS_CONFLICT
        | codes::INDEX_KEY_SPECS_CONFLICT => DatabaseError::IndexConflict {
            collection: target.collection.to_string(),
            index: target.name.to_string(),
            message,
        },
        codes::DUPLICATE_KEY => DatabaseError::DuplicateKey {
            collection: target.collection.to_string(),
            index: duplicate_key_index(&message).unwrap_or("unknown").to_string(),
            message,
        },
        codes::UNAUTHORIZED => DatabaseError::Unauthorized(message),
        codes::AUTHENTICATION_FAILED => DatabaseError::Authentication(message),
        codes::DOCUMENT_VALIDATION_FAILURE => DatabaseError::Validation {
            collection: target.collection.to_string(),
            message,
        },
        codes::NAMESPACE_NOT_FOUND => DatabaseError::NotFound(message),
        code => DatabaseError::Server { code, message },
    }
}

/// Extract the index name from an E11000 message (`... index: name dup key: ...`)
fn duplicate_key_index(message: &str) -> Option<&str> {
    let after = message.split("index: ").nth(1)?;
    after.split_whitespace().next()
}

fn classify(error: mongodb::error::Error, target: Target<'_>) -> DatabaseError {
    match error.kind.as_ref() {
        ErrorKind::Command(command) => {
            from_server_code(command.code, command.message.clone(), target)
        }
        ErrorKind::Write(WriteFailure::WriteError(write)) => {
            from_server_code(write.code, write.message.clone(), target)
        }
        ErrorKind::Authentication { message, .. } => DatabaseError::Authentication(message.clone()),
        ErrorKind::ServerSelection { message, .. } | ErrorKind::DnsResolve { message, .. } => {
            DatabaseError::Connection(message.clone())
        }
        ErrorKind::Io(io) => DatabaseError::Connection(io.to_string()),
        ErrorKind::InvalidArgument { message, .. } => {
            DatabaseError::Connection(format!("invalid connection options: {}", message))
        }
        _ => DatabaseError::Internal(error.to_string()),
    }
}

impl From<mongodb::error::Error> for DatabaseError {
    fn from(error: mongodb::error::Error) -> Self {
        classify(error, Target::NONE)
    }
}

/// MongoDB backend bound to one database
pub struct MongoBackend {
    client: Client,
    database: Database,
}

impl MongoBackend {
    /// Connect with the credentials embedded in the connection URI and
    /// select `database` by name
    pub async fn connect(config: &ConnectionConfig, database: &str) -> Result<Self, DatabaseError> {
        let options = Self::client_options(config).await?;
        Self::from_options(options, database)
    }

    /// Connect as an explicit user authenticating against `database`
    pub async fn connect_as(
        config: &ConnectionConfig,
        database: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, DatabaseError> {
        let mut options = Self::client_options(config).await?;
        options.credential = Some(
            Credential::builder()
                .username(username.to_string())
                .password(password.to_string())
                .source(database.to_string())
                .build(),
        );
        Self::from_options(options, database)
    }

    async fn client_options(config: &ConnectionConfig) -> Result<ClientOptions, DatabaseError> {
        tracing::info!(
            "MongoDB backend connecting to: {}",
            config.redacted_uri()
        );

        let mut options = ClientOptions::parse(config.uri.as_str())
            .await
            .map_err(|e| DatabaseError::Connection(format!("invalid connection string: {}", e)))?;
        options.app_name = Some(config.app_name.clone());
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.server_selection_timeout);
        Ok(options)
    }

    fn from_options(options: ClientOptions, database: &str) -> Result<Self, DatabaseError> {
        let client = Client::with_options(options)?;
        let database = client.database(database);
        Ok(Self { client, database })
    }

    /// Handle to the selected database
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Close the client and its connection pool
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl AdminBackend for MongoBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::MongoDB
    }

    fn database_name(&self) -> String {
        self.database.name().to_string()
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn user_exists(&self, username: &str) -> Result<bool, DatabaseError> {
        let reply = self
            .database
            .run_command(doc! { "usersInfo": username })
            .await
            .map_err(|e| classify(e, Target::user(username)))?;

        Ok(matches!(reply.get("users"), Some(Bson::Array(users)) if !users.is_empty()))
    }

    async fn create_user(&self, user: &UserSpec) -> Result<(), DatabaseError> {
        let roles: Vec<Bson> = user
            .roles
            .iter()
            .map(|grant| Bson::Document(doc! { "role": grant.role.as_str(), "db": grant.db.as_str() }))
            .collect();

        tracing::debug!("createUser {} with {} role(s)", user.username, roles.len());
        self.database
            .run_command(doc! {
                "createUser": user.username.as_str(),
                "pwd": user.password.as_str(),
                "roles": roles,
            })
            .await
            .map_err(|e| classify(e, Target::user(&user.username)))?;
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool, DatabaseError> {
        let names = self
            .database
            .list_collection_names()
            .filter(doc! { "name": name })
            .await
            .map_err(|e| classify(e, Target::collection(name)))?;
        Ok(names.iter().any(|n| n == name))
    }

    async fn create_collection(
        &self,
        name: &str,
        validator: Option<Document>,
    ) -> Result<(), DatabaseError> {
        let action = self.database.create_collection(name);
        let action = match validator {
            Some(validator) => action.validator(validator),
            None => action,
        };
        action
            .await
            .map_err(|e| classify(e, Target::collection(name)))
    }

    async fn collection_validator(&self, name: &str) -> Result<Option<Document>, DatabaseError> {
        let mut cursor = self
            .database
            .list_collections()
            .filter(doc! { "name": name })
            .await
            .map_err(|e| classify(e, Target::collection(name)))?;

        match cursor.try_next().await? {
            Some(spec) => Ok(spec.options.validator),
            None => Err(DatabaseError::NotFound(format!(
                "ns does not exist: {}.{}",
                self.database.name(),
                name
            ))),
        }
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexInfo>, DatabaseError> {
        let models: Vec<IndexModel> = self
            .database
            .collection::<Document>(collection)
            .list_indexes()
            .await
            .map_err(|e| classify(e, Target::collection(collection)))?
            .try_collect()
            .await?;

        models
            .into_iter()
            .map(|model| {
                let options = model.options.unwrap_or_default();
                let name = options.name.unwrap_or_default();
                IndexInfo::from_keys_document(name, &model.keys, options.unique.unwrap_or(false))
            })
            .collect()
    }

    async fn create_index(
        &self,
        collection: &str,
        index: &IndexSpec,
    ) -> Result<String, DatabaseError> {
        let name = index.effective_name();
        let mut options = IndexOptions::default();
        options.name = Some(name.clone());
        if index.unique {
            options.unique = Some(true);
        }
        let model = IndexModel::builder()
            .keys(index.keys_document())
            .options(options)
            .build();

        let result = self
            .database
            .collection::<Document>(collection)
            .create_index(model)
            .await
            .map_err(|e| classify(e, Target::index(collection, &name)))?;
        Ok(result.index_name)
    }
}
