//! Backend types

use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Database error types
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("{kind} '{name}' already exists: {message}")]
    Duplicate {
        kind: ObjectKind,
        name: String,
        message: String,
    },

    #[error("Duplicate key in '{collection}' on index {index}: {message}")]
    DuplicateKey {
        collection: String,
        index: String,
        message: String,
    },

    #[error("Index conflict on '{collection}' ({index}): {message}")]
    IndexConflict {
        collection: String,
        index: String,
        message: String,
    },

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Document failed validation in '{collection}': {message}")]
    Validation { collection: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Server error {code}: {message}")]
    Server { code: i32, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Database backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendType {
    MongoDB,
    InMemory,
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MongoDB => write!(f, "MongoDB"),
            Self::InMemory => write!(f, "InMemory"),
        }
    }
}

/// Kind of object a duplicate error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    User,
    Collection,
    Index,
    Document,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Collection => write!(f, "collection"),
            Self::Index => write!(f, "index"),
            Self::Document => write!(f, "document"),
        }
    }
}

/// One role granted to a user, scoped to a database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

impl RoleGrant {
    pub fn new(role: impl Into<String>, db: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            db: db.into(),
        }
    }
}

/// User to create in a database's user store
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSpec {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub roles: Vec<RoleGrant>,
}

impl fmt::Debug for UserSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSpec")
            .field("username", &self.username)
            .field("password", &"***")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Sort direction of one index key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexDirection {
    Ascending,
    Descending,
}

impl IndexDirection {
    /// Key-pattern value (`1` or `-1`)
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }

    /// Parse a key-pattern value; servers may report it as int, long or double
    pub fn from_bson(value: &Bson) -> Option<Self> {
        let n = match value {
            Bson::Int32(n) => *n as i64,
            Bson::Int64(n) => *n,
            Bson::Double(n) => *n as i64,
            _ => return None,
        };
        match n {
            1 => Some(Self::Ascending),
            -1 => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Index to create on a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Ordered key pattern
    pub keys: Vec<(String, IndexDirection)>,
    pub unique: bool,
    /// Explicit name; the server default is used when absent
    pub name: Option<String>,
}

impl IndexSpec {
    /// Single-field ascending index
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            keys: vec![(field.into(), IndexDirection::Ascending)],
            unique: false,
            name: None,
        }
    }

    /// Single-field descending index
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            keys: vec![(field.into(), IndexDirection::Descending)],
            unique: false,
            name: None,
        }
    }

    /// Append another key to the pattern
    pub fn then(mut self, field: impl Into<String>, direction: IndexDirection) -> Self {
        self.keys.push((field.into(), direction));
        self
    }

    /// Mark the index unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Key pattern as a BSON document, preserving key order
    pub fn keys_document(&self) -> Document {
        let mut doc = Document::new();
        for (field, direction) in &self.keys {
            doc.insert(field.clone(), direction.as_i32());
        }
        doc
    }

    /// Name the server would generate: `field_dir` pairs joined by `_`
    pub fn default_name(&self) -> String {
        self.keys
            .iter()
            .map(|(field, direction)| format!("{}_{}", field, direction.as_i32()))
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Explicit name or the server default
    pub fn effective_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.default_name())
    }

    /// Whether this spec covers the same key pattern as an existing index
    pub fn same_keys(&self, info: &IndexInfo) -> bool {
        self.keys == info.keys
    }
}

/// Index metadata reported by a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    pub keys: Vec<(String, IndexDirection)>,
    pub unique: bool,
}

impl IndexInfo {
    /// Name of the index every collection carries on `_id`
    pub const ID_INDEX: &'static str = "_id_";

    /// Whether this is the implicit `_id_` index
    pub fn is_id_index(&self) -> bool {
        self.name == Self::ID_INDEX
    }

    /// Whether the index spans more than one field
    pub fn is_compound(&self) -> bool {
        self.keys.len() > 1
    }

    /// Build from a key-pattern document; keys with non-directional values
    /// (text, hashed, ...) are rejected
    pub fn from_keys_document(
        name: impl Into<String>,
        keys: &Document,
        unique: bool,
    ) -> Result<Self, DatabaseError> {
        let name = name.into();
        let keys = keys
            .iter()
            .map(|(field, value)| {
                IndexDirection::from_bson(value)
                    .map(|direction| (field.clone(), direction))
                    .ok_or_else(|| {
                        DatabaseError::Serialization(format!(
                            "index {} has unsupported key {}: {}",
                            name, field, value
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name, keys, unique })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_default_index_names() {
        assert_eq!(IndexSpec::ascending("numeroCuenta").default_name(), "numeroCuenta_1");
        assert_eq!(
            IndexSpec::descending("fechaMovimiento").default_name(),
            "fechaMovimiento_-1"
        );
        let compound = IndexSpec::ascending("numeroCuenta")
            .then("fechaMovimiento", IndexDirection::Descending);
        assert_eq!(compound.default_name(), "numeroCuenta_1_fechaMovimiento_-1");
    }

    #[test]
    fn test_keys_document_preserves_order() {
        let compound = IndexSpec::ascending("numeroCuenta")
            .then("fechaMovimiento", IndexDirection::Descending);
        let keys = compound.keys_document();
        let fields: Vec<&String> = keys.keys().collect();
        assert_eq!(fields, vec!["numeroCuenta", "fechaMovimiento"]);
        assert_eq!(keys, doc! { "numeroCuenta": 1, "fechaMovimiento": -1 });
    }

    #[test]
    fn test_index_info_from_server_document() {
        let info = IndexInfo::from_keys_document(
            "numeroCuenta_1",
            &doc! { "numeroCuenta": 1.0 },
            true,
        )
        .unwrap();
        assert_eq!(info.keys, vec![("numeroCuenta".to_string(), IndexDirection::Ascending)]);
        assert!(IndexSpec::ascending("numeroCuenta").same_keys(&info));

        let text = IndexInfo::from_keys_document("concepto_text", &doc! { "concepto": "text" }, false);
        assert!(text.is_err());
    }

    #[test]
    fn test_user_spec_debug_redacts_password() {
        let user = UserSpec {
            username: "banquito_user".into(),
            password: "banquito_pass".into(),
            roles: vec![RoleGrant::new("readWrite", "banquito")],
        };
        let rendered = format!("{:?}", user);
        assert!(rendered.contains("banquito_user"));
        assert!(!rendered.contains("banquito_pass"));
    }
}
