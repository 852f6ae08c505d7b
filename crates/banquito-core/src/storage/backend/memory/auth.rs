//! Role-based authorization for in-memory sessions

use crate::storage::backend::types::{DatabaseError, RoleGrant};
use std::fmt;

/// Action a session may be allowed to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Privilege {
    Find,
    Insert,
    CreateCollection,
    CreateIndex,
    ListIndexes,
    ListCollections,
    CreateUser,
    ViewUser,
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Self::Find => "find",
            Self::Insert => "insert",
            Self::CreateCollection => "createCollection",
            Self::CreateIndex => "createIndex",
            Self::ListIndexes => "listIndexes",
            Self::ListCollections => "listCollections",
            Self::CreateUser => "createUser",
            Self::ViewUser => "viewUser",
        };
        f.write_str(action)
    }
}

/// Privileges granted by a built-in role; unknown roles grant nothing
fn role_privileges(role: &str) -> &'static [Privilege] {
    use Privilege::*;
    match role {
        "read" => &[Find, ListIndexes, ListCollections],
        "readWrite" => &[
            Find,
            Insert,
            CreateCollection,
            CreateIndex,
            ListIndexes,
            ListCollections,
        ],
        "dbAdmin" => &[CreateCollection, CreateIndex, ListIndexes, ListCollections],
        "userAdmin" => &[CreateUser, ViewUser],
        "dbOwner" | "root" => &[
            Find,
            Insert,
            CreateCollection,
            CreateIndex,
            ListIndexes,
            ListCollections,
            CreateUser,
            ViewUser,
        ],
        _ => &[],
    }
}

/// Whether `role` names a built-in role a user can be granted
pub(super) fn is_builtin_role(role: &str) -> bool {
    matches!(
        role,
        "read" | "readWrite" | "dbAdmin" | "userAdmin" | "dbOwner" | "root"
    )
}

/// Authenticated user of one database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub username: String,
    pub database: String,
    pub roles: Vec<RoleGrant>,
}

impl AuthSession {
    /// Whether any role scoped to the session's database grants `privilege`
    pub fn allows(&self, privilege: Privilege) -> bool {
        self.roles
            .iter()
            .filter(|grant| grant.db == self.database)
            .any(|grant| role_privileges(&grant.role).contains(&privilege))
    }

    /// Fail with the server's "not authorized" error unless `privilege` is granted
    pub fn authorize(&self, privilege: Privilege) -> Result<(), DatabaseError> {
        if self.allows(privilege) {
            Ok(())
        } else {
            Err(DatabaseError::Unauthorized(format!(
                "not authorized on {} to execute command {{ {}: ... }} as {}",
                self.database, privilege, self.username
            )))
        }
    }
}
