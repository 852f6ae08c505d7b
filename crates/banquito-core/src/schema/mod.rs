//! Collection definitions: structural validators and index sets
//!
//! The validators are `$jsonSchema` documents built from typed
//! [`JsonSchema`] values; [`validation`] evaluates them locally so the
//! in-memory backend enforces the same constraints as the server.

mod collections;
mod json_schema;
pub mod validation;

pub use collections::{
    ACCOUNTS_COLLECTION, CollectionSpec, MOVEMENTS_COLLECTION, account_collection,
    banquito_collections, movement_collection,
};
pub use json_schema::{BsonType, JsonSchema, PropertySchema};
