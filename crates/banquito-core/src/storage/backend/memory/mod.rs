//! In-memory backend module
//!
//! Provides a disposable in-process database that behaves like a MongoDB
//! database for administrative calls, validator enforcement and uniqueness.

mod auth;
mod backend;


pub use auth::{AuthSession, Privilege};
pub use backend::{CollectionSnapshot, DatabaseSnapshot, InMemoryBackend};
