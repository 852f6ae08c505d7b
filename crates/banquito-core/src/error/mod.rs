//! Error types for the BanQuito bootstrapper
//!
//! Every failure surfaced by provisioning is a [`BootstrapError`]. The
//! variants follow the failure taxonomy of the provisioning routine:
//! - duplicate objects (user, collection or index already present)
//! - permission failures on the invoking connection
//! - connectivity failures reaching the server
//! - documents rejected by a collection validator
//!
//! Nothing in this crate catches these errors; they abort provisioning and
//! propagate to the caller.

mod classifiers;
mod constructors;
mod conversions;
mod types;
mod user_messages;

pub use types::{BootstrapError, BootstrapResult, ErrorCategory, ResultExt};
pub use user_messages::UserFriendlyError;
