//! Database provisioning
//!
//! [`ProvisioningPlan`] describes every object the BanQuito database needs;
//! [`initialize`] creates them through an [`AdminBackend`](crate::storage::AdminBackend)
//! and [`verify`] compares a live database against the plan.

mod plan;
mod report;
mod runner;
mod verify;

pub use crate::config::ProvisionMode;
pub use plan::ProvisioningPlan;
pub use report::{ObjectOutcome, ProvisionReport, ProvisionedObject};
pub use runner::{
    STATUS_COLLECTIONS_READY, STATUS_DATABASE_READY, STATUS_INITIALIZING, initialize,
    status_lines, user_created_line,
};
pub use verify::{CheckStatus, VerificationCheck, VerificationReport, verify};
