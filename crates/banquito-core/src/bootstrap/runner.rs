//! Provisioning run

use super::plan::ProvisioningPlan;
use super::report::{ObjectOutcome, ProvisionReport};
use crate::config::ProvisionMode;
use crate::error::{BootstrapError, BootstrapResult};
use crate::schema::CollectionSpec;
use crate::storage::{AdminBackend, IndexSpec, ObjectKind, UserSpec};
use std::io::Write;
use tracing::info;

pub const STATUS_INITIALIZING: &str = "Initializing BanQuito database...";
pub const STATUS_COLLECTIONS_READY: &str = "Collections and indexes created successfully";
pub const STATUS_DATABASE_READY: &str = "Database ready to use";

/// Second status line
pub fn user_created_line(username: &str) -> String {
    format!("User {} created successfully", username)
}

/// The four status lines of a successful run, in order
pub fn status_lines(username: &str) -> [String; 4] {
    [
        STATUS_INITIALIZING.to_string(),
        user_created_line(username),
        STATUS_COLLECTIONS_READY.to_string(),
        STATUS_DATABASE_READY.to_string(),
    ]
}

/// Provision the database described by `plan`.
///
/// Runs the phases in order (user, collections, indexes) and stops at the
/// first failure without undoing earlier steps. The status lines are
/// written to `out` only once every object is in place.
pub async fn initialize<W: Write + ?Sized>(
    backend: &dyn AdminBackend,
    plan: &ProvisioningPlan,
    mode: ProvisionMode,
    out: &mut W,
) -> BootstrapResult<ProvisionReport> {
    let bound = backend.database_name();
    if bound != plan.database {
        return Err(BootstrapError::config_with_context(
            format!(
                "Backend is bound to database '{}' but the plan targets '{}'",
                bound, plan.database
            ),
            "Selecting the target database",
        ));
    }

    info!(
        "Provisioning database {} on {} backend ({} mode)",
        plan.database,
        backend.backend_type(),
        mode
    );
    let mut report = ProvisionReport::new(&plan.database, mode);

    provision_user(backend, &plan.user, mode, &mut report).await?;

    for collection in &plan.collections {
        provision_collection(backend, collection, mode, &mut report).await?;
    }

    for collection in &plan.collections {
        for index in &collection.indexes {
            provision_index(backend, &collection.name, index, mode, &mut report).await?;
        }
    }

    for line in status_lines(&plan.user.username) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    info!(
        "Provisioning finished: {} created, {} skipped",
        report.created().count(),
        report.skipped().count()
    );
    Ok(report)
}

async fn provision_user(
    backend: &dyn AdminBackend,
    user: &UserSpec,
    mode: ProvisionMode,
    report: &mut ProvisionReport,
) -> BootstrapResult<()> {
    if mode == ProvisionMode::IfAbsent && backend.user_exists(&user.username).await? {
        info!("User {} already exists, skipping", user.username);
        report.record(ObjectKind::User, &user.username, ObjectOutcome::Skipped);
        return Ok(());
    }

    backend
        .create_user(user)
        .await
        .map_err(|e| BootstrapError::from(e).with_context("Creating the application user"))?;
    info!(
        "Created user {} with roles {:?}",
        user.username,
        user.roles
            .iter()
            .map(|g| format!("{}@{}", g.role, g.db))
            .collect::<Vec<_>>()
    );
    report.record(ObjectKind::User, &user.username, ObjectOutcome::Created);
    Ok(())
}

async fn provision_collection(
    backend: &dyn AdminBackend,
    collection: &CollectionSpec,
    mode: ProvisionMode,
    report: &mut ProvisionReport,
) -> BootstrapResult<()> {
    if mode == ProvisionMode::IfAbsent && backend.collection_exists(&collection.name).await? {
        let existing = backend.collection_validator(&collection.name).await?;
        if existing.as_ref() != Some(&collection.validator()) {
            let found = if existing.is_some() {
                "a different validator"
            } else {
                "no validator"
            };
            return Err(BootstrapError::duplicate(
                ObjectKind::Collection,
                &collection.name,
                format!("existing collection has {} instead of the planned $jsonSchema", found),
            ));
        }
        info!("Collection {} already exists, skipping", collection.name);
        report.record(ObjectKind::Collection, &collection.name, ObjectOutcome::Skipped);
        return Ok(());
    }

    backend
        .create_collection(&collection.name, Some(collection.validator()))
        .await
        .map_err(|e| {
            BootstrapError::from(e)
                .with_context(format!("Creating collection {}", collection.name))
        })?;
    info!("Created collection {} with validator", collection.name);
    report.record(ObjectKind::Collection, &collection.name, ObjectOutcome::Created);
    Ok(())
}

async fn provision_index(
    backend: &dyn AdminBackend,
    collection: &str,
    index: &IndexSpec,
    mode: ProvisionMode,
    report: &mut ProvisionReport,
) -> BootstrapResult<()> {
    let name = index.effective_name();
    let qualified = format!("{}.{}", collection, name);

    if mode == ProvisionMode::IfAbsent {
        let existing = backend.list_indexes(collection).await?;
        let found = existing
            .iter()
            .find(|info| info.name == name || index.same_keys(info));
        if let Some(info) = found {
            if info.name == name && index.same_keys(info) && info.unique == index.unique {
                info!("Index {} already exists, skipping", qualified);
                report.record(ObjectKind::Index, &qualified, ObjectOutcome::Skipped);
                return Ok(());
            }
            return Err(BootstrapError::duplicate(
                ObjectKind::Index,
                &qualified,
                format!(
                    "existing index {} conflicts with the requested key pattern or options",
                    info.name
                ),
            ));
        }
    }

    let created = backend
        .create_index(collection, index)
        .await
        .map_err(|e| BootstrapError::from(e).with_context(format!("Creating index {}", qualified)))?;
    info!("Created index {}.{}", collection, created);
    report.record(ObjectKind::Index, &qualified, ObjectOutcome::Created);
    Ok(())
}
