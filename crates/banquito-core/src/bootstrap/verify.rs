//! Read-back verification of a provisioned database

use super::plan::ProvisioningPlan;
use crate::error::BootstrapResult;
use crate::storage::{AdminBackend, IndexInfo, ObjectKind};
use serde::Serialize;

/// Result of checking one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Missing,
    /// Present but different from the plan
    Mismatch(String),
    /// Present but not in the plan
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationCheck {
    pub kind: ObjectKind,
    pub name: String,
    #[serde(flatten)]
    pub status: CheckStatus,
}

/// Per-object comparison of a database with a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub database: String,
    pub checks: Vec<VerificationCheck>,
}

impl VerificationReport {
    /// Whether every object matches the plan
    pub fn is_ok(&self) -> bool {
        self.checks.iter().all(|c| c.status == CheckStatus::Ok)
    }

    /// Checks that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &VerificationCheck> {
        self.checks.iter().filter(|c| c.status != CheckStatus::Ok)
    }

    fn push(&mut self, kind: ObjectKind, name: impl Into<String>, status: CheckStatus) {
        self.checks.push(VerificationCheck {
            kind,
            name: name.into(),
            status,
        });
    }
}

/// Compare the database behind `backend` with `plan`.
///
/// Checks the user, both collections with their validators, every planned
/// index with its uniqueness, and reports indexes other than `_id_` that the
/// plan does not name. Only backend errors fail the call; differences go in the report.
pub async fn verify(
    backend: &dyn AdminBackend,
    plan: &ProvisioningPlan,
) -> BootstrapResult<VerificationReport> {
    let mut report = VerificationReport {
        database: plan.database.clone(),
        checks: Vec::new(),
    };

    let user_status = if backend.user_exists(&plan.user.username).await? {
        CheckStatus::Ok
    } else {
        CheckStatus::Missing
    };
    report.push(ObjectKind::User, &plan.user.username, user_status);

    for collection in &plan.collections {
        if !backend.collection_exists(&collection.name).await? {
            report.push(ObjectKind::Collection, &collection.name, CheckStatus::Missing);
            for index in &collection.indexes {
                let name = format!("{}.{}", collection.name, index.effective_name());
                report.push(ObjectKind::Index, name, CheckStatus::Missing);
            }
            continue;
        }
        let validator_status = match backend.collection_validator(&collection.name).await? {
            Some(validator) if validator == collection.validator() => CheckStatus::Ok,
            Some(_) => CheckStatus::Mismatch("validator differs from the plan".to_string()),
            None => CheckStatus::Mismatch("collection has no validator".to_string()),
        };
        report.push(ObjectKind::Collection, &collection.name, validator_status);

        let existing = backend.list_indexes(&collection.name).await?;
        let mut matched: Vec<&IndexInfo> = Vec::new();

        for index in &collection.indexes {
            let name = format!("{}.{}", collection.name, index.effective_name());
            let status = match existing.iter().find(|info| index.same_keys(info)) {
                None => CheckStatus::Missing,
                Some(info) => {
                    matched.push(info);
                    if info.unique != index.unique {
                        CheckStatus::Mismatch(format!(
                            "expected {} index, found {}",
                            uniqueness(index.unique),
                            uniqueness(info.unique)
                        ))
                    } else if info.name != index.effective_name() {
                        CheckStatus::Mismatch(format!("index is named {}", info.name))
                    } else {
                        CheckStatus::Ok
                    }
                }
            };
            report.push(ObjectKind::Index, name, status);
        }

        for info in existing
            .iter()
            .filter(|info| !info.is_id_index() && !matched.contains(info))
        {
            let name = format!("{}.{}", collection.name, info.name);
            report.push(ObjectKind::Index, name, CheckStatus::Unexpected);
        }
    }

    tracing::info!(
        "Verified database {}: {} checks, {} failing",
        report.database,
        report.checks.len(),
        report.failures().count()
    );
    Ok(report)
}

fn uniqueness(unique: bool) -> &'static str {
    if unique { "unique" } else { "non-unique" }
}
