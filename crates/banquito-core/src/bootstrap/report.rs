//! Outcome of a provisioning run

use crate::config::ProvisionMode;
use crate::storage::ObjectKind;
use serde::Serialize;

/// What happened to one planned object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectOutcome {
    Created,
    /// Already present; only in if-absent mode
    Skipped,
}

/// One object touched by a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionedObject {
    pub kind: ObjectKind,
    /// User or collection name; `collection.index` for indexes
    pub name: String,
    pub outcome: ObjectOutcome,
}

/// Objects created or skipped, in the order they were handled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub database: String,
    pub mode: ProvisionMode,
    pub objects: Vec<ProvisionedObject>,
}

impl ProvisionReport {
    pub fn new(database: impl Into<String>, mode: ProvisionMode) -> Self {
        Self {
            database: database.into(),
            mode,
            objects: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, kind: ObjectKind, name: impl Into<String>, outcome: ObjectOutcome) {
        self.objects.push(ProvisionedObject {
            kind,
            name: name.into(),
            outcome,
        });
    }

    /// Objects created by this run
    pub fn created(&self) -> impl Iterator<Item = &ProvisionedObject> {
        self.objects
            .iter()
            .filter(|o| o.outcome == ObjectOutcome::Created)
    }

    /// Objects found already present
    pub fn skipped(&self) -> impl Iterator<Item = &ProvisionedObject> {
        self.objects
            .iter()
            .filter(|o| o.outcome == ObjectOutcome::Skipped)
    }

    /// Whether the run changed nothing
    pub fn is_noop(&self) -> bool {
        self.created().next().is_none()
    }
}
