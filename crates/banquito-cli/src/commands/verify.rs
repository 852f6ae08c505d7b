//! `verify`: compare the database with the plan

use crate::console::CliConsole;
use anyhow::bail;
use banquito_core::config::BootstrapConfig;
use banquito_core::{ProvisioningPlan, verify};

/// Check the configured database and fail when anything differs
pub async fn run(config: &BootstrapConfig, json: bool) -> anyhow::Result<()> {
    let backend = super::connect(config).await?;
    let plan = ProvisioningPlan::from_config(config);
    let result = verify(&backend, &plan).await;
    backend.shutdown().await;
    let report = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let console = CliConsole::new(true);
        console.print_header(&format!("Database {}", report.database));
        for check in &report.checks {
            console.print_check(check);
        }
        println!();
        if report.is_ok() {
            console.success("Database matches the provisioning plan");
        } else {
            console.info("Run banquito-init --if-absent to create missing objects");
        }
    }

    let failing = report.failures().count();
    if failing > 0 {
        bail!("{} of {} checks failed", failing, report.checks.len());
    }
    Ok(())
}
