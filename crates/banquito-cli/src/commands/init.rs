//! `init`: provision the database

use banquito_core::config::BootstrapConfig;
use banquito_core::{ProvisioningPlan, initialize};

/// Provision the configured database, writing the status lines to stdout
pub async fn run(config: &BootstrapConfig) -> anyhow::Result<()> {
    let backend = super::connect(config).await?;
    let plan = ProvisioningPlan::from_config(config);

    let mut stdout = std::io::stdout().lock();
    let result = initialize(&backend, &plan, config.mode, &mut stdout).await;
    drop(stdout);
    backend.shutdown().await;

    let report = result?;
    for object in report.skipped() {
        tracing::info!("{} {} was already present", object.kind, object.name);
    }
    Ok(())
}
