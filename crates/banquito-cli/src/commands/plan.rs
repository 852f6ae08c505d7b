//! `plan`: print the provisioning plan

use banquito_core::ProvisioningPlan;
use banquito_core::config::BootstrapConfig;

/// Print the plan derived from the configuration as pretty JSON
pub fn run(config: &BootstrapConfig) -> anyhow::Result<()> {
    let plan = ProvisioningPlan::from_config(config);
    let rendered = serde_json::to_string_pretty(&plan.to_json()?)?;
    println!("{}", rendered);
    Ok(())
}
