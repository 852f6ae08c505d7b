//! Declarative description of the provisioned objects

use crate::config::BootstrapConfig;
use crate::error::BootstrapResult;
use crate::schema::{CollectionSpec, banquito_collections};
use crate::storage::UserSpec;
use mongodb::bson::Bson;
use serde_json::{Value, json};

/// Everything a provisioning run creates, in creation order
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningPlan {
    /// Target database, selected by name
    pub database: String,
    pub user: UserSpec,
    pub collections: Vec<CollectionSpec>,
}

impl ProvisioningPlan {
    /// Plan for the BanQuito collections with the given user
    pub fn new(database: impl Into<String>, user: UserSpec) -> Self {
        Self {
            database: database.into(),
            user,
            collections: banquito_collections(),
        }
    }

    /// Plan derived from the configuration
    pub fn from_config(config: &BootstrapConfig) -> Self {
        Self::new(config.database.clone(), config.user_spec())
    }

    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Option<&CollectionSpec> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Number of indexes across all collections, `_id_` excluded
    pub fn index_count(&self) -> usize {
        self.collections.iter().map(|c| c.indexes.len()).sum()
    }

    /// JSON rendering for inspection; the password is never included
    pub fn to_json(&self) -> BootstrapResult<Value> {
        let collections: Vec<Value> = self
            .collections
            .iter()
            .map(|collection| {
                let indexes: Vec<Value> = collection
                    .indexes
                    .iter()
                    .map(|index| {
                        json!({
                            "name": index.effective_name(),
                            "keys": Bson::Document(index.keys_document()).into_relaxed_extjson(),
                            "unique": index.unique,
                        })
                    })
                    .collect();
                json!({
                    "name": collection.name,
                    "validator": Bson::Document(collection.validator()).into_relaxed_extjson(),
                    "indexes": indexes,
                })
            })
            .collect();

        Ok(json!({
            "database": self.database,
            "user": serde_json::to_value(&self.user)?,
            "collections": collections,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_from_default_config() {
        let plan = ProvisioningPlan::from_config(&BootstrapConfig::default());
        assert_eq!(plan.database, "banquito");
        assert_eq!(plan.user.username, "banquito_user");
        assert_eq!(plan.user.roles.len(), 1);
        assert_eq!(plan.collections.len(), 2);
        assert_eq!(plan.index_count(), 8);
        assert!(plan.collection("movimientos_cuenta").is_some());
    }

    #[test]
    fn test_plan_json_omits_password() {
        let plan = ProvisioningPlan::from_config(&BootstrapConfig::default());
        let value = plan.to_json().unwrap();

        assert_eq!(value["user"]["username"], "banquito_user");
        assert!(value["user"].get("password").is_none());
        assert!(!value.to_string().contains("banquito_pass"));

        let accounts = &value["collections"][0];
        assert_eq!(accounts["name"], "cuentas_bancarias");
        assert_eq!(
            accounts["validator"]["$jsonSchema"]["properties"]["tipoCuenta"]["enum"][0],
            "AHORROS"
        );
        assert_eq!(accounts["indexes"][0]["keys"]["numeroCuenta"], 1);
        assert_eq!(accounts["indexes"][0]["unique"], true);

        let compound = &value["collections"][1]["indexes"][3];
        assert_eq!(compound["name"], "numeroCuenta_1_fechaMovimiento_-1");
        assert_eq!(compound["keys"]["fechaMovimiento"], -1);
    }
}
