//! Declared runtime config for a workload
//!
//! The declaration is what an operator writes on the workload resource. It
//! lists the variable providers, stores, databases and compute backend the
//! workload needs, with options that may point into secrets and config
//! objects.
//!
//! # Example TOML
//!
//! ```toml
//! [[variablesProviders]]
//! type = "env"
//! prefix = "APP"
//!
//! [[keyValueStores]]
//! name = "cache"
//! type = "redis"
//!
//! [[keyValueStores.options]]
//! name = "url"
//! valueFrom.secretKeyRef = { name = "cache-secret", key = "url" }
//!
//! [llmCompute]
//! type = "remote_http"
//! options = [{ name = "url", value = "http://llm.local" }]
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::option::DeclaredOption;
use crate::provider::{EnvOptions, VariablesProvider, VaultOptions};
use crate::registry::RuntimeConfig;
use crate::snapshot::{ObjectRef, Snapshots};

/// All runtime config declared for one workload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfigDeclaration {
    #[serde(default)]
    pub variables_providers: Vec<DeclaredVariablesProvider>,
    #[serde(default)]
    pub key_value_stores: Vec<DeclaredResource>,
    #[serde(default)]
    pub sqlite_databases: Vec<DeclaredResource>,
    #[serde(default)]
    pub llm_compute: Option<DeclaredCompute>,
}

/// A declared variable provider, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeclaredVariablesProvider {
    Vault(VaultOptions),
    Env(EnvOptions),
}

impl From<DeclaredVariablesProvider> for VariablesProvider {
    fn from(declared: DeclaredVariablesProvider) -> Self {
        match declared {
            DeclaredVariablesProvider::Vault(options) => VariablesProvider::vault(options),
            DeclaredVariablesProvider::Env(options) => VariablesProvider::env(options),
        }
    }
}

/// A named store or database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeclaredResource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub options: Vec<DeclaredOption>,
}

/// The compute backend. There is at most one, so it carries no name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeclaredCompute {
    #[serde(rename = "type")]
    pub compute_type: String,
    #[serde(default)]
    pub options: Vec<DeclaredOption>,
}

impl RuntimeConfigDeclaration {
    /// Parse and validate a declaration from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let declaration: Self = toml::from_str(content).map_err(|e| Error::InvalidDeclaration {
            message: e.to_string(),
        })?;
        declaration.validate()?;
        Ok(declaration)
    }

    /// Read, parse and validate a declaration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Reject declarations with blank resource or option names.
    pub fn validate(&self) -> Result<()> {
        for resource in self.key_value_stores.iter().chain(&self.sqlite_databases) {
            if resource.name.is_empty() {
                return Err(Error::InvalidDeclaration {
                    message: format!("{} resource has an empty name", resource.resource_type),
                });
            }
        }

        if let Some(option) = self.options().find(|o| o.name.is_empty()) {
            return Err(Error::InvalidDeclaration {
                message: format!("option with an empty name: {option:?}"),
            });
        }

        Ok(())
    }

    /// Every external object the declaration reads from, sorted and
    /// deduplicated.
    pub fn dependencies(&self, namespace: &str) -> BTreeSet<ObjectRef> {
        self.options()
            .filter_map(|option| option.reference(namespace))
            .collect()
    }

    /// Build the runtime config, stopping at the first failing resource.
    ///
    /// Resources are applied in declaration order: providers, stores,
    /// databases, then the compute backend.
    pub fn assemble(&self, namespace: &str, snapshots: &Snapshots) -> Result<RuntimeConfig> {
        let mut config = RuntimeConfig::new();

        for provider in &self.variables_providers {
            config.add_variables_provider(provider.clone().into());
        }

        for store in &self.key_value_stores {
            config.add_key_value_store(
                &store.name,
                &store.resource_type,
                namespace,
                &store.options,
                &snapshots.secrets,
                &snapshots.config_maps,
            )?;
        }

        for database in &self.sqlite_databases {
            config.add_sqlite_database(
                &database.name,
                &database.resource_type,
                namespace,
                &database.options,
                &snapshots.secrets,
                &snapshots.config_maps,
            )?;
        }

        if let Some(compute) = &self.llm_compute {
            config.set_llm_compute(
                &compute.compute_type,
                namespace,
                &compute.options,
                &snapshots.secrets,
                &snapshots.config_maps,
            )?;
        }

        tracing::info!(
            namespace,
            key_value_stores = config.key_value_stores().len(),
            sqlite_databases = config.sqlite_databases().len(),
            "Assembled runtime config"
        );

        Ok(config)
    }

    fn options(&self) -> impl Iterator<Item = &DeclaredOption> {
        self.key_value_stores
            .iter()
            .chain(&self.sqlite_databases)
            .flat_map(|resource| &resource.options)
            .chain(self.llm_compute.iter().flat_map(|compute| &compute.options))
    }
}
