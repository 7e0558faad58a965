//! The runtime config document
//!
//! [`RuntimeConfig`] aggregates every resolved resource for one workload.
//! Each resource kind has its own insertion contract:
//!
//! - variable providers are appended in order,
//! - key/value stores and SQLite databases are keyed by name and reject
//!   duplicates,
//! - the LLM compute backend is a single slot that is replaced on every set.
//!
//! The compute slot has no duplicate check on purpose. The caller never
//! declares more than one compute backend per workload, and a later set
//! simply supersedes the earlier one.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::option::DeclaredOption;
use crate::provider::VariablesProvider;
use crate::resolver::{ResolvedOptions, resolve_options};
use crate::snapshot::{ConfigMapSnapshot, SecretSnapshot};

/// Named resource kinds that enforce unique names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    KeyValueStore,
    SqliteDatabase,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::KeyValueStore => write!(f, "key value store"),
            ResourceKind::SqliteDatabase => write!(f, "sqlite database"),
        }
    }
}

/// Resolved runtime configuration for one workload.
///
/// Built once per reconciliation pass, then handed to a serializer.
///
/// # Example
///
/// ```
/// use runtime_config::{DeclaredOption, RuntimeConfig, SecretObject, Snapshots};
///
/// let mut snapshots = Snapshots::new();
/// snapshots.insert_secret("ns1", "db-secret", SecretObject::new().with("pw", "s3cr3t"));
///
/// let mut config = RuntimeConfig::new();
/// config
///     .add_sqlite_database(
///         "default",
///         "libsql",
///         "ns1",
///         &[DeclaredOption::secret_ref("token", "db-secret", "pw")],
///         &snapshots.secrets,
///         &snapshots.config_maps,
///     )
///     .unwrap();
///
/// let db = config.sqlite_database("default").unwrap();
/// assert_eq!(db["type"], "libsql");
/// assert_eq!(db["token"], "s3cr3t");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeConfig {
    #[serde(rename = "config_provider", skip_serializing_if = "Vec::is_empty")]
    variables_providers: Vec<VariablesProvider>,

    #[serde(rename = "key_value_store", skip_serializing_if = "BTreeMap::is_empty")]
    key_value_stores: BTreeMap<String, ResolvedOptions>,

    #[serde(rename = "sqlite_database", skip_serializing_if = "BTreeMap::is_empty")]
    sqlite_databases: BTreeMap<String, ResolvedOptions>,

    #[serde(rename = "llm_compute", skip_serializing_if = "Option::is_none")]
    llm_compute: Option<ResolvedOptions>,
}

impl RuntimeConfig {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variable provider. Order is preserved.
    pub fn add_variables_provider(&mut self, provider: VariablesProvider) {
        tracing::debug!(provider_type = %provider.provider_type, "Adding variables provider");
        self.variables_providers.push(provider);
    }

    /// Resolve and add a key/value store under `name`.
    ///
    /// Fails with [`Error::DuplicateName`] if a store with that name already
    /// exists. Resolution errors are returned unchanged. On any error the
    /// document is left untouched.
    pub fn add_key_value_store(
        &mut self,
        name: &str,
        store_type: &str,
        namespace: &str,
        options: &[DeclaredOption],
        secrets: &SecretSnapshot,
        config_maps: &ConfigMapSnapshot,
    ) -> Result<()> {
        ensure_unique(&self.key_value_stores, ResourceKind::KeyValueStore, name)?;

        let resolved = resolve_options(store_type, namespace, options, secrets, config_maps)?;

        tracing::debug!(name, store_type, "Adding key value store");
        self.key_value_stores.insert(name.to_string(), resolved);
        Ok(())
    }

    /// Resolve and add a SQLite database under `name`.
    ///
    /// Same contract as [`RuntimeConfig::add_key_value_store`], against the
    /// database section. A store and a database may share a name.
    pub fn add_sqlite_database(
        &mut self,
        name: &str,
        database_type: &str,
        namespace: &str,
        options: &[DeclaredOption],
        secrets: &SecretSnapshot,
        config_maps: &ConfigMapSnapshot,
    ) -> Result<()> {
        ensure_unique(&self.sqlite_databases, ResourceKind::SqliteDatabase, name)?;

        let resolved = resolve_options(database_type, namespace, options, secrets, config_maps)?;

        tracing::debug!(name, database_type, "Adding sqlite database");
        self.sqlite_databases.insert(name.to_string(), resolved);
        Ok(())
    }

    /// Resolve and set the LLM compute backend, replacing any previous one.
    ///
    /// If resolution fails the previous backend is kept.
    pub fn set_llm_compute(
        &mut self,
        compute_type: &str,
        namespace: &str,
        options: &[DeclaredOption],
        secrets: &SecretSnapshot,
        config_maps: &ConfigMapSnapshot,
    ) -> Result<()> {
        let resolved = resolve_options(compute_type, namespace, options, secrets, config_maps)?;

        if self.llm_compute.is_some() {
            tracing::debug!(compute_type, "Replacing llm compute backend");
        }
        self.llm_compute = Some(resolved);
        Ok(())
    }

    pub fn variables_providers(&self) -> &[VariablesProvider] {
        &self.variables_providers
    }

    pub fn key_value_stores(&self) -> &BTreeMap<String, ResolvedOptions> {
        &self.key_value_stores
    }

    pub fn key_value_store(&self, name: &str) -> Option<&ResolvedOptions> {
        self.key_value_stores.get(name)
    }

    pub fn sqlite_databases(&self) -> &BTreeMap<String, ResolvedOptions> {
        &self.sqlite_databases
    }

    pub fn sqlite_database(&self, name: &str) -> Option<&ResolvedOptions> {
        self.sqlite_databases.get(name)
    }

    pub fn llm_compute(&self) -> Option<&ResolvedOptions> {
        self.llm_compute.as_ref()
    }

    /// True if no section holds anything.
    pub fn is_empty(&self) -> bool {
        self.variables_providers.is_empty()
            && self.key_value_stores.is_empty()
            && self.sqlite_databases.is_empty()
            && self.llm_compute.is_none()
    }

    /// Render the document as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

fn ensure_unique(
    section: &BTreeMap<String, ResolvedOptions>,
    kind: ResourceKind,
    name: &str,
) -> Result<()> {
    if section.contains_key(name) {
        tracing::warn!(%kind, name, "Duplicate resource name");
        return Err(Error::DuplicateName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{EnvOptions, VaultOptions};
    use crate::snapshot::{ConfigMapObject, SecretObject, Snapshots};

    fn snapshots() -> Snapshots {
        let mut snapshots = Snapshots::new();
        snapshots.insert_secret(
            "ns1",
            "redis",
            SecretObject::new().with("url", "redis://r:6379"),
        );
        snapshots.insert_config_map(
            "ns1",
            "llm",
            ConfigMapObject::new().with("url", "http://llm"),
        );
        snapshots
    }

    #[test]
    fn test_new_is_empty() {
        let config = RuntimeConfig::new();
        assert!(config.is_empty());
        assert!(config.llm_compute().is_none());
    }

    #[test]
    fn test_add_key_value_store() {
        let snapshots = snapshots();
        let mut config = RuntimeConfig::new();

        config
            .add_key_value_store(
                "cache",
                "redis",
                "ns1",
                &[DeclaredOption::secret_ref("url", "redis", "url")],
                &snapshots.secrets,
                &snapshots.config_maps,
            )
            .unwrap();

        let store = config.key_value_store("cache").unwrap();
        assert_eq!(store["type"], "redis");
        assert_eq!(store["url"], "redis://r:6379");
        assert!(!config.is_empty());
    }

    #[test]
    fn test_failed_resolution_leaves_section_untouched() {
        let snapshots = snapshots();
        let mut config = RuntimeConfig::new();

        let err = config
            .add_key_value_store(
                "cache",
                "redis",
                "ns1",
                &[DeclaredOption::secret_ref("url", "missing", "url")],
                &snapshots.secrets,
                &snapshots.config_maps,
            )
            .unwrap_err();

        assert!(matches!(err, Error::DependencyNotFound { .. }));
        assert!(config.key_value_stores().is_empty());
    }

    #[test]
    fn test_store_and_database_may_share_name() {
        let snapshots = snapshots();
        let mut config = RuntimeConfig::new();

        config
            .add_key_value_store(
                "default",
                "spin",
                "ns1",
                &[],
                &snapshots.secrets,
                &snapshots.config_maps,
            )
            .unwrap();
        config
            .add_sqlite_database(
                "default",
                "spin",
                "ns1",
                &[],
                &snapshots.secrets,
                &snapshots.config_maps,
            )
            .unwrap();

        assert!(config.key_value_store("default").is_some());
        assert!(config.sqlite_database("default").is_some());
    }

    #[test]
    fn test_failed_compute_keeps_previous() {
        let snapshots = snapshots();
        let mut config = RuntimeConfig::new();

        config
            .set_llm_compute(
                "remote_http",
                "ns1",
                &[DeclaredOption::config_map_ref("url", "llm", "url")],
                &snapshots.secrets,
                &snapshots.config_maps,
            )
            .unwrap();
        let result = config.set_llm_compute(
            "remote_http",
            "ns1",
            &[DeclaredOption::config_map_ref("url", "gone", "url")],
            &snapshots.secrets,
            &snapshots.config_maps,
        );

        assert!(result.is_err());
        assert_eq!(config.llm_compute().unwrap()["url"], "http://llm");
    }

    #[test]
    fn test_variables_providers_keep_order() {
        let mut config = RuntimeConfig::new();
        config.add_variables_provider(VariablesProvider::env(EnvOptions::default()));
        config.add_variables_provider(VariablesProvider::vault(VaultOptions::default()));

        let types: Vec<_> = config
            .variables_providers()
            .iter()
            .map(|p| p.provider_type.as_str())
            .collect();
        assert_eq!(types, vec!["env", "vault"]);
    }

    #[test]
    fn test_resource_kind_display() {
        assert_eq!(ResourceKind::KeyValueStore.to_string(), "key value store");
        assert_eq!(ResourceKind::SqliteDatabase.to_string(), "sqlite database");
    }
}
