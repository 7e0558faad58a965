//! [`SnapshotBuilder`] for resolution test scenarios.

use runtime_config::{ConfigMapObject, NamespacedName, SecretObject, Snapshots};

/// Namespace used by fixtures unless a test picks its own.
pub const TEST_NAMESPACE: &str = "ns1";

/// Builds [`Snapshots`] one key at a time.
///
/// Objects are created on first use, so a test only lists the keys it cares
/// about.
///
/// # Example
///
/// ```
/// use runtime_config_test_utils::SnapshotBuilder;
///
/// let snapshots = SnapshotBuilder::new()
///     .secret("db-secret", "pw", "s3cr3t")
///     .config_map("settings", "path", "/data")
///     .build();
/// assert_eq!(snapshots.secrets.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    namespace: Option<String>,
    snapshots: Snapshots,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the namespace used by subsequent calls.
    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Add `key = value` to the secret `name`, creating it if needed.
    pub fn secret(mut self, name: &str, key: &str, value: impl Into<Vec<u8>>) -> Self {
        let namespace = self.namespace().to_string();
        let entry = self
            .snapshots
            .secrets
            .entry(NamespacedName::new(namespace, name))
            .or_default();
        entry.data.insert(key.to_string(), value.into());
        self
    }

    /// Add an empty secret `name`.
    pub fn empty_secret(mut self, name: &str) -> Self {
        let namespace = self.namespace().to_string();
        self.snapshots
            .insert_secret(namespace, name, SecretObject::new());
        self
    }

    /// Add `key = value` to the config object `name`, creating it if needed.
    pub fn config_map(mut self, name: &str, key: &str, value: &str) -> Self {
        let namespace = self.namespace().to_string();
        let entry = self
            .snapshots
            .config_maps
            .entry(NamespacedName::new(namespace, name))
            .or_default();
        entry.data.insert(key.to_string(), value.to_string());
        self
    }

    /// Add an empty config object `name`.
    pub fn empty_config_map(mut self, name: &str) -> Self {
        let namespace = self.namespace().to_string();
        self.snapshots
            .insert_config_map(namespace, name, ConfigMapObject::new());
        self
    }

    pub fn build(self) -> Snapshots {
        self.snapshots
    }

    fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(TEST_NAMESPACE)
    }
}

/// Snapshots backing the workload fixture in `test-fixtures/`.
///
/// - secret `db-secret`: `pw = s3cr3t`, `token = t0k3n`
/// - secret `cache-secret`: `url = redis://cache:6379`
/// - config `app-settings`: `path = /data/app.db`, `llm_url = http://llm.local`
pub fn sample_snapshots() -> Snapshots {
    SnapshotBuilder::new()
        .secret("db-secret", "pw", "s3cr3t")
        .secret("db-secret", "token", "t0k3n")
        .secret("cache-secret", "url", "redis://cache:6379")
        .config_map("app-settings", "path", "/data/app.db")
        .config_map("app-settings", "llm_url", "http://llm.local")
        .build()
}
