//! Pre-fetched snapshots of external key/value objects
//!
//! The caller fetches every secret and config object touched by a build pass
//! and hands them over as two read-only collections keyed by
//! `(namespace, name)`. Resolution only ever borrows them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The kind of external object an option can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKind {
    ConfigMap,
    Secret,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::ConfigMap => write!(f, "configmap"),
            ObjectKind::Secret => write!(f, "secret"),
        }
    }
}

/// Composite lookup key for snapshot objects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespacedName {
    pub namespace: String,
    pub name: String,
}

impl NamespacedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NamespacedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A fully qualified reference to one external object.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectRef {
    pub kind: ObjectKind,
    pub key: NamespacedName,
}

/// A secret object. Values are opaque bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretObject {
    pub data: BTreeMap<String, Vec<u8>>,
}

impl SecretObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, returning the object for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Decoded text for `key`, if present.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self, key: &str) -> Option<String> {
        self.data
            .get(key)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

/// A config object. Values are plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMapObject {
    pub data: BTreeMap<String, String>,
}

impl ConfigMapObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, returning the object for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

pub type SecretSnapshot = HashMap<NamespacedName, SecretObject>;

pub type ConfigMapSnapshot = HashMap<NamespacedName, ConfigMapObject>;

/// Both snapshot collections for one build pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    pub secrets: SecretSnapshot,
    pub config_maps: ConfigMapSnapshot,
}

impl Snapshots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_secret(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        secret: SecretObject,
    ) {
        self.secrets
            .insert(NamespacedName::new(namespace, name), secret);
    }

    pub fn insert_config_map(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        config_map: ConfigMapObject,
    ) {
        self.config_maps
            .insert(NamespacedName::new(namespace, name), config_map);
    }

    /// Check whether the referenced object is present.
    pub fn contains(&self, object: &ObjectRef) -> bool {
        match object.kind {
            ObjectKind::ConfigMap => self.config_maps.contains_key(&object.key),
            ObjectKind::Secret => self.secrets.contains_key(&object.key),
        }
    }
}
