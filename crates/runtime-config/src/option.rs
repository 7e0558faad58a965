//! Declared options
//!
//! A declared option is one named setting of a declared resource. Its value
//! is either a literal string or a reference to a key inside a config or
//! secret object living in the workload's namespace.
//!
//! # Example TOML
//!
//! ```toml
//! [[keyValueStores.options]]
//! name = "url"
//! value = "redis://cache:6379"
//!
//! [[keyValueStores.options]]
//! name = "password"
//! valueFrom.secretKeyRef = { name = "cache-secret", key = "password" }
//! ```

use serde::{Deserialize, Serialize};

use crate::snapshot::{NamespacedName, ObjectKind, ObjectRef};

/// One named setting of a declared resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredOption {
    pub name: String,
    /// Literal value. An empty literal counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<ValueSource>,
}

/// Indirect value source for an option.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_key_ref: Option<KeySelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<KeySelector>,
}

/// Selects one key of a named object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySelector {
    pub name: String,
    pub key: String,
}

/// Where an option's value comes from, after precedence is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource<'a> {
    Literal(&'a str),
    ConfigMap(&'a KeySelector),
    Secret(&'a KeySelector),
    Empty,
}

impl DeclaredOption {
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            value_from: None,
        }
    }

    pub fn config_map_ref(
        name: impl Into<String>,
        object: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_from: Some(ValueSource {
                config_map_key_ref: Some(KeySelector {
                    name: object.into(),
                    key: key.into(),
                }),
                secret_key_ref: None,
            }),
        }
    }

    pub fn secret_ref(
        name: impl Into<String>,
        object: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_from: Some(ValueSource {
                config_map_key_ref: None,
                secret_key_ref: Some(KeySelector {
                    name: object.into(),
                    key: key.into(),
                }),
            }),
        }
    }

    /// An option with neither a literal nor a reference.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pick the effective source: a non-empty literal, then a config
    /// reference, then a secret reference.
    pub fn source(&self) -> OptionSource<'_> {
        if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
            return OptionSource::Literal(value);
        }

        let Some(from) = &self.value_from else {
            return OptionSource::Empty;
        };

        if let Some(selector) = &from.config_map_key_ref {
            OptionSource::ConfigMap(selector)
        } else if let Some(selector) = &from.secret_key_ref {
            OptionSource::Secret(selector)
        } else {
            OptionSource::Empty
        }
    }

    /// The external object this option reads from, if any.
    pub fn reference(&self, namespace: &str) -> Option<ObjectRef> {
        let (kind, selector) = match self.source() {
            OptionSource::ConfigMap(selector) => (ObjectKind::ConfigMap, selector),
            OptionSource::Secret(selector) => (ObjectKind::Secret, selector),
            OptionSource::Literal(_) | OptionSource::Empty => return None,
        };

        Some(ObjectRef {
            kind,
            key: NamespacedName::new(namespace, &selector.name),
        })
    }
}
