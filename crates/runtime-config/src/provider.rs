//! Variable provider records
//!
//! Unlike stores and databases, variable providers are typed records that
//! are appended to the document as-is. No option resolution happens here.

use serde::{Deserialize, Serialize};

/// Options for a vault-backed variable provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VaultOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mount: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
}

/// Options for an environment-backed variable provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dotenv_path: String,
}

/// One `config_provider` entry.
///
/// Vault and env options share one flat table on output, so both `prefix`
/// fields collapse onto the same key. Only one of them is expected to be
/// set for a given provider type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VariablesProvider {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub provider_type: String,
    #[serde(flatten)]
    pub vault: VaultOptions,
    #[serde(flatten)]
    pub env: EnvOptions,
}

impl VaultOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl EnvOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl VariablesProvider {
    pub fn vault(options: VaultOptions) -> Self {
        Self {
            provider_type: "vault".to_string(),
            vault: options,
            env: EnvOptions::default(),
        }
    }

    pub fn env(options: EnvOptions) -> Self {
        Self {
            provider_type: "env".to_string(),
            vault: VaultOptions::default(),
            env: options,
        }
    }
}
