//! Option resolution
//!
//! Turns one declared resource's option list into a flat map of option name
//! to value, reading referenced keys out of the pre-fetched snapshots.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::option::{DeclaredOption, KeySelector, OptionSource};
use crate::snapshot::{ConfigMapSnapshot, NamespacedName, ObjectKind, SecretSnapshot};

/// Key under which the resource type is recorded in every resolved map.
pub const TYPE_KEY: &str = "type";

/// Flat option name to value map for one resource.
pub type ResolvedOptions = BTreeMap<String, String>;

/// Resolve `options` for a resource of `resource_type` in `namespace`.
///
/// The map starts with `type = resource_type`, then each option is applied in
/// order with last-write-wins, so a declared `type` option overrides the
/// default and repeated names keep the final value.
///
/// A reference to an object missing from its snapshot fails with
/// [`Error::DependencyNotFound`] and no map is returned. A missing key inside
/// a present object resolves to an empty string, as does an option with no
/// value at all.
pub fn resolve_options(
    resource_type: &str,
    namespace: &str,
    options: &[DeclaredOption],
    secrets: &SecretSnapshot,
    config_maps: &ConfigMapSnapshot,
) -> Result<ResolvedOptions> {
    let mut resolved = ResolvedOptions::new();
    resolved.insert(TYPE_KEY.to_string(), resource_type.to_string());

    for option in options {
        let value = match option.source() {
            OptionSource::Literal(value) => value.to_string(),
            OptionSource::ConfigMap(selector) => {
                let key = lookup_key(ObjectKind::ConfigMap, namespace, selector);
                let Some(config_map) = config_maps.get(&key) else {
                    return Err(unmet_dependency(ObjectKind::ConfigMap, key));
                };
                config_map
                    .text(&selector.key)
                    .map(str::to_string)
                    .unwrap_or_else(|| missing_key(ObjectKind::ConfigMap, &key, &selector.key))
            }
            OptionSource::Secret(selector) => {
                let key = lookup_key(ObjectKind::Secret, namespace, selector);
                let Some(secret) = secrets.get(&key) else {
                    return Err(unmet_dependency(ObjectKind::Secret, key));
                };
                secret
                    .text(&selector.key)
                    .unwrap_or_else(|| missing_key(ObjectKind::Secret, &key, &selector.key))
            }
            OptionSource::Empty => String::new(),
        };

        resolved.insert(option.name.clone(), value);
    }

    tracing::debug!(
        resource_type,
        namespace,
        options = options.len(),
        "Resolved runtime config options"
    );

    Ok(resolved)
}

fn lookup_key(kind: ObjectKind, namespace: &str, selector: &KeySelector) -> NamespacedName {
    tracing::trace!(%kind, namespace, object = %selector.name, key = %selector.key, "Resolving reference");
    NamespacedName::new(namespace, &selector.name)
}

fn unmet_dependency(kind: ObjectKind, key: NamespacedName) -> Error {
    tracing::warn!(%kind, object = %key, "Referenced object missing from snapshot");
    Error::DependencyNotFound {
        kind,
        namespace: key.namespace,
        name: key.name,
    }
}

fn missing_key(kind: ObjectKind, object: &NamespacedName, key: &str) -> String {
    tracing::trace!(%kind, %object, key, "Key not present, using empty value");
    String::new()
}
