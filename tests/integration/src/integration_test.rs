//! End-to-end integration test for runtime config assembly
//!
//! This test exercises the complete flow: declaration file -> dependency
//! check -> assembly -> rendered TOML document.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use runtime_config::{Error, RuntimeConfigDeclaration};
use runtime_config_test_utils::{SnapshotBuilder, TEST_NAMESPACE, sample_snapshots};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/workloads")
        .join(name)
}

fn load_spin_app() -> RuntimeConfigDeclaration {
    RuntimeConfigDeclaration::from_path(fixture("spin-app.toml")).unwrap()
}

fn table(value: &toml::Value) -> Vec<(String, String)> {
    value
        .as_table()
        .unwrap()
        .iter()
        .map(|(k, v)| (k.clone(), v.as_str().unwrap().to_string()))
        .collect()
}

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_full_assembly_renders_runtime_config() {
    let declaration = load_spin_app();
    let snapshots = sample_snapshots();

    // Pre-validation done by the caller before assembly
    for dep in declaration.dependencies(TEST_NAMESPACE) {
        assert!(snapshots.contains(&dep), "missing dependency {}", dep.key);
    }

    let config = declaration.assemble(TEST_NAMESPACE, &snapshots).unwrap();
    let rendered = config.to_toml_string().unwrap();
    let document: toml::Value = toml::from_str(&rendered).unwrap();

    let providers = document["config_provider"].as_array().unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(
        table(&providers[0]),
        pairs(&[
            ("dotenv_path", ".env"),
            ("prefix", "SPIN_VARIABLE"),
            ("type", "env"),
        ])
    );
    assert_eq!(providers[1]["type"].as_str(), Some("vault"));
    assert_eq!(providers[1]["mount"].as_str(), Some("secret"));

    assert_eq!(
        table(&document["key_value_store"]["default"]),
        pairs(&[("path", "/data/kv.db"), ("type", "spin")])
    );
    assert_eq!(
        table(&document["key_value_store"]["cache"]),
        pairs(&[("type", "redis"), ("url", "redis://cache:6379")])
    );
    assert_eq!(
        table(&document["sqlite_database"]["default"]),
        pairs(&[("path", "/data/app.db"), ("type", "spin")])
    );
    assert_eq!(
        table(&document["sqlite_database"]["remote"]),
        pairs(&[
            ("token", "t0k3n"),
            ("type", "libsql"),
            ("unset", ""),
            ("url", "https://db.local"),
        ])
    );
    assert_eq!(
        table(&document["llm_compute"]),
        pairs(&[
            ("auth_token", "s3cr3t"),
            ("type", "remote_http"),
            ("url", "http://llm.local"),
        ])
    );
}

#[test]
fn test_assembly_out_of_sync_with_validation() {
    let declaration = load_spin_app();
    // Validation saw app-settings, but it vanished before resolution.
    let snapshots = SnapshotBuilder::new()
        .secret("cache-secret", "url", "redis://cache:6379")
        .secret("db-secret", "token", "t0k3n")
        .build();

    let err = declaration.assemble(TEST_NAMESPACE, &snapshots).unwrap_err();

    assert!(err.is_internal_inconsistency());
    assert!(matches!(err, Error::DependencyNotFound { ref name, .. } if name == "app-settings"));
}

#[test]
fn test_same_declaration_in_another_namespace() {
    let declaration = load_spin_app();
    let snapshots = SnapshotBuilder::new()
        .in_namespace("ns2")
        .secret("cache-secret", "url", "redis://ns2-cache:6379")
        .secret("db-secret", "token", "ns2-token")
        .secret("db-secret", "pw", "ns2-pw")
        .config_map("app-settings", "path", "/ns2/app.db")
        .config_map("app-settings", "llm_url", "http://ns2-llm")
        .build();

    let config = declaration.assemble("ns2", &snapshots).unwrap();

    assert_eq!(
        config.key_value_store("cache").unwrap()["url"],
        "redis://ns2-cache:6379"
    );
    assert_eq!(config.llm_compute().unwrap()["auth_token"], "ns2-pw");
}
