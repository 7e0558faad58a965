//! Runtime configuration assembly for workloads.
//!
//! Operators declare variable providers, key/value stores, SQLite databases
//! and an LLM compute backend for a workload. Each option is a literal or a
//! reference into a secret or config object. This crate resolves those
//! options against pre-fetched snapshots and assembles the flat maps into a
//! [`RuntimeConfig`] document ready for serialization.
//!
//! Fetching the referenced objects and validating that they exist happens
//! before this crate is called.

pub mod declaration;
pub mod error;
pub mod logging;
pub mod option;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod snapshot;

pub use declaration::{
    DeclaredCompute, DeclaredResource, DeclaredVariablesProvider, RuntimeConfigDeclaration,
};
pub use error::{Error, Result};
pub use option::{DeclaredOption, KeySelector, OptionSource, ValueSource};
pub use provider::{EnvOptions, VariablesProvider, VaultOptions};
pub use registry::{ResourceKind, RuntimeConfig};
pub use resolver::{ResolvedOptions, TYPE_KEY, resolve_options};
pub use snapshot::{
    ConfigMapObject, ConfigMapSnapshot, NamespacedName, ObjectKind, ObjectRef, SecretObject,
    SecretSnapshot, Snapshots,
};
