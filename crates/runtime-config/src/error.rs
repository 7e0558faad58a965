//! Error types for runtime-config

use std::path::PathBuf;

use crate::registry::ResourceKind;
use crate::snapshot::ObjectKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate definition for {kind} with name: {name}")]
    DuplicateName { kind: ResourceKind, name: String },

    /// A referenced secret or config object was missing from the snapshot.
    ///
    /// Dependencies are validated before assembly runs, so this only fires
    /// when validation and resolution disagree.
    #[error("unmet dependency while building config: {kind} ({namespace}/{name}) not found")]
    DependencyNotFound {
        kind: ObjectKind,
        namespace: String,
        name: String,
    },

    #[error("Invalid runtime config declaration: {message}")]
    InvalidDeclaration { message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render runtime config: {0}")]
    Render(#[from] toml::ser::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error signals that resolution ran out of sync with
    /// dependency validation, rather than a problem in the user's declaration.
    pub fn is_internal_inconsistency(&self) -> bool {
        matches!(self, Error::DependencyNotFound { .. })
    }
}
