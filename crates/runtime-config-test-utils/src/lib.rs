//! Shared test utilities for the runtime-config workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`snapshot`] — [`SnapshotBuilder`] for secret and config snapshots
//! - [`options`] — terse constructors for declared option lists

pub mod options;
pub mod snapshot;

pub use snapshot::{SnapshotBuilder, TEST_NAMESPACE, sample_snapshots};
