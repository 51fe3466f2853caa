//! azrh core library
//!
//! Artifact version reconciliation and diffing for Azure DevOps releases:
//! resolve a definition's version catalog, merge defaults / base release /
//! explicit picks into an ordered artifact list, diff version sources alias
//! by alias, and assemble the creation payload. The operator-facing flows
//! are written against capability ports so every external collaborator
//! (remote API, terminal prompts, table display) can be swapped for a
//! scripted fake in tests.

pub mod catalog;
pub mod diff;
pub mod error;
pub mod fakes;
pub mod flows;
pub mod ports;
pub mod reconcile;
pub mod remote;
pub mod request;
pub mod snapshot;
pub mod telemetry;

pub use catalog::{catalog_from_wire, VersionCatalogEntry, VersionRef, UNKNOWN_VERSION};
pub use diff::{diff_aliases, AliasDiff, CatalogDefaults, VersionSource};
pub use error::{AzrhError, Result};
pub use flows::{
    compare_releases, compare_with_defaults, create_release, currently_deployed, CreateOptions,
};
pub use ports::{
    Cell, CreatedRelease, EnvironmentSummary, InteractionPort, ReleaseDefinition, ReleaseService,
    TableSink, Tone,
};
pub use reconcile::{apply_base, apply_overrides, reconcile, seed_defaults, ArtifactMetadata};
pub use remote::http::HttpReleaseService;
pub use request::ReleaseCreationRequest;
pub use snapshot::{snapshot_from_wire, ReleaseSnapshot, SnapshotArtifact};
pub use telemetry::init_tracing;

/// azrh version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
