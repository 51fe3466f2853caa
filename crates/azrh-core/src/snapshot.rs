//! Release snapshot: a fetched release reduced to the fields azrh consumes,
//! projected once at the boundary.

use crate::catalog::VersionRef;
use crate::error::{AzrhError, Result};
use crate::remote::wire;

/// One artifact of a snapshot, in release order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotArtifact {
    pub alias: String,
    pub version: VersionRef,
}

/// A fetched release reduced to {alias -> version} plus the optional parent
/// definition id. Artifact order follows the release; an alias being absent
/// is valid (that release simply never produced it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSnapshot {
    pub id: u32,
    pub name: String,
    pub definition_id: Option<u32>,
    pub artifacts: Vec<SnapshotArtifact>,
}

impl ReleaseSnapshot {
    /// Version pinned for `alias`, if this release produced it.
    pub fn version(&self, alias: &str) -> Option<&VersionRef> {
        self.artifacts
            .iter()
            .find(|a| a.alias == alias)
            .map(|a| &a.version)
    }

    /// Aliases in release order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|a| a.alias.as_str())
    }

    /// The parent definition id, required by release-vs-live-defaults
    /// comparison.
    ///
    /// # Errors
    ///
    /// `MissingDefinition` naming this release when it has none.
    pub fn require_definition(&self) -> Result<u32> {
        self.definition_id.ok_or_else(|| AzrhError::MissingDefinition {
            id: self.id,
            name: self.name.clone(),
        })
    }
}

/// Key inside an artifact's `definitionReference` map that carries the
/// pinned version.
const VERSION_KEY: &str = "version";

/// Project a remote release into a [`ReleaseSnapshot`], discarding every
/// field azrh does not consume.
///
/// Artifacts whose reference map carries no version entry are skipped (the
/// alias is simply not part of the snapshot). An artifact without an alias is
/// malformed upstream data and fatal.
pub fn snapshot_from_wire(release: wire::Release) -> Result<ReleaseSnapshot> {
    let mut artifacts = Vec::with_capacity(release.artifacts.len());
    for artifact in release.artifacts {
        let Some(version) = artifact.definition_reference.get(VERSION_KEY) else {
            continue;
        };
        let alias = artifact
            .alias
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AzrhError::MissingAlias {
                context: format!("release {}", release.id),
            })?;
        artifacts.push(SnapshotArtifact {
            alias,
            version: VersionRef::new(version.id.clone(), version.name.clone()),
        });
    }

    Ok(ReleaseSnapshot {
        id: release.id,
        name: release.name,
        definition_id: release.release_definition.map(|d| d.id),
        artifacts,
    })
}
