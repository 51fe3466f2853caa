//! Three-tier artifact version reconciliation.
//!
//! A release under construction starts from the catalog defaults (tier 0),
//! may take versions from a prior "base" release (tier 1), and finally takes
//! the operator's explicit picks (tier 2). Each tier is a pure function from
//! one artifact list to the next, so every tier can be audited and tested in
//! isolation; [`reconcile`] chains them.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::{VersionCatalogEntry, VersionRef};
use crate::snapshot::ReleaseSnapshot;

/// Per-alias chosen version for a release under construction.
///
/// `version` is `None` when the catalog has no default and nothing
/// overwrote it; display renders that as an "unknown" placeholder, it is
/// never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMetadata {
    pub alias: String,
    pub version: Option<VersionRef>,
}

// ---------------------------------------------------------------------------
// Tier 0: catalog defaults
// ---------------------------------------------------------------------------

/// Seed one entry per catalog entry, in catalog order, carrying the
/// catalog's default version.
pub fn seed_defaults(catalog: &[VersionCatalogEntry]) -> Vec<ArtifactMetadata> {
    catalog
        .iter()
        .map(|entry| ArtifactMetadata {
            alias: entry.alias.clone(),
            version: entry.default_version.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tier 1: base release
// ---------------------------------------------------------------------------

/// Overwrite entries with versions taken from a base release.
///
/// For each alias the base release produced, the base's version id is looked
/// up within that alias's available versions; on a hit the entry takes the
/// catalog-sourced ref (never the snapshot's own ref), so every chosen
/// version originates from the authoritative catalog. A miss means the base
/// references a build that no longer exists: the entry silently keeps its
/// tier-0 value.
pub fn apply_base(
    current: &[ArtifactMetadata],
    catalog: &[VersionCatalogEntry],
    base: &ReleaseSnapshot,
) -> Vec<ArtifactMetadata> {
    current
        .iter()
        .map(|artifact| {
            let Some(base_version) = base.version(&artifact.alias) else {
                return artifact.clone();
            };
            let catalog_hit = catalog
                .iter()
                .find(|entry| entry.alias == artifact.alias)
                .and_then(|entry| {
                    entry
                        .available_versions
                        .iter()
                        .find(|v| v.id == base_version.id)
                });
            match catalog_hit {
                Some(version) => ArtifactMetadata {
                    alias: artifact.alias.clone(),
                    version: Some(version.clone()),
                },
                None => {
                    debug!(
                        alias = %artifact.alias,
                        version_id = %base_version.id,
                        "base release references a version absent from the catalog; keeping default"
                    );
                    artifact.clone()
                }
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tier 2: explicit overrides
// ---------------------------------------------------------------------------

/// Unconditionally overwrite entries with the operator's explicit picks.
/// Overrides always win, regardless of what tiers 0/1 produced.
pub fn apply_overrides(
    current: &[ArtifactMetadata],
    overrides: &HashMap<String, VersionRef>,
) -> Vec<ArtifactMetadata> {
    current
        .iter()
        .map(|artifact| match overrides.get(&artifact.alias) {
            Some(version) => ArtifactMetadata {
                alias: artifact.alias.clone(),
                version: Some(version.clone()),
            },
            None => artifact.clone(),
        })
        .collect()
}

/// Run all three tiers. The output contains exactly one entry per catalog
/// entry, in catalog order, including aliases no tier touched.
pub fn reconcile(
    catalog: &[VersionCatalogEntry],
    base: Option<&ReleaseSnapshot>,
    overrides: &HashMap<String, VersionRef>,
) -> Vec<ArtifactMetadata> {
    let mut artifacts = seed_defaults(catalog);
    if let Some(base) = base {
        artifacts = apply_base(&artifacts, catalog, base);
    }
    apply_overrides(&artifacts, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotArtifact;

    fn web_catalog() -> Vec<VersionCatalogEntry> {
        vec![VersionCatalogEntry {
            alias: "web".to_string(),
            default_version: Some(VersionRef::new("1", "v1.0")),
            available_versions: vec![VersionRef::new("1", "v1.0"), VersionRef::new("2", "v1.1")],
        }]
    }

    fn base_with(id: &str, name: &str) -> ReleaseSnapshot {
        ReleaseSnapshot {
            id: 2005,
            name: "Release-5".to_string(),
            definition_id: Some(12),
            artifacts: vec![SnapshotArtifact {
                alias: "web".to_string(),
                version: VersionRef::new(id, name),
            }],
        }
    }

    #[test]
    fn test_defaults_only() {
        let artifacts = reconcile(&web_catalog(), None, &HashMap::new());
        assert_eq!(
            artifacts,
            vec![ArtifactMetadata {
                alias: "web".to_string(),
                version: Some(VersionRef::new("1", "v1.0")),
            }]
        );
    }

    #[test]
    fn test_reconcile_matches_catalog_order_and_length() {
        let catalog = vec![
            VersionCatalogEntry {
                alias: "api".to_string(),
                default_version: Some(VersionRef::new("9", "v3.0")),
                available_versions: vec![VersionRef::new("9", "v3.0")],
            },
            VersionCatalogEntry {
                alias: "web".to_string(),
                default_version: None,
                available_versions: vec![],
            },
            VersionCatalogEntry {
                alias: "worker".to_string(),
                default_version: Some(VersionRef::new("4", "v0.4")),
                available_versions: vec![VersionRef::new("4", "v0.4")],
            },
        ];

        let artifacts = reconcile(&catalog, None, &HashMap::new());
        assert_eq!(artifacts.len(), catalog.len());
        for (artifact, entry) in artifacts.iter().zip(&catalog) {
            assert_eq!(artifact.alias, entry.alias);
            assert_eq!(artifact.version, entry.default_version);
        }
    }

    #[test]
    fn test_missing_default_stays_none() {
        let catalog = vec![VersionCatalogEntry {
            alias: "web".to_string(),
            default_version: None,
            available_versions: vec![VersionRef::new("1", "v1.0")],
        }];

        let artifacts = reconcile(&catalog, None, &HashMap::new());
        assert_eq!(artifacts[0].version, None);
    }

    #[test]
    fn test_base_release_overwrites_from_catalog() {
        let artifacts = reconcile(&web_catalog(), Some(&base_with("2", "v1.1")), &HashMap::new());
        assert_eq!(artifacts[0].version, Some(VersionRef::new("2", "v1.1")));
    }

    #[test]
    fn test_base_version_comes_from_catalog_not_snapshot() {
        // Same id, stale display name in the snapshot: the catalog's name wins.
        let artifacts = reconcile(
            &web_catalog(),
            Some(&base_with("2", "renamed-build")),
            &HashMap::new(),
        );
        assert_eq!(artifacts[0].version, Some(VersionRef::new("2", "v1.1")));
    }

    #[test]
    fn test_stale_base_reference_falls_back_to_default() {
        let artifacts = reconcile(&web_catalog(), Some(&base_with("99", "v9.9")), &HashMap::new());
        assert_eq!(artifacts[0].version, Some(VersionRef::new("1", "v1.0")));
    }

    #[test]
    fn test_base_alias_absent_from_snapshot_keeps_default() {
        let base = ReleaseSnapshot {
            id: 2005,
            name: "Release-5".to_string(),
            definition_id: None,
            artifacts: vec![],
        };
        let artifacts = reconcile(&web_catalog(), Some(&base), &HashMap::new());
        assert_eq!(artifacts[0].version, Some(VersionRef::new("1", "v1.0")));
    }

    #[test]
    fn test_override_wins_over_base() {
        let mut overrides = HashMap::new();
        overrides.insert("web".to_string(), VersionRef::new("2", "v1.1"));

        let artifacts = reconcile(&web_catalog(), Some(&base_with("1", "v1.0")), &overrides);
        assert_eq!(artifacts[0].version, Some(VersionRef::new("2", "v1.1")));
    }

    #[test]
    fn test_override_wins_without_base() {
        let mut overrides = HashMap::new();
        overrides.insert("web".to_string(), VersionRef::new("2", "v1.1"));

        let artifacts = reconcile(&web_catalog(), None, &overrides);
        assert_eq!(artifacts[0].version, Some(VersionRef::new("2", "v1.1")));
    }

    #[test]
    fn test_override_for_unknown_alias_is_ignored() {
        let mut overrides = HashMap::new();
        overrides.insert("api".to_string(), VersionRef::new("7", "v7"));

        let artifacts = reconcile(&web_catalog(), None, &overrides);
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].alias, "web");
        assert_eq!(artifacts[0].version, Some(VersionRef::new("1", "v1.0")));
    }

    #[test]
    fn test_tiers_leave_inputs_untouched() {
        let catalog = web_catalog();
        let seeded = seed_defaults(&catalog);
        let based = apply_base(&seeded, &catalog, &base_with("2", "v1.1"));

        // tier 1 produced a new list; tier 0's output is unchanged
        assert_eq!(seeded[0].version, Some(VersionRef::new("1", "v1.0")));
        assert_eq!(based[0].version, Some(VersionRef::new("2", "v1.1")));
    }
}
