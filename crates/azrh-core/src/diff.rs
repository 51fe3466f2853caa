//! Alias-by-alias version difference detection.
//!
//! One rule serves every comparison in azrh: two sources differ on an alias
//! when their version display names differ, with absence reading as the
//! empty string. Iteration order is the caller's (always the left-hand
//! source's natural order), so aliases only the right-hand side produces are
//! never inspected.

use crate::catalog::VersionCatalogEntry;
use crate::reconcile::ArtifactMetadata;
use crate::snapshot::ReleaseSnapshot;

/// Anything that can answer "what version name does this alias carry?".
pub trait VersionSource {
    /// Display name of the version pinned for `alias`, if any.
    fn version_name(&self, alias: &str) -> Option<&str>;
}

impl VersionSource for ReleaseSnapshot {
    fn version_name(&self, alias: &str) -> Option<&str> {
        self.version(alias).map(|v| v.name.as_str())
    }
}

impl VersionSource for [ArtifactMetadata] {
    fn version_name(&self, alias: &str) -> Option<&str> {
        self.iter()
            .find(|a| a.alias == alias)
            .and_then(|a| a.version.as_ref())
            .map(|v| v.name.as_str())
    }
}

/// View of a catalog exposing each alias's default version.
pub struct CatalogDefaults<'a>(pub &'a [VersionCatalogEntry]);

impl VersionSource for CatalogDefaults<'_> {
    fn version_name(&self, alias: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|entry| entry.alias == alias)
            .and_then(|entry| entry.default_version.as_ref())
            .map(|v| v.name.as_str())
    }
}

/// Difference verdict for one alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDiff {
    pub alias: String,
    pub differs: bool,
}

/// Compare two version sources alias by alias, in the order supplied by the
/// caller.
///
/// Comparison is exact, case-sensitive display-name equality; the version
/// identifier is deliberately not consulted. A rebuild under a new id but an
/// unchanged name therefore reads as "no difference".
pub fn diff_aliases<'a, A, B, I>(a: &A, b: &B, aliases: I) -> Vec<AliasDiff>
where
    A: VersionSource + ?Sized,
    B: VersionSource + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    aliases
        .into_iter()
        .map(|alias| AliasDiff {
            alias: alias.to_string(),
            differs: a.version_name(alias).unwrap_or("") != b.version_name(alias).unwrap_or(""),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VersionRef;
    use crate::snapshot::SnapshotArtifact;

    fn snapshot(id: u32, artifacts: &[(&str, &str)]) -> ReleaseSnapshot {
        ReleaseSnapshot {
            id,
            name: format!("Release-{id}"),
            definition_id: None,
            artifacts: artifacts
                .iter()
                .map(|(alias, name)| SnapshotArtifact {
                    alias: (*alias).to_string(),
                    version: VersionRef::new("x", *name),
                })
                .collect(),
        }
    }

    #[test]
    fn test_diff_follows_left_hand_order() {
        // Alias "api" exists only on the right-hand side and is never
        // inspected because iteration follows release A's aliases.
        let a = snapshot(1, &[("web", "v1.0")]);
        let b = snapshot(2, &[("web", "v1.0"), ("api", "v2.0")]);

        let aliases: Vec<&str> = a.aliases().collect();
        let diffs = diff_aliases(&a, &b, aliases);
        assert_eq!(
            diffs,
            vec![AliasDiff {
                alias: "web".to_string(),
                differs: false,
            }]
        );
    }

    #[test]
    fn test_diff_is_symmetric_and_reflexive() {
        let a = snapshot(1, &[("web", "v1.0"), ("api", "v2.0")]);
        let b = snapshot(2, &[("web", "v1.1"), ("api", "v2.0")]);
        let aliases = ["web", "api"];

        let ab = diff_aliases(&a, &b, aliases.iter().copied());
        let ba = diff_aliases(&b, &a, aliases.iter().copied());
        assert_eq!(ab, ba);

        let aa = diff_aliases(&a, &a, aliases.iter().copied());
        assert!(aa.iter().all(|d| !d.differs));
    }

    #[test]
    fn test_absence_against_presence_differs() {
        let a = snapshot(1, &[("web", "v1.0")]);
        let b = snapshot(2, &[]);

        let diffs = diff_aliases(&a, &b, ["web"]);
        assert!(diffs[0].differs);
    }

    #[test]
    fn test_absence_on_both_sides_does_not_differ() {
        let a = snapshot(1, &[]);
        let b = snapshot(2, &[]);

        let diffs = diff_aliases(&a, &b, ["web"]);
        assert!(!diffs[0].differs);
    }

    #[test]
    fn test_name_comparison_is_case_sensitive() {
        let a = snapshot(1, &[("web", "V1.0")]);
        let b = snapshot(2, &[("web", "v1.0")]);

        let diffs = diff_aliases(&a, &b, ["web"]);
        assert!(diffs[0].differs);
    }

    #[test]
    fn test_same_name_different_id_reads_equal() {
        // Name-only comparison: a rebuild under a new id with an unchanged
        // display name is reported as "no difference".
        let a = ReleaseSnapshot {
            id: 1,
            name: "a".to_string(),
            definition_id: None,
            artifacts: vec![SnapshotArtifact {
                alias: "web".to_string(),
                version: VersionRef::new("101", "v1.0"),
            }],
        };
        let b = ReleaseSnapshot {
            id: 2,
            name: "b".to_string(),
            definition_id: None,
            artifacts: vec![SnapshotArtifact {
                alias: "web".to_string(),
                version: VersionRef::new("202", "v1.0"),
            }],
        };

        let diffs = diff_aliases(&a, &b, ["web"]);
        assert!(!diffs[0].differs);
    }

    #[test]
    fn test_catalog_defaults_and_artifact_list_sources() {
        let catalog = vec![VersionCatalogEntry {
            alias: "web".to_string(),
            default_version: Some(VersionRef::new("1", "v1.0")),
            available_versions: vec![],
        }];
        let artifacts = vec![ArtifactMetadata {
            alias: "web".to_string(),
            version: Some(VersionRef::new("2", "v1.1")),
        }];

        let diffs = diff_aliases(artifacts.as_slice(), &CatalogDefaults(&catalog), ["web"]);
        assert!(diffs[0].differs);
    }
}
