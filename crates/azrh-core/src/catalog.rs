//! Version catalog: per-alias default and available versions of a release
//! definition, projected once at the boundary from the remote
//! artifact-versions query.
//!
//! Entry order follows the remote response and is the canonical display and
//! iteration order for the whole system.

use serde::{Deserialize, Serialize};

use crate::error::{AzrhError, Result};
use crate::remote::wire;

/// Placeholder rendered wherever a version has no resolvable display name.
pub const UNKNOWN_VERSION: &str = "unknown";

/// One selectable build version of an artifact source.
///
/// Difference detection throughout azrh compares `name` only, never `id`.
/// Two distinct builds sharing a display name are treated as identical; this
/// mirrors the remote service's own presentation and is deliberate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRef {
    /// Opaque identifier assigned by the remote service.
    pub id: String,
    /// Display name; the key used for all difference comparisons.
    pub name: String,
}

impl VersionRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Catalog row for one artifact alias.
///
/// `default_version`, when present, is expected to also be reachable by id
/// within `available_versions`; well-formed upstream data guarantees this and
/// azrh does not verify it independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCatalogEntry {
    pub alias: String,
    pub default_version: Option<VersionRef>,
    pub available_versions: Vec<VersionRef>,
}

/// Project the remote artifact-versions query into catalog entries,
/// validating each entry once so downstream consumers never null-check.
///
/// # Errors
///
/// `MissingAlias` if any entry lacks an alias (malformed upstream data).
pub fn catalog_from_wire(query: wire::ArtifactVersionQueryResult) -> Result<Vec<VersionCatalogEntry>> {
    query
        .artifact_versions
        .into_iter()
        .map(|av| {
            let alias = av
                .alias
                .filter(|a| !a.is_empty())
                .ok_or_else(|| AzrhError::MissingAlias {
                    context: "artifact versions query".to_string(),
                })?;
            Ok(VersionCatalogEntry {
                alias,
                default_version: av.default_version.map(VersionRef::from),
                available_versions: av.versions.into_iter().map(VersionRef::from).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::wire::{ArtifactVersion, ArtifactVersionQueryResult, BuildVersion};

    fn build(id: &str, name: &str) -> BuildVersion {
        BuildVersion {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_catalog_preserves_query_order() {
        let query = ArtifactVersionQueryResult {
            artifact_versions: vec![
                ArtifactVersion {
                    alias: Some("web".to_string()),
                    default_version: Some(build("1", "v1.0")),
                    versions: vec![build("1", "v1.0"), build("2", "v1.1")],
                },
                ArtifactVersion {
                    alias: Some("api".to_string()),
                    default_version: None,
                    versions: vec![],
                },
            ],
        };

        let catalog = catalog_from_wire(query).expect("catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].alias, "web");
        assert_eq!(catalog[1].alias, "api");
        assert_eq!(
            catalog[0].default_version,
            Some(VersionRef::new("1", "v1.0"))
        );
        assert!(catalog[1].default_version.is_none());
    }

    #[test]
    fn test_catalog_entry_without_alias_is_fatal() {
        let query = ArtifactVersionQueryResult {
            artifact_versions: vec![ArtifactVersion {
                alias: None,
                default_version: None,
                versions: vec![],
            }],
        };

        let err = catalog_from_wire(query).expect_err("missing alias");
        assert!(matches!(err, AzrhError::MissingAlias { .. }));
    }

    #[test]
    fn test_catalog_empty_alias_is_fatal() {
        let query = ArtifactVersionQueryResult {
            artifact_versions: vec![ArtifactVersion {
                alias: Some(String::new()),
                default_version: None,
                versions: vec![],
            }],
        };

        assert!(catalog_from_wire(query).is_err());
    }
}
