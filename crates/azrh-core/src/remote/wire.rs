//! Serde shapes for the slice of the Azure DevOps Release REST API that azrh
//! consumes. Responses carry far more fields than these; everything not
//! listed here is dropped during deserialization and projected away by the
//! boundary extractors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::VersionRef;
use crate::request::ReleaseCreationRequest;

// ============================================================================
// Responses
// ============================================================================

/// `GET .../release/artifactversions?releaseDefinitionId=...`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactVersionQueryResult {
    #[serde(default)]
    pub artifact_versions: Vec<ArtifactVersion>,
}

/// Versions available for one artifact alias.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactVersion {
    pub alias: Option<String>,
    pub default_version: Option<BuildVersion>,
    #[serde(default)]
    pub versions: Vec<BuildVersion>,
}

/// One build version as the remote service reports it. Absent fields read as
/// empty strings, matching the empty-string absence rule of the diff engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildVersion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl From<BuildVersion> for VersionRef {
    fn from(build: BuildVersion) -> Self {
        VersionRef::new(build.id, build.name)
    }
}

impl From<&VersionRef> for BuildVersion {
    fn from(version: &VersionRef) -> Self {
        BuildVersion {
            id: version.id.clone(),
            name: version.name.clone(),
        }
    }
}

/// `GET .../release/releases/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    pub release_definition: Option<ShallowReference>,
}

/// One artifact of a release. `definition_reference` is a keyed map; the
/// `"version"` entry carries the pinned build.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub alias: Option<String>,
    #[serde(default)]
    pub definition_reference: HashMap<String, ReferenceField>,
}

/// One entry of an artifact's `definitionReference` map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceField {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Reference to another resource by id.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ShallowReference {
    pub id: u32,
}

/// `GET .../release/definitions/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDefinition {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub environments: Vec<ReleaseDefinitionEnvironment>,
}

/// One environment of a release definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDefinitionEnvironment {
    pub name: Option<String>,
    pub current_release: Option<ShallowReference>,
}

/// `POST .../release/releases` response; only the new id is consumed.
#[derive(Debug, Deserialize)]
pub struct CreatedReleaseResponse {
    pub id: u32,
}

// ============================================================================
// Creation payload
// ============================================================================

/// `POST .../release/releases` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseStartMetadata {
    pub definition_id: u32,
    pub manual_environments: Vec<String>,
    pub artifacts: Vec<ArtifactMetadataBody>,
}

/// Per-alias instance reference of the creation payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadataBody {
    pub alias: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_reference: Option<BuildVersion>,
}

impl From<&ReleaseCreationRequest> for ReleaseStartMetadata {
    fn from(request: &ReleaseCreationRequest) -> Self {
        ReleaseStartMetadata {
            definition_id: request.definition_id,
            manual_environments: request.manual_environments.clone(),
            artifacts: request
                .artifacts
                .iter()
                .map(|artifact| ArtifactMetadataBody {
                    alias: artifact.alias.clone(),
                    instance_reference: artifact.version.as_ref().map(BuildVersion::from),
                })
                .collect(),
        }
    }
}
