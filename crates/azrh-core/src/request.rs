//! Release creation payload assembly.

use crate::reconcile::ArtifactMetadata;

/// Everything the remote service needs to create a release. Built once per
/// creation flow and submitted exactly once.
///
/// Pure assembly: `manual_environments` is trusted to be a subset of the
/// definition's environments because the selection UI already constrains the
/// choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCreationRequest {
    pub definition_id: u32,
    pub manual_environments: Vec<String>,
    pub artifacts: Vec<ArtifactMetadata>,
}

impl ReleaseCreationRequest {
    pub fn new(
        definition_id: u32,
        manual_environments: Vec<String>,
        artifacts: Vec<ArtifactMetadata>,
    ) -> Self {
        Self {
            definition_id,
            manual_environments,
            artifacts,
        }
    }
}
