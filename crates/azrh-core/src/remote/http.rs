//! HTTP implementation of [`ReleaseService`] against the Azure DevOps
//! Release REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::{catalog_from_wire, VersionCatalogEntry};
use crate::error::{AzrhError, Result};
use crate::ports::{CreatedRelease, EnvironmentSummary, ReleaseDefinition, ReleaseService};
use crate::remote::wire;
use crate::request::ReleaseCreationRequest;
use crate::snapshot::{snapshot_from_wire, ReleaseSnapshot};

const API_VERSION: &str = "7.1";

/// The Release API lives on the `vsrm` host; derive its base from the org
/// URL the operator configures (`https://dev.azure.com/<ORG>`).
pub fn release_api_base(org_url: &str) -> String {
    org_url
        .trim_end_matches('/')
        .replacen("://dev.azure.com", "://vsrm.dev.azure.com", 1)
}

/// Release API client. One method per endpoint, no caching, no retry;
/// every flow awaits these calls strictly sequentially.
pub struct HttpReleaseService {
    client: Client,
    base_url: String,
    pat: String,
}

impl HttpReleaseService {
    /// Build a client for the given organization URL, authenticating with a
    /// personal access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(org_url: &str, pat: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("azrh/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: release_api_base(org_url),
            pat: pat.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!(%url, "remote query");
        let response = self
            .client
            .get(&url)
            .basic_auth("", Some(&self.pat))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AzrhError::RemoteQuery { status, body });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ReleaseService for HttpReleaseService {
    async fn release_definition(
        &self,
        project: &str,
        definition_id: u32,
    ) -> Result<ReleaseDefinition> {
        let url = format!(
            "{}/{project}/_apis/release/definitions/{definition_id}?api-version={API_VERSION}",
            self.base_url
        );
        let definition: wire::ReleaseDefinition = self.get_json(url).await?;

        Ok(ReleaseDefinition {
            id: definition.id,
            name: definition.name,
            environments: definition
                .environments
                .into_iter()
                .map(|env| EnvironmentSummary {
                    name: env.name.unwrap_or_default(),
                    current_release_id: env.current_release.map(|r| r.id),
                })
                .collect(),
        })
    }

    async fn artifact_versions(
        &self,
        project: &str,
        definition_id: u32,
    ) -> Result<Vec<VersionCatalogEntry>> {
        let url = format!(
            "{}/{project}/_apis/release/artifactversions?releaseDefinitionId={definition_id}&api-version={API_VERSION}",
            self.base_url
        );
        let query: wire::ArtifactVersionQueryResult = self.get_json(url).await?;
        catalog_from_wire(query)
    }

    async fn release(&self, project: &str, release_id: u32) -> Result<ReleaseSnapshot> {
        let url = format!(
            "{}/{project}/_apis/release/releases/{release_id}?api-version={API_VERSION}",
            self.base_url
        );
        let release: wire::Release = self.get_json(url).await?;
        snapshot_from_wire(release)
    }

    async fn create_release(
        &self,
        project: &str,
        request: &ReleaseCreationRequest,
    ) -> Result<CreatedRelease> {
        let url = format!(
            "{}/{project}/_apis/release/releases?api-version={API_VERSION}",
            self.base_url
        );
        let body = wire::ReleaseStartMetadata::from(request);

        debug!(%url, definition_id = request.definition_id, "create release");
        let response = self
            .client
            .post(&url)
            .basic_auth("", Some(&self.pat))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AzrhError::RemoteQuery { status, body });
        }
        let created: wire::CreatedReleaseResponse = response.json().await?;
        Ok(CreatedRelease { id: created.id })
    }
}
