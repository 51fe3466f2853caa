//! Capability ports: the narrow interfaces the core needs from its external
//! collaborators (remote service, interactive terminal, table display).
//!
//! Flows are written against these traits so they can be exercised in tests
//! with scripted fakes instead of a network or a terminal.

use async_trait::async_trait;

use crate::catalog::VersionCatalogEntry;
use crate::error::Result;
use crate::request::ReleaseCreationRequest;
use crate::snapshot::ReleaseSnapshot;

/// One deployment environment of a release definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSummary {
    pub name: String,
    /// Release currently deployed to this environment, if any.
    pub current_release_id: Option<u32>,
}

/// A release definition reduced to what azrh consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDefinition {
    pub id: u32,
    pub name: String,
    pub environments: Vec<EnvironmentSummary>,
}

/// Identity of a freshly created release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedRelease {
    pub id: u32,
}

/// Remote release-management service. Every call is a fresh remote query;
/// nothing is cached or retried.
#[async_trait]
pub trait ReleaseService: Send + Sync {
    /// Fetch a release definition with its environments.
    async fn release_definition(
        &self,
        project: &str,
        definition_id: u32,
    ) -> Result<ReleaseDefinition>;

    /// Fetch the per-alias version catalog of a definition, in the remote
    /// response's order.
    async fn artifact_versions(
        &self,
        project: &str,
        definition_id: u32,
    ) -> Result<Vec<VersionCatalogEntry>>;

    /// Fetch one release as a snapshot.
    async fn release(&self, project: &str, release_id: u32) -> Result<ReleaseSnapshot>;

    /// Create a release. Single atomic call; the one and only submission of
    /// a creation flow.
    async fn create_release(
        &self,
        project: &str,
        request: &ReleaseCreationRequest,
    ) -> Result<CreatedRelease>;
}

/// Interactive prompts answered by the operator. Each call blocks the flow
/// until an answer arrives; an aborted prompt unwinds the whole run.
#[async_trait]
pub trait InteractionPort: Send + Sync {
    /// Checkbox-style multi selection; returns indices into `options`.
    async fn select_many(
        &self,
        prompt: &str,
        options: &[String],
        preselect_all: bool,
    ) -> Result<Vec<usize>>;

    /// Filterable single selection; returns an index into `options`.
    async fn select_one(&self, prompt: &str, options: &[String]) -> Result<usize>;

    /// Yes/no confirmation.
    async fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Visual emphasis of one table cell. Mapping tones to colors is the
/// display layer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Differs from the left-hand comparison source.
    Changed,
    /// Differs from the version chosen for the release under construction.
    Alert,
}

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Row-oriented table display.
pub trait TableSink: Send {
    /// Render one table: a header row and ordered data rows.
    fn table(&mut self, header: &[&str], rows: Vec<Vec<Cell>>);
}
