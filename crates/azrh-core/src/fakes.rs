//! Scripted in-memory fakes for the capability ports (testing only)
//!
//! `ScriptedReleaseService`, `ScriptedInteraction`, and `RecordingSink`
//! satisfy the port contracts without a network or a terminal, so the flows
//! can be exercised end to end with pre-seeded data and queued answers.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::VersionCatalogEntry;
use crate::error::{AzrhError, Result};
use crate::ports::{
    Cell, CreatedRelease, InteractionPort, ReleaseDefinition, ReleaseService, TableSink,
};
use crate::request::ReleaseCreationRequest;
use crate::snapshot::ReleaseSnapshot;

// ---------------------------------------------------------------------------
// ScriptedReleaseService
// ---------------------------------------------------------------------------

/// In-memory release service seeded with definitions, catalogs, and
/// releases; records every creation request it receives.
#[derive(Debug, Default)]
pub struct ScriptedReleaseService {
    definitions: HashMap<u32, ReleaseDefinition>,
    catalogs: HashMap<u32, Vec<VersionCatalogEntry>>,
    releases: HashMap<u32, ReleaseSnapshot>,
    created: Mutex<Vec<ReleaseCreationRequest>>,
}

impl ScriptedReleaseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definition(mut self, definition: ReleaseDefinition) -> Self {
        self.definitions.insert(definition.id, definition);
        self
    }

    pub fn with_catalog(mut self, definition_id: u32, catalog: Vec<VersionCatalogEntry>) -> Self {
        self.catalogs.insert(definition_id, catalog);
        self
    }

    pub fn with_release(mut self, release: ReleaseSnapshot) -> Self {
        self.releases.insert(release.id, release);
        self
    }

    /// Creation requests received so far, in submission order.
    pub fn created(&self) -> Vec<ReleaseCreationRequest> {
        self.created.lock().unwrap().clone()
    }
}

fn not_found(what: &str, id: u32) -> AzrhError {
    AzrhError::RemoteQuery {
        status: 404,
        body: format!("{what} {id} not found"),
    }
}

#[async_trait]
impl ReleaseService for ScriptedReleaseService {
    async fn release_definition(
        &self,
        _project: &str,
        definition_id: u32,
    ) -> Result<ReleaseDefinition> {
        self.definitions
            .get(&definition_id)
            .cloned()
            .ok_or_else(|| not_found("definition", definition_id))
    }

    async fn artifact_versions(
        &self,
        _project: &str,
        definition_id: u32,
    ) -> Result<Vec<VersionCatalogEntry>> {
        self.catalogs
            .get(&definition_id)
            .cloned()
            .ok_or_else(|| not_found("artifact versions for definition", definition_id))
    }

    async fn release(&self, _project: &str, release_id: u32) -> Result<ReleaseSnapshot> {
        self.releases
            .get(&release_id)
            .cloned()
            .ok_or_else(|| not_found("release", release_id))
    }

    async fn create_release(
        &self,
        _project: &str,
        request: &ReleaseCreationRequest,
    ) -> Result<CreatedRelease> {
        let mut created = self.created.lock().unwrap();
        created.push(request.clone());
        Ok(CreatedRelease {
            id: 9000 + created.len() as u32,
        })
    }
}

// ---------------------------------------------------------------------------
// ScriptedInteraction
// ---------------------------------------------------------------------------

/// One queued prompt answer.
#[derive(Debug, Clone)]
pub enum Answer {
    /// Indices for a multi selection.
    Selection(Vec<usize>),
    /// Index for a single selection.
    Choice(usize),
    /// Answer to a confirmation.
    Confirmation(bool),
}

/// Interaction port fed from a queue of [`Answer`]s. A missing or
/// mismatched answer fails the prompt, which unwinds the flow the same way
/// an aborted terminal prompt would.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: Mutex<VecDeque<Answer>>,
}

impl ScriptedInteraction {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
        }
    }

    fn next(&self, prompt: &str) -> Result<Answer> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AzrhError::Interaction(format!("no scripted answer for '{prompt}'")))
    }
}

#[async_trait]
impl InteractionPort for ScriptedInteraction {
    async fn select_many(
        &self,
        prompt: &str,
        _options: &[String],
        _preselect_all: bool,
    ) -> Result<Vec<usize>> {
        match self.next(prompt)? {
            Answer::Selection(indices) => Ok(indices),
            other => Err(AzrhError::Interaction(format!(
                "expected a multi selection for '{prompt}', scripted answer was {other:?}"
            ))),
        }
    }

    async fn select_one(&self, prompt: &str, _options: &[String]) -> Result<usize> {
        match self.next(prompt)? {
            Answer::Choice(index) => Ok(index),
            other => Err(AzrhError::Interaction(format!(
                "expected a single selection for '{prompt}', scripted answer was {other:?}"
            ))),
        }
    }

    async fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirmation(answer) => Ok(answer),
            other => Err(AzrhError::Interaction(format!(
                "expected a confirmation for '{prompt}', scripted answer was {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// One table as a sink received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Table sink that captures every table for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub tables: Vec<RenderedTable>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableSink for RecordingSink {
    fn table(&mut self, header: &[&str], rows: Vec<Vec<Cell>>) {
        self.tables.push(RenderedTable {
            header: header.iter().map(|h| (*h).to_string()).collect(),
            rows,
        });
    }
}
