//! Release creation flow.
//!
//! Call sequence, strictly linear: definition -> version catalog -> optional
//! base release -> environment checkbox -> preview table -> per-alias version
//! picks -> result table -> confirmation -> one atomic create call. Declining
//! the confirmation ends the flow without touching the remote service.

use std::collections::HashMap;

use tracing::info;

use crate::catalog::{VersionCatalogEntry, VersionRef, UNKNOWN_VERSION};
use crate::diff::{diff_aliases, CatalogDefaults, VersionSource};
use crate::error::Result;
use crate::ports::{Cell, CreatedRelease, InteractionPort, ReleaseService, TableSink, Tone};
use crate::reconcile::{reconcile, ArtifactMetadata};
use crate::request::ReleaseCreationRequest;
use crate::snapshot::ReleaseSnapshot;

/// Inputs of one creation run.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub project: String,
    pub definition_id: u32,
    pub base_release: Option<u32>,
}

/// Interactively assemble and create a release.
///
/// Returns `Ok(None)` when the operator declines the final confirmation;
/// nothing is submitted in that case.
pub async fn create_release(
    service: &dyn ReleaseService,
    interaction: &dyn InteractionPort,
    sink: &mut dyn TableSink,
    options: &CreateOptions,
) -> Result<Option<CreatedRelease>> {
    let definition = service
        .release_definition(&options.project, options.definition_id)
        .await?;
    let catalog = service
        .artifact_versions(&options.project, options.definition_id)
        .await?;

    let base = match options.base_release {
        Some(release_id) => Some(service.release(&options.project, release_id).await?),
        None => None,
    };

    let environment_names: Vec<String> = definition
        .environments
        .iter()
        .map(|env| env.name.clone())
        .collect();
    let picked = interaction
        .select_many("manual environments", &environment_names, true)
        .await?;
    let manual_environments: Vec<String> = picked
        .into_iter()
        .filter_map(|index| environment_names.get(index).cloned())
        .collect();

    // preview before any customization
    let seeded = reconcile(&catalog, base.as_ref(), &HashMap::new());
    match &base {
        Some(base) => render_result_table(sink, &seeded, &catalog, Some(base)),
        None => render_simple_table(sink, &seeded),
    }

    let overrides = ask_overrides(interaction, &catalog).await?;
    let artifacts = reconcile(&catalog, base.as_ref(), &overrides);

    render_result_table(sink, &artifacts, &catalog, base.as_ref());

    if !interaction
        .confirm("Do you want to create this release?", true)
        .await?
    {
        info!("release creation declined, nothing submitted");
        return Ok(None);
    }

    let request =
        ReleaseCreationRequest::new(options.definition_id, manual_environments, artifacts);
    let created = service.create_release(&options.project, &request).await?;
    info!(release_id = created.id, "release created");
    Ok(Some(created))
}

/// Ask which aliases to customize, then pick one version per chosen alias.
async fn ask_overrides(
    interaction: &dyn InteractionPort,
    catalog: &[VersionCatalogEntry],
) -> Result<HashMap<String, VersionRef>> {
    let aliases: Vec<String> = catalog.iter().map(|entry| entry.alias.clone()).collect();
    let chosen = interaction
        .select_many("customize artifact", &aliases, false)
        .await?;

    let mut overrides = HashMap::new();
    for index in chosen {
        let Some(entry) = catalog.get(index) else {
            continue;
        };
        if entry.available_versions.is_empty() {
            continue;
        }
        let names: Vec<String> = entry
            .available_versions
            .iter()
            .map(|version| version.name.clone())
            .collect();
        let pick = interaction
            .select_one(&format!("select {}", entry.alias), &names)
            .await?;
        if let Some(version) = entry.available_versions.get(pick) {
            overrides.insert(entry.alias.clone(), version.clone());
        }
    }
    Ok(overrides)
}

fn chosen_name(artifact: &ArtifactMetadata) -> String {
    artifact
        .version
        .as_ref()
        .map_or(UNKNOWN_VERSION.to_string(), |v| v.name.clone())
}

/// Two-column preview when no base release is involved.
fn render_simple_table(sink: &mut dyn TableSink, artifacts: &[ArtifactMetadata]) {
    let rows = artifacts
        .iter()
        .map(|artifact| {
            vec![
                Cell::plain(artifact.alias.clone()),
                Cell::plain(chosen_name(artifact)),
            ]
        })
        .collect();
    sink.table(&["artifact", "Release"], rows);
}

/// Full preview: chosen versions next to the catalog defaults and, when
/// present, the base release. Reference cells that differ from the chosen
/// version get the alert tone; one independent diff pass per reference
/// column.
fn render_result_table(
    sink: &mut dyn TableSink,
    artifacts: &[ArtifactMetadata],
    catalog: &[VersionCatalogEntry],
    base: Option<&ReleaseSnapshot>,
) {
    let aliases: Vec<&str> = artifacts.iter().map(|a| a.alias.as_str()).collect();
    let vs_defaults = diff_aliases(artifacts, &CatalogDefaults(catalog), aliases.iter().copied());
    let vs_base =
        base.map(|base| diff_aliases(artifacts, base, aliases.iter().copied()));

    let defaults = CatalogDefaults(catalog);
    let rows = artifacts
        .iter()
        .enumerate()
        .map(|(index, artifact)| {
            let default_name = defaults
                .version_name(&artifact.alias)
                .unwrap_or(UNKNOWN_VERSION);
            let mut row = vec![
                Cell::plain(artifact.alias.clone()),
                Cell::plain(chosen_name(artifact)),
                Cell::toned(
                    default_name,
                    tone_for(vs_defaults[index].differs),
                ),
            ];
            if let (Some(base), Some(vs_base)) = (base, &vs_base) {
                let base_name = base
                    .version(&artifact.alias)
                    .map_or("", |v| v.name.as_str());
                row.push(Cell::toned(base_name, tone_for(vs_base[index].differs)));
            }
            row
        })
        .collect();

    match base {
        Some(base) => sink.table(
            &["artifact", "new Release", "default versions", &base.name],
            rows,
        ),
        None => sink.table(&["artifact", "new Release", "default versions"], rows),
    }
}

fn tone_for(differs: bool) -> Tone {
    if differs {
        Tone::Alert
    } else {
        Tone::Plain
    }
}
