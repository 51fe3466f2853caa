//! Comparison and inspection flows: release vs release, release vs its
//! definition's live defaults, and the currently deployed release per
//! environment.

use tracing::debug;

use crate::diff::{diff_aliases, CatalogDefaults, VersionSource};
use crate::error::Result;
use crate::ports::{Cell, ReleaseService, TableSink, Tone};

/// Compare two releases alias by alias, iterating in the first release's
/// artifact order. Cells of the second release that differ get the changed
/// tone.
pub async fn compare_releases(
    service: &dyn ReleaseService,
    sink: &mut dyn TableSink,
    project: &str,
    release_a: u32,
    release_b: u32,
) -> Result<()> {
    let a = service.release(project, release_a).await?;
    let b = service.release(project, release_b).await?;
    debug!(release_a = a.id, release_b = b.id, "comparing releases");

    let aliases: Vec<&str> = a.aliases().collect();
    let diffs = diff_aliases(&a, &b, aliases.iter().copied());

    let rows = a
        .artifacts
        .iter()
        .zip(&diffs)
        .map(|(artifact, diff)| {
            let b_name = b
                .version(&artifact.alias)
                .map_or("", |v| v.name.as_str());
            vec![
                Cell::plain(artifact.alias.clone()),
                Cell::plain(artifact.version.name.clone()),
                Cell::toned(b_name, tone_for(diff.differs)),
            ]
        })
        .collect();

    sink.table(&["artifact", &a.name, &b.name], rows);
    Ok(())
}

/// Compare a release against the live default versions of its own release
/// definition. The release must know its definition; a release without one
/// is a fatal, descriptive error.
pub async fn compare_with_defaults(
    service: &dyn ReleaseService,
    sink: &mut dyn TableSink,
    project: &str,
    release_id: u32,
) -> Result<()> {
    let release = service.release(project, release_id).await?;
    let definition_id = release.require_definition()?;
    let catalog = service.artifact_versions(project, definition_id).await?;
    debug!(release = release.id, definition_id, "comparing against live defaults");

    let defaults = CatalogDefaults(&catalog);
    let aliases: Vec<&str> = release.aliases().collect();
    let diffs = diff_aliases(&release, &defaults, aliases.iter().copied());

    let rows = release
        .artifacts
        .iter()
        .zip(&diffs)
        .map(|(artifact, diff)| {
            let default_name = defaults.version_name(&artifact.alias).unwrap_or("");
            vec![
                Cell::plain(artifact.alias.clone()),
                Cell::plain(artifact.version.name.clone()),
                Cell::toned(default_name, tone_for(diff.differs)),
            ]
        })
        .collect();

    sink.table(&["artifact", &release.name, "new Release"], rows);
    Ok(())
}

/// List each environment of a definition with the release currently deployed
/// to it.
pub async fn currently_deployed(
    service: &dyn ReleaseService,
    sink: &mut dyn TableSink,
    project: &str,
    definition_id: u32,
) -> Result<()> {
    let definition = service.release_definition(project, definition_id).await?;

    let rows = definition
        .environments
        .iter()
        .map(|env| {
            let name = if env.name.is_empty() {
                "unknown".to_string()
            } else {
                env.name.clone()
            };
            let release = env
                .current_release_id
                .map_or("unknown".to_string(), |id| id.to_string());
            vec![Cell::plain(name), Cell::plain(release)]
        })
        .collect();

    sink.table(&["Environment", "Release"], rows);
    Ok(())
}

fn tone_for(differs: bool) -> Tone {
    if differs {
        Tone::Changed
    } else {
        Tone::Plain
    }
}
