//! azrh - Azure DevOps release helper
//!
//! ## Commands
//!
//! - `create`: interactively assemble and create a release
//! - `compare`: diff two releases, or one release against its definition's
//!   live default versions
//! - `currently-deployed`: show the release deployed to each environment
//!
//! Project, organization URL, and personal access token come from global
//! flags or their environment variables (`AZURE_PROJECT`, `AZURE_BASE_URL`,
//! `AZURE_PERSONAL_ACCESS_TOKEN`).

mod prompt;
mod table;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use azrh_core::{CreateOptions, HttpReleaseService};

use crate::prompt::TerminalPrompter;
use crate::table::TerminalTable;

#[derive(Parser)]
#[command(name = "azrh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Azure DevOps release helper", long_about = None)]
struct Cli {
    /// Azure DevOps project
    #[arg(short = 'p', long, global = true, env = "AZURE_PROJECT")]
    project: Option<String>,

    /// Organization URL, https://dev.azure.com/<ORG>
    #[arg(short = 'o', long, global = true, env = "AZURE_BASE_URL")]
    org: Option<String>,

    /// Personal access token
    #[arg(
        short = 'P',
        long,
        global = true,
        env = "AZURE_PERSONAL_ACCESS_TOKEN",
        hide_env_values = true
    )]
    pat: Option<String>,

    /// Enable verbose output
    #[arg(long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new release
    Create {
        /// Release definition id
        #[arg(short = 'd', long, env = "AZURE_RELEASE_DEFINITION")]
        definition: Option<u32>,

        /// Base release whose versions seed the new release
        #[arg(short = 'b', long)]
        base: Option<u32>,
    },

    /// Compare two releases, or one release against its definition's
    /// current default versions
    Compare {
        /// Id of the release
        release1: u32,

        /// Id of the release to compare against (default: the definition's
        /// live defaults)
        release2: Option<u32>,
    },

    /// Show the release currently deployed to each environment
    CurrentlyDeployed {
        /// Release definition id
        #[arg(short = 'd', long, env = "AZURE_RELEASE_DEFINITION")]
        definition: Option<u32>,
    },
}

/// Connection settings, resolved once before any remote call.
#[derive(Debug)]
struct Config {
    project: String,
    org: String,
    pat: String,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        Ok(Config {
            project: self
                .project
                .clone()
                .context("project is required: set AZURE_PROJECT or pass --project")?,
            org: self
                .org
                .clone()
                .context("organization URL is required: set AZURE_BASE_URL or pass --org")?,
            pat: self
                .pat
                .clone()
                .context("token is required: set AZURE_PERSONAL_ACCESS_TOKEN or pass --pat")?,
        })
    }
}

fn require_definition(definition: Option<u32>) -> Result<u32> {
    definition.context("definition id is required: set AZURE_RELEASE_DEFINITION or pass --definition")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    azrh_core::init_tracing(cli.json, level);

    let config = cli.config()?;
    let service = HttpReleaseService::new(&config.org, &config.pat)
        .context("Failed to create release API client")?;
    let mut sink = TerminalTable::new();

    match cli.command {
        Commands::Create { definition, base } => {
            let options = CreateOptions {
                project: config.project,
                definition_id: require_definition(definition)?,
                base_release: base,
            };
            let prompter = TerminalPrompter::new();
            let created =
                azrh_core::create_release(&service, &prompter, &mut sink, &options).await?;
            match created {
                Some(release) => {
                    println!("release with id {} successfully created", release.id);
                }
                None => println!("release creation cancelled"),
            }
        }
        Commands::Compare { release1, release2 } => match release2 {
            Some(release2) => {
                azrh_core::compare_releases(&service, &mut sink, &config.project, release1, release2)
                    .await?;
            }
            None => {
                azrh_core::compare_with_defaults(&service, &mut sink, &config.project, release1)
                    .await?;
            }
        },
        Commands::CurrentlyDeployed { definition } => {
            azrh_core::currently_deployed(
                &service,
                &mut sink,
                &config.project,
                require_definition(definition)?,
            )
            .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_with_base() {
        let cli = Cli::parse_from([
            "azrh", "-p", "contoso", "-o", "https://dev.azure.com/contoso", "-P", "token",
            "create", "--definition", "12", "--base", "2005",
        ]);

        let config = cli.config().expect("config");
        assert_eq!(config.project, "contoso");
        match cli.command {
            Commands::Create { definition, base } => {
                assert_eq!(definition, Some(12));
                assert_eq!(base, Some(2005));
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_compare_with_one_release() {
        let cli = Cli::parse_from([
            "azrh", "-p", "contoso", "-o", "https://dev.azure.com/contoso", "-P", "token",
            "compare", "2027",
        ]);

        match cli.command {
            Commands::Compare { release1, release2 } => {
                assert_eq!(release1, 2027);
                assert_eq!(release2, None);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_missing_project_is_a_config_error() {
        let cli = Cli::parse_from([
            "azrh",
            "-o",
            "https://dev.azure.com/contoso",
            "-P",
            "token",
            "compare",
            "1",
        ]);

        // only meaningful when AZURE_PROJECT is not set in the environment
        if cli.project.is_none() {
            let err = cli.config().expect_err("missing project");
            assert!(err.to_string().contains("AZURE_PROJECT"));
        }
    }
}
