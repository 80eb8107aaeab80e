//! The `folio-seed` command: flags, store selection, and exit codes.
//!
//! | Outcome       | Exit code | When                                              |
//! |---------------|-----------|---------------------------------------------------|
//! | `Success`     | `0`       | every operation succeeded, or `--list`/`--clear-only` finished |
//! | `RunFailed`   | `1`       | an operation's `execute` failed                   |
//! | `SetupFailed` | `2`       | configuration, connection, or registry validation failed |

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use folio_db::store::{DataStore, MemoryStore, PgStore};

use crate::config::{ConfigError, SeedConfig};
use crate::operations::default_registry;
use crate::orchestrator::{Orchestrator, RunReport};
use crate::registry::OperationRegistry;
use crate::report;

#[derive(Debug, Default, Parser)]
#[command(
    name = "folio-seed",
    about = "Clear and reload the Folio content tables in dependency order",
    version
)]
pub struct Cli {
    /// Only run the clear phase (reverse order, best effort)
    #[arg(long, conflicts_with = "list")]
    pub clear_only: bool,

    /// Print the execution plan and exit
    #[arg(long)]
    pub list: bool,

    /// Seed an in-memory store instead of the database
    #[arg(long, env = "SEED_DRY_RUN")]
    pub dry_run: bool,
}

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    RunFailed,
    SetupFailed,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::RunFailed => 1,
            Self::SetupFailed => 2,
        }
    }

    pub fn of_run(report: &RunReport) -> Self {
        if report.is_success() {
            Self::Success
        } else {
            Self::RunFailed
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Run one invocation. Every error before the first operation runs becomes
/// [`Outcome::SetupFailed`].
pub async fn run(cli: &Cli, config: Result<SeedConfig, ConfigError>) -> Outcome {
    settle(try_run(cli, config).await)
}

fn settle(result: anyhow::Result<Outcome>) -> Outcome {
    match result {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Seed aborted before running");
            eprintln!("error: {err:#}");
            Outcome::SetupFailed
        }
    }
}

async fn try_run(cli: &Cli, config: Result<SeedConfig, ConfigError>) -> anyhow::Result<Outcome> {
    let config = config?;
    let store = open_store(cli, &config).await?;
    let registry = default_registry(store, &config)?;
    drive(cli, registry).await
}

async fn open_store(cli: &Cli, config: &SeedConfig) -> anyhow::Result<Arc<dyn DataStore>> {
    if cli.dry_run || cli.list {
        tracing::info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let database_url = config.require_database_url()?;
    let pool = folio_db::create_pool(database_url, &config.pool)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Database connection pool created");

    folio_db::health_check(&pool)
        .await
        .context("database health check failed")?;
    tracing::info!("Database health check passed");

    Ok(Arc::new(PgStore::new(pool)))
}

/// Validate `registry`, then list, clear, or seed it.
async fn drive(cli: &Cli, registry: OperationRegistry) -> anyhow::Result<Outcome> {
    registry.validate()?;

    if cli.list {
        print!("{}", report::format_plan(&registry));
        return Ok(Outcome::Success);
    }

    let orchestrator = Orchestrator::new(registry);

    if cli.clear_only {
        let failures = orchestrator.clear_all().await;
        println!(
            "Cleared {} operations ({failures} clear failures logged)",
            orchestrator.registry().len()
        );
        return Ok(Outcome::Success);
    }

    let run = orchestrator.run_all().await;
    let summary = report::summarize(&run.results);
    println!("{}", report::format(&summary, &run.results));

    if let Some(failed) = run.failure() {
        eprintln!(
            "Seeding stopped at '{}': {}",
            failed.name,
            failed.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(Outcome::of_run(&run))
}
