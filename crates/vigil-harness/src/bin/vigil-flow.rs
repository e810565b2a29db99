//! vigil-flow: run one flow verification against a database and print the
//! JSON report. Exits 1 when the run fails.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use vigil_core::config::VigilConfig;
use vigil_harness::FlowVerifier;
use vigil_observability::tracing_setup::init_tracing;
use vigil_observability::HealthMonitor;
use vigil_persistence::PersistenceEngine;
use vigil_storage::StorageEngine;

#[derive(Parser, Debug)]
#[command(name = "vigil-flow")]
#[command(about = "End-to-end save/fetch/audit verification of the recommendation store")]
struct Cli {
    /// SQLite database file (overrides storage.db_path)
    #[arg(long, env = "VIGIL_DB")]
    db: Option<PathBuf>,

    /// Synthetic records to write (overrides harness.record_count)
    #[arg(long)]
    records: Option<usize>,

    /// TOML configuration file
    #[arg(long, env = "VIGIL_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match &cli.config {
        Some(path) => VigilConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => VigilConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.storage.db_path = db.display().to_string();
    }
    if let Some(records) = cli.records {
        config.harness.record_count = records;
    }

    let storage = Arc::new(
        StorageEngine::open_with_config(&config.storage)
            .with_context(|| format!("opening {}", config.storage.db_path))?,
    );
    let monitor = Arc::new(HealthMonitor::new(config.health.clone()));
    let engine = Arc::new(PersistenceEngine::new(
        storage,
        monitor,
        config.persistence.clone(),
    ));
    let verifier = FlowVerifier::new(engine, config.harness.clone());

    let report = verifier.run().await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
