//! VigilRuntime: owns every engine behind the gateway.
//!
//! Embedders either hold their own `Arc<VigilRuntime>` or install one
//! process-wide with `initialize()` and reach it through `get()`.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use vigil_core::config::VigilConfig;
use vigil_core::errors::{VigilError, VigilResult};
use vigil_core::traits::IRecommendationStorage;
use vigil_harness::FlowVerifier;
use vigil_observability::{HealthMonitor, SystemHealthReporter};
use vigil_persistence::PersistenceEngine;
use vigil_storage::StorageEngine;

/// Global singleton.
static RUNTIME: OnceLock<Arc<VigilRuntime>> = OnceLock::new();

pub struct VigilRuntime {
    pub storage: Arc<dyn IRecommendationStorage>,
    pub monitor: Arc<HealthMonitor>,
    pub persistence: Arc<PersistenceEngine>,
    pub reporter: Arc<SystemHealthReporter>,
    pub harness: FlowVerifier,
    pub config: VigilConfig,
}

/// Options for building a runtime.
#[derive(Debug, Default, Clone)]
pub struct RuntimeOptions {
    /// Path to the SQLite database. If None, uses in-memory.
    pub db_path: Option<PathBuf>,
    /// TOML configuration string. If None, uses defaults.
    pub config_toml: Option<String>,
}

impl VigilRuntime {
    pub fn new(opts: RuntimeOptions) -> VigilResult<Self> {
        let mut config = match &opts.config_toml {
            Some(toml_str) => VigilConfig::from_toml(toml_str)?,
            None => VigilConfig::default(),
        };

        let storage = match &opts.db_path {
            Some(path) => {
                config.storage.db_path = path.display().to_string();
                StorageEngine::open_with_config(&config.storage)?
            }
            None => StorageEngine::open_in_memory()?,
        };
        Ok(Self::with_storage(Arc::new(storage), config))
    }

    /// Assemble the engines over an existing store.
    pub fn with_storage(storage: Arc<dyn IRecommendationStorage>, config: VigilConfig) -> Self {
        let monitor = Arc::new(HealthMonitor::new(config.health.clone()));
        let persistence = Arc::new(PersistenceEngine::new(
            Arc::clone(&storage),
            Arc::clone(&monitor),
            config.persistence.clone(),
        ));
        let reporter = Arc::new(SystemHealthReporter::new(
            Arc::clone(&storage),
            Arc::clone(&monitor),
        ));
        let harness = FlowVerifier::new(Arc::clone(&persistence), config.harness.clone());
        Self {
            storage,
            monitor,
            persistence,
            reporter,
            harness,
            config,
        }
    }
}

/// Install the process-wide runtime.
///
/// Returns an error if already initialized or if initialization fails.
pub fn initialize(opts: RuntimeOptions) -> VigilResult<()> {
    let runtime = VigilRuntime::new(opts)?;
    RUNTIME
        .set(Arc::new(runtime))
        .map_err(|_| VigilError::ConfigError("VigilRuntime already initialized".into()))
}

/// The process-wide runtime.
pub fn get() -> VigilResult<Arc<VigilRuntime>> {
    RUNTIME.get().cloned().ok_or_else(|| {
        VigilError::ConfigError("VigilRuntime not initialized. Call initialize() first.".into())
    })
}

pub fn is_initialized() -> bool {
    RUNTIME.get().is_some()
}
