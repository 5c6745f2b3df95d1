use parking_lot::RwLock;
use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, OnceLock},
    time::Duration,
};

use super::{cli::CliConfig, file::FileConfig, types::LogLevel};

// -----------------------------------------------------------------------------
// ----- Global Singleton ------------------------------------------------------

static ROOT_CONFIG: OnceLock<Arc<RwLock<Config>>> = OnceLock::new();

// -----------------------------------------------------------------------------
// ----- Config ----------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Config {
    pub queue_manager: String,

    pub stats_queue: String,
    pub accounting_queue: String,
    pub stats_dir: Option<PathBuf>,
    pub accounting_dir: Option<PathBuf>,
    pub interval: Duration,
    pub max_cycles: u64,
    pub continuous: bool,

    pub metrics_listen_addr: SocketAddr,
    pub metrics_namespace: String,

    pub log_level: LogLevel,
}

// -----------------------------------------------------------------------------
// ----- Config: Static --------------------------------------------------------

impl Config {
    /// Async because the file config loads with non-blocking IO. Panics on
    /// an unusable config: there is no sane way to continue.
    pub async fn init() {
        CliConfig::init();

        Self::load().await;
    }

    pub fn snapshot() -> Config {
        Self::handle().read().clone()
    }
}

// -----------------------------------------------------------------------------
// ----- Config: Private -------------------------------------------------------

impl Config {
    async fn load() {
        let cli = CliConfig::snapshot();

        let file = FileConfig::from_file_async(&cli.config_file_location)
            .await
            .unwrap_or_else(|e| {
                panic!(
                    "failed to load config from {:?}: {e}",
                    cli.config_file_location
                )
            });

        let next = Config {
            queue_manager: file.mq.queue_manager,
            stats_queue: file.collector.stats_queue,
            accounting_queue: file.collector.accounting_queue,
            stats_dir: file.collector.stats_dir,
            accounting_dir: file.collector.accounting_dir,
            interval: file.collector.interval,
            max_cycles: file.collector.max_cycles,
            continuous: file.collector.continuous,
            metrics_listen_addr: file.metrics.listen_addr,
            metrics_namespace: file.metrics.namespace,
            log_level: cli.log_level,
        };

        if let Some(handle) = ROOT_CONFIG.get() {
            *handle.write() = next;
        } else {
            let _ = ROOT_CONFIG.set(Arc::new(RwLock::new(next)));
        }
    }

    fn handle() -> Arc<RwLock<Config>> {
        ROOT_CONFIG
            .get()
            .expect("Config not initialized; call Config::init().await first")
            .clone()
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
