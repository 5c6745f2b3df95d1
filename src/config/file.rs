//! TOML file configuration.
//!
//! ```toml
//! [mq]
//! queue_manager = "MQQM1"
//!
//! [collector]
//! stats_dir = "/var/spool/mqcrab/statistics"
//! accounting_dir = "/var/spool/mqcrab/accounting"
//! interval = "60s"
//! continuous = true
//!
//! [metrics]
//! listen_addr = "0.0.0.0:9090"
//! ```

use serde::{Deserialize, Deserializer};
use std::{net::SocketAddr, path::Path, path::PathBuf, time::Duration};
use thiserror::Error;
use tokio::fs;

// -----------------------------------------------------------------------------
// ----- FileConfig ------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    pub mq: MqSection,

    #[serde(default)]
    pub collector: CollectorSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MqSection {
    pub queue_manager: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorSection {
    #[serde(default = "default_stats_queue")]
    pub stats_queue: String,

    #[serde(default = "default_accounting_queue")]
    pub accounting_queue: String,

    /// Directories of captured message dumps drained each cycle.
    #[serde(default)]
    pub stats_dir: Option<PathBuf>,
    #[serde(default)]
    pub accounting_dir: Option<PathBuf>,

    #[serde(default = "default_interval", deserialize_with = "de_duration")]
    pub interval: Duration,

    /// 0 means unlimited.
    #[serde(default)]
    pub max_cycles: u64,

    #[serde(default)]
    pub continuous: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSection {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    #[serde(default = "default_namespace")]
    pub namespace: String,
}

// -----------------------------------------------------------------------------
// ----- Defaults --------------------------------------------------------------

fn default_stats_queue() -> String {
    "SYSTEM.ADMIN.STATISTICS.QUEUE".to_owned()
}

fn default_accounting_queue() -> String {
    "SYSTEM.ADMIN.ACCOUNTING.QUEUE".to_owned()
}

fn default_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_listen_addr() -> SocketAddr {
    ([0, 0, 0, 0], 9090).into()
}

fn default_namespace() -> String {
    "ibmmq".to_owned()
}

impl Default for CollectorSection {
    fn default() -> Self {
        Self {
            stats_queue: default_stats_queue(),
            accounting_queue: default_accounting_queue(),
            stats_dir: None,
            accounting_dir: None,
            interval: default_interval(),
            max_cycles: 0,
            continuous: false,
        }
    }
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            namespace: default_namespace(),
        }
    }
}

fn de_duration<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    let raw = String::deserialize(d)?;

    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

// -----------------------------------------------------------------------------
// ----- Error -----------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("queue manager name is required")]
    EmptyQueueManager,

    #[error("collection interval must be at least 1 second")]
    IntervalTooShort,

    #[error("read error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("toml parse error: {source}")]
    Toml { source: toml::de::Error },
}

// -----------------------------------------------------------------------------
// ----- FileConfig: Static ----------------------------------------------------

impl FileConfig {
    pub async fn from_file_async(path: &Path) -> Result<FileConfig, ConfigError> {
        let raw = fs::read_to_string(path).await.map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<FileConfig, ConfigError> {
        let config: FileConfig =
            toml::from_str(raw).map_err(|e| ConfigError::Toml { source: e })?;

        config.validate()?;

        Ok(config)
    }
}

// -----------------------------------------------------------------------------
// ----- FileConfig: Private ---------------------------------------------------

impl FileConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.mq.queue_manager.is_empty() {
            return Err(ConfigError::EmptyQueueManager);
        }

        if self.collector.interval < Duration::from_secs(1) {
            return Err(ConfigError::IntervalTooShort);
        }

        Ok(())
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
