use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use mqcrab::collector::Collector;
use mqcrab::config::Config;
use mqcrab::metrics::{MqMetrics, server};
use mqcrab::pcf::PcfDecoder;
use mqcrab::source::ReplaySource;

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const APP_NAME: &str = "🦀 mqcrab";

// -----------------------------------------------------------------------------
// ----- Main ------------------------------------------------------------------

#[tokio::main]
async fn main() -> std::io::Result<()> {
    setup().await;
    run().await
}

// -----------------------------------------------------------------------------
// ----- Setup -----------------------------------------------------------------

async fn setup() {
    // This has to be the first thing we do, because it initializes the config
    Config::init().await;

    init_tracing();
}

fn init_tracing() {
    let config = Config::snapshot();
    let filter = EnvFilter::try_new(config.log_level.as_str()).unwrap();
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

// -----------------------------------------------------------------------------
// ----- Run -------------------------------------------------------------------

async fn run() -> std::io::Result<()> {
    let config = Config::snapshot();

    let metrics = Arc::new(
        MqMetrics::new(&config.metrics_namespace)
            .unwrap_or_else(|e| panic!("failed to build metrics registry: {e}")),
    );

    let metrics_addr = config.metrics_listen_addr;
    let served = Arc::clone(&metrics);
    tokio::spawn(async move {
        if let Err(e) = server::serve(metrics_addr, served).await {
            error!("metrics server failed: {e}");
        }
    });

    info!(
        "{} collecting for queue manager {} ({} / {})",
        APP_NAME, config.queue_manager, config.stats_queue, config.accounting_queue
    );

    let decoder = PcfDecoder::new(tracing::info_span!(
        "pcf",
        queue_manager = %config.queue_manager
    ));
    let source = ReplaySource::new(config.stats_dir.clone(), config.accounting_dir.clone());
    let collector = Collector::new(&config, decoder, source, metrics);

    if let Err(e) = collector.run().await {
        error!("collector failed: {e}");
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
