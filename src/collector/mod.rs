//! Collection loop: drain both system queues, decode every message, feed
//! the gauges. One-shot or continuous on a fixed interval; a message that
//! fails to decode is dropped and counted, never fatal to the loop.

use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::metrics::MqMetrics;
use crate::pcf::{PcfDecoder, PcfRecord};
use crate::source::{MessageSource, QueueKind, SourceError};

// -----------------------------------------------------------------------------
// ----- Totals ----------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub collections: u64,
    pub stats_messages: u64,
    pub accounting_messages: u64,
    pub decode_errors: u64,
}

// -----------------------------------------------------------------------------
// ----- Collector -------------------------------------------------------------

pub struct Collector<S: MessageSource> {
    decoder: PcfDecoder,
    source: S,
    metrics: Arc<MqMetrics>,

    queue_manager: String,
    continuous: bool,
    interval: std::time::Duration,
    max_cycles: u64,

    totals: Totals,
}

impl<S: MessageSource> Collector<S> {
    pub fn new(config: &Config, decoder: PcfDecoder, source: S, metrics: Arc<MqMetrics>) -> Self {
        Self {
            decoder,
            source,
            metrics,
            queue_manager: config.queue_manager.clone(),
            continuous: config.continuous,
            interval: config.interval,
            max_cycles: config.max_cycles,
            totals: Totals::default(),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Collector: Public Methods ---------------------------------------------

impl<S: MessageSource> Collector<S> {
    /// Run until done: one cycle in one-shot mode, or cycles on the
    /// configured interval until ctrl-c / max-cycles in continuous mode.
    pub async fn run(mut self) -> Result<Totals, SourceError> {
        if self.continuous {
            self.run_continuous().await;
        } else {
            self.collect_cycle()?;
            self.totals.collections += 1;
        }

        info!(
            collections = self.totals.collections,
            stats_messages = self.totals.stats_messages,
            accounting_messages = self.totals.accounting_messages,
            decode_errors = self.totals.decode_errors,
            "collector stopped"
        );

        Ok(self.totals)
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }
}

// -----------------------------------------------------------------------------
// ----- Collector: Private Methods --------------------------------------------

impl<S: MessageSource> Collector<S> {
    async fn run_continuous(&mut self) {
        info!(
            interval = ?self.interval,
            max_cycles = self.max_cycles,
            "starting continuous collection"
        );

        // First tick fires immediately, so the initial collection is not
        // delayed by a full interval.
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("shutting down");
                    break;
                }

                _ = ticker.tick() => {
                    if let Err(e) = self.collect_cycle() {
                        error!("collection cycle failed: {e}");
                    }
                    self.totals.collections += 1;

                    if self.max_cycles > 0 && self.totals.collections >= self.max_cycles {
                        info!(cycles = self.totals.collections, "reached maximum cycles");
                        break;
                    }
                }
            }
        }
    }

    fn collect_cycle(&mut self) -> Result<(), SourceError> {
        for queue in [QueueKind::Statistics, QueueKind::Accounting] {
            let messages = self.source.drain(queue)?;

            for message in &messages {
                match self.decoder.decode(&message.data) {
                    Ok(PcfRecord::Statistics(stats)) => {
                        self.metrics.record_statistics(&stats, &self.queue_manager);
                    }
                    Ok(PcfRecord::Accounting(acct)) => {
                        self.metrics.record_accounting(&acct, &self.queue_manager);
                    }
                    Err(e) => {
                        warn!(queue = queue.as_str(), "dropping undecodable message: {e}");
                        self.totals.decode_errors += 1;
                    }
                }
            }

            match queue {
                QueueKind::Statistics => self.totals.stats_messages += messages.len() as u64,
                QueueKind::Accounting => self.totals.accounting_messages += messages.len() as u64,
            }
        }

        self.metrics.mark_collection(&self.queue_manager);

        Ok(())
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
