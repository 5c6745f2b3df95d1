//! Prometheus surface for decoded records.
//!
//! Every numeric field of a record maps to one gauge family, labelled
//! `{queue_manager, queue_name}`, `{queue_manager, application_name}` or
//! `{queue_manager, channel_name, connection_name}`. Gauges rather than
//! counters: the queue manager owns the counts, this process only mirrors
//! the latest interval message it saw.

pub mod server;

use chrono::Utc;
use prometheus::{Encoder, IntGaugeVec, Opts, Registry, TextEncoder};
use tracing::error;

use crate::pcf::{AccountingData, StatisticsData};

// -----------------------------------------------------------------------------
// ----- Label Sets ------------------------------------------------------------

const QUEUE_LABELS: &[&str] = &["queue_manager", "queue_name"];
const CHANNEL_LABELS: &[&str] = &["queue_manager", "channel_name", "connection_name"];
const MQI_LABELS: &[&str] = &["queue_manager", "application_name"];

// -----------------------------------------------------------------------------
// ----- MqMetrics -------------------------------------------------------------

pub struct MqMetrics {
    registry: Registry,

    queue_depth: IntGaugeVec,
    queue_depth_high: IntGaugeVec,
    queue_enqueued: IntGaugeVec,
    queue_dequeued: IntGaugeVec,
    queue_input_handles: IntGaugeVec,
    queue_output_handles: IntGaugeVec,
    queue_has_readers: IntGaugeVec,
    queue_has_writers: IntGaugeVec,

    channel_messages: IntGaugeVec,
    channel_bytes: IntGaugeVec,
    channel_batches: IntGaugeVec,

    mqi_opens: IntGaugeVec,
    mqi_closes: IntGaugeVec,
    mqi_puts: IntGaugeVec,
    mqi_gets: IntGaugeVec,
    mqi_commits: IntGaugeVec,
    mqi_backouts: IntGaugeVec,

    last_collection: IntGaugeVec,
}

// -----------------------------------------------------------------------------
// ----- MqMetrics: Static -----------------------------------------------------

impl MqMetrics {
    pub fn new(namespace: &str) -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let ns = namespace;

        Ok(Self {
            queue_depth: gauge(
                &registry,
                ns,
                "queue_depth_current",
                "Current depth of the queue",
                QUEUE_LABELS,
            )?,
            queue_depth_high: gauge(
                &registry,
                ns,
                "queue_depth_high",
                "High water mark of the queue depth",
                QUEUE_LABELS,
            )?,
            queue_enqueued: gauge(
                &registry,
                ns,
                "queue_enqueue_count",
                "Messages enqueued during the statistics interval",
                QUEUE_LABELS,
            )?,
            queue_dequeued: gauge(
                &registry,
                ns,
                "queue_dequeue_count",
                "Messages dequeued during the statistics interval",
                QUEUE_LABELS,
            )?,
            queue_input_handles: gauge(
                &registry,
                ns,
                "queue_input_handles",
                "Open input handles on the queue",
                QUEUE_LABELS,
            )?,
            queue_output_handles: gauge(
                &registry,
                ns,
                "queue_output_handles",
                "Open output handles on the queue",
                QUEUE_LABELS,
            )?,
            queue_has_readers: gauge(
                &registry,
                ns,
                "queue_has_readers",
                "Whether the queue has active readers (1=yes, 0=no)",
                QUEUE_LABELS,
            )?,
            queue_has_writers: gauge(
                &registry,
                ns,
                "queue_has_writers",
                "Whether the queue has active writers (1=yes, 0=no)",
                QUEUE_LABELS,
            )?,
            channel_messages: gauge(
                &registry,
                ns,
                "channel_messages_total",
                "Messages sent through the channel",
                CHANNEL_LABELS,
            )?,
            channel_bytes: gauge(
                &registry,
                ns,
                "channel_bytes_total",
                "Bytes sent through the channel",
                CHANNEL_LABELS,
            )?,
            channel_batches: gauge(
                &registry,
                ns,
                "channel_batches_total",
                "Batches sent through the channel",
                CHANNEL_LABELS,
            )?,
            mqi_opens: gauge(&registry, ns, "mqi_opens_total", "MQI OPEN operations", MQI_LABELS)?,
            mqi_closes: gauge(&registry, ns, "mqi_closes_total", "MQI CLOSE operations", MQI_LABELS)?,
            mqi_puts: gauge(&registry, ns, "mqi_puts_total", "MQI PUT operations", MQI_LABELS)?,
            mqi_gets: gauge(&registry, ns, "mqi_gets_total", "MQI GET operations", MQI_LABELS)?,
            mqi_commits: gauge(&registry, ns, "mqi_commits_total", "MQI COMMIT operations", MQI_LABELS)?,
            mqi_backouts: gauge(&registry, ns, "mqi_backouts_total", "MQI BACKOUT operations", MQI_LABELS)?,
            last_collection: gauge(
                &registry,
                ns,
                "last_collection_timestamp",
                "Unix timestamp of the last collection cycle",
                &["queue_manager"],
            )?,
            registry,
        })
    }
}

// -----------------------------------------------------------------------------
// ----- Internal: Helpers -----------------------------------------------------

fn gauge(
    registry: &Registry,
    namespace: &str,
    name: &str,
    help: &str,
    labels: &[&str],
) -> Result<IntGaugeVec, prometheus::Error> {
    let vec = IntGaugeVec::new(Opts::new(name, help).namespace(namespace), labels)?;
    registry.register(Box::new(vec.clone()))?;

    Ok(vec)
}

// -----------------------------------------------------------------------------
// ----- MqMetrics: Public Methods ---------------------------------------------

impl MqMetrics {
    /// Map one statistics record onto the gauge families. Records without
    /// a queue-manager name fall back to `default_qmgr` (the configured
    /// queue manager).
    pub fn record_statistics(&self, stats: &StatisticsData, default_qmgr: &str) {
        let qmgr = stats.queue_manager.as_deref().unwrap_or(default_qmgr);

        if let Some(q) = &stats.queue {
            let labels = &[qmgr, q.queue_name.as_str()];
            self.queue_depth.with_label_values(labels).set(q.current_depth as i64);
            self.queue_depth_high.with_label_values(labels).set(q.high_depth as i64);
            self.queue_enqueued.with_label_values(labels).set(q.enqueue_count as i64);
            self.queue_dequeued.with_label_values(labels).set(q.dequeue_count as i64);
            self.queue_input_handles.with_label_values(labels).set(q.input_count as i64);
            self.queue_output_handles.with_label_values(labels).set(q.output_count as i64);
            self.queue_has_readers.with_label_values(labels).set(q.has_readers as i64);
            self.queue_has_writers.with_label_values(labels).set(q.has_writers as i64);
        }

        if let Some(c) = &stats.channel {
            let labels = &[qmgr, c.channel_name.as_str(), c.connection_name.as_str()];
            self.channel_messages.with_label_values(labels).set(c.messages as i64);
            self.channel_bytes.with_label_values(labels).set(c.bytes);
            self.channel_batches.with_label_values(labels).set(c.batches as i64);
        }

        if let Some(m) = &stats.mqi {
            let labels = &[qmgr, m.application_name.as_str()];
            self.mqi_opens.with_label_values(labels).set(m.opens as i64);
            self.mqi_closes.with_label_values(labels).set(m.closes as i64);
            self.mqi_puts.with_label_values(labels).set(m.puts as i64);
            self.mqi_gets.with_label_values(labels).set(m.gets as i64);
            self.mqi_commits.with_label_values(labels).set(m.commits as i64);
            self.mqi_backouts.with_label_values(labels).set(m.backouts as i64);
        }
    }

    /// Accounting operations land on the same MQI families, labelled by
    /// the connection's application name.
    pub fn record_accounting(&self, acct: &AccountingData, default_qmgr: &str) {
        let qmgr = acct.queue_manager.as_deref().unwrap_or(default_qmgr);
        let labels = &[qmgr, acct.connection.application_name.as_str()];
        let ops = &acct.operations;

        self.mqi_opens.with_label_values(labels).set(ops.opens as i64);
        self.mqi_closes.with_label_values(labels).set(ops.closes as i64);
        self.mqi_puts.with_label_values(labels).set(ops.puts as i64);
        self.mqi_gets.with_label_values(labels).set(ops.gets as i64);
        self.mqi_commits.with_label_values(labels).set(ops.commits as i64);
        self.mqi_backouts.with_label_values(labels).set(ops.backouts as i64);
    }

    pub fn mark_collection(&self, qmgr: &str) {
        self.last_collection
            .with_label_values(&[qmgr])
            .set(Utc::now().timestamp());
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();

        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            error!("metrics encoding failed: {e}");
        }

        String::from_utf8_lossy(&buf).into_owned()
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcf::{ConnectionInfo, OperationCounts, QueueStatistics};
    use std::collections::BTreeMap;

    fn stats_record(queue: QueueStatistics) -> StatisticsData {
        StatisticsData {
            record_type: "statistics",
            queue_manager: Some("QM1".into()),
            timestamp: Utc::now(),
            parameters: BTreeMap::new(),
            queue: Some(queue),
            channel: None,
            mqi: None,
        }
    }

    #[test]
    fn queue_gauges_carry_labels_and_values() {
        let metrics = MqMetrics::new("ibmmq").unwrap();
        let queue = QueueStatistics {
            queue_name: "TEST.QUEUE".into(),
            current_depth: 17,
            input_count: 2,
            has_readers: true,
            ..Default::default()
        };

        metrics.record_statistics(&stats_record(queue), "FALLBACK");
        let text = metrics.render();

        assert!(text.contains(
            "ibmmq_queue_depth_current{queue_manager=\"QM1\",queue_name=\"TEST.QUEUE\"} 17"
        ));
        assert!(text.contains(
            "ibmmq_queue_has_readers{queue_manager=\"QM1\",queue_name=\"TEST.QUEUE\"} 1"
        ));
        assert!(text.contains(
            "ibmmq_queue_has_writers{queue_manager=\"QM1\",queue_name=\"TEST.QUEUE\"} 0"
        ));
    }

    #[test]
    fn missing_queue_manager_uses_the_default() {
        let metrics = MqMetrics::new("ibmmq").unwrap();
        let mut record = stats_record(QueueStatistics {
            queue_name: "Q".into(),
            ..Default::default()
        });
        record.queue_manager = None;

        metrics.record_statistics(&record, "QMDEF");

        assert!(metrics.render().contains("queue_manager=\"QMDEF\""));
    }

    #[test]
    fn accounting_lands_on_mqi_families() {
        let metrics = MqMetrics::new("ibmmq").unwrap();
        let acct = AccountingData {
            record_type: "accounting",
            queue_manager: Some("QM1".into()),
            timestamp: Utc::now(),
            parameters: BTreeMap::new(),
            connection: ConnectionInfo {
                application_name: "amqsput".into(),
                ..Default::default()
            },
            operations: OperationCounts {
                puts: 41,
                ..Default::default()
            },
        };

        metrics.record_accounting(&acct, "FALLBACK");

        assert!(metrics.render().contains(
            "ibmmq_mqi_puts_total{application_name=\"amqsput\",queue_manager=\"QM1\"} 41"
        ));
    }

    #[test]
    fn mark_collection_sets_a_recent_timestamp() {
        let metrics = MqMetrics::new("ibmmq").unwrap();
        let before = Utc::now().timestamp();

        metrics.mark_collection("QM1");
        let text = metrics.render();

        let line = text
            .lines()
            .find(|l| l.starts_with("ibmmq_last_collection_timestamp"))
            .unwrap();
        let value: i64 = line.rsplit(' ').next().unwrap().parse().unwrap();
        assert!(value >= before);
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
