//! End-to-end: captured dumps on disk → replay source → decoder →
//! gauge families.

mod support;

use std::sync::Arc;
use std::time::Duration;

use mqcrab::collector::Collector;
use mqcrab::config::Config;
use mqcrab::config::types::LogLevel;
use mqcrab::metrics::MqMetrics;
use mqcrab::pcf::constants::*;
use mqcrab::pcf::{PcfDecoder, PcfRecord};
use mqcrab::source::{MessageSource, QueueKind, ReplaySource};

fn config(stats_dir: Option<std::path::PathBuf>, accounting_dir: Option<std::path::PathBuf>) -> Config {
    Config {
        queue_manager: "QM1".into(),
        stats_queue: "SYSTEM.ADMIN.STATISTICS.QUEUE".into(),
        accounting_queue: "SYSTEM.ADMIN.ACCOUNTING.QUEUE".into(),
        stats_dir,
        accounting_dir,
        interval: Duration::from_secs(60),
        max_cycles: 0,
        continuous: false,
        metrics_listen_addr: "127.0.0.1:0".parse().unwrap(),
        metrics_namespace: "ibmmq".into(),
        log_level: LogLevel::Info,
    }
}

#[tokio::test]
async fn dumps_on_disk_end_up_as_labelled_gauges() {
    let stats_dir = tempfile::tempdir().unwrap();
    let accounting_dir = tempfile::tempdir().unwrap();

    let queue_msg = support::message(
        MQCMD_STATISTICS_Q,
        &[
            support::str_param(MQCA_Q_MGR_NAME, "QM1"),
            support::str_param(MQCA_Q_NAME, "APP.REQUESTS"),
            support::int_param(MQIA_CURRENT_Q_DEPTH, 12),
            support::int_param(MQIA_OPEN_INPUT_COUNT, 3),
            support::int_param(MQIA_OPEN_OUTPUT_COUNT, 0),
        ],
    );
    support::write_hex_dump(&stats_dir.path().join("01-queue.hex"), &queue_msg);

    let mqi_msg = support::message(
        MQCMD_STATISTICS_MQI,
        &[
            support::str_param(MQCA_APPL_NAME, "order-svc"),
            support::int_param(MQIAMO_PUTS, 250),
            support::int_param(MQIAMO_GETS, 300),
        ],
    );
    support::write_hex_dump(&stats_dir.path().join("02-mqi.hex"), &mqi_msg);

    let acct_msg = support::message(
        MQCMD_ACCOUNTING_MQI,
        &[
            support::str_param(MQCA_APPL_NAME, "batch-loader"),
            support::int_param(MQIAMO_PUTS, 77),
        ],
    );
    support::write_hex_dump(&accounting_dir.path().join("01-acct.hex"), &acct_msg);

    let metrics = Arc::new(MqMetrics::new("ibmmq").unwrap());
    let collector = Collector::new(
        &config(
            Some(stats_dir.path().to_path_buf()),
            Some(accounting_dir.path().to_path_buf()),
        ),
        PcfDecoder::new(tracing::Span::none()),
        ReplaySource::new(
            Some(stats_dir.path().to_path_buf()),
            Some(accounting_dir.path().to_path_buf()),
        ),
        Arc::clone(&metrics),
    );

    let totals = collector.run().await.unwrap();

    assert_eq!(totals.collections, 1);
    assert_eq!(totals.stats_messages, 2);
    assert_eq!(totals.accounting_messages, 1);
    assert_eq!(totals.decode_errors, 0);

    let text = metrics.render();
    assert!(text.contains(
        "ibmmq_queue_depth_current{queue_manager=\"QM1\",queue_name=\"APP.REQUESTS\"} 12"
    ));
    assert!(text.contains(
        "ibmmq_queue_has_readers{queue_manager=\"QM1\",queue_name=\"APP.REQUESTS\"} 1"
    ));
    assert!(text.contains(
        "ibmmq_queue_has_writers{queue_manager=\"QM1\",queue_name=\"APP.REQUESTS\"} 0"
    ));
    assert!(text.contains(
        "ibmmq_mqi_puts_total{application_name=\"order-svc\",queue_manager=\"QM1\"} 250"
    ));
    assert!(text.contains(
        "ibmmq_mqi_puts_total{application_name=\"batch-loader\",queue_manager=\"QM1\"} 77"
    ));
}

#[test]
fn replayed_dump_round_trips_through_the_decoder() {
    let dir = tempfile::tempdir().unwrap();
    let msg = support::message(
        MQCMD_STATISTICS_Q,
        &[
            support::str_param(MQCA_Q_NAME, "LOOPBACK"),
            support::int_param(MQIA_MSG_ENQ_COUNT, 1000),
            support::int_param(MQIA_MSG_DEQ_COUNT, 900),
        ],
    );
    support::write_hex_dump(&dir.path().join("m.hex"), &msg);

    let mut source = ReplaySource::new(Some(dir.path().to_path_buf()), None);
    let messages = source.drain(QueueKind::Statistics).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(&messages[0].data[..], &msg[..]);

    let decoder = PcfDecoder::new(tracing::Span::none());
    let record = decoder.decode(&messages[0].data).unwrap();

    let PcfRecord::Statistics(stats) = record else {
        panic!("expected statistics record");
    };
    let queue = stats.queue.expect("queue sub-record");
    assert_eq!(queue.queue_name, "LOOPBACK");
    assert_eq!(queue.enqueue_count, 1000);
    assert_eq!(queue.dequeue_count, 900);
}

#[test]
fn unknown_commands_replay_to_generic_records() {
    let decoder = PcfDecoder::new(tracing::Span::none());
    let msg = support::message(0x4242, &[support::int_param(9999, 1)]);

    let PcfRecord::Statistics(stats) = decoder.decode(&msg).unwrap() else {
        panic!("expected statistics record");
    };

    assert_eq!(stats.record_type, "statistics");
    assert!(stats.queue.is_none());
    assert_eq!(stats.parameters.len(), 1);
}

#[test]
fn truncated_dump_is_the_only_hard_failure() {
    let decoder = PcfDecoder::new(tracing::Span::none());

    assert!(decoder.decode(&[0u8; 35]).is_err());
    assert!(decoder.decode(&support::message(MQCMD_STATISTICS_Q, &[])).is_ok());
}
