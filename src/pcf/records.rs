//! Module: pcf::records
//!
//! Typed aggregates built from a decoded parameter sequence. Each builder
//! is one linear scan with exact tag matching; a repeated tag overwrites
//! the earlier value (last write wins). Records are constructed fresh per
//! message and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::pcf::constants::*;
use crate::pcf::params::PcfParameter;
use crate::pcf::value::Value;

// -----------------------------------------------------------------------------
// ----- StatisticsData --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsData {
    #[serde(rename = "type")]
    pub record_type: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_manager: Option<String>,
    pub timestamp: DateTime<Utc>,

    /// Every scanned parameter, tag → decoded value, kept for forward
    /// compatibility and diagnostics.
    pub parameters: BTreeMap<i32, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<QueueStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mqi: Option<MqiStatistics>,
}

// -----------------------------------------------------------------------------
// ----- QueueStatistics -------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueueStatistics {
    pub queue_name: String,
    pub current_depth: i32,
    pub high_depth: i32,
    pub input_count: i32,
    pub output_count: i32,
    pub enqueue_count: i32,
    pub dequeue_count: i32,
    /// Open input handles > 0. Handle counts only; GET/PUT activity does
    /// not feed this flag.
    pub has_readers: bool,
    /// Open output handles > 0.
    pub has_writers: bool,
}

impl QueueStatistics {
    pub fn from_parameters(parameters: &[PcfParameter]) -> Self {
        let mut stats = Self::default();

        for param in parameters {
            if let Some(v) = param.value.as_int() {
                match param.parameter {
                    MQIA_CURRENT_Q_DEPTH => stats.current_depth = v,
                    MQIA_HIGH_Q_DEPTH => stats.high_depth = v,
                    MQIA_OPEN_INPUT_COUNT => {
                        stats.input_count = v;
                        stats.has_readers = v > 0;
                    }
                    MQIA_OPEN_OUTPUT_COUNT => {
                        stats.output_count = v;
                        stats.has_writers = v > 0;
                    }
                    MQIA_MSG_ENQ_COUNT => stats.enqueue_count = v,
                    MQIA_MSG_DEQ_COUNT => stats.dequeue_count = v,
                    _ => {}
                }
            } else if let Some(s) = param.value.as_text() {
                if param.parameter == MQCA_Q_NAME {
                    stats.queue_name = s.to_owned();
                }
            }
        }

        stats
    }
}

// -----------------------------------------------------------------------------
// ----- ChannelStatistics -----------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelStatistics {
    pub channel_name: String,
    pub connection_name: String,
    pub messages: i32,
    pub bytes: i64,
    pub batches: i32,
}

impl ChannelStatistics {
    pub fn from_parameters(parameters: &[PcfParameter]) -> Self {
        let mut stats = Self::default();

        for param in parameters {
            if let Some(v) = param.value.as_int() {
                match param.parameter {
                    MQIACH_MSGS => stats.messages = v,
                    MQIACH_BYTES => stats.bytes = v as i64,
                    MQIACH_BATCHES => stats.batches = v,
                    _ => {}
                }
            } else if let Some(s) = param.value.as_text() {
                match param.parameter {
                    MQCA_CHANNEL_NAME => stats.channel_name = s.to_owned(),
                    MQCA_CONNECTION_NAME => stats.connection_name = s.to_owned(),
                    _ => {}
                }
            }
        }

        stats
    }
}

// -----------------------------------------------------------------------------
// ----- MqiStatistics ---------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MqiStatistics {
    pub application_name: String,
    pub opens: i32,
    pub closes: i32,
    pub puts: i32,
    pub gets: i32,
    pub commits: i32,
    pub backouts: i32,
}

impl MqiStatistics {
    pub fn from_parameters(parameters: &[PcfParameter]) -> Self {
        let mut stats = Self::default();

        for param in parameters {
            if let Some(v) = param.value.as_int() {
                match param.parameter {
                    MQIAMO_OPENS => stats.opens = v,
                    MQIAMO_CLOSES => stats.closes = v,
                    MQIAMO_PUTS => stats.puts = v,
                    MQIAMO_GETS => stats.gets = v,
                    MQIAMO_COMMITS => stats.commits = v,
                    MQIAMO_BACKOUTS => stats.backouts = v,
                    _ => {}
                }
            } else if let Some(s) = param.value.as_text() {
                if param.parameter == MQCA_APPL_NAME {
                    stats.application_name = s.to_owned();
                }
            }
        }

        stats
    }
}

// -----------------------------------------------------------------------------
// ----- AccountingData --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AccountingData {
    #[serde(rename = "type")]
    pub record_type: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_manager: Option<String>,
    pub timestamp: DateTime<Utc>,

    pub parameters: BTreeMap<i32, Value>,

    pub connection: ConnectionInfo,
    pub operations: OperationCounts,
}

// -----------------------------------------------------------------------------
// ----- ConnectionInfo --------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectionInfo {
    pub channel_name: String,
    pub connection_name: String,
    pub application_name: String,

    // The wire carries no tags the decoder models for these yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disconnect_time: Option<DateTime<Utc>>,
}

impl ConnectionInfo {
    pub fn from_parameters(parameters: &[PcfParameter]) -> Self {
        let mut info = Self::default();

        for param in parameters {
            if let Some(s) = param.value.as_text() {
                match param.parameter {
                    MQCA_CHANNEL_NAME => info.channel_name = s.to_owned(),
                    MQCA_CONNECTION_NAME => info.connection_name = s.to_owned(),
                    MQCA_APPL_NAME => info.application_name = s.to_owned(),
                    _ => {}
                }
            }
        }

        info
    }
}

// -----------------------------------------------------------------------------
// ----- OperationCounts -------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperationCounts {
    pub gets: i32,
    pub puts: i32,
    /// No browse-count tag is modeled yet; stays zero.
    pub browses: i32,
    pub opens: i32,
    pub closes: i32,
    pub commits: i32,
    pub backouts: i32,
}

impl OperationCounts {
    pub fn from_parameters(parameters: &[PcfParameter]) -> Self {
        let mut ops = Self::default();

        for param in parameters {
            if let Some(v) = param.value.as_int() {
                match param.parameter {
                    MQIAMO_GETS => ops.gets = v,
                    MQIAMO_PUTS => ops.puts = v,
                    MQIAMO_OPENS => ops.opens = v,
                    MQIAMO_CLOSES => ops.closes = v,
                    MQIAMO_COMMITS => ops.commits = v,
                    MQIAMO_BACKOUTS => ops.backouts = v,
                    _ => {}
                }
            }
        }

        ops
    }
}

// -----------------------------------------------------------------------------
// ----- Raw Parameter Map -----------------------------------------------------

/// Tag → value map of the whole scanned sequence. A repeated tag keeps the
/// last decoded value.
pub(crate) fn parameter_map(parameters: &[PcfParameter]) -> BTreeMap<i32, Value> {
    parameters
        .iter()
        .map(|p| (p.parameter, p.value.clone()))
        .collect()
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
