use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{Span, debug};

use crate::pcf::constants::*;
use crate::pcf::error::DecodeError;
use crate::pcf::header::{PCF_HEADER_LEN, PcfHeader};
use crate::pcf::params::{PcfParameter, decode_parameters};
use crate::pcf::records::{
    AccountingData, ChannelStatistics, ConnectionInfo, MqiStatistics, OperationCounts,
    QueueStatistics, StatisticsData, parameter_map,
};
use crate::pcf::timestamp::parse_command_time;

// -----------------------------------------------------------------------------
// ----- PcfRecord -------------------------------------------------------------

/// One decoded administrative message: statistics or accounting, selected
/// by the header's command code.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PcfRecord {
    Statistics(StatisticsData),
    Accounting(AccountingData),
}

// -----------------------------------------------------------------------------
// ----- PcfDecoder ------------------------------------------------------------

/// Decoder for complete PCF message buffers.
///
/// The span passed at construction is entered for every decode, so all
/// diagnostics carry the caller's context fields (queue manager, source
/// queue, ...). Pass `Span::none()` to decode silently.
pub struct PcfDecoder {
    span: Span,
}

impl PcfDecoder {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

// -----------------------------------------------------------------------------
// ----- PcfDecoder: Public Methods --------------------------------------------

impl PcfDecoder {
    /// Decode one complete message buffer into a typed record.
    ///
    /// Only a buffer too short for the 36-byte header is an error; a
    /// malformed parameter tail yields a shorter parameter list and an
    /// unknown command code yields a minimal generic statistics record.
    pub fn decode(&self, data: &[u8]) -> Result<PcfRecord, DecodeError> {
        let _guard = self.span.enter();

        let header = PcfHeader::from_bytes(data)?;

        debug!(
            command = header.command,
            struc_type = cft_name(header.struc_type),
            declared_parameters = header.parameter_count,
            bytes = data.len(),
            "decoding PCF message"
        );

        let parameters = decode_parameters(&data[PCF_HEADER_LEN..]);

        let record = match header.command {
            MQCMD_STATISTICS_Q | MQCMD_STATISTICS_CHANNEL | MQCMD_STATISTICS_MQI => {
                PcfRecord::Statistics(build_statistics(&header, &parameters))
            }
            MQCMD_ACCOUNTING_Q | MQCMD_ACCOUNTING_MQI => {
                PcfRecord::Accounting(build_accounting(&parameters))
            }
            other => {
                debug!(command = other, "unknown command code, emitting generic record");
                PcfRecord::Statistics(build_generic(&parameters))
            }
        };

        Ok(record)
    }
}

// -----------------------------------------------------------------------------
// ----- Builders --------------------------------------------------------------

fn build_statistics(header: &PcfHeader, parameters: &[PcfParameter]) -> StatisticsData {
    let (queue_manager, command_time) = common_fields(parameters);

    let mut stats = StatisticsData {
        record_type: "statistics",
        queue_manager,
        timestamp: command_time.unwrap_or_else(Utc::now),
        parameters: parameter_map(parameters),
        queue: None,
        channel: None,
        mqi: None,
    };

    match header.command {
        MQCMD_STATISTICS_Q => stats.queue = Some(QueueStatistics::from_parameters(parameters)),
        MQCMD_STATISTICS_CHANNEL => {
            stats.channel = Some(ChannelStatistics::from_parameters(parameters));
        }
        MQCMD_STATISTICS_MQI => stats.mqi = Some(MqiStatistics::from_parameters(parameters)),
        _ => {}
    }

    stats
}

fn build_accounting(parameters: &[PcfParameter]) -> AccountingData {
    let (queue_manager, command_time) = common_fields(parameters);

    AccountingData {
        record_type: "accounting",
        queue_manager,
        timestamp: command_time.unwrap_or_else(Utc::now),
        parameters: parameter_map(parameters),
        connection: ConnectionInfo::from_parameters(parameters),
        operations: OperationCounts::from_parameters(parameters),
    }
}

/// Fallback for command codes the decoder does not model: raw map and a
/// decode-time timestamp, nothing else.
fn build_generic(parameters: &[PcfParameter]) -> StatisticsData {
    StatisticsData {
        record_type: "statistics",
        queue_manager: None,
        timestamp: Utc::now(),
        parameters: parameter_map(parameters),
        queue: None,
        channel: None,
        mqi: None,
    }
}

fn common_fields(parameters: &[PcfParameter]) -> (Option<String>, Option<DateTime<Utc>>) {
    let mut queue_manager = None;
    let mut command_time = None;

    for param in parameters {
        match param.parameter {
            MQCA_Q_MGR_NAME => {
                if let Some(s) = param.value.as_text() {
                    queue_manager = Some(s.to_owned());
                }
            }
            MQCACF_COMMAND_TIME => {
                if let Some(s) = param.value.as_text() {
                    command_time = parse_command_time(s);
                }
            }
            _ => {}
        }
    }

    (queue_manager, command_time)
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
