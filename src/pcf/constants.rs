//! Wire-format constants for PCF administrative messages.
//!
//! Numeric values are the IBM MQ wire constants; only the subset the
//! decoder acts on is listed, plus the structure-type table used for
//! diagnostics.

// -----------------------------------------------------------------------------
// ----- Structure Types -------------------------------------------------------

pub const MQCFT_NONE: i32 = 0x00;
pub const MQCFT_COMMAND: i32 = 0x01;
pub const MQCFT_RESPONSE: i32 = 0x02;
pub const MQCFT_INTEGER: i32 = 0x03;
pub const MQCFT_STRING: i32 = 0x04;
pub const MQCFT_INTEGER_LIST: i32 = 0x05;
pub const MQCFT_STRING_LIST: i32 = 0x06;
pub const MQCFT_EVENT: i32 = 0x07;
pub const MQCFT_USER: i32 = 0x08;
pub const MQCFT_BYTE_STRING: i32 = 0x09;
pub const MQCFT_GROUP: i32 = 0x13;
pub const MQCFT_STATISTICS: i32 = 0x14;
pub const MQCFT_ACCOUNTING: i32 = 0x15;

/// Human-readable name for a structure/parameter type tag, for logs and
/// the `pcfdump` tool.
pub fn cft_name(kind: i32) -> &'static str {
    match kind {
        MQCFT_NONE => "none",
        MQCFT_COMMAND => "command",
        MQCFT_RESPONSE => "response",
        MQCFT_INTEGER => "integer",
        MQCFT_STRING => "string",
        MQCFT_INTEGER_LIST => "integer-list",
        MQCFT_STRING_LIST => "string-list",
        MQCFT_EVENT => "event",
        MQCFT_USER => "user",
        MQCFT_BYTE_STRING => "byte-string",
        MQCFT_GROUP => "group",
        MQCFT_STATISTICS => "statistics",
        MQCFT_ACCOUNTING => "accounting",
        _ => "unknown",
    }
}

// -----------------------------------------------------------------------------
// ----- Command Codes ---------------------------------------------------------

pub const MQCMD_STATISTICS_MQI: i32 = 0x70;
pub const MQCMD_STATISTICS_Q: i32 = 0x71;
pub const MQCMD_STATISTICS_CHANNEL: i32 = 0x72;

pub const MQCMD_ACCOUNTING_MQI: i32 = 0x8A;
pub const MQCMD_ACCOUNTING_Q: i32 = 0x8B;

// -----------------------------------------------------------------------------
// ----- Parameter Tags --------------------------------------------------------

// Names
pub const MQCA_Q_MGR_NAME: i32 = 2002;
pub const MQCA_Q_NAME: i32 = 2016;
pub const MQCA_APPL_NAME: i32 = 2024;
pub const MQCA_CHANNEL_NAME: i32 = 3501;
pub const MQCA_CONNECTION_NAME: i32 = 3502;

// Queue statistics
pub const MQIA_CURRENT_Q_DEPTH: i32 = 3;
pub const MQIA_HIGH_Q_DEPTH: i32 = 36;
pub const MQIA_MSG_ENQ_COUNT: i32 = 37;
pub const MQIA_MSG_DEQ_COUNT: i32 = 38;
pub const MQIA_OPEN_INPUT_COUNT: i32 = 65;
pub const MQIA_OPEN_OUTPUT_COUNT: i32 = 66;

// Channel statistics
pub const MQIACH_MSGS: i32 = 1501;
pub const MQIACH_BYTES: i32 = 1502;
pub const MQIACH_BATCHES: i32 = 1503;

// MQI operation counters (statistics and accounting share these)
pub const MQIAMO_OPENS: i32 = 3;
pub const MQIAMO_CLOSES: i32 = 4;
pub const MQIAMO_COMMITS: i32 = 12;
pub const MQIAMO_BACKOUTS: i32 = 13;
pub const MQIAMO_PUTS: i32 = 17;
pub const MQIAMO_GETS: i32 = 18;

// Time
pub const MQCACF_COMMAND_TIME: i32 = 3603;
