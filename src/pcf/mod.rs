pub mod constants;
pub mod decoder;
pub mod error;
pub mod header;
pub mod params;
pub mod records;
pub mod timestamp;
pub mod value;

pub use decoder::{PcfDecoder, PcfRecord};
pub use error::DecodeError;
pub use header::{PCF_HEADER_LEN, PcfHeader};
pub use params::{PcfParameter, decode_parameters};
pub use records::{
    AccountingData, ChannelStatistics, ConnectionInfo, MqiStatistics, OperationCounts,
    QueueStatistics, StatisticsData,
};
pub use value::Value;
