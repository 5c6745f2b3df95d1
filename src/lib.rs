pub mod collector;
pub mod config;
pub mod metrics;
pub mod pcf;
pub mod source;

pub use config::Config;
pub use pcf::{PcfDecoder, PcfRecord};
