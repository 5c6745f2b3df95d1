//! Transport boundary for administrative messages.
//!
//! The decoder works on complete buffers; where those buffers come from
//! is behind [`MessageSource`]. The in-tree implementation replays
//! captured dumps from disk — a live queue-manager client plugs in at
//! the same seam.

pub mod replay;

pub use replay::ReplaySource;

use bytes::Bytes;
use std::path::PathBuf;
use thiserror::Error;

// -----------------------------------------------------------------------------
// ----- QueueKind -------------------------------------------------------------

/// Which system queue a message was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    Statistics,
    Accounting,
}

impl QueueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QueueKind::Statistics => "statistics",
            QueueKind::Accounting => "accounting",
        }
    }
}

// -----------------------------------------------------------------------------
// ----- AdminMessage ----------------------------------------------------------

/// One complete administrative message as delivered by the transport.
#[derive(Debug, Clone)]
pub struct AdminMessage {
    pub queue: QueueKind,
    pub data: Bytes,
}

// -----------------------------------------------------------------------------
// ----- MessageSource ---------------------------------------------------------

/// Anything that can hand over all currently-available messages for one
/// system queue. A drain returns complete buffers only; partial reads are
/// the transport's problem, not the decoder's.
pub trait MessageSource {
    fn drain(&mut self, queue: QueueKind) -> Result<Vec<AdminMessage>, SourceError>;
}

// -----------------------------------------------------------------------------
// ----- Error -----------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("read error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid hex dump {path:?}: {source}")]
    Hex {
        path: PathBuf,
        source: hex::FromHexError,
    },
}
