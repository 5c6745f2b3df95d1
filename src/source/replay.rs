//! Module: source::replay
//!
//! Replays captured administrative messages from disk. Each file is one
//! complete message: `.hex` files hold a hex dump (whitespace ignored,
//! `#` starts a comment), anything else is taken as raw bytes. Files are
//! drained in path order so runs are deterministic.

use bytes::Bytes;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{AdminMessage, MessageSource, QueueKind, SourceError};

// -----------------------------------------------------------------------------
// ----- ReplaySource ----------------------------------------------------------

pub struct ReplaySource {
    stats_dir: Option<PathBuf>,
    accounting_dir: Option<PathBuf>,
}

impl ReplaySource {
    pub fn new(stats_dir: Option<PathBuf>, accounting_dir: Option<PathBuf>) -> Self {
        Self {
            stats_dir,
            accounting_dir,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- ReplaySource: MessageSource -------------------------------------------

impl MessageSource for ReplaySource {
    fn drain(&mut self, queue: QueueKind) -> Result<Vec<AdminMessage>, SourceError> {
        let dir = match queue {
            QueueKind::Statistics => self.stats_dir.as_deref(),
            QueueKind::Accounting => self.accounting_dir.as_deref(),
        };

        let Some(dir) = dir else {
            return Ok(Vec::new());
        };

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| SourceError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut messages = Vec::with_capacity(paths.len());
        for path in paths {
            let data = load_dump(&path)?;
            debug!(path = %path.display(), bytes = data.len(), queue = queue.as_str(), "replaying dump");
            messages.push(AdminMessage { queue, data });
        }

        Ok(messages)
    }
}

// -----------------------------------------------------------------------------
// ----- Dump Loading ----------------------------------------------------------

/// Load one captured message. `.hex` files are parsed as hex dumps,
/// everything else is read verbatim.
pub fn load_dump(path: &Path) -> Result<Bytes, SourceError> {
    let is_hex = path.extension().is_some_and(|ext| ext == "hex");

    if is_hex {
        let raw = fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let digits: String = raw
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(|line| line.chars())
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = hex::decode(&digits).map_err(|e| SourceError::Hex {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Bytes::from(bytes))
    } else {
        let bytes = fs::read(path).map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Bytes::from(bytes))
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents).unwrap();
        path
    }

    #[test]
    fn hex_dump_with_comments_and_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "msg.hex",
            b"# queue stats capture\n14 00 00 00  24 00 00 00\n0300 0000 # version\n",
        );

        let data = load_dump(&path).unwrap();

        assert_eq!(&data[..4], &[0x14, 0x00, 0x00, 0x00]);
        assert_eq!(data.len(), 12);
    }

    #[test]
    fn raw_files_are_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "msg.bin", &[0xDE, 0xAD, 0xBE, 0xEF]);

        assert_eq!(&load_dump(&path).unwrap()[..], &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn odd_hex_digit_count_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.hex", b"ABC");

        assert!(matches!(load_dump(&path), Err(SourceError::Hex { .. })));
    }

    #[test]
    fn drain_returns_files_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "02.hex", b"02");
        write_file(dir.path(), "01.hex", b"01");
        write_file(dir.path(), "03.hex", b"03");

        let mut source = ReplaySource::new(Some(dir.path().to_path_buf()), None);
        let messages = source.drain(QueueKind::Statistics).unwrap();

        let bytes: Vec<u8> = messages.iter().map(|m| m.data[0]).collect();
        assert_eq!(bytes, vec![0x01, 0x02, 0x03]);
        assert!(messages.iter().all(|m| m.queue == QueueKind::Statistics));
    }

    #[test]
    fn unconfigured_queue_drains_empty() {
        let mut source = ReplaySource::new(None, None);

        assert!(source.drain(QueueKind::Accounting).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let mut source = ReplaySource::new(Some(PathBuf::from("/nonexistent/mqcrab")), None);

        assert!(matches!(
            source.drain(QueueKind::Statistics),
            Err(SourceError::Io { .. })
        ));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
