//! Parsing for the command-time text parameter.
//!
//! Queue managers stamp statistics with `YYYY-MM-DD HH:MM:SS.mmm`, but
//! captures also show the compact and ISO-8601 shapes, so each accepted
//! format is tried in order and the first match wins.

use chrono::{DateTime, NaiveDateTime, Utc};

// -----------------------------------------------------------------------------
// ----- Formats ---------------------------------------------------------------

const FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.3f",
    "%Y-%m-%d %H:%M:%S",
    "%Y%m%d%H%M%S",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S%.3fZ",
];

// -----------------------------------------------------------------------------
// ----- Parsing ---------------------------------------------------------------

/// Parse a command-time string against the accepted formats. `None` means
/// the caller should fall back to the decode-time wall clock.
pub fn parse_command_time(text: &str) -> Option<DateTime<Utc>> {
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
