use chrono::{DateTime, Utc};
use derive_more::Display;
use tracing::trace;

use crate::{invariants::RequestPath, models::LogRecord};

/// Why a line did not produce a [`LogRecord`].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[display("expected 5 fields, found {_0}")]
    FieldCount(usize),
    #[display("timestamp is not an RFC 3339 instant")]
    Timestamp,
    #[display("latency is not a finite non-negative number")]
    Latency,
}

/// Parses every line, silently dropping the ones that fail validation.
/// Surviving records keep their input order.
pub fn parse_lines<I, S>(lines: I) -> Vec<LogRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref();
            parse_line(line)
                .inspect_err(|reason| trace!(line, %reason, "discarding log line"))
                .ok()
        })
        .collect()
}

// Line format: <timestamp>,<user>,<path>,<status>,<latency ms>
// User and status must be present but are not interpreted.
pub fn parse_line(line: &str) -> Result<LogRecord, Rejection> {
    let fields: Vec<&str> = line.split(',').collect();
    let [timestamp, _user, path, _status, latency] = fields.as_slice() else {
        return Err(Rejection::FieldCount(fields.len()));
    };
    let timestamp = DateTime::parse_from_rfc3339(timestamp.trim())
        .map_err(|_| Rejection::Timestamp)?
        .with_timezone(&Utc);
    let latency = latency.parse().map_err(|_| Rejection::Latency)?;
    Ok(LogRecord {
        timestamp,
        path: RequestPath::from(*path),
        latency,
    })
}
