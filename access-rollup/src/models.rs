use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::invariants::{Latency, RequestPath};

/// A log line that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub path: RequestPath,
    pub latency: Latency,
}

/// Request count and mean latency for one path on one local date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRow {
    pub date: NaiveDate,
    pub path: RequestPath,
    pub count: usize,
    /// Unrounded mean in milliseconds.
    pub avg_latency: f64,
}
