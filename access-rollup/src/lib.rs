//! Daily per-path request counts and mean latency from comma-separated access
//! log lines.
//!
//! The pipeline is a pure batch transform: lines are parsed (malformed ones are
//! dropped), filtered to an inclusive window of local dates, bucketed by
//! (local date, path), cut down to the busiest paths of each date and sorted.
//!
//! ```
//! use access_rollup::{AggregationConfig, aggregate};
//!
//! let config = AggregationConfig::parse("2025-01-01", "2025-01-31", "jst", 2).unwrap();
//! let rows = aggregate(["2025-01-03T10:12:00Z,u1,/api/orders,200,120"], &config);
//! assert_eq!(rows[0].date.to_string(), "2025-01-03");
//! assert_eq!(rows[0].count, 1);
//! ```

mod analytics;
pub mod config;
pub mod invariants;
pub mod models;
pub mod parse;
pub mod window;
pub mod zone;

use tracing::debug;

pub use config::{AggregationConfig, ConfigError};
pub use invariants::{Latency, RequestPath};
pub use models::{AggregateRow, LogRecord};
pub use parse::{Rejection, parse_line, parse_lines};
pub use zone::{Zone, to_local_date};

/// Runs the whole pipeline over `lines`.
///
/// Never fails: malformed lines are skipped and an empty window yields no rows.
pub fn aggregate<I, S>(lines: I, config: &AggregationConfig) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let records = parse_lines(lines);
    let in_window = window::localize_in_window(&records, config);
    let groups = analytics::group_by_day_and_path(&in_window);
    let rows = analytics::rank(groups, *config.top());
    debug!(
        parsed = records.len(),
        in_window = in_window.len(),
        rows = rows.len(),
        tz = %config.tz(),
        "aggregated access log"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;

    #[test]
    fn empty_input_yields_no_rows() {
        let config = AggregationConfig::parse("2025-01-01", "2025-01-31", "jst", 3).unwrap();
        assert_that!(aggregate(Vec::<&str>::new(), &config)).is_empty();
    }

    #[test]
    fn only_malformed_input_yields_no_rows() {
        let config = AggregationConfig::parse("2025-01-01", "2025-01-31", "jst", 3).unwrap();
        let rows = aggregate(["", "a,b", "x,u,/p,200,1", "2025-01-03T10:00:00Z,u,/p,200,"], &config);
        assert_that!(rows).is_empty();
    }

    #[test]
    fn filtering_and_grouping_agree_on_the_local_date() {
        // 16:30Z is already the next day in jst but not yet in ict
        let lines = ["2025-01-31T16:30:00Z,u1,/a,200,10"];
        let jst = AggregationConfig::parse("2025-01-01", "2025-01-31", "jst", 1).unwrap();
        let ict = AggregationConfig::parse("2025-01-01", "2025-01-31", "ict", 1).unwrap();
        assert_that!(aggregate(lines, &jst)).is_empty();
        let rows = aggregate(lines, &ict);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.to_string(), "2025-01-31");
    }
}
