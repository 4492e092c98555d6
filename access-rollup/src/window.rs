use chrono::NaiveDate;

use crate::{config::AggregationConfig, models::LogRecord, zone::to_local_date};

/// A record paired with its local date in the configured zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Localized<'a> {
    pub date: NaiveDate,
    pub record: &'a LogRecord,
}

/// Keeps the records whose local date falls inside the configured window.
///
/// The local date is computed once here and reused for grouping.
pub fn localize_in_window<'a>(
    records: &'a [LogRecord],
    config: &AggregationConfig,
) -> Vec<Localized<'a>> {
    records
        .iter()
        .map(|record| Localized {
            date: to_local_date(record.timestamp, *config.tz()),
            record,
        })
        .filter(|localized| config.contains(localized.date))
        .collect()
}
