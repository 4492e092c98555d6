use std::num::NonZero;

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Deserialize;

use crate::zone::Zone;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[display("date window is inverted: from {from} is after to {to}")]
    InvertedWindow { from: NaiveDate, to: NaiveDate },
    #[display("top must keep at least one path per day")]
    ZeroTop,
    #[display("unknown timezone {input:?}, expected jst or ict")]
    UnknownZone { input: String },
    #[display("invalid date {input:?}: {source}")]
    BadDate {
        input: String,
        source: chrono::ParseError,
    },
}

/// Parameters for one aggregation run. Validated on construction and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct AggregationConfig {
    /// First local date kept, inclusive.
    from: NaiveDate,
    /// Last local date kept, inclusive.
    to: NaiveDate,
    tz: Zone,
    /// Paths kept per local date.
    top: NonZero<usize>,
}

impl AggregationConfig {
    pub fn new(from: NaiveDate, to: NaiveDate, tz: Zone, top: usize) -> Result<Self, ConfigError> {
        if from > to {
            return Err(ConfigError::InvertedWindow { from, to });
        }
        let top = NonZero::new(top).ok_or(ConfigError::ZeroTop)?;
        Ok(Self { from, to, tz, top })
    }

    /// Builds a config from its textual form: `YYYY-MM-DD` dates and a zone name.
    pub fn parse(from: &str, to: &str, tz: &str, top: usize) -> Result<Self, ConfigError> {
        Self::new(parse_date(from)?, parse_date(to)?, tz.parse()?, top)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.from..=self.to).contains(&date)
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|source| ConfigError::BadDate {
        input: input.to_string(),
        source,
    })
}

#[derive(Deserialize)]
struct RawConfig {
    from: NaiveDate,
    to: NaiveDate,
    tz: Zone,
    top: usize,
}

impl TryFrom<RawConfig> for AggregationConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(raw.from, raw.to, raw.tz, raw.top)
    }
}
