use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use derive_more::Display;
use serde::Deserialize;

use crate::config::ConfigError;

const HOUR: i32 = 3600;

const JST: FixedOffset = FixedOffset::east_opt(9 * HOUR).expect("in-range offset const");
const ICT: FixedOffset = FixedOffset::east_opt(7 * HOUR).expect("in-range offset const");

/// Fixed-offset zones that local dates can be reported in. No DST rules apply.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Zone {
    /// Japan Standard Time, UTC+9.
    #[display("jst")]
    Jst,
    /// Indochina Time, UTC+7.
    #[display("ict")]
    Ict,
}

impl Zone {
    pub const ALL: [Zone; 2] = [Zone::Jst, Zone::Ict];

    pub fn offset(self) -> FixedOffset {
        match self {
            Self::Jst => JST,
            Self::Ict => ICT,
        }
    }
}

impl FromStr for Zone {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|zone| s.eq_ignore_ascii_case(&zone.to_string()))
            .ok_or_else(|| ConfigError::UnknownZone {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for Zone {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Calendar date of `instant` as seen on a wall clock in `zone`.
///
/// Both window filtering and grouping go through this one function, so a record
/// can never be counted on a day it was not filtered on.
pub fn to_local_date(instant: DateTime<Utc>, zone: Zone) -> NaiveDate {
    instant.with_timezone(&zone.offset()).date_naive()
}
