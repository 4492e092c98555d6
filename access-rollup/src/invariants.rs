use std::str::FromStr;

use derive_more::{AsRef, Debug, Display, From};
use serde::Serialize;

/// Request path exactly as it appeared in the log line.
#[derive(Debug, Display, AsRef, From, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RequestPath(String);

impl RequestPath {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for RequestPath {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Request latency in milliseconds; always finite and non-negative.
#[derive(Debug, Display, Clone, Copy, PartialEq, PartialOrd)]
pub struct Latency(f64);

impl Latency {
    pub fn as_millis(self) -> f64 {
        self.0
    }
}

impl FromStr for Latency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let millis: f64 = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
        if !millis.is_finite() || millis < 0.0 {
            return Err(format!("{s:?} is not a finite non-negative latency"));
        }
        Ok(Self(millis))
    }
}
