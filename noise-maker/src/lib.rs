//! Synthetic comma-separated access log lines for exercising `access-rollup`.

pub mod generator;
pub mod stream;
