use chrono::NaiveDate;
use clap::Parser;
use derive_getters::Getters;
use noise_maker::generator::MAX_DAYS;

#[derive(Parser, Debug, Getters)]
#[command(name = "noise-maker")]
#[command(about = "Generate fake comma-separated access log lines", long_about = None)]
pub struct CliArgs {
    /// Number of lines to emit.
    #[arg(long, default_value_t = 1000)]
    count: usize,

    /// Seed for reproducible output; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// First UTC day timestamps may fall on.
    #[arg(long, default_value = "2025-01-01")]
    start: NaiveDate,

    /// Days covered, at most a century.
    #[arg(
        long,
        default_value_t = 7,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DAYS))
    )]
    days: u32,

    /// Share of lines deliberately broken, 0.0 to 1.0.
    #[arg(long, default_value_t = 0.0, value_parser = parse_ratio)]
    malformed_ratio: f64,
}

fn parse_ratio(s: &str) -> Result<f64, String> {
    let ratio: f64 = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("{ratio} is outside 0.0..=1.0"))
    }
}
