use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rand::{Rng, seq::IndexedRandom};

const SECONDS_PER_DAY: i64 = 86_400;

const PATHS: [(&str, u8); 6] = [
    ("/api/orders", 50),
    ("/api/users", 30),
    ("/api/patients", 20),
    ("/api/doctors", 10),
    ("/login", 10),
    ("/", 5),
];
const STATUS: [(u16, u8); 6] = [
    (200, 50),
    (201, 10),
    (400, 10),
    (401, 20),
    (404, 50),
    (500, 5),
];
const USERS: u32 = 500;
/// Longest window; keeps generated instants well inside chrono's range.
pub const MAX_DAYS: u32 = 36_500;
const MAX_LATENCY_MS: u32 = 2000;

/// UTC span generated timestamps fall into: `days` whole days from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: NaiveDate,
    days: u32,
}

impl Window {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self {
            start,
            days: days.clamp(1, MAX_DAYS),
        }
    }

    fn random_timestamp<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let offset = rng.random_range(0..i64::from(self.days) * SECONDS_PER_DAY);
        // saturates for start dates at the very end of chrono's range
        let instant = self
            .start
            .and_time(NaiveTime::MIN)
            .and_utc()
            .checked_add_signed(Duration::seconds(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, table: &[(T, u8)]) -> T {
    table
        .choose_weighted(rng, |(_, w)| *w)
        .expect("weight tables are non-empty consts")
        .0
}

pub fn generate_access_line<R: Rng + ?Sized>(rng: &mut R, window: &Window) -> String {
    let timestamp = window.random_timestamp(rng);
    let user = rng.random_range(1..=USERS);
    let path = pick(rng, &PATHS);
    let status = pick(rng, &STATUS);
    let latency = rng.random_range(5..MAX_LATENCY_MS);

    format!("{timestamp},u{user},{path},{status},{latency}")
}

/// A line the access log parser is guaranteed to reject.
pub fn generate_malformed_line<R: Rng + ?Sized>(rng: &mut R, window: &Window) -> String {
    let line = generate_access_line(rng, window);
    let fields: Vec<&str> = line.split(',').collect();
    match rng.random_range(0..3) {
        // drop the latency column
        0 => fields[..4].join(","),
        1 => format!("invalid-timestamp,{}", fields[1..].join(",")),
        _ => format!("{},abc", fields[..4].join(",")),
    }
}

/// `count` lines, each malformed with probability `malformed_ratio`.
pub fn generate_batch<R: Rng + ?Sized>(
    rng: &mut R,
    window: &Window,
    count: usize,
    malformed_ratio: f64,
) -> Vec<String> {
    (0..count)
        .map(|_| {
            if rng.random::<f64>() < malformed_ratio {
                generate_malformed_line(rng, window)
            } else {
                generate_access_line(rng, window)
            }
        })
        .collect()
}
