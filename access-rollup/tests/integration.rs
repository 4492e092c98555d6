use access_rollup::{AggregateRow, AggregationConfig, aggregate, parse_lines, to_local_date};
use asserting::prelude::*;
use chrono::NaiveDate;
use noise_maker::generator::{Window, generate_access_line, generate_malformed_line};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn config(from: &str, to: &str, tz: &str, top: usize) -> AggregationConfig {
    AggregationConfig::parse(from, to, tz, top).expect("valid test config")
}

fn row(date: &str, path: &str, count: usize, avg_latency: f64) -> AggregateRow {
    AggregateRow {
        date: date.parse().unwrap(),
        path: path.into(),
        count,
        avg_latency,
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("access_rollup=trace")
        .with_test_writer()
        .try_init();
}

#[test]
fn aggregate_basic() {
    init_tracing();
    let lines = [
        "2025-01-03T10:12:00Z,u1,/api/orders,200,120",
        "2025-01-03T10:13:00Z,u2,/api/orders,200,180",
        "2025-01-03T11:00:00Z,u3,/api/users,200,90",
        "2025-01-04T00:10:00Z,u1,/api/orders,200,110",
    ];
    let result = aggregate(lines, &config("2025-01-01", "2025-01-31", "jst", 2));
    assert_eq!(
        result,
        [
            row("2025-01-03", "/api/orders", 2, 150.0),
            row("2025-01-03", "/api/users", 1, 90.0),
            row("2025-01-04", "/api/orders", 1, 110.0),
        ]
    );
}

#[test]
fn skips_invalid_input_rows() {
    init_tracing();
    let lines = [
        "2025-01-03T10:12:00Z,u1,/api/orders,200,120",
        "invalid-timestamp,u2,/api/orders,200,150",
        "2025-01-03T11:00:00Z,u3,/api/users,200,abc",
    ];
    let result = aggregate(lines, &config("2025-01-01", "2025-01-31", "jst", 5));
    assert_eq!(result, [row("2025-01-03", "/api/orders", 1, 120.0)]);
}

#[test]
fn upper_bound_uses_local_date() {
    let lines = [
        "2025-01-01T00:00:00Z,u1,/api/orders,200,100",
        "2025-01-31T23:59:59Z,u2,/api/orders,200,200",
        "2025-02-01T00:00:00Z,u3,/api/orders,200,300",
    ];
    let result = aggregate(lines, &config("2025-01-01", "2025-01-31", "ict", 5));
    assert_eq!(result, [row("2025-01-01", "/api/orders", 1, 100.0)]);
}

#[test]
fn returns_empty_when_all_rows_are_out_of_range() {
    let lines = [
        "2024-12-31T14:59:59Z,u1,/api/orders,200,100",
        "2025-01-31T15:00:00Z,u2,/api/orders,200,200",
    ];
    let result = aggregate(lines, &config("2025-01-01", "2025-01-31", "jst", 3));
    assert_that!(result).is_empty();
}

#[test]
fn converts_timezone_correctly() {
    let line = ["2025-01-03T23:00:00Z,u1,/api/orders,200,100"];
    let jst = aggregate(line, &config("2025-01-03", "2025-01-04", "jst", 1));
    assert_eq!(jst[0].date.to_string(), "2025-01-04");
    let ict = aggregate(line, &config("2025-01-03", "2025-01-04", "ict", 1));
    assert_eq!(ict[0].date.to_string(), "2025-01-04");
}

#[test]
fn top_n_per_date_with_stable_ties() {
    let lines = [
        "2025-01-03T10:00:00Z,u1,/api/orders,200,100",
        "2025-01-03T10:10:00Z,u2,/api/users,200,100",
        "2025-01-03T10:20:00Z,u3,/api/users,200,100",
        "2025-01-04T10:00:00Z,u4,/api/patients,200,100",
        "2025-01-04T10:10:00Z,u5,/api/patients,200,100",
        "2025-01-04T10:20:00Z,u6,/api/doctors,200,100",
    ];
    let result = aggregate(lines, &config("2025-01-01", "2025-01-31", "jst", 1));
    assert_eq!(
        result,
        [
            row("2025-01-03", "/api/users", 2, 100.0),
            row("2025-01-04", "/api/patients", 2, 100.0),
        ]
    );
}

#[test]
fn sorts_final_output_by_date_count_path() {
    let lines = [
        "2025-01-03T10:00:00Z,u1,/api/orders,200,100",
        "2025-01-03T10:10:00Z,u2,/api/users,200,100",
        "2025-01-03T10:00:00Z,u3,/api/patients,200,100",
    ];
    let result = aggregate(lines, &config("2025-01-01", "2025-01-31", "jst", 5));
    let paths: Vec<_> = result.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, ["/api/orders", "/api/patients", "/api/users"]);
}

fn noisy_log(seed: u64, clean: usize, noise: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let window = Window::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 10);
    let mut lines: Vec<String> = (0..clean)
        .map(|_| generate_access_line(&mut rng, &window))
        .collect();
    for _ in 0..noise {
        let at = rng.random_range(0..=lines.len());
        lines.insert(at, generate_malformed_line(&mut rng, &window));
    }
    lines
}

#[test]
fn generated_noise_is_excluded() {
    let lines = noisy_log(11, 300, 120);
    assert_that!(parse_lines(&lines)).has_length(300);
}

#[test]
fn aggregate_is_idempotent() {
    let lines = noisy_log(12, 500, 50);
    let config = config("2025-01-02", "2025-01-08", "ict", 3);
    assert_eq!(aggregate(&lines, &config), aggregate(&lines, &config));
}

#[test]
fn counts_are_conserved_when_nothing_is_truncated() {
    let lines = noisy_log(13, 800, 100);
    let config = config("2025-01-03", "2025-01-07", "jst", 100);
    let expected = parse_lines(&lines)
        .iter()
        .filter(|r| config.contains(to_local_date(r.timestamp, *config.tz())))
        .count();
    let rows = aggregate(&lines, &config);
    assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), expected);
    for r in &rows {
        assert_that!(config.contains(r.date)).is_true();
        assert_that!(r.avg_latency).is_in_range(5.0..=2000.0);
    }
}

#[test]
fn output_is_ranked_and_bounded() {
    let lines = noisy_log(14, 1000, 100);
    let config = config("2025-01-01", "2025-01-31", "jst", 2);
    let rows = aggregate(&lines, &config);
    assert_that!(rows.is_empty()).is_false();
    for pair in rows.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let ordered = a.date < b.date
            || (a.date == b.date && a.count > b.count)
            || (a.date == b.date && a.count == b.count && a.path < b.path);
        assert!(ordered, "{a:?} before {b:?}");
    }
    let mut per_date = std::collections::BTreeMap::new();
    for r in &rows {
        *per_date.entry(r.date).or_insert(0usize) += 1;
    }
    assert!(per_date.values().all(|n| *n <= 2));
}
