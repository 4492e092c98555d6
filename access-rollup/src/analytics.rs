use std::{
    collections::{BTreeMap, HashMap, hash_map::Entry},
    num::NonZero,
};

use chrono::NaiveDate;

use crate::{invariants::RequestPath, models::AggregateRow, window::Localized};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub date: NaiveDate,
    pub path: RequestPath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    key: GroupKey,
    count: usize,
    /// Running mean, so large latencies cannot overflow a sum.
    mean_latency: f64,
    /// Position of the group's first record; breaks count ties when ranking.
    first_seen: usize,
}

impl Group {
    fn new(key: GroupKey, first_seen: usize) -> Self {
        Self {
            key,
            count: 0,
            mean_latency: 0.0,
            first_seen,
        }
    }

    fn record(&mut self, latency_ms: f64) {
        self.count += 1;
        self.mean_latency += (latency_ms - self.mean_latency) / self.count as f64;
    }

    pub fn avg_latency(&self) -> f64 {
        self.mean_latency
    }
}

impl From<Group> for AggregateRow {
    fn from(group: Group) -> Self {
        Self {
            avg_latency: group.avg_latency(),
            date: group.key.date,
            path: group.key.path,
            count: group.count,
        }
    }
}

/// Buckets records by (local date, path). Groups come back in first-seen order.
pub fn group_by_day_and_path(records: &[Localized]) -> Vec<Group> {
    let mut slots: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for (seen, Localized { date, record }) in records.iter().enumerate() {
        let key = GroupKey {
            date: *date,
            path: record.path.clone(),
        };
        let slot = match slots.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                groups.push(Group::new(entry.key().clone(), seen));
                *entry.insert(groups.len() - 1)
            }
        };
        groups[slot].record(record.latency.as_millis());
    }
    groups
}

/// Keeps the `top` busiest paths of each date, then orders the survivors by
/// date ascending, count descending, path ascending.
pub fn rank(groups: Vec<Group>, top: NonZero<usize>) -> Vec<AggregateRow> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Group>> = BTreeMap::new();
    for group in groups {
        by_date.entry(group.key.date).or_default().push(group);
    }

    let mut rows: Vec<AggregateRow> = by_date
        .into_values()
        .flat_map(|mut day| {
            day.sort_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.first_seen.cmp(&b.first_seen))
            });
            day.truncate(top.get());
            day
        })
        .map(AggregateRow::from)
        .collect();

    rows.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.path.cmp(&b.path))
    });
    rows
}
