use crate::model::{AggregationResult, Dataset, DailyPoint, Metric, RankingEntry};
use crate::util::day_key;
use std::collections::BTreeMap;

pub fn total(dataset: &Dataset, metric: Metric) -> u64 {
    dataset.records().iter().map(|r| metric.value_of(r)).sum()
}

/// Every repository with its summed metric, descending by value, ties by name ascending.
pub fn rank(dataset: &Dataset, metric: Metric) -> Vec<RankingEntry> {
    let mut sums: BTreeMap<&str, u64> = BTreeMap::new();
    for record in dataset.records() {
        *sums.entry(record.repository.as_str()).or_insert(0) += metric.value_of(record);
    }

    let mut entries: Vec<RankingEntry> = sums
        .into_iter()
        .map(|(repository, value)| RankingEntry {
            repository: repository.to_string(),
            value,
        })
        .collect();

    entries.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.repository.cmp(&b.repository)));
    entries
}

pub fn top(dataset: &Dataset, metric: Metric, n: usize) -> Vec<RankingEntry> {
    let mut entries = rank(dataset, metric);
    entries.truncate(n);
    entries
}

/// Metric summed per UTC calendar day, ascending. Days without records are absent.
pub fn daily_series(dataset: &Dataset, metric: Metric) -> Vec<DailyPoint> {
    let mut days = BTreeMap::new();
    for record in dataset.records() {
        *days.entry(day_key(&record.timestamp)).or_insert(0u64) += metric.value_of(record);
    }
    days.into_iter()
        .map(|(day, value)| DailyPoint { day, value })
        .collect()
}

/// `None` when the dataset is empty.
pub fn aggregate(dataset: &Dataset, metric: Metric, n: usize, with_series: bool) -> Option<AggregationResult> {
    let start_date = dataset.records().iter().map(|r| r.timestamp).min()?;

    Some(AggregationResult {
        metric,
        total: total(dataset, metric),
        start_date,
        top: top(dataset, metric, n),
        daily_series: with_series.then(|| daily_series(dataset, metric)),
    })
}
