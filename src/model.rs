use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 1;

/// Column holding the sample timestamp.
pub const TIME_COLUMN: &str = "time_iso8601";
pub const CLONES_TOTAL_COLUMN: &str = "clones_total";
pub const CLONES_UNIQUE_COLUMN: &str = "clones_unique";

pub const REQUIRED_COLUMNS: [&str; 3] = [TIME_COLUMN, CLONES_TOTAL_COLUMN, CLONES_UNIQUE_COLUMN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ClonesTotal,
    ClonesUnique,
}

impl Metric {
    pub fn value_of(self, record: &ClonesRecord) -> u64 {
        match self {
            Metric::ClonesTotal => record.clones_total,
            Metric::ClonesUnique => record.clones_unique,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Metric::ClonesTotal => CLONES_TOTAL_COLUMN,
            Metric::ClonesUnique => CLONES_UNIQUE_COLUMN,
        }
    }

    /// Header used for the metric column of the ranked table.
    pub fn heading(self) -> &'static str {
        match self {
            Metric::ClonesTotal => "Total Clones",
            Metric::ClonesUnique => "Unique Clones",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClonesRecord {
    pub repository: String,
    pub timestamp: DateTime<Utc>,
    pub clones_total: u64,
    pub clones_unique: u64,
}

/// All records of one run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<ClonesRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ClonesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn concat(mut self, mut other: Vec<ClonesRecord>) -> Self {
        self.records.append(&mut other);
        self
    }
}

impl From<Vec<ClonesRecord>> for Dataset {
    fn from(records: Vec<ClonesRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<ClonesRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = ClonesRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub repository: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub day: NaiveDate,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub metric: Metric,
    pub total: u64,
    pub start_date: DateTime<Utc>,
    pub top: Vec<RankingEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_series: Option<Vec<DailyPoint>>,
}

/// Non-fatal problem met while collecting; the affected source contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollectWarning {
    Unreadable {
        repository: String,
        path: PathBuf,
        reason: String,
    },
    MissingStats {
        repository: String,
        expected: PathBuf,
    },
}

impl fmt::Display for CollectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectWarning::Unreadable { path, reason, .. } => {
                write!(f, "Could not read {}: {}", path.display(), reason)
            }
            CollectWarning::MissingStats { repository, expected } => {
                write!(f, "No statistics for {} (expected {})", repository, expected.display())
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub dataset: Dataset,
    pub warnings: Vec<CollectWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub owner: String,
    pub metric: Metric,
    pub total: u64,
    pub entries: Vec<RankingEntry>,
    pub warnings: Vec<CollectWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub owner: String,
    pub metric: Metric,
    pub points: Vec<DailyPoint>,
    pub warnings: Vec<CollectWarning>,
}
