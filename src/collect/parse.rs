use crate::error::{ProfileError, Result};
use crate::model::{ClonesRecord, REQUIRED_COLUMNS};
use crate::util::{parse_count, parse_timestamp};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct StatsRow {
    time_iso8601: String,
    clones_total: String,
    clones_unique: String,
}

/// Parse one statistics file; every row is tagged with `repository`.
pub fn parse_stats_file(path: &Path, repository: &str) -> Result<Vec<ClonesRecord>> {
    let file = std::fs::File::open(path)?;
    parse_stats(file, path, repository)
}

pub fn parse_stats<R: Read>(reader: R, path: &Path, repository: &str) -> Result<Vec<ClonesRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ProfileError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<StatsRow>().enumerate() {
        let row = row?;
        let line = index + 2;
        let at_line = |e: ProfileError| ProfileError::Row {
            line,
            source: Box::new(e),
        };
        let timestamp = parse_timestamp(&row.time_iso8601).map_err(at_line)?;
        let clones_total = parse_count(&row.clones_total).map_err(at_line)?;
        let clones_unique = parse_count(&row.clones_unique).map_err(at_line)?;

        records.push(ClonesRecord {
            repository: repository.to_string(),
            timestamp,
            clones_total,
            clones_unique,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<Vec<ClonesRecord>> {
        parse_stats(text.as_bytes(), Path::new("stats.csv"), "demo")
    }

    #[test]
    fn extra_columns_are_ignored_and_repo_overrides_file() {
        let text = "\
time_iso8601,views_total,clones_total,clones_unique,repo
2025-06-01T00:00:00+00:00,40,10,5,something-else
2025-06-02T00:00:00+00:00,12,5,3,something-else
";
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.repository == "demo"));
        assert_eq!(records[0].clones_total, 10);
        assert_eq!(records[1].clones_unique, 3);
    }

    #[test]
    fn header_only_file_yields_no_records() {
        let records = parse("time_iso8601,clones_total,clones_unique\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_column_is_reported() {
        let err = parse("time_iso8601,clones_total\n2025-06-01,1\n").unwrap_err();
        match err {
            ProfileError::MissingColumn { column, .. } => assert_eq!(column, "clones_unique"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_count_fails_whole_file() {
        let text = "time_iso8601,clones_total,clones_unique\n2025-06-01,1,1\n2025-06-02,x,1\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, ProfileError::Row { line: 3, .. }));
        assert_eq!(err.to_string(), "line 3: Parse error: invalid count 'x'");
    }

    #[test]
    fn blank_count_cells_keep_the_rest_of_the_file() {
        let text = "\
time_iso8601,clones_total,clones_unique
2025-06-01T00:00:00+00:00,10,5
2025-06-02T00:00:00+00:00,,
2025-06-03T00:00:00+00:00,4,
";
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 3);
        let totals: Vec<u64> = records.iter().map(|r| r.clones_total).collect();
        let uniques: Vec<u64> = records.iter().map(|r| r.clones_unique).collect();
        assert_eq!(totals, vec![10, 0, 4]);
        assert_eq!(uniques, vec![5, 0, 0]);
    }

    #[test]
    fn ragged_rows_are_csv_errors() {
        let text = "time_iso8601,clones_total,clones_unique\n2025-06-01,1\n";
        assert!(matches!(parse(text), Err(ProfileError::Csv(_))));
    }
}
