pub mod discover;
pub mod parse;

pub use discover::{discover, CollectOptions, Discovery, Layout, StatsSource};
pub use parse::{parse_stats, parse_stats_file};

use crate::error::Result;
use crate::model::{ClonesRecord, CollectWarning, Collection, Dataset};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

/// Outcome of reading a single discovered source.
pub type SourceResult = std::result::Result<Vec<ClonesRecord>, CollectWarning>;

pub fn read_source(source: &StatsSource) -> SourceResult {
    parse_stats_file(&source.path, &source.repository).map_err(|e| CollectWarning::Unreadable {
        repository: source.repository.clone(),
        path: source.path.clone(),
        reason: e.to_string(),
    })
}

/// Fold per-source results into one collection, keeping discovery order.
pub fn fold_sources<I>(results: I, warnings: Vec<CollectWarning>) -> Collection
where
    I: IntoIterator<Item = SourceResult>,
{
    results.into_iter().fold(
        Collection {
            dataset: Dataset::new(),
            warnings,
        },
        |Collection { dataset, mut warnings }, result| match result {
            Ok(records) => Collection {
                dataset: dataset.concat(records),
                warnings,
            },
            Err(warning) => {
                warn!("{warning}");
                warnings.push(warning);
                Collection { dataset, warnings }
            }
        },
    )
}

pub fn collect(options: &CollectOptions, show_progress: bool) -> Result<Collection> {
    let Discovery { sources, warnings } = discover(options)?;

    let pb = if show_progress {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let results = sources.iter().map(|source| {
        pb.set_message(source.repository.clone());
        let result = read_source(source);
        pb.inc(1);
        result
    });
    let collection = fold_sources(results, warnings);
    pb.finish_and_clear();

    info!(
        sources = sources.len(),
        records = collection.dataset.len(),
        warnings = collection.warnings.len(),
        "collected statistics"
    );
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn broken_file_is_skipped_with_warning() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join("good/ghrs-data/views_clones_aggregate.csv"),
            "time_iso8601,clones_total,clones_unique\n2025-06-01T00:00:00+00:00,4,2\n",
        );
        write(
            &dir.path().join("bad/ghrs-data/views_clones_aggregate.csv"),
            "time_iso8601,views_total\n2025-06-01T00:00:00+00:00,4\n",
        );

        let options = CollectOptions {
            root: dir.path().to_path_buf(),
            owner: "octo".to_string(),
            layout: Layout::Recursive,
            stats_file: "views_clones_aggregate.csv".to_string(),
            stats_dir: "ghrs-data".to_string(),
        };
        let collection = collect(&options, false).unwrap();

        assert_eq!(collection.dataset.len(), 1);
        assert_eq!(collection.dataset.records()[0].repository, "good");
        assert_eq!(collection.warnings.len(), 1);
        assert!(matches!(
            &collection.warnings[0],
            CollectWarning::Unreadable { repository, .. } if repository == "bad"
        ));
    }

    #[test]
    fn empty_tree_gives_empty_collection() {
        let dir = tempdir().unwrap();
        let options = CollectOptions {
            root: dir.path().to_path_buf(),
            owner: "octo".to_string(),
            layout: Layout::Recursive,
            stats_file: "views_clones_aggregate.csv".to_string(),
            stats_dir: "ghrs-data".to_string(),
        };
        let collection = collect(&options, false).unwrap();
        assert!(collection.dataset.is_empty());
        assert!(collection.warnings.is_empty());
    }
}
