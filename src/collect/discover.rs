use crate::error::{ProfileError, Result};
use crate::model::CollectWarning;
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Layout {
    /// Any directory below the root holding the stats file; the first segment names the repository
    #[default]
    Recursive,
    /// `<root>/<owner>/<repo>/<stats-dir>/<stats-file>`
    Flat,
}

#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub root: PathBuf,
    pub owner: String,
    pub layout: Layout,
    pub stats_file: String,
    pub stats_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSource {
    pub repository: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub sources: Vec<StatsSource>,
    pub warnings: Vec<CollectWarning>,
}

pub fn discover(options: &CollectOptions) -> Result<Discovery> {
    if !options.root.is_dir() {
        return Err(ProfileError::Config(format!(
            "statistics root {} does not exist",
            options.root.display()
        )));
    }

    match options.layout {
        Layout::Recursive => discover_recursive(&options.root, &options.stats_file),
        Layout::Flat => discover_flat(
            &options.root.join(&options.owner),
            &options.stats_dir,
            &options.stats_file,
        ),
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// First path segment below `root`, if `path` lies inside a sub-directory of it.
fn repository_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();
    let first = match components.next()? {
        Component::Normal(name) => name.to_str()?.to_string(),
        _ => return None,
    };
    // a stats file sitting directly in the root has no repository segment
    components.next()?;
    if is_hidden(&first) {
        return None;
    }
    Some(first)
}

fn discover_recursive(root: &Path, stats_file: &str) -> Result<Discovery> {
    let mut discovery = Discovery::default();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) || entry.file_name() != stats_file {
            continue;
        }

        match repository_for(root, entry.path()) {
            Some(repository) => {
                debug!(repository = %repository, path = %entry.path().display(), "found statistics file");
                discovery.sources.push(StatsSource {
                    repository,
                    path: entry.path().to_path_buf(),
                });
            }
            None => debug!(path = %entry.path().display(), "statistics file outside any repository directory"),
        }
    }

    Ok(discovery)
}

fn discover_flat(owner_dir: &Path, stats_dir: &str, stats_file: &str) -> Result<Discovery> {
    if !owner_dir.is_dir() {
        return Err(ProfileError::Config(format!(
            "owner directory {} does not exist",
            owner_dir.display()
        )));
    }

    let mut repositories = Vec::new();
    for entry in std::fs::read_dir(owner_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if !is_hidden(&name) => repositories.push(name),
            Ok(_) => {}
            Err(name) => warn!(name = ?name, "skipping non UTF-8 repository directory"),
        }
    }
    repositories.sort();

    let mut discovery = Discovery::default();
    for repository in repositories {
        let path = owner_dir.join(&repository).join(stats_dir).join(stats_file);
        if path.is_file() {
            discovery.sources.push(StatsSource { repository, path });
        } else {
            let warning = CollectWarning::MissingStats {
                repository,
                expected: path,
            };
            warn!("{warning}");
            discovery.warnings.push(warning);
        }
    }

    Ok(discovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "time_iso8601,clones_total,clones_unique\n").unwrap();
    }

    fn options(root: &Path, layout: Layout) -> CollectOptions {
        CollectOptions {
            root: root.to_path_buf(),
            owner: "octo".to_string(),
            layout,
            stats_file: "views_clones_aggregate.csv".to_string(),
            stats_dir: "ghrs-data".to_string(),
        }
    }

    fn names(discovery: &Discovery) -> Vec<&str> {
        discovery.sources.iter().map(|s| s.repository.as_str()).collect()
    }

    #[test]
    fn recursive_uses_first_segment_and_skips_hidden() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("beta/ghrs-data/views_clones_aggregate.csv"));
        touch(&dir.path().join("alpha/deep/nested/views_clones_aggregate.csv"));
        touch(&dir.path().join(".git/views_clones_aggregate.csv"));
        touch(&dir.path().join("views_clones_aggregate.csv"));
        touch(&dir.path().join("gamma/other.csv"));

        let discovery = discover(&options(dir.path(), Layout::Recursive)).unwrap();
        assert_eq!(names(&discovery), vec!["alpha", "beta"]);
        assert!(discovery.warnings.is_empty());
    }

    #[test]
    fn flat_lists_owner_directory_and_warns_on_missing() {
        let dir = tempdir().unwrap();
        let owner = dir.path().join("octo");
        touch(&owner.join("one/ghrs-data/views_clones_aggregate.csv"));
        fs::create_dir_all(owner.join("two/elsewhere")).unwrap();
        // wrong sub-directory is not picked up by the flat layout
        touch(&owner.join("three/views_clones_aggregate.csv"));

        let discovery = discover(&options(dir.path(), Layout::Flat)).unwrap();
        assert_eq!(names(&discovery), vec!["one"]);
        let missing: Vec<_> = discovery
            .warnings
            .iter()
            .map(|w| match w {
                CollectWarning::MissingStats { repository, .. } => repository.as_str(),
                other => panic!("unexpected warning {other}"),
            })
            .collect();
        assert_eq!(missing, vec!["three", "two"]);
    }

    #[test]
    fn missing_root_is_config_error() {
        let dir = tempdir().unwrap();
        let err = discover(&options(&dir.path().join("absent"), Layout::Recursive)).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn flat_without_owner_directory_is_config_error() {
        let dir = tempdir().unwrap();
        let err = discover(&options(dir.path(), Layout::Flat)).unwrap_err();
        assert!(err.is_config());
    }
}
