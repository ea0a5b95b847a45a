//! Discovery and loading of the site's JSON fixtures.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use serde_json::Value;
use thiserror::Error;

use crate::config::{
    FixtureMatcher,
    FixturesConfig,
    MatcherError,
};
use crate::filter::LocaleFilter;
use crate::types::Locale;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

/// Finds fixture files under `project_root`, honouring `.gitignore`.
///
/// Returned paths are sorted.
pub fn find_fixtures(
    project_root: &Path,
    config: &FixturesConfig,
) -> Result<Vec<PathBuf>, FixtureError> {
    tracing::debug!(project_root = %project_root.display(), "Searching fixtures");
    let matcher = FixtureMatcher::new(project_root.to_path_buf(), config)?;

    let mut found = Vec::new();
    for result in WalkBuilder::new(project_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if matcher.is_fixture(entry.path()) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    tracing::debug!("Found {} fixture(s)", found.len());
    Ok(found)
}

pub fn load_fixture(path: &Path) -> Result<Value, FixtureError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| FixtureError::Read { path: path.to_path_buf(), source })?;

    serde_json::from_str(&content)
        .map_err(|source| FixtureError::Parse { path: path.to_path_buf(), source })
}

/// Loads a fixture and filters it for `locale`.
pub fn render_fixture(
    path: &Path,
    locale: Locale,
    filter: &LocaleFilter,
) -> Result<Value, FixtureError> {
    let value = load_fixture(path)?;
    Ok(filter.filter(&value, locale).into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[rstest]
    fn test_find_fixtures_with_default_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "data/player.json", "{}");
        write(root, "data/news/2025.json", "[]");
        write(root, "package.json", "{}");
        write(root, "data/readme.md", "");
        write(root, "node_modules/pkg/data/x.json", "{}");

        let found = find_fixtures(root, &FixturesConfig::default()).unwrap();

        let relative: Vec<_> =
            found.iter().map(|p| p.strip_prefix(root).unwrap().to_path_buf()).collect();
        assert_eq!(
            relative,
            vec![PathBuf::from("data/news/2025.json"), PathBuf::from("data/player.json")]
        );
    }

    #[rstest]
    fn test_find_fixtures_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let config =
            FixturesConfig { include_patterns: vec!["[bad".to_string()], exclude_patterns: vec![] };

        let result = find_fixtures(temp_dir.path(), &config);

        assert!(matches!(result, Err(FixtureError::Matcher(_))));
    }

    #[rstest]
    fn test_load_fixture_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_fixture(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(FixtureError::Read { .. })));
    }

    #[rstest]
    fn test_load_fixture_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "bad.json", "{ nope");

        let result = load_fixture(&temp_dir.path().join("bad.json"));

        assert!(matches!(result, Err(FixtureError::Parse { .. })));
    }

    #[rstest]
    #[case(Locale::Zh, "杨瀚森")]
    #[case(Locale::En, "Yang Hansen")]
    fn test_render_fixture(#[case] locale: Locale, #[case] expected: &str) {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "player.json", r#"{"name": "杨瀚森", "number": 16}"#);

        let rendered =
            render_fixture(&temp_dir.path().join("player.json"), locale, &LocaleFilter::default())
                .unwrap();

        assert_that!(rendered["name"].as_str(), some(eq(expected)));
        assert_that!(rendered["number"].as_u64(), some(eq(16)));
    }
}
