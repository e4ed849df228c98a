//! Last-search snapshot.
//!
//! The most recent search results are kept in one JSON file (an array of
//! job records) so `list`, `analyze`, `export` and friends work offline.

use crate::models::JobRecord;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Write the search results, replacing any previous snapshot.
pub fn save(path: &Path, jobs: &[JobRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(jobs).context("Failed to serialize jobs")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;

    debug!("Saved {} jobs to {}", jobs.len(), path.display());
    Ok(())
}

/// Read the last search results.
///
/// Returns `Ok(None)` if no snapshot exists. A JSON `null` reads as an empty
/// list. Fields of the wrong type read as absent; entries that are not
/// objects are skipped with a warning.
pub fn load(path: &Path) -> Result<Option<Vec<JobRecord>>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;

    let entries: Option<Vec<Value>> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;

    let jobs: Vec<JobRecord> = entries
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<JobRecord>(entry) {
            Ok(job) => Some(job),
            Err(e) => {
                warn!("Skipping snapshot entry {}: {}", i, e);
                None
            }
        })
        .collect();

    Ok(Some(jobs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<JobRecord> {
        vec![JobRecord {
            id: "j1".to_string(),
            title: "Rust Engineer".to_string(),
            location: Some("Berlin, DE".to_string()),
            ..Default::default()
        }]
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("last.json");

        save(&path, &sample()).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, Some(sample()));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(&dir.path().join("absent.json")).unwrap(), None);
    }

    #[test]
    fn test_null_is_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("null.json");
        std::fs::write(&path, "null").unwrap();

        assert_eq!(load(&path).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[{\"title\": ").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse snapshot"));
    }

    #[test]
    fn test_mistyped_fields_keep_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "a", "title": "Backend Engineer", "company": "Acme", "location": "Austin, TX"},
                {"id": "b", "title": "Data Scientist", "company": 12345, "location": "Boston, MA",
                 "highlights": ["not", "a", "map"]},
                "stray entry"
            ]"#,
        )
        .unwrap();

        let jobs = load(&path).unwrap().unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].id, "b");
        assert_eq!(jobs[1].company, None);
        assert_eq!(jobs[1].location.as_deref(), Some("Boston, MA"));
        assert!(jobs[1].highlights.is_empty());

        let summary = crate::analysis::summarize(&jobs);
        assert_eq!(summary.total_jobs, 2);
        assert_eq!(summary.top_locations.len(), 2);
    }

    #[test]
    fn test_saved_keys_are_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last.json");
        let jobs = vec![JobRecord {
            id: "j1".to_string(),
            title: "x".to_string(),
            apply_url: Some("https://apply.example".to_string()),
            ..Default::default()
        }];

        save(&path, &jobs).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"applyUrl\""));
        assert!(!raw.contains("\"highlights\""));
    }
}
