/// File age analysis: files that have not been modified for a long time.
use super::analyser::{require_trees, Analyser, SharedForest, SharedPaths};
use crate::error::{AnalysisError, InitError, ReportError};
use crate::model::size::format_size;
use crate::model::FileForest;
use crate::report::{Cell, ReportDocument};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime};

const NAME: &str = "Stale Files Analysis";
const DESCRIPTION: &str = "Lists the largest files that have not been modified for a long time";

pub const DEFAULT_MIN_AGE_DAYS: u64 = 365;
pub const DEFAULT_MAX_RESULTS: usize = 100;

const SECS_PER_DAY: u64 = 24 * 3600;

/// A file identified as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleFile {
    pub path: String,
    pub size: u64,
    pub last_modified: SystemTime,
    pub age_days: u64,
}

/// Files not modified in the last `min_age_days` days as of `now`, largest
/// first, at most `max_results`. Files without a timestamp are skipped.
pub fn find_stale_files(
    forest: &FileForest,
    now: SystemTime,
    min_age_days: u64,
    max_results: usize,
) -> Vec<StaleFile> {
    if max_results == 0 {
        return Vec::new();
    }
    let threshold = Duration::from_secs(min_age_days * SECS_PER_DAY);

    let mut stale: Vec<StaleFile> = forest
        .nodes
        .iter()
        .filter(|node| !node.is_dir)
        .filter_map(|node| {
            let modified = node.modified?;
            let age = now.duration_since(modified).ok()?;
            (age >= threshold).then(|| StaleFile {
                path: node.path.clone(),
                size: node.size,
                last_modified: modified,
                age_days: age.as_secs() / SECS_PER_DAY,
            })
        })
        .collect();

    let order = |a: &StaleFile, b: &StaleFile| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path));
    if stale.len() > max_results {
        stale.select_nth_unstable_by(max_results - 1, order);
        stale.truncate(max_results);
    }
    stale.sort_unstable_by(order);
    stale
}

pub struct StaleFilesAnalyser {
    forest: SharedForest,
    paths: SharedPaths,
    min_age_days: u64,
    max_results: usize,
    files: Option<Vec<StaleFile>>,
}

impl StaleFilesAnalyser {
    pub fn new(forest: SharedForest, paths: SharedPaths) -> Self {
        Self {
            forest,
            paths,
            min_age_days: DEFAULT_MIN_AGE_DAYS,
            max_results: DEFAULT_MAX_RESULTS,
            files: None,
        }
    }

    /// Factory matching the registry's construction contract.
    pub fn create(forest: SharedForest, paths: SharedPaths) -> Result<Box<dyn Analyser>, InitError> {
        Ok(Box::new(Self::new(forest, paths)))
    }

    pub fn files(&self) -> Option<&[StaleFile]> {
        self.files.as_deref()
    }
}

impl Analyser for StaleFilesAnalyser {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn analyse(&mut self) -> Result<(), AnalysisError> {
        require_trees(&self.forest)?;
        self.files = Some(find_stale_files(
            &self.forest,
            SystemTime::now(),
            self.min_age_days,
            self.max_results,
        ));
        Ok(())
    }

    fn report(&self) -> Result<ReportDocument, ReportError> {
        let files = self.files.as_ref().ok_or(ReportError::NotAnalysed)?;
        let mut doc = ReportDocument::new(NAME, DESCRIPTION, &self.paths).columns(&[
            "Path",
            "Size",
            "Last Modified",
            "Age (days)",
        ]);
        for file in files {
            let modified: DateTime<Utc> = file.last_modified.into();
            doc.push_row(vec![
                Cell::from(file.path.as_str()),
                Cell::from(format_size(file.size)),
                Cell::from(modified.format("%Y-%m-%d").to_string()),
                Cell::from(file.age_days),
            ]);
        }
        doc.push_summary("Minimum age (days)", self.min_age_days);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeNode;

    fn now() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(2_000 * SECS_PER_DAY)
    }

    fn days_ago(days: u64) -> Option<SystemTime> {
        Some(now() - Duration::from_secs(days * SECS_PER_DAY + 1))
    }

    fn forest(entries: &[(&str, u64, Option<SystemTime>)]) -> FileForest {
        let mut forest = FileForest::with_capacity(entries.len() + 1);
        let r = forest.add_root(TreeNode::new_dir("/r", "/r", 1));
        for &(name, size, modified) in entries {
            forest.add_child(
                r,
                TreeNode::new_file(&format!("/r/{name}"), name, size, 2).with_modified(modified),
            );
        }
        forest
    }

    #[test]
    fn old_file_is_returned_and_recent_file_is_not() {
        let f = forest(&[("old.log", 500, days_ago(400)), ("new.txt", 900, days_ago(10))]);
        let stale = find_stale_files(&f, now(), 365, 10);
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].path, "/r/old.log");
        assert_eq!(stale[0].age_days, 400);
    }

    #[test]
    fn sorted_by_size_and_capped() {
        let f = forest(&[
            ("a.bak", 100, days_ago(400)),
            ("b.bak", 5_000, days_ago(400)),
            ("c.bak", 300, days_ago(500)),
        ]);
        let stale = find_stale_files(&f, now(), 365, 2);
        let sizes: Vec<u64> = stale.iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![5_000, 300]);
    }

    #[test]
    fn files_without_timestamps_and_zero_cap_are_safe() {
        let f = forest(&[("none.bin", 1, None), ("old.bin", 1, days_ago(900))]);
        assert_eq!(find_stale_files(&f, now(), 0, 10).len(), 1);
        assert!(find_stale_files(&f, now(), 0, 0).is_empty());
    }

    #[test]
    fn future_timestamps_are_ignored() {
        let future = Some(now() + Duration::from_secs(60));
        let f = forest(&[("clock_skew.txt", 1, future)]);
        assert!(find_stale_files(&f, now(), 0, 10).is_empty());
    }
}
