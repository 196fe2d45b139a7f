/// Largest individual files across the whole forest.
use super::analyser::{require_trees, Analyser, SharedForest, SharedPaths};
use crate::error::{AnalysisError, InitError, ReportError};
use crate::model::size::format_size;
use crate::model::NodeIndex;
use crate::report::{Cell, ReportDocument};

const NAME: &str = "Largest Files Analysis";
const DESCRIPTION: &str = "Lists the largest individual files under the given paths";

/// Number of files kept in the report.
pub const DEFAULT_TOP_N: usize = 100;

/// A single entry in the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargestFile {
    pub index: NodeIndex,
    pub path: String,
    pub size: u64,
}

/// Indices of the `n` largest files, largest first; equal sizes order by
/// path so reruns agree.
///
/// `select_nth_unstable_by` brings the top `n` to the front in O(len), then
/// only those are sorted.
pub fn largest_files(forest: &crate::model::FileForest, n: usize) -> Vec<LargestFile> {
    if n == 0 {
        return Vec::new();
    }

    let mut files: Vec<LargestFile> = forest
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| !node.is_dir)
        .map(|(i, node)| LargestFile {
            index: NodeIndex::new(i),
            path: node.path.clone(),
            size: node.size,
        })
        .collect();

    let order = |a: &LargestFile, b: &LargestFile| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path));
    if files.len() > n {
        files.select_nth_unstable_by(n - 1, order);
        files.truncate(n);
    }
    files.sort_unstable_by(order);
    files
}

pub struct LargestFilesAnalyser {
    forest: SharedForest,
    paths: SharedPaths,
    limit: usize,
    files: Option<Vec<LargestFile>>,
}

impl LargestFilesAnalyser {
    pub fn new(forest: SharedForest, paths: SharedPaths) -> Self {
        Self {
            forest,
            paths,
            limit: DEFAULT_TOP_N,
            files: None,
        }
    }

    /// Factory matching the registry's construction contract.
    pub fn create(forest: SharedForest, paths: SharedPaths) -> Result<Box<dyn Analyser>, InitError> {
        Ok(Box::new(Self::new(forest, paths)))
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn files(&self) -> Option<&[LargestFile]> {
        self.files.as_deref()
    }
}

impl Analyser for LargestFilesAnalyser {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn analyse(&mut self) -> Result<(), AnalysisError> {
        require_trees(&self.forest)?;
        self.files = Some(largest_files(&self.forest, self.limit));
        Ok(())
    }

    fn report(&self) -> Result<ReportDocument, ReportError> {
        let files = self.files.as_ref().ok_or(ReportError::NotAnalysed)?;
        let mut doc = ReportDocument::new(NAME, DESCRIPTION, &self.paths).columns(&[
            "Rank",
            "Path",
            "Size (bytes)",
            "Size",
        ]);
        for (rank, file) in files.iter().enumerate() {
            doc.push_row(vec![
                Cell::from(rank as u64 + 1),
                Cell::from(file.path.as_str()),
                Cell::from(file.size),
                Cell::from(format_size(file.size)),
            ]);
        }
        doc.push_summary("Limit", self.limit);
        Ok(doc)
    }
}
