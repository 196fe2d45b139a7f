/// File count analysis: how many files (not directories) each tree holds.
use super::analyser::{require_trees, Analyser, SharedForest, SharedPaths};
use crate::error::{AnalysisError, InitError, ReportError};
use crate::model::size::format_count;
use crate::report::{Cell, ReportDocument};

const NAME: &str = "File Count Analysis";
const DESCRIPTION: &str = "Counts how many files (not folders) are in the given filesystem";

/// Per-tree file count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootFileCount {
    pub root: String,
    pub files: u64,
}

pub struct FileCountAnalyser {
    forest: SharedForest,
    paths: SharedPaths,
    counts: Option<Vec<RootFileCount>>,
}

impl FileCountAnalyser {
    pub fn new(forest: SharedForest, paths: SharedPaths) -> Self {
        Self {
            forest,
            paths,
            counts: None,
        }
    }

    /// Factory matching the registry's construction contract.
    pub fn create(forest: SharedForest, paths: SharedPaths) -> Result<Box<dyn Analyser>, InitError> {
        Ok(Box::new(Self::new(forest, paths)))
    }

    /// Per-tree counts, available after a successful `analyse`.
    pub fn counts(&self) -> Option<&[RootFileCount]> {
        self.counts.as_deref()
    }

    /// Total across all trees, available after a successful `analyse`.
    pub fn total(&self) -> Option<u64> {
        self.counts
            .as_ref()
            .map(|counts| counts.iter().map(|c| c.files).sum())
    }
}

impl Analyser for FileCountAnalyser {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn analyse(&mut self) -> Result<(), AnalysisError> {
        let forest = &self.forest;
        require_trees(forest)?;

        let counts = forest
            .roots
            .iter()
            .map(|&root| RootFileCount {
                root: forest.node(root).path.clone(),
                files: forest
                    .tree_nodes(root)
                    .filter(|&idx| !forest.node(idx).is_dir)
                    .count() as u64,
            })
            .collect();
        self.counts = Some(counts);
        Ok(())
    }

    fn report(&self) -> Result<ReportDocument, ReportError> {
        let counts = self.counts.as_ref().ok_or(ReportError::NotAnalysed)?;
        let mut doc =
            ReportDocument::new(NAME, DESCRIPTION, &self.paths).columns(&["Path", "File Count"]);
        for count in counts {
            doc.push_row(vec![Cell::from(count.root.as_str()), Cell::from(count.files)]);
        }
        doc.push_summary("Total files", format_count(self.total().unwrap_or(0)));
        Ok(doc)
    }
}
