/// Per-file listing: every file under every root with its size, type,
/// visibility and depth.
use super::analyser::{require_trees, Analyser, SharedForest, SharedPaths};
use crate::error::{AnalysisError, InitError, ReportError};
use crate::model::size::{format_count, format_size, to_kib};
use crate::report::{Cell, ReportDocument};
use std::path::Path;

const NAME: &str = "File Info Analysis";
const DESCRIPTION: &str = "Provides information on files under the selected paths";

/// One file's row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Path relative to its tree's root, without a leading separator.
    pub relative_path: String,
    pub size: u64,
    pub file_type: String,
    pub hidden: bool,
    pub root_path: String,
    pub depth: u32,
}

pub struct FileInfoAnalyser {
    forest: SharedForest,
    paths: SharedPaths,
    files: Option<Vec<FileInfo>>,
}

impl FileInfoAnalyser {
    pub fn new(forest: SharedForest, paths: SharedPaths) -> Self {
        Self {
            forest,
            paths,
            files: None,
        }
    }

    /// Factory matching the registry's construction contract.
    pub fn create(forest: SharedForest, paths: SharedPaths) -> Result<Box<dyn Analyser>, InitError> {
        Ok(Box::new(Self::new(forest, paths)))
    }

    pub fn files(&self) -> Option<&[FileInfo]> {
        self.files.as_deref()
    }
}

impl Analyser for FileInfoAnalyser {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn analyse(&mut self) -> Result<(), AnalysisError> {
        let forest = &self.forest;
        require_trees(forest)?;

        let mut files = Vec::new();
        for &root in &forest.roots {
            let root_path = forest.node(root).path.as_str();
            for idx in forest.tree_nodes(root) {
                let node = forest.node(idx);
                if node.is_dir {
                    continue;
                }
                let relative = Path::new(&node.path)
                    .strip_prefix(root_path)
                    .map(|rel| rel.to_string_lossy())
                    .unwrap_or_else(|_| node.path.as_str().into());
                files.push(FileInfo {
                    relative_path: relative.into_owned(),
                    size: node.size,
                    file_type: node.file_type.to_string(),
                    hidden: node.hidden,
                    root_path: root_path.to_string(),
                    depth: node.depth,
                });
            }
        }
        self.files = Some(files);
        Ok(())
    }

    fn report(&self) -> Result<ReportDocument, ReportError> {
        let files = self.files.as_ref().ok_or(ReportError::NotAnalysed)?;
        let mut doc = ReportDocument::new(NAME, DESCRIPTION, &self.paths).columns(&[
            "File Path",
            "File Size (KB)",
            "File Type",
            "Hidden",
            "Root Path",
            "Depth",
        ]);
        for file in files {
            doc.push_row(vec![
                Cell::from(file.relative_path.as_str()),
                Cell::from(to_kib(file.size)),
                Cell::from(file.file_type.as_str()),
                Cell::from(file.hidden),
                Cell::from(file.root_path.as_str()),
                Cell::from(file.depth),
            ]);
        }
        let total: u64 = files.iter().map(|f| f.size).sum();
        doc.push_summary("Files", format_count(files.len() as u64));
        doc.push_summary("Total size", format_size(total));
        Ok(doc)
    }
}
