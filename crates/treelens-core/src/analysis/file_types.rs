/// File type counting and categorisation.
///
/// Every node is tallied under its `file_type`, so directories (roots
/// included) appear under `"directory"` and extension-less files under the
/// empty type. Each type is also mapped to a broad category (Documents,
/// Media, Code, ...) for the report.
use super::analyser::{require_trees, Analyser, SharedForest, SharedPaths};
use crate::error::{AnalysisError, InitError, ReportError};
use crate::model::DIRECTORY_TYPE;
use crate::report::{Cell, ReportDocument};
use compact_str::CompactString;
use std::collections::HashMap;

const NAME: &str = "File Type Count Analysis";
const DESCRIPTION: &str = "Counts how many files of each type are in the given filesystem";

/// Label used in reports for files without an extension.
const NO_EXTENSION_LABEL: &str = "(none)";

/// Broad file type categories for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Directories,
    Documents,
    Images,
    Video,
    Audio,
    Archives,
    Code,
    Executables,
    System,
    Other,
}

impl FileCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Directories => "Directories",
            Self::Documents => "Documents",
            Self::Images => "Images",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Archives => "Archives",
            Self::Code => "Code",
            Self::Executables => "Executables",
            Self::System => "System",
            Self::Other => "Other",
        }
    }
}

/// Categorise a recorded file type.
///
/// Extensions are lowercased into a fixed stack buffer instead of a fresh
/// `String`; anything longer than 16 bytes is `Other`.
pub fn categorise(file_type: &str) -> FileCategory {
    if file_type == DIRECTORY_TYPE {
        return FileCategory::Directories;
    }

    let bytes = file_type.as_bytes();
    if bytes.len() > 16 {
        return FileCategory::Other;
    }
    let mut lower = [0u8; 16];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let Ok(lower) = std::str::from_utf8(&lower[..bytes.len()]) else {
        return FileCategory::Other;
    };

    match lower {
        "doc" | "docx" | "pdf" | "txt" | "rtf" | "odt" | "xls" | "xlsx" | "ppt" | "pptx"
        | "csv" | "md" | "epub" => FileCategory::Documents,
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" | "ico" | "tiff" | "tif"
        | "psd" | "raw" | "heic" | "heif" => FileCategory::Images,
        "mp4" | "mkv" | "avi" | "mov" | "wmv" | "flv" | "webm" | "m4v" | "mpg" | "mpeg" => {
            FileCategory::Video
        }
        "mp3" | "wav" | "flac" | "aac" | "ogg" | "wma" | "m4a" | "opus" => FileCategory::Audio,
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" | "zst" | "iso" | "dmg" | "jar" => {
            FileCategory::Archives
        }
        "rs" | "py" | "js" | "ts" | "jsx" | "tsx" | "c" | "cpp" | "h" | "hpp" | "cs" | "java"
        | "go" | "rb" | "php" | "swift" | "kt" | "scala" | "html" | "css" | "json" | "xml"
        | "yaml" | "yml" | "toml" | "sql" | "sh" | "bat" | "ps1" => FileCategory::Code,
        "exe" | "msi" | "dll" | "so" | "dylib" | "app" | "com" => FileCategory::Executables,
        "sys" | "drv" | "inf" | "log" | "dat" | "reg" | "tmp" | "bak" | "lock" => {
            FileCategory::System
        }
        _ => FileCategory::Other,
    }
}

/// One row of the result: a type and how many nodes carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    pub file_type: CompactString,
    pub count: u64,
}

pub struct FileTypeCountAnalyser {
    forest: SharedForest,
    paths: SharedPaths,
    counts: Option<HashMap<CompactString, u64>>,
}

impl FileTypeCountAnalyser {
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

    /// Raw counts keyed by file type.
    pub fn counts(&self) -> Option<&HashMap<CompactString, u64>> {
        self.counts.as_ref()
    }

    /// Counts sorted by count descending, then type ascending.
    pub fn sorted_counts(&self) -> Option<Vec<TypeCount>> {
        let counts = self.counts.as_ref()?;
        let mut rows: Vec<TypeCount> = counts
            .iter()
            .map(|(file_type, &count)| TypeCount {
                file_type: file_type.clone(),
                count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.file_type.cmp(&b.file_type)));
        Some(rows)
    }
}

impl Analyser for FileTypeCountAnalyser {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn analyse(&mut self) -> Result<(), AnalysisError> {
        require_trees(&self.forest)?;
        let mut counts: HashMap<CompactString, u64> = HashMap::new();
        for node in &self.forest.nodes {
            *counts.entry(node.file_type.clone()).or_insert(0) += 1;
        }
        self.counts = Some(counts);
        Ok(())
    }

    fn report(&self) -> Result<ReportDocument, ReportError> {
        let rows = self.sorted_counts().ok_or(ReportError::NotAnalysed)?;
        let mut doc = ReportDocument::new(NAME, DESCRIPTION, &self.paths).columns(&[
            "File Type",
            "File Count",
            "Category",
        ]);
        let distinct = rows.len();
        for row in rows {
            let label = if row.file_type.is_empty() {
                NO_EXTENSION_LABEL
            } else {
                row.file_type.as_str()
            };
            doc.push_row(vec![
                Cell::from(label),
                Cell::from(row.count),
                Cell::from(categorise(&row.file_type).label()),
            ]);
        }
        doc.push_summary("Distinct types", distinct);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileForest, TreeNode};
    use std::sync::Arc;

    // ── categorise ───────────────────────────────────────────────────────

    #[test]
    fn categorise_known_extensions() {
        for ext in ["jpg", "png", "heic"] {
            assert_eq!(categorise(ext), FileCategory::Images, "expected Images for .{ext}");
        }
        for ext in ["rs", "py", "toml"] {
            assert_eq!(categorise(ext), FileCategory::Code, "expected Code for .{ext}");
        }
        assert_eq!(categorise("log"), FileCategory::System);
        assert_eq!(categorise("txt"), FileCategory::Documents);
    }

    #[test]
    fn categorise_is_case_insensitive() {
        assert_eq!(categorise("JPG"), FileCategory::Images);
        assert_eq!(categorise("Zip"), FileCategory::Archives);
    }

    #[test]
    fn categorise_directories_and_unknowns() {
        assert_eq!(categorise(DIRECTORY_TYPE), FileCategory::Directories);
        assert_eq!(categorise(""), FileCategory::Other);
        assert_eq!(categorise("averyveryverylongextension"), FileCategory::Other);
    }

    // ── analyser ─────────────────────────────────────────────────────────

    fn forest() -> SharedForest {
        let mut forest = FileForest::with_capacity(6);
        let r = forest.add_root(TreeNode::new_dir("/r", "/r", 1));
        forest.add_child(r, TreeNode::new_file("/r/a.txt", "a.txt", 1, 2));
        forest.add_child(r, TreeNode::new_file("/r/b.txt", "b.txt", 1, 2));
        let sub = forest.add_child(r, TreeNode::new_dir("/r/sub", "sub", 2));
        forest.add_child(sub, TreeNode::new_file("/r/sub/c.log", "c.log", 1, 3));
        forest.add_child(sub, TreeNode::new_file("/r/sub/README", "README", 1, 3));
        Arc::new(forest)
    }

    #[test]
    fn counts_every_node_by_type() {
        let mut analyser = FileTypeCountAnalyser::new(forest(), Arc::from(Vec::<String>::new()));
        analyser.analyse().unwrap();
        let counts = analyser.counts().unwrap();
        assert_eq!(counts.get("txt"), Some(&2));
        assert_eq!(counts.get("log"), Some(&1));
        assert_eq!(counts.get(DIRECTORY_TYPE), Some(&2));
        assert_eq!(counts.get(""), Some(&1));
    }

    #[test]
    fn report_rows_are_sorted_and_labelled() {
        let mut analyser = FileTypeCountAnalyser::new(forest(), Arc::from(Vec::<String>::new()));
        analyser.analyse().unwrap();
        let doc = analyser.report().unwrap();

        // directory=2 and txt=2 tie; ties break alphabetically.
        assert_eq!(doc.rows[0][0], Cell::from("directory"));
        assert_eq!(doc.rows[0][2], Cell::from("Directories"));
        assert_eq!(doc.rows[1][0], Cell::from("txt"));
        assert_eq!(doc.rows[2][0], Cell::from("(none)"));
        assert_eq!(doc.rows[3][0], Cell::from("log"));
        assert_eq!(doc.summary[0].value, "4");
    }

    #[test]
    fn report_before_analyse_fails() {
        let analyser = FileTypeCountAnalyser::new(forest(), Arc::from(Vec::<String>::new()));
        assert!(matches!(analyser.report(), Err(ReportError::NotAnalysed)));
    }
}
