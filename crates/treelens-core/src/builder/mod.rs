/// Tree builder: walks each requested root into one tree of the forest.
///
/// The walk is breadth-first and iterative. A queue holds
/// `(parent, path, depth)` work items seeded with the root and a `None`
/// parent. Each item is checked against the depth limit *before* it is
/// linked, so an over-depth entry is discarded rather than attached and
/// pruned later. Directories that cannot be listed contribute zero
/// children; the walk carries on.
pub mod filter;
pub mod fs;

use crate::error::ConfigError;
use crate::model::{FileForest, NodeIndex, TreeNode};
pub use filter::EntryFilter;
pub use fs::{EntryMeta, FileSystem, LocalFileSystem};

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Depth limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: u32 = 1000;

/// Traversal options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Deepest depth kept in the tree; the root is depth 1.
    pub max_depth: u32,
    /// Glob patterns matched against entry names.
    pub ignore: Vec<String>,
    /// File types to keep. Empty keeps all files.
    pub type_filters: Vec<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ignore: Vec::new(),
            type_filters: Vec::new(),
        }
    }
}

/// Counters gathered during one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub files: u64,
    pub dirs: u64,
    /// Requested roots that could not be stat'ed.
    pub skipped_roots: Vec<PathBuf>,
    /// Directories whose children could not be listed.
    pub unreadable_dirs: u64,
    /// Entries whose metadata could not be read.
    pub unreadable_entries: u64,
    /// Entries dropped for exceeding the depth limit.
    pub beyond_max_depth: u64,
    /// Entries dropped by the ignore list or type filters.
    pub filtered: u64,
    pub duration: Duration,
}

/// A built forest together with its walk statistics.
#[derive(Debug)]
pub struct BuildOutput {
    pub forest: FileForest,
    pub stats: BuildStats,
}

/// Pending work item.
struct Pending {
    parent: Option<NodeIndex>,
    path: PathBuf,
    depth: u32,
}

/// Builds a [`FileForest`] from filesystem roots.
pub struct TreeBuilder<F: FileSystem = LocalFileSystem> {
    options: BuildOptions,
    filter: EntryFilter,
    fs: F,
}

impl TreeBuilder<LocalFileSystem> {
    /// Builder over the real filesystem.
    pub fn new(options: BuildOptions) -> Result<Self, ConfigError> {
        Self::with_filesystem(options, LocalFileSystem)
    }
}

impl<F: FileSystem> TreeBuilder<F> {
    /// Builder over a caller-supplied filesystem.
    pub fn with_filesystem(options: BuildOptions, fs: F) -> Result<Self, ConfigError> {
        if options.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth(0));
        }
        let filter = EntryFilter::compile(&options.ignore, &options.type_filters)?;
        Ok(Self {
            options,
            filter,
            fs,
        })
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build one tree per root that can be stat'ed, in request order.
    ///
    /// An empty `roots` slice falls back to the platform's default roots.
    pub fn build(&self, roots: &[PathBuf]) -> BuildOutput {
        let start = Instant::now();
        let roots: Vec<PathBuf> = if roots.is_empty() {
            let defaults = crate::platform::default_roots();
            info!("No roots requested, using {} default root(s)", defaults.len());
            defaults
        } else {
            roots.to_vec()
        };

        let mut forest = FileForest::with_capacity(1024);
        let mut stats = BuildStats::default();

        for root in &roots {
            let root = absolute(root);
            match self.build_tree(&mut forest, &mut stats, root.clone()) {
                Some(idx) => debug!("Built tree for {} at {:?}", root.display(), idx),
                None => stats.skipped_roots.push(root),
            }
        }

        stats.duration = start.elapsed();
        info!(
            "Built {} tree(s): {} files, {} dirs in {:?}",
            forest.roots.len(),
            stats.files,
            stats.dirs,
            stats.duration
        );
        BuildOutput { forest, stats }
    }

    /// Walk a single root. Returns `None` if the root itself is unusable.
    fn build_tree(
        &self,
        forest: &mut FileForest,
        stats: &mut BuildStats,
        root: PathBuf,
    ) -> Option<NodeIndex> {
        let mut queue: VecDeque<Pending> = VecDeque::new();
        queue.push_back(Pending {
            parent: None,
            path: root,
            depth: 1,
        });
        let mut root_idx = None;

        while let Some(item) = queue.pop_front() {
            if item.depth > self.options.max_depth {
                stats.beyond_max_depth += 1;
                continue;
            }

            let meta = match self.fs.stat(&item.path) {
                Ok(meta) => meta,
                Err(err) => {
                    if item.parent.is_none() {
                        warn!("Skipping root {}: {err}", item.path.display());
                        return None;
                    }
                    stats.unreadable_entries += 1;
                    debug!("Cannot stat {}: {err}", item.path.display());
                    continue;
                }
            };

            let node = make_node(&item.path, item.parent.is_none(), item.depth, meta);

            if item.parent.is_some() && !self.filter.is_passthrough() {
                let dropped = self.filter.is_ignored(&node.name)
                    || (!node.is_dir && !self.filter.accepts_file_type(&node.file_type));
                if dropped {
                    stats.filtered += 1;
                    continue;
                }
            }

            let is_dir = node.is_dir;
            let idx = match item.parent {
                None => {
                    let idx = forest.add_root(node);
                    root_idx = Some(idx);
                    idx
                }
                Some(parent) => forest.add_child(parent, node),
            };
            if is_dir {
                stats.dirs += 1;
            } else {
                stats.files += 1;
                continue;
            }

            match self.fs.list_children(&item.path) {
                Ok(children) => {
                    queue.extend(children.into_iter().map(|path| Pending {
                        parent: Some(idx),
                        path,
                        depth: item.depth + 1,
                    }));
                }
                Err(err) => {
                    stats.unreadable_dirs += 1;
                    warn!("Cannot list {}: {err}", item.path.display());
                }
            }
        }

        root_idx
    }
}

/// Construct a node from a path and its metadata.
fn make_node(path: &Path, is_root: bool, depth: u32, meta: EntryMeta) -> TreeNode {
    let path_str = path.to_string_lossy();
    let name = if is_root {
        path_str.clone()
    } else {
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path_str.clone())
    };

    let node = if meta.is_dir {
        TreeNode::new_dir(&path_str, &name, depth)
    } else {
        let mut file = TreeNode::new_file(&path_str, &name, meta.size, depth);
        if let Some(file_name) = path.file_name() {
            file.file_type = crate::model::file_type_of(&file_name.to_string_lossy());
        }
        file
    };
    node.with_hidden(meta.hidden && !is_root)
        .with_modified(meta.modified)
}

/// Make `path` absolute against the current directory, leaving it alone
/// if that is impossible. Trailing separators are dropped; a bare
/// filesystem root keeps its own.
fn absolute(path: &Path) -> PathBuf {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;

    /// In-memory filesystem: directories map to child lists, everything
    /// else is a file. Paths listed in `unreadable` fail to list.
    #[derive(Default)]
    struct FakeFs {
        dirs: HashMap<PathBuf, Vec<PathBuf>>,
        files: HashMap<PathBuf, u64>,
        unreadable: Vec<PathBuf>,
    }

    impl FakeFs {
        fn dir(mut self, path: &str, children: &[&str]) -> Self {
            let path = PathBuf::from(path);
            let kids = children.iter().map(|c| path.join(c)).collect();
            self.dirs.insert(path, kids);
            self
        }

        fn file(mut self, path: &str, size: u64) -> Self {
            self.files.insert(PathBuf::from(path), size);
            self
        }

        fn unreadable(mut self, path: &str) -> Self {
            self.unreadable.push(PathBuf::from(path));
            self
        }
    }

    impl FileSystem for FakeFs {
        fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
            if self.unreadable.iter().any(|p| p == dir) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.dirs
                .get(dir)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such dir"))
        }

        fn stat(&self, path: &Path) -> io::Result<EntryMeta> {
            if self.dirs.contains_key(path) {
                return Ok(EntryMeta {
                    is_dir: true,
                    size: 0,
                    hidden: false,
                    modified: None,
                });
            }
            match self.files.get(path) {
                Some(&size) => Ok(EntryMeta {
                    is_dir: false,
                    size,
                    hidden: false,
                    modified: None,
                }),
                None => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
            }
        }
    }

    fn sample_fs() -> FakeFs {
        FakeFs::default()
            .dir("/r", &["a.txt", "b.txt", "sub"])
            .dir("/r/sub", &["c.log", "deeper"])
            .dir("/r/sub/deeper", &["d.rs"])
            .file("/r/a.txt", 1)
            .file("/r/b.txt", 2)
            .file("/r/sub/c.log", 3)
            .file("/r/sub/deeper/d.rs", 4)
    }

    fn build(fs: FakeFs, options: BuildOptions, roots: &[&str]) -> BuildOutput {
        let roots: Vec<PathBuf> = roots.iter().map(PathBuf::from).collect();
        TreeBuilder::with_filesystem(options, fs).unwrap().build(&roots)
    }

    #[test]
    fn builds_full_tree_breadth_first() {
        let out = build(sample_fs(), BuildOptions::default(), &["/r"]);
        assert_eq!(out.forest.roots.len(), 1);
        assert_eq!(out.forest.len(), 7);
        assert_eq!(out.stats.files, 4);
        assert_eq!(out.stats.dirs, 3);

        // Breadth-first insertion: every depth-2 node precedes every depth-3 node.
        let depths: Vec<u32> = out.forest.nodes.iter().map(|n| n.depth).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn max_depth_discards_deeper_nodes() {
        let options = BuildOptions {
            max_depth: 2,
            ..BuildOptions::default()
        };
        let out = build(sample_fs(), options, &["/r"]);
        assert!(out.forest.nodes.iter().all(|n| n.depth <= 2));
        // root + a.txt + b.txt + sub
        assert_eq!(out.forest.len(), 4);
        assert_eq!(out.stats.beyond_max_depth, 2);
    }

    #[test]
    fn max_depth_one_keeps_only_the_root() {
        let options = BuildOptions {
            max_depth: 1,
            ..BuildOptions::default()
        };
        let out = build(sample_fs(), options, &["/r"]);
        assert_eq!(out.forest.len(), 1);
        assert!(out.forest.node(out.forest.roots[0]).first_child.is_none());
    }

    #[test]
    fn zero_max_depth_is_rejected() {
        let options = BuildOptions {
            max_depth: 0,
            ..BuildOptions::default()
        };
        assert!(TreeBuilder::with_filesystem(options, FakeFs::default()).is_err());
    }

    #[test]
    fn unreadable_directory_has_no_children() {
        let fs = sample_fs().unreadable("/r/sub");
        let out = build(fs, BuildOptions::default(), &["/r"]);
        let sub = out
            .forest
            .nodes
            .iter()
            .find(|n| n.name == "sub")
            .expect("sub is still present");
        assert!(sub.first_child.is_none());
        assert_eq!(out.stats.unreadable_dirs, 1);
        assert_eq!(out.stats.files, 2);
    }

    #[test]
    fn missing_root_is_skipped_and_others_still_build() {
        let fs = sample_fs().dir("/other", &[]);
        let out = build(fs, BuildOptions::default(), &["/r", "/missing", "/other"]);
        assert_eq!(out.forest.roots.len(), 2);
        assert_eq!(out.stats.skipped_roots, vec![PathBuf::from("/missing")]);
        assert_eq!(out.forest.node(out.forest.roots[1]).id, "/other");
    }

    #[test]
    fn multiple_roots_stay_separate_trees() {
        let fs = sample_fs().dir("/s", &["x.md"]).file("/s/x.md", 9);
        let out = build(fs, BuildOptions::default(), &["/r", "/s"]);
        assert_eq!(out.forest.roots.len(), 2);
        let second = out.forest.roots[1];
        let members: Vec<_> = out.forest.tree_nodes(second).collect();
        assert_eq!(members.len(), 2);
        for idx in members {
            assert_eq!(out.forest.tree_of(idx), second);
        }
    }

    #[test]
    fn ignore_prunes_whole_subtree() {
        let options = BuildOptions {
            ignore: vec!["sub".to_string()],
            ..BuildOptions::default()
        };
        let out = build(sample_fs(), options, &["/r"]);
        assert!(out.forest.nodes.iter().all(|n| !n.id.starts_with("/r/sub")));
        assert_eq!(out.stats.files, 2);
        assert_eq!(out.stats.filtered, 1);
    }

    #[test]
    fn type_filters_drop_files_but_keep_directories() {
        let options = BuildOptions {
            type_filters: vec!["rs".to_string()],
            ..BuildOptions::default()
        };
        let out = build(sample_fs(), options, &["/r"]);
        let files: Vec<&str> = out
            .forest
            .nodes
            .iter()
            .filter(|n| !n.is_dir)
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(files, vec!["d.rs"]);
        assert_eq!(out.stats.dirs, 3);
    }

    #[test]
    fn root_is_never_filtered() {
        let options = BuildOptions {
            ignore: vec!["*".to_string()],
            ..BuildOptions::default()
        };
        let out = build(sample_fs(), options, &["/r"]);
        assert_eq!(out.forest.len(), 1);
    }

    #[test]
    fn a_file_can_be_a_root() {
        let out = build(sample_fs(), BuildOptions::default(), &["/r/a.txt"]);
        assert_eq!(out.forest.len(), 1);
        let root = out.forest.node(out.forest.roots[0]);
        assert!(!root.is_dir);
        assert_eq!(root.file_type, "txt");
        assert_eq!(root.size, 1);
    }

    #[cfg(unix)]
    #[test]
    fn trailing_separator_on_a_root_is_dropped() {
        let out = build(sample_fs(), BuildOptions::default(), &["/r/"]);
        assert_eq!(out.forest.roots.len(), 1);
        let root = out.forest.node(out.forest.roots[0]);
        assert_eq!(root.path, "/r");
        assert_eq!(root.name, "/r");
        assert!(out.forest.nodes.iter().any(|n| n.path == "/r/sub/c.log"));
    }

    #[cfg(unix)]
    #[test]
    fn filesystem_root_keeps_its_separator() {
        assert_eq!(absolute(Path::new("/")).to_str(), Some("/"));
        assert_eq!(absolute(Path::new("/srv//data/")).to_str(), Some("/srv/data"));
    }

    #[test]
    fn file_root_type_ignores_dots_in_parent_dirs() {
        let fs = FakeFs::default().file("/srv/v1.2/README", 5);
        let out = build(fs, BuildOptions::default(), &["/srv/v1.2/README"]);
        assert_eq!(out.forest.node(out.forest.roots[0]).file_type, "");
    }
}
