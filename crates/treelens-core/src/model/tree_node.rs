/// A single node in the arena-allocated file forest.
///
/// Nodes are stored in a flat `Vec<TreeNode>` owned by [`FileForest`].
/// Parent-child relationships use indices rather than pointers, so the
/// parent link is a plain back-reference and never participates in
/// ownership.
///
/// [`FileForest`]: super::FileForest
use compact_str::CompactString;
use std::time::SystemTime;

/// File type recorded for every directory node.
pub const DIRECTORY_TYPE: &str = "directory";

/// Lightweight index into the arena `Vec<TreeNode>`.
///
/// Uses `u32` to keep nodes small; four billion entries is well past any
/// forest this tool will hold in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One filesystem entry captured at build time.
///
/// Everything an analyser needs is copied in here so analysers never touch
/// the live filesystem.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Stable identity: the absolute path at build time.
    pub id: CompactString,

    /// Display path. Starts equal to `id` but may be rewritten by
    /// [`FileForest::relocate`](super::FileForest::relocate).
    pub path: String,

    /// Final path component (the root keeps its full path here).
    pub name: CompactString,

    /// `true` if this node represents a directory.
    pub is_dir: bool,

    /// `"directory"` for directories, otherwise the extension of `name`
    /// (possibly empty).
    pub file_type: CompactString,

    /// The entry's own length in bytes. Directories record 0.
    pub size: u64,

    /// Distance from the root, root = 1.
    pub depth: u32,

    /// Platform visibility flag.
    pub hidden: bool,

    /// Last-modified timestamp, used by the stale-files analyser.
    pub modified: Option<SystemTime>,

    /// Owning parent. `None` for tree roots.
    pub parent: Option<NodeIndex>,

    /// First child (directories only). Children form a singly-linked list
    /// via [`next_sibling`](Self::next_sibling) in enumeration order.
    pub first_child: Option<NodeIndex>,

    /// Tail of the child list, kept so appends stay O(1).
    pub last_child: Option<NodeIndex>,

    /// Next sibling under the same parent.
    pub next_sibling: Option<NodeIndex>,
}

impl TreeNode {
    /// Create a file node. `file_type` is derived from `name`.
    pub fn new_file(path: &str, name: &str, size: u64, depth: u32) -> Self {
        Self {
            id: CompactString::new(path),
            path: path.to_string(),
            name: CompactString::new(name),
            is_dir: false,
            file_type: file_type_of(name),
            size,
            depth,
            hidden: false,
            modified: None,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }

    /// Create a directory node.
    pub fn new_dir(path: &str, name: &str, depth: u32) -> Self {
        Self {
            id: CompactString::new(path),
            path: path.to_string(),
            name: CompactString::new(name),
            is_dir: true,
            file_type: CompactString::const_new(DIRECTORY_TYPE),
            size: 0,
            depth,
            hidden: false,
            modified: None,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }

    /// Builder-style setter for the hidden flag.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Builder-style setter for the modification time.
    pub fn with_modified(mut self, modified: Option<SystemTime>) -> Self {
        self.modified = modified;
        self
    }

    /// `true` for tree roots.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Extension of a file name: everything after the last `.`, or empty when
/// the name has no `.` at all. `".bashrc"` yields `"bashrc"`.
pub fn file_type_of(name: &str) -> CompactString {
    match name.rsplit_once('.') {
        Some((_, ext)) => CompactString::new(ext),
        None => CompactString::default(),
    }
}
