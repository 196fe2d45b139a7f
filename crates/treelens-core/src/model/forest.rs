/// Arena-backed forest of file trees.
///
/// All nodes of all trees live in a single `Vec<TreeNode>`. Each requested
/// root contributes one entry to `roots`; trees never share nodes. Once the
/// builder hands the forest out it is wrapped in an `Arc` and only read.
use super::tree_node::{NodeIndex, TreeNode};
use std::collections::VecDeque;
use std::path::Path;

/// One or more independently rooted trees.
#[derive(Debug, Clone, Default)]
pub struct FileForest {
    /// Arena: every node in a flat vector.
    pub nodes: Vec<TreeNode>,

    /// Root node indices, one per tree, in build order.
    pub roots: Vec<NodeIndex>,
}

impl FileForest {
    /// Create an empty forest with pre-allocated node capacity.
    pub fn with_capacity(estimated_nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(estimated_nodes),
            roots: Vec::new(),
        }
    }

    /// Add `node` as the root of a new tree.
    pub fn add_root(&mut self, mut node: TreeNode) -> NodeIndex {
        debug_assert_eq!(node.depth, 1, "tree roots have depth 1");
        node.parent = None;
        let idx = self.push(node);
        self.roots.push(idx);
        idx
    }

    /// Append `node` as the last child of `parent` and return its index.
    ///
    /// O(1): the parent keeps a tail pointer, so enumeration order is
    /// preserved without walking the sibling list.
    pub fn add_child(&mut self, parent: NodeIndex, mut node: TreeNode) -> NodeIndex {
        debug_assert!(self.nodes[parent.idx()].is_dir, "only directories own children");
        debug_assert_eq!(
            node.depth,
            self.nodes[parent.idx()].depth + 1,
            "child depth must be parent depth + 1"
        );
        node.parent = Some(parent);
        node.next_sibling = None;
        let idx = self.push(node);

        match self.nodes[parent.idx()].last_child {
            Some(tail) => self.nodes[tail.idx()].next_sibling = Some(idx),
            None => self.nodes[parent.idx()].first_child = Some(idx),
        }
        self.nodes[parent.idx()].last_child = Some(idx);
        idx
    }

    fn push(&mut self, node: TreeNode) -> NodeIndex {
        let idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    /// Get the node at the given index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.idx()]
    }

    /// Iterate the direct children of `parent` in enumeration order.
    pub fn children(&self, parent: NodeIndex) -> Children<'_> {
        Children {
            forest: self,
            next: self.nodes[parent.idx()].first_child,
        }
    }

    /// Breadth-first iterator over every node of the tree rooted at `root`,
    /// the root included.
    pub fn tree_nodes(&self, root: NodeIndex) -> BreadthFirst<'_> {
        let mut queue = VecDeque::new();
        queue.push_back(root);
        BreadthFirst {
            forest: self,
            queue,
        }
    }

    /// Root of the tree that contains `index`.
    pub fn tree_of(&self, index: NodeIndex) -> NodeIndex {
        let mut current = index;
        while let Some(parent) = self.nodes[current.idx()].parent {
            current = parent;
        }
        current
    }

    /// Rewrite the display `path` of every node in one tree, replacing the
    /// root's current path prefix with `new_prefix`. Identities are left
    /// untouched.
    ///
    /// Prefixes are matched and joined component-wise, so a root of `/` or
    /// one spelled with a trailing separator relocates cleanly.
    pub fn relocate(&mut self, root: NodeIndex, new_prefix: &str) {
        let old_prefix = self.nodes[root.idx()].path.clone();
        let members: Vec<NodeIndex> = self.tree_nodes(root).collect();
        for idx in members {
            let node = &mut self.nodes[idx.idx()];
            let Ok(suffix) = Path::new(&node.path).strip_prefix(&old_prefix) else {
                continue;
            };
            node.path = if suffix.as_os_str().is_empty() {
                new_prefix.to_string()
            } else {
                Path::new(new_prefix).join(suffix).to_string_lossy().into_owned()
            };
        }
    }

    /// Number of non-directory nodes across the forest.
    pub fn file_count(&self) -> u64 {
        self.nodes.iter().filter(|n| !n.is_dir).count() as u64
    }

    /// Number of directory nodes across the forest, roots included.
    pub fn dir_count(&self) -> u64 {
        self.nodes.iter().filter(|n| n.is_dir).count() as u64
    }

    /// Total number of nodes in the forest.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the forest contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Iterator over a node's direct children.
pub struct Children<'a> {
    forest: &'a FileForest,
    next: Option<NodeIndex>,
}

impl Iterator for Children<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let current = self.next?;
        self.next = self.forest.nodes[current.idx()].next_sibling;
        Some(current)
    }
}

/// Queue-driven breadth-first walk, no recursion.
pub struct BreadthFirst<'a> {
    forest: &'a FileForest,
    queue: VecDeque<NodeIndex>,
}

impl Iterator for BreadthFirst<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let current = self.queue.pop_front()?;
        self.queue.extend(self.forest.children(current));
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root -> (a.txt, sub -> c.log, b.txt)
    fn sample() -> (FileForest, NodeIndex) {
        let mut forest = FileForest::with_capacity(5);
        let root = forest.add_root(TreeNode::new_dir("/r", "/r", 1));
        forest.add_child(root, TreeNode::new_file("/r/a.txt", "a.txt", 10, 2));
        let sub = forest.add_child(root, TreeNode::new_dir("/r/sub", "sub", 2));
        forest.add_child(sub, TreeNode::new_file("/r/sub/c.log", "c.log", 30, 3));
        forest.add_child(root, TreeNode::new_file("/r/b.txt", "b.txt", 20, 2));
        (forest, root)
    }

    #[test]
    fn children_keep_insertion_order() {
        let (forest, root) = sample();
        let names: Vec<&str> = forest
            .children(root)
            .map(|c| forest.node(c).name.as_str())
            .collect();
        assert_eq!(names, vec!["a.txt", "sub", "b.txt"]);
    }

    #[test]
    fn breadth_first_visits_levels_in_order() {
        let (forest, root) = sample();
        let depths: Vec<u32> = forest
            .tree_nodes(root)
            .map(|i| forest.node(i).depth)
            .collect();
        assert_eq!(depths, vec![1, 2, 2, 2, 3]);
    }

    #[test]
    fn parent_links_and_depths_agree() {
        let (forest, _) = sample();
        for node in &forest.nodes {
            match node.parent {
                Some(p) => assert_eq!(node.depth, forest.node(p).depth + 1),
                None => assert_eq!(node.depth, 1),
            }
        }
    }

    #[test]
    fn counts_split_files_and_directories() {
        let (forest, _) = sample();
        assert_eq!(forest.file_count(), 3);
        assert_eq!(forest.dir_count(), 2);
        assert_eq!(forest.len(), 5);
    }

    #[test]
    fn tree_of_walks_to_root() {
        let (mut forest, root) = sample();
        let other = forest.add_root(TreeNode::new_dir("/o", "/o", 1));
        let leaf = forest.add_child(other, TreeNode::new_file("/o/x", "x", 1, 2));
        assert_eq!(forest.tree_of(leaf), other);
        assert_eq!(forest.tree_of(NodeIndex::new(3)), root);
    }

    #[test]
    fn relocate_rewrites_paths_but_not_ids() {
        let (mut forest, root) = sample();
        forest.relocate(root, "/mnt/backup");
        let leaf = forest
            .nodes
            .iter()
            .find(|n| n.name == "c.log")
            .expect("c.log present");
        assert_eq!(leaf.path, "/mnt/backup/sub/c.log");
        assert_eq!(leaf.id, "/r/sub/c.log");
        assert_eq!(forest.node(root).path, "/mnt/backup");
    }

    #[cfg(unix)]
    #[test]
    fn relocate_keeps_separator_under_filesystem_root() {
        let mut forest = FileForest::with_capacity(3);
        let root = forest.add_root(TreeNode::new_dir("/", "/", 1));
        let etc = forest.add_child(root, TreeNode::new_dir("/etc", "etc", 2));
        forest.add_child(etc, TreeNode::new_file("/etc/hosts", "hosts", 1, 3));

        forest.relocate(root, "/mnt/backup");
        let paths: Vec<&str> = forest.nodes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["/mnt/backup", "/mnt/backup/etc", "/mnt/backup/etc/hosts"]);
    }

    #[cfg(unix)]
    #[test]
    fn relocate_handles_trailing_separators() {
        let mut forest = FileForest::with_capacity(2);
        let root = forest.add_root(TreeNode::new_dir("/r/", "/r/", 1));
        forest.add_child(root, TreeNode::new_file("/r/a.txt", "a.txt", 1, 2));

        forest.relocate(root, "/mnt/backup/");
        let paths: Vec<&str> = forest.nodes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["/mnt/backup/", "/mnt/backup/a.txt"]);
    }

    #[test]
    fn empty_forest() {
        let forest = FileForest::default();
        assert!(forest.is_empty());
        assert_eq!(forest.file_count(), 0);
    }
}
