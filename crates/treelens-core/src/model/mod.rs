/// Data model for the file forest.
///
/// Re-exports the arena-allocated forest and supporting types.
pub mod forest;
pub mod size;
pub mod tree_node;

pub use forest::{BreadthFirst, Children, FileForest};
pub use tree_node::{file_type_of, NodeIndex, TreeNode, DIRECTORY_TYPE};
