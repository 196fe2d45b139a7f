/// Filesystem access used by the tree builder.
///
/// The builder only ever lists a directory and stats an entry. Keeping that
/// behind a trait lets tests inject unreadable directories without relying
/// on the permissions of the machine running them.
use crate::platform;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Metadata captured for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub is_dir: bool,
    pub size: u64,
    pub hidden: bool,
    pub modified: Option<SystemTime>,
}

/// Read-only view of a filesystem.
pub trait FileSystem {
    /// Direct children of `dir`, in enumeration order.
    fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Metadata for `path`. Symbolic links are reported as themselves.
    fn stat(&self, path: &Path) -> io::Result<EntryMeta>;
}

/// The real filesystem via `std::fs`. Symlinks are never followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(dir)? {
            match entry {
                Ok(entry) => children.push(entry.path()),
                Err(err) => {
                    tracing::debug!("skipping unreadable entry in {}: {err}", dir.display());
                }
            }
        }
        Ok(children)
    }

    fn stat(&self, path: &Path) -> io::Result<EntryMeta> {
        let meta = fs::symlink_metadata(path)?;
        let is_dir = meta.is_dir();
        Ok(EntryMeta {
            is_dir,
            size: if is_dir { 0 } else { meta.len() },
            hidden: platform::is_hidden(path, &meta),
            modified: meta.modified().ok(),
        })
    }
}
