/// Platform visibility flag for a directory entry.
use std::fs::Metadata;
use std::path::Path;

/// Whether the entry is hidden on this platform.
///
/// Windows reads the hidden attribute; elsewhere the dot-file convention
/// applies. Filesystem roots are never hidden.
#[cfg(windows)]
pub fn is_hidden(_path: &Path, meta: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    use windows::Win32::Storage::FileSystem::FILE_ATTRIBUTE_HIDDEN;
    meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN.0 != 0
}

/// Whether the entry is hidden on this platform.
///
/// Windows reads the hidden attribute; elsewhere the dot-file convention
/// applies. Filesystem roots are never hidden.
#[cfg(not(windows))]
pub fn is_hidden(path: &Path, _meta: &Metadata) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
