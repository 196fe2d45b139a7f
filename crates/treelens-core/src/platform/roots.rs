/// Default filesystem roots, used when a run names no roots of its own.
use std::path::PathBuf;

/// Every filesystem root the operating system exposes.
///
/// Unix has a single root. On Windows each drive letter with a mounted
/// volume is a root; unmounted letters are skipped.
#[cfg(not(windows))]
pub fn default_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("/")]
}

/// Every filesystem root the operating system exposes.
///
/// Unix has a single root. On Windows each drive letter with a mounted
/// volume is a root; unmounted letters are skipped.
#[cfg(windows)]
pub fn default_roots() -> Vec<PathBuf> {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use windows::Win32::Storage::FileSystem::GetLogicalDriveStringsW;

    // Null-separated drive roots such as `C:\` and `D:\`.
    let mut buffer = [0u16; 256];
    let len = unsafe { GetLogicalDriveStringsW(Some(&mut buffer)) } as usize;
    if len == 0 || len > buffer.len() {
        tracing::warn!("GetLogicalDriveStringsW returned {len}");
        return Vec::new();
    }

    let roots: Vec<PathBuf> = OsString::from_wide(&buffer[..len])
        .to_string_lossy()
        .split('\0')
        .filter(|root| !root.is_empty())
        .map(PathBuf::from)
        .collect();
    if roots.is_empty() {
        tracing::warn!("no mounted drive letters found");
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roots_exist() {
        let roots = default_roots();
        assert!(!roots.is_empty());
        for root in roots {
            assert!(root.exists(), "{} should exist", root.display());
        }
    }
}
