//! Filesystem helpers for persisted state
//!
//! - `atomic_rename`: replace a file in one step (Windows needs an explicit delete)
//! - `write_atomic`: write through a sibling temp file, then rename over the target

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Cross-platform atomic rename that handles Windows file replacement.
///
/// On Unix, `fs::rename` atomically replaces the target if it exists.
/// On Windows, `fs::rename` fails if the target exists, so the target is
/// deleted first.
pub fn atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            std::fs::remove_file(dst)?;
        }
    }
    std::fs::rename(src, dst)
}

/// Write `contents` to `path` without ever leaving a half-written file behind.
///
/// Parent directories are created as needed.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = temp_sibling(path);
    fs::write(&tmp, contents)?;
    atomic_rename(&tmp, path)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
