use std::fs;
use std::path::Path;

use crate::error::FileSystemError;

/// Renames one directory entry to another path in the same folder.
pub trait Renamer {
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FileSystemError>;
}

/// `fs::rename` with a guard against clobbering an existing destination,
/// which POSIX rename would otherwise replace silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRenamer;

impl Renamer for FsRenamer {
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FileSystemError> {
        if fs::symlink_metadata(from).is_err() {
            return Err(FileSystemError::SourceNotFound);
        }

        // Case-only renames on case-insensitive filesystems resolve `to` to `from`
        if fs::symlink_metadata(to).is_ok() && !same_entry(from, to) {
            return Err(FileSystemError::AlreadyExists);
        }

        fs::rename(from, to).map_err(FileSystemError::from)
    }
}

fn same_entry(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
