use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::ListingPolicy;

/// Children of one directory, split by whether their names can be translated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub names: Vec<String>,
    /// Names that are not valid UTF-8, rendered lossily.
    pub undecodable: Vec<String>,
}

/// Lists the immediate children of a directory, non-recursively.
pub trait FolderLister {
    fn list(&self, dir: &Path) -> io::Result<Listing>;
}

#[derive(Debug, Clone, Default)]
pub struct FsLister {
    policy: ListingPolicy,
}

impl FsLister {
    pub fn new(policy: ListingPolicy) -> Self {
        Self { policy }
    }

    fn accepts(&self, name: &str, is_symlink: bool) -> bool {
        if !self.policy.include_hidden && name.starts_with('.') {
            return false;
        }
        if !self.policy.include_symlinks && is_symlink {
            return false;
        }
        true
    }
}

impl FolderLister for FsLister {
    fn list(&self, dir: &Path) -> io::Result<Listing> {
        let mut listing = Listing::default();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();

            let is_symlink = entry
                .file_type()
                .map(|ft| ft.is_symlink())
                .unwrap_or(false);

            if !self.accepts(&name, is_symlink) {
                debug!("Excluded by listing policy: {}", name);
                continue;
            }

            if file_name.to_str().is_some() {
                listing.names.push(name.into_owned());
            } else {
                warn!("Entry {:?} in {:?} is not valid UTF-8", file_name, dir);
                listing.undecodable.push(name.into_owned());
            }
        }

        // read_dir order is platform dependent
        listing.names.sort();
        listing.undecodable.sort();
        Ok(listing)
    }
}
