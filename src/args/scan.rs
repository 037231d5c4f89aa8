//! Request file discovery.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::args::registry::REQUEST_EXTENSIONS;

/// Whether the file name ends in one of the request file extensions.
pub fn is_request_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| REQUEST_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

/// Collect request files below `directory`.
///
/// Depth 1 means direct children of `directory`; `None` walks the whole tree.
/// Paths come back in the walker's order, which depends on the filesystem.
pub fn find_request_files(directory: &Path, max_depth: Option<usize>) -> io::Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(directory);
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry?;
        // `Path::is_file` follows symlinks, unlike `DirEntry::file_type`.
        if entry.path().is_file() && is_request_file(entry.path()) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}
