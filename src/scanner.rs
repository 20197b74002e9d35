use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Error;

/// List every document under `root` whose extension equals `extension`.
///
/// Walks depth-first in directory-listing order, following symlinks.
/// Directories whose path contains any of `excluded` are pruned before
/// descending. Returned paths are prefixed with `root`.
///
/// # Errors
///
/// Returns `Error::Scan` if the root or any directory below it cannot be
/// read, or if a symlink loop is found. One unreadable directory aborts the
/// whole scan.
pub fn scan(root: &Path, extension: &str, excluded: &[String]) -> Result<Vec<PathBuf>, Error> {
    let mut documents = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| return !is_excluded_dir(e, excluded));

    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            return Error::Scan {
                path,
                reason: err.to_string(),
            };
        })?;

        if entry.file_type().is_dir() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| return ext == extension) {
            documents.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), count = documents.len(), "scan complete");
    return Ok(documents);
}

/// A directory below the root whose path mentions an excluded name.
/// The root itself is never pruned.
fn is_excluded_dir(entry: &DirEntry, excluded: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let path = entry.path().to_string_lossy();
    return excluded.iter().any(|name| return path.contains(name.as_str()));
}
