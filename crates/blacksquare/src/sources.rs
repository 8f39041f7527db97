//! Source text collection.
//!
//! Markup is gathered from one or more root directories and handed to the
//! grammar crate as a single string. File boundaries are not preserved.
//!
//! # Traversal
//!
//! [`SourceFiles`] walks a directory tree lazily: each call to `next`
//! lists at most one directory. Entries are visited depth-first in file
//! name order, so a fixed file set always produces the same text.
//! Walking again means constructing a new `SourceFiles`.
//!
//! # Multiple Roots
//!
//! [`collect_text`] reads its roots in parallel and concatenates the
//! results in the order the roots were given.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::error::SourceError;

/// Lazy depth-first iterator over the files below a root directory.
#[derive(Debug, Clone)]
pub struct SourceFiles {
    stack: Vec<PathBuf>,
}

impl SourceFiles {
    /// Starts a walk at `root`.
    ///
    /// A missing root yields no files. A root that is a file yields itself.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            stack: vec![root.into()],
        }
    }
}

impl Iterator for SourceFiles {
    type Item = Result<PathBuf, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.stack.pop() {
            if path.is_dir() {
                match list_sorted(&path) {
                    Ok(children) => self.stack.extend(children.into_iter().rev()),
                    Err(e) => return Some(Err(e)),
                }
            } else if path.is_file() {
                return Some(Ok(path));
            }
        }
        None
    }
}

fn list_sorted(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let entries = std::fs::read_dir(dir).map_err(|source| SourceError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SourceError::ListDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_symlink = entry.file_type().is_ok_and(|t| t.is_symlink());
        if is_symlink && path.is_dir() {
            debug!(path = %path.display(), "not following symlinked directory");
            continue;
        }
        children.push(path);
    }
    children.sort();
    Ok(children)
}

/// Returns `true` if the file name ends with `.<extension>`.
///
/// The configured extension may be written with or without its dot.
pub fn matches_extension(path: &Path, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        return false;
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(extension))
        .is_some_and(|stem| stem.ends_with('.'))
}

/// Concatenates every matching file below `root`.
///
/// Returns an empty string if `root` does not exist.
///
/// # Errors
///
/// Returns an error if a directory inside the tree cannot be listed or a
/// matching file cannot be read as UTF-8 text.
pub fn read_sources(root: &Path, extension: &str) -> Result<String, SourceError> {
    if !root.exists() {
        debug!(root = %root.display(), "source root does not exist, skipping");
        return Ok(String::new());
    }

    let mut text = String::new();
    let mut files = 0usize;
    for path in SourceFiles::new(root) {
        let path = path?;
        if !matches_extension(&path, extension) {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|source| SourceError::ReadFile {
            path: path.clone(),
            source,
        })?;
        text.push_str(&content);
        files += 1;
    }

    debug!(root = %root.display(), files, bytes = text.len(), "read sources");
    Ok(text)
}

/// Reads several roots concurrently and concatenates them in order.
pub fn collect_text(roots: &[PathBuf], extension: &str) -> Result<String, SourceError> {
    let texts = roots
        .par_iter()
        .map(|root| read_sources(root, extension))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(texts.concat())
}
