use crate::error::{DigestError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Deepest `.git` directory considered during root discovery, counted from the root.
pub const MAX_DISCOVERY_DEPTH: usize = 3;

/// Where the list of repositories comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    /// Comma-separated paths, scanned in the given order.
    Explicit(String),
    /// Directory searched for repositories.
    Root(PathBuf),
    /// Current working directory only.
    CurrentDir(PathBuf),
}

impl RepoSource {
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        match self {
            RepoSource::Explicit(list) => Ok(split_list(list)),
            RepoSource::Root(root) => discover(root),
            RepoSource::CurrentDir(dir) => Ok(vec![dir.clone()]),
        }
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
/// Order and duplicates are preserved.
pub fn split_list(list: &str) -> Vec<PathBuf> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Find repositories below `root` by looking for `.git` directories at most
/// [`MAX_DISCOVERY_DEPTH`] levels down.
///
/// Results are sorted component by component (`Path` ordering), so a
/// repository and everything nested in it stay together: `a/b` comes before
/// `a-b` even though `-` is a smaller byte than `/`.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(DigestError::Config(format!(
            "root directory does not exist or is not a directory: {}",
            root.display()
        )));
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .max_depth(Some(MAX_DISCOVERY_DEPTH))
        .build();

    let mut git_dirs = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        if is_dir && entry.depth() > 0 && entry.file_name() == ".git" {
            git_dirs.push(entry.into_path());
        }
    }

    git_dirs.sort();
    Ok(git_dirs
        .into_iter()
        .filter_map(|git_dir| git_dir.parent().map(Path::to_path_buf))
        .collect())
}
