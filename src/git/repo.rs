use crate::error::{DigestError, Result};
use crate::model::{CommitRecord, RepositoryInfo, Window};
use crate::util::{base_name, relative_time};
use chrono::DateTime;
use gix::head::Kind;
use gix::{discover, ObjectId, Repository};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Shown when the current branch cannot be determined.
pub const UNKNOWN_BRANCH: &str = "unknown";

pub struct GitRepo {
    repo: Repository,
    requested: PathBuf,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`. Work trees and bare repositories
    /// are both accepted.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let requested = path.as_ref().to_path_buf();
        if !requested.is_dir() {
            return Err(DigestError::NotADirectory(requested));
        }

        let repo = discover(&requested)?;
        // gix keeps relative inputs relative (`.`, `..`); names need the real directory.
        let path = absolute(repo.workdir().unwrap_or_else(|| repo.path()));
        let requested = absolute(&requested);

        Ok(Self { repo, requested, path })
    }

    /// Top-level directory: the work tree, or the git dir of a bare repository.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self) -> RepositoryInfo {
        RepositoryInfo {
            display_name: self.display_name(),
            branch_label: self.branch_label(),
        }
    }

    fn display_name(&self) -> String {
        base_name(&self.path)
            .or_else(|| base_name(&self.requested))
            .unwrap_or_else(|| self.requested.display().to_string())
    }

    fn branch_label(&self) -> String {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(err) => {
                tracing::debug!("cannot read HEAD of {}: {err}", self.path.display());
                return UNKNOWN_BRANCH.to_string();
            }
        };

        match &head.kind {
            Kind::Symbolic(reference) => reference.name.as_ref().shorten().to_string(),
            Kind::Detached { .. } => match head.id() {
                Some(id) => format!("HEAD detached at {}", id.shorten_or_id()),
                None => UNKNOWN_BRANCH.to_string(),
            },
            // No commit to name yet.
            Kind::Unborn(_) => UNKNOWN_BRANCH.to_string(),
        }
    }

    /// Non-merge commits reachable from HEAD whose committer time falls inside
    /// `window`, newest first. The relative time describes the author date.
    pub fn recent_commits(&self, window: &Window) -> Result<Vec<CommitRecord>> {
        let mut head = self.repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;

        // Parents of these commits are not in a shallow clone's object store.
        let shallow: HashSet<ObjectId> = match self.repo.shallow_commits() {
            Ok(Some(boundary)) => boundary.iter().copied().collect(),
            Ok(None) => HashSet::new(),
            Err(err) => {
                tracing::debug!("cannot read shallow file of {}: {err}", self.path.display());
                HashSet::new()
            }
        };

        let mut found: Vec<(i64, CommitRecord)> = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut queue: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        while let Some(commit_id) = queue.pop_front() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let secs = commit.time()?.seconds;
            let Some(timestamp) = DateTime::from_timestamp(secs, 0) else {
                tracing::debug!("commit {commit_id} has an out-of-range timestamp {secs}");
                continue;
            };

            // Parents of an out-of-window commit are older still.
            if !window.contains(&timestamp) {
                continue;
            }

            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();

            if parents.len() <= 1 {
                let author = commit.author()?;
                let authored = DateTime::from_timestamp(author.seconds(), 0).unwrap_or(timestamp);
                let message = commit.message()?;
                let title = message.title.to_string();
                found.push((
                    secs,
                    CommitRecord {
                        short_hash: commit.id().shorten_or_id().to_string(),
                        author: author.name.to_string(),
                        relative_time: relative_time(&authored, &window.now),
                        subject: title.lines().next().unwrap_or("").to_string(),
                    },
                ));
            }

            if !shallow.contains(&commit_id) {
                queue.extend(parents);
            }
        }

        // Stable: equal timestamps keep walk order, children before parents.
        found.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(found.into_iter().map(|(_, record)| record).collect())
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
