use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub short_hash: String,
    pub author: String,
    pub relative_time: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryInfo {
    /// Base name of the repository's top-level directory.
    pub display_name: String,
    /// Current branch, `HEAD detached at <hash>`, or `unknown`.
    pub branch_label: String,
}

/// Activity for one repository. Only built for repositories that have commits
/// inside the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub path: PathBuf,
    #[serde(flatten)]
    pub info: RepositoryInfo,
    pub commits: Vec<CommitRecord>,
}

/// Everything a renderer needs for one run.
///
/// `total_commits` and `active_repo_count` are always derived from `results`;
/// build it through [`crate::aggregate::Aggregator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestReport {
    pub window_hours: u32,
    pub results: Vec<ScanResult>,
    pub total_commits: usize,
    pub active_repo_count: usize,
    pub scanned_repo_count: usize,
}

impl DigestReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DigestOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub window_hours: u32,
    pub scanned_repo_count: usize,
    pub active_repo_count: usize,
    pub total_commits: usize,
    pub repositories: Vec<ScanResult>,
}

/// Lookback window ending at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub hours: u32,
    pub now: DateTime<Utc>,
}

impl Window {
    pub fn new(hours: u32, now: DateTime<Utc>) -> Self {
        Self { hours, now }
    }

    pub fn since(&self) -> DateTime<Utc> {
        self.now - chrono::Duration::hours(i64::from(self.hours))
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        timestamp >= &self.since()
    }
}
