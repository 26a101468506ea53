use crate::model::{CommitRecord, DigestReport, RepositoryInfo, ScanResult};
use std::path::PathBuf;

/// Running totals for one scan, fed in resolution order.
#[derive(Debug)]
pub struct Aggregator {
    window_hours: u32,
    scanned: usize,
    results: Vec<ScanResult>,
}

impl Aggregator {
    pub fn new(window_hours: u32) -> Self {
        Self {
            window_hours,
            scanned: 0,
            results: Vec::new(),
        }
    }

    /// Count a resolved path that produced nothing to report (skipped or invalid).
    pub fn skip(&mut self) {
        self.scanned += 1;
    }

    /// Record one inspected repository. Repositories without commits are
    /// counted but get no section.
    pub fn add(&mut self, path: PathBuf, info: RepositoryInfo, commits: Vec<CommitRecord>) {
        self.scanned += 1;
        if commits.is_empty() {
            return;
        }
        self.results.push(ScanResult { path, info, commits });
    }

    pub fn finish(self) -> DigestReport {
        let total_commits = self.results.iter().map(|r| r.commits.len()).sum();
        DigestReport {
            window_hours: self.window_hours,
            active_repo_count: self.results.len(),
            total_commits,
            scanned_repo_count: self.scanned,
            results: self.results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str) -> RepositoryInfo {
        RepositoryInfo {
            display_name: name.to_string(),
            branch_label: "main".to_string(),
        }
    }

    fn commits(n: usize) -> Vec<CommitRecord> {
        (0..n)
            .map(|i| CommitRecord {
                short_hash: format!("{i:07x}"),
                author: "Ada".to_string(),
                relative_time: "1 hour ago".to_string(),
                subject: format!("change {i}"),
            })
            .collect()
    }

    #[test]
    fn totals_follow_results() {
        let mut agg = Aggregator::new(24);
        agg.add("a".into(), info("a"), commits(2));
        agg.skip();
        agg.add("b".into(), info("b"), commits(0));
        agg.add("c".into(), info("c"), commits(3));

        let report = agg.finish();
        assert_eq!(report.scanned_repo_count, 4);
        assert_eq!(report.active_repo_count, 2);
        assert_eq!(report.total_commits, 5);
        let names: Vec<_> = report.results.iter().map(|r| r.info.display_name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn duplicates_are_reported_twice() {
        let mut agg = Aggregator::new(24);
        agg.add("a".into(), info("a"), commits(1));
        agg.add("a".into(), info("a"), commits(1));

        let report = agg.finish();
        assert_eq!(report.active_repo_count, 2);
        assert_eq!(report.total_commits, 2);
    }

    #[test]
    fn empty_scan() {
        let mut agg = Aggregator::new(12);
        agg.skip();
        let report = agg.finish();
        assert!(report.is_empty());
        assert_eq!(report.scanned_repo_count, 1);
        assert_eq!(report.window_hours, 12);
    }
}
